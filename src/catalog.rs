//! 펌프 카탈로그 로딩과 스키마 검증.
//!
//! 외부 데이터(`bombas.json`)의 필드명은 `modelo`/`potencia`/`dados`
//! (`vazao`, `altura`)이며, 로드 시 한 번만 검증하여 [`Pump`]로 옮긴다.
//! 이후 카탈로그는 세션 동안 읽기 전용이다.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::{self, CurvePoint};

/// 외부 스키마의 곡선 점.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvePointRecord {
    pub vazao: f64,
    pub altura: f64,
}

/// 외부 스키마의 펌프 레코드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpRecord {
    pub modelo: String,
    pub potencia: String,
    #[serde(default)]
    pub dados: Vec<CurvePointRecord>,
}

/// 출력 표기(`"0.5 cv"`)에서 분리한 값 객체.
///
/// 비교에는 `magnitude`만 사용하고 `unit`은 해석하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRating {
    pub magnitude: f64,
    pub unit: String,
    /// 카탈로그에 적힌 원문
    pub label: String,
}

impl PowerRating {
    /// 앞쪽 숫자 부분을 크기로 읽는다. 소수점으로 쉼표도 허용한다(`"1,5 cv"`).
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let mut end = 0;
        let mut seen_digit = false;
        let mut seen_sep = false;
        for (i, c) in trimmed.char_indices() {
            match c {
                '0'..='9' => {
                    seen_digit = true;
                    end = i + 1;
                }
                '.' | ',' if !seen_sep => {
                    seen_sep = true;
                    end = i + 1;
                }
                '+' | '-' if i == 0 => end = 1,
                _ => break,
            }
        }
        if !seen_digit {
            return None;
        }
        let number = trimmed[..end].trim_end_matches(['.', ',']).replace(',', ".");
        let magnitude: f64 = number.parse().ok()?;
        if !magnitude.is_finite() || magnitude < 0.0 {
            return None;
        }
        Some(Self {
            // "-0"은 +0으로 맞춘다. 그래야 total_cmp에서 0과 같은 순위가 된다.
            magnitude: magnitude + 0.0,
            unit: trimmed[end..].trim().to_string(),
            label: trimmed.to_string(),
        })
    }
}

impl std::fmt::Display for PowerRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

/// 엔진이 다루는 펌프. 곡선은 유량 오름차순으로 보관한다.
#[derive(Debug, Clone, PartialEq)]
pub struct Pump {
    pub model: String,
    pub power: PowerRating,
    pub curve: Vec<CurvePoint>,
}

impl Pump {
    /// 곡선을 정렬한 사본으로 펌프를 만든다.
    pub fn new(model: impl Into<String>, power: PowerRating, curve: &[CurvePoint]) -> Self {
        Self {
            model: model.into(),
            power,
            curve: curve::sorted_by_flow(curve).into_owned(),
        }
    }
}

/// 로드 중 건너뛴 레코드에 대한 경고.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogWarning {
    /// 0부터 시작하는 레코드 위치
    pub index: usize,
    pub model: String,
    pub reason: SkipReason,
}

/// 레코드를 건너뛴 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BlankModel,
    InvalidPower,
    /// 곡선 점이 없음 (InvalidCurve)
    EmptyCurve,
    InvalidPoint,
}

impl std::fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            SkipReason::BlankModel => "blank model name",
            SkipReason::InvalidPower => "power label has no numeric value",
            SkipReason::EmptyCurve => "invalid curve: no points",
            SkipReason::InvalidPoint => "curve point with negative or non-numeric value",
        };
        write!(f, "record #{} '{}' skipped: {reason}", self.index, self.model)
    }
}

/// 카탈로그 로드 오류. 세션 동안 평가를 막는 치명적 오류다.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog load timed out after {0:?}")]
    Timeout(Duration),
    #[error("duplicate pump model in catalog: {0}")]
    DuplicateModel(String),
    #[error("catalog has no usable pumps")]
    Empty,
}

/// 검증을 통과한 펌프 목록.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub pumps: Vec<Pump>,
    pub warnings: Vec<CatalogWarning>,
}

impl Catalog {
    /// 외부 레코드를 검증하여 카탈로그를 만든다.
    pub fn from_records(records: Vec<PumpRecord>) -> Result<Self, CatalogError> {
        let mut pumps = Vec::with_capacity(records.len());
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (index, rec) in records.into_iter().enumerate() {
            let model = rec.modelo.trim().to_string();
            let skip = |reason| CatalogWarning {
                index,
                model: model.clone(),
                reason,
            };
            if model.is_empty() {
                warnings.push(skip(SkipReason::BlankModel));
                continue;
            }
            // 중복 검사는 레코드 내용 검증보다 먼저 한다.
            if !seen.insert(model.clone()) {
                return Err(CatalogError::DuplicateModel(model));
            }
            let Some(power) = PowerRating::parse(&rec.potencia) else {
                warnings.push(skip(SkipReason::InvalidPower));
                continue;
            };
            if rec.dados.is_empty() {
                warnings.push(skip(SkipReason::EmptyCurve));
                continue;
            }
            let valid = rec.dados.iter().all(|p| {
                p.vazao.is_finite() && p.altura.is_finite() && p.vazao >= 0.0 && p.altura >= 0.0
            });
            if !valid {
                warnings.push(skip(SkipReason::InvalidPoint));
                continue;
            }
            let points: Vec<CurvePoint> = rec
                .dados
                .iter()
                .map(|p| CurvePoint::new(p.vazao, p.altura))
                .collect();
            pumps.push(Pump::new(model, power, &points));
        }

        for w in &warnings {
            log::warn!("{w}");
        }
        if pumps.is_empty() {
            return Err(CatalogError::Empty);
        }
        log::info!(
            "catalog loaded: {} pumps, {} skipped",
            pumps.len(),
            warnings.len()
        );
        Ok(Self { pumps, warnings })
    }

    /// JSON 문자열(외부 스키마)을 해석한다.
    pub fn from_json(src: &str) -> Result<Self, CatalogError> {
        let records: Vec<PumpRecord> = serde_json::from_str(src)?;
        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.pumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pumps.is_empty()
    }

    pub fn find(&self, model: &str) -> Option<&Pump> {
        self.pumps.iter().find(|p| p.model == model)
    }
}

fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Catalog::from_json(&content)
}

/// 파일에서 카탈로그를 한 번 읽는다. `timeout` 안에 끝나지 않으면 포기한다.
///
/// 재시도는 하지 않는다. 시간 초과 시 작업 스레드는 분리된 채 남는다.
pub fn load_from_path(path: &Path, timeout: Duration) -> Result<Catalog, CatalogError> {
    let (tx, rx) = mpsc::channel();
    let owned = path.to_path_buf();
    log::debug!("loading catalog from {}", owned.display());
    thread::spawn(move || {
        // 수신 측이 이미 포기했으면 전송 실패는 무시한다.
        let _ = tx.send(read_catalog(&owned));
    });
    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(CatalogError::Timeout(timeout)),
    }
}
