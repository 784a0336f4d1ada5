use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Catalog, CatalogError};
use crate::chart::ChartData;
use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::i18n::{self, Translator};
use crate::operating_point::{self, OperatingPoint, OperatingPointInput, ValidationError};
use crate::selection::{self, SelectionResult};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 단위 해석 오류
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// 카탈로그 로드 오류
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// 운전점 입력 오류
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 차트 데이터 직렬화 오류
    #[error("chart export error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// 사용자에게 보여줄 한 줄 메시지.
    pub fn user_message(&self, tr: &Translator, catalog_path: &std::path::Path) -> String {
        match self {
            AppError::Validation(e) => tr.t(e.code.i18n_key()),
            AppError::Catalog(e) => format!(
                "{} ({e})",
                tr.fill(
                    i18n::keys::CATALOG_LOAD_ERROR,
                    &[("path", catalog_path.display().to_string())]
                )
            ),
            other => format!("{}: {other}", tr.t(i18n::keys::ERROR_PREFIX)),
        }
    }
}

/// 한 번의 평가 결과. 매 요청마다 새로 만든다.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub point: OperatingPoint,
    pub selection: SelectionResult,
    pub chart: ChartData,
}

/// 운전점 계산 → 펌프 선정 → 차트 데이터 순으로 평가한다.
///
/// 실패하면 아무 결과도 만들지 않는다.
pub fn evaluate(input: &OperatingPointInput, catalog: &Catalog) -> Result<Evaluation, AppError> {
    let point = operating_point::compute(input)?;
    let selection = selection::select(&point, &catalog.pumps);
    let recommended = selection.recommended.as_ref().map(|p| p.model.as_str());
    let chart = ChartData::build(&point, &catalog.pumps, recommended);
    log::info!(
        "evaluated Q={:.3} m3/h H={:.2} m: {} compatible, recommended={}",
        point.flow_m3_per_h,
        point.head_m,
        selection.compatible.len(),
        recommended.unwrap_or("-")
    );
    Ok(Evaluation {
        point,
        selection,
        chart,
    })
}

/// CLI 세션 상태. 카탈로그는 시작 시 한 번 로드되고 이후 읽기 전용이다.
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
    pub catalog: Result<Catalog, CatalogError>,
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    if let Err(e) = &session.catalog {
        ui_cli::print_catalog_error(session, e);
    }
    loop {
        match ui_cli::main_menu(&session.tr)? {
            MenuChoice::Sizing => ui_cli::handle_sizing(session)?,
            MenuChoice::Catalog => ui_cli::handle_catalog(session),
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.config.save_to(&session.config_path)?;
            }
            MenuChoice::Exit => {
                session.config.save_to(&session.config_path)?;
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
