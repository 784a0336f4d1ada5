//! 운전점에 대한 펌프 적합성 판정과 순위 결정.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::{PowerRating, Pump};
use crate::curve;
use crate::operating_point::OperatingPoint;

/// 운전점에 대해 평가된 펌프.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPump {
    pub model: String,
    pub power: PowerRating,
    /// 요구 유량에서의 양정 [m]
    pub head_at_flow: f64,
}

/// 선정 결과. `compatible`과 `incompatible`은 입력 카탈로그를 정확히 분할한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionResult {
    pub recommended: Option<RankedPump>,
    /// 출력 오름차순
    pub compatible: Vec<RankedPump>,
    pub incompatible: Vec<Pump>,
}

impl SelectionResult {
    /// 결과 표시용 `"모델, 출력"` 문자열. 추천이 없으면 None.
    pub fn recommended_label(&self) -> Option<String> {
        self.recommended
            .as_ref()
            .map(|p| format!("{}, {}", p.model, p.power.label))
    }
}

/// 양정 조건(`head_at_flow >= 요구 양정`)을 만족하는 펌프 중 출력이 가장 낮은
/// 것을 추천한다. 출력이 같으면 카탈로그 순서가 앞선 펌프가 이긴다.
///
/// 곡선을 평가할 수 없는 펌프는 경고를 남기고 부적합으로 분류한다.
pub fn select(point: &OperatingPoint, pumps: &[Pump]) -> SelectionResult {
    let mut compatible = Vec::new();
    for pump in pumps {
        match curve::head_at(&pump.curve, point.flow_m3_per_h) {
            Ok(head) if head >= point.head_m => compatible.push(RankedPump {
                model: pump.model.clone(),
                power: pump.power.clone(),
                head_at_flow: head,
            }),
            Ok(_) => {}
            Err(e) => log::warn!("pump '{}' skipped: {e}", pump.model),
        }
    }
    // sort_by는 안정 정렬이므로 동률은 카탈로그 순서를 유지한다.
    compatible.sort_by(|a, b| a.power.magnitude.total_cmp(&b.power.magnitude));

    let chosen: HashSet<&str> = compatible.iter().map(|p| p.model.as_str()).collect();
    let incompatible = pumps
        .iter()
        .filter(|p| !chosen.contains(p.model.as_str()))
        .cloned()
        .collect();

    SelectionResult {
        recommended: compatible.first().cloned(),
        compatible,
        incompatible,
    }
}
