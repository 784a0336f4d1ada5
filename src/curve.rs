//! 펌프 성능곡선(유량→양정) 보간.
//!
//! 카탈로그에 표로 주어진 이산 점들 사이를 구간 선형으로 보간하며, 측정 범위
//! 밖에서는 외삽하지 않고 양 끝 값으로 고정한다.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 펌프의 측정 운전점 하나.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// 유량 [m³/h]
    pub flow: f64,
    /// 양정 [m]
    pub head: f64,
}

impl CurvePoint {
    pub fn new(flow: f64, head: f64) -> Self {
        Self { flow, head }
    }
}

/// 곡선 보간 시 발생 가능한 오류.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CurveError {
    /// 점이 하나도 없는 곡선
    #[error("invalid curve: no points")]
    Empty,
    /// 목표 유량이 유한한 실수가 아님
    #[error("invalid target flow: {0}")]
    NonFiniteFlow(f64),
}

fn by_flow(a: &CurvePoint, b: &CurvePoint) -> Ordering {
    a.flow.partial_cmp(&b.flow).unwrap_or(Ordering::Equal)
}

/// 유량 오름차순인지 확인한다.
pub fn is_sorted_by_flow(curve: &[CurvePoint]) -> bool {
    curve.windows(2).all(|w| w[0].flow <= w[1].flow)
}

/// 유량 오름차순으로 정렬된 사본을 돌려준다. 이미 정렬돼 있으면 복사하지 않는다.
pub fn sorted_by_flow(curve: &[CurvePoint]) -> Cow<'_, [CurvePoint]> {
    if is_sorted_by_flow(curve) {
        Cow::Borrowed(curve)
    } else {
        let mut owned = curve.to_vec();
        owned.sort_by(by_flow);
        Cow::Owned(owned)
    }
}

/// 목표 유량에서 펌프가 내는 양정을 구한다.
///
/// - 첫 점 유량 이하: 첫 점 양정
/// - 마지막 점 유량 이상: 마지막 점 양정
/// - 그 사이: 감싸는 구간 `[i, i+1]`에서 선형 보간
///
/// 같은 유량의 인접 점(폭 0 구간)은 앞 점의 양정을 돌려준다.
/// 입력 슬라이스는 변경하지 않는다.
pub fn head_at(curve: &[CurvePoint], target_flow: f64) -> Result<f64, CurveError> {
    if curve.is_empty() {
        return Err(CurveError::Empty);
    }
    if !target_flow.is_finite() {
        return Err(CurveError::NonFiniteFlow(target_flow));
    }
    let pts = sorted_by_flow(curve);
    let first = pts[0];
    let last = pts[pts.len() - 1];
    if target_flow <= first.flow {
        return Ok(first.head);
    }
    if target_flow >= last.flow {
        return Ok(last.head);
    }

    for w in pts.windows(2) {
        let (p0, p1) = (w[0], w[1]);
        if target_flow >= p0.flow && target_flow <= p1.flow {
            let span = p1.flow - p0.flow;
            if span == 0.0 {
                return Ok(p0.head);
            }
            return Ok(p0.head + (p1.head - p0.head) * (target_flow - p0.flow) / span);
        }
    }
    // 정렬된 곡선에서 양 끝 사이 값은 반드시 어느 구간에 속한다.
    Ok(last.head)
}

/// 곡선이 측정한 유량 범위 `(min, max)`.
pub fn flow_range(curve: &[CurvePoint]) -> Option<(f64, f64)> {
    let pts = sorted_by_flow(curve);
    Some((pts.first()?.flow, pts.last()?.flow))
}
