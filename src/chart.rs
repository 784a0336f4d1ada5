//! 차트 렌더러에 넘길 데이터.
//!
//! 색, 글꼴, 범례 같은 표현은 렌더러가 정한다. 여기서는 계열 좌표와
//! 강조할 펌프, 운전점 표식, 보조선, 축 범위만 만든다.

use serde::Serialize;

use crate::catalog::Pump;
use crate::curve;
use crate::operating_point::OperatingPoint;

/// 계열 색상표(RGB). 계열 수가 더 많으면 순환한다.
pub const PALETTE: [[u8; 3]; 6] = [
    [0xFF, 0x6B, 0x6B],
    [0x4E, 0xCD, 0xC4],
    [0x45, 0xB7, 0xD1],
    [0x96, 0xCE, 0xB4],
    [0xFF, 0xEE, 0xAD],
    [0xD4, 0xA5, 0xA5],
];

const MIN_X_MAX: f64 = 12.0;
const MIN_Y_MAX: f64 = 250.0;
pub const X_STEP: f64 = 1.0;
pub const Y_STEP: f64 = 50.0;
/// 축 하나에 그리는 최대 눈금 간격 수.
pub const MAX_TICKS: usize = 20;
/// 눈금 간격을 넓힐 때 곱하는 배율. 1, 2, 5, 10, 20, 50 … 순서가 된다.
const STEP_GROWTH: [f64; 3] = [2.0, 2.5, 2.0];

/// 펌프 하나의 곡선 계열.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PumpSeries {
    /// `"모델 (출력)"`
    pub label: String,
    pub model: String,
    /// (유량 m³/h, 양정 m)
    pub points: Vec<(f64, f64)>,
    pub highlighted: bool,
    pub palette_index: usize,
}

/// 축 범위. 최솟값은 항상 0이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub series: Vec<PumpSeries>,
    /// 운전점 (유량, 양정)
    pub operating_point: (f64, f64),
    /// 축에서 운전점까지의 점선 2개: 수평선, 수직선
    pub guides: [[(f64, f64); 2]; 2],
    pub x_axis: AxisRange,
    pub y_axis: AxisRange,
}

fn round_up(value: f64, step: f64) -> f64 {
    (value / step).ceil() * step
}

impl AxisRange {
    /// `extent`를 덮는 축. 눈금이 `MAX_TICKS`개를 넘으면 간격을 넓힌다.
    fn covering(extent: f64, min_max: f64, base_step: f64) -> Self {
        let extent = if extent.is_finite() {
            extent.max(min_max)
        } else {
            min_max
        };
        let mut step = base_step;
        let mut growth = STEP_GROWTH.iter().cycle();
        while extent / step > MAX_TICKS as f64 {
            step *= growth.next().copied().unwrap_or(10.0);
        }
        Self {
            max: round_up(extent, step),
            step,
        }
    }

    /// 0부터 `max`까지의 눈금 위치. 최대 `MAX_TICKS + 1`개.
    pub fn ticks(self) -> impl Iterator<Item = f64> {
        let n = ((self.max / self.step).round() as usize).min(MAX_TICKS);
        (0..=n).map(move |i| i as f64 * self.step)
    }
}

impl ChartData {
    /// 카탈로그 순서대로 계열을 만든다. `recommended`와 모델명이 같은 계열을 강조한다.
    pub fn build(point: &OperatingPoint, pumps: &[Pump], recommended: Option<&str>) -> Self {
        let series: Vec<PumpSeries> = pumps
            .iter()
            .enumerate()
            .map(|(i, pump)| PumpSeries {
                label: format!("{} ({})", pump.model, pump.power.label),
                model: pump.model.clone(),
                points: pump.curve.iter().map(|p| (p.flow, p.head)).collect(),
                highlighted: recommended == Some(pump.model.as_str()),
                palette_index: i % PALETTE.len(),
            })
            .collect();

        let max_flow = pumps
            .iter()
            .filter_map(|p| curve::flow_range(&p.curve).map(|(_, hi)| hi))
            .fold(point.flow_m3_per_h, f64::max);
        let max_head = pumps
            .iter()
            .flat_map(|p| p.curve.iter().map(|c| c.head))
            .fold(point.head_m, f64::max);

        let (x, y) = (point.flow_m3_per_h, point.head_m);
        Self {
            series,
            operating_point: (x, y),
            guides: [[(0.0, y), (x, y)], [(x, 0.0), (x, y)]],
            x_axis: AxisRange::covering(max_flow, MIN_X_MAX, X_STEP),
            y_axis: AxisRange::covering(max_head, MIN_Y_MAX, Y_STEP),
        }
    }
}

/// 렌더러가 소유하는 현재 차트.
///
/// 새 평가마다 이전 핸들을 넘겨받아 버리고 새 핸들을 돌려준다.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle {
    pub data: ChartData,
    pub revision: u64,
}

impl ChartHandle {
    pub fn replace(previous: Option<ChartHandle>, data: ChartData) -> ChartHandle {
        let revision = previous.map_or(0, |h| h.revision + 1);
        ChartHandle { data, revision }
    }
}
