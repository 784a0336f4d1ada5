//! 사용자 입력으로부터 요구 운전점(유량, 전양정)을 계산한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::{to_cubic_meter_per_hour, FlowUnit};

/// 운전점 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPointInput {
    /// 흡입 높이 h1 [m]
    pub h1_m: f64,
    /// 토출 높이 h2 [m]
    pub h2_m: f64,
    /// 수평 배관 거리 [m]
    pub distance_m: f64,
    /// 입력 단위 기준 유량
    pub flow: f64,
    pub flow_unit: FlowUnit,
    /// 일조시간(HSP) [h]. `LiterPerDay`에서만 사용
    pub solar_hours: f64,
    /// 손실 계수 k (0~1, 무차원)
    pub loss_coefficient: f64,
}

/// 요구 운전점.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub flow_m3_per_h: f64,
    pub head_m: f64,
}

/// 어떤 검증 규칙이 실패했는지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationCode {
    NonNumericInput,
    MissingSolarHours,
    NegativeValue,
    LossCoefficientOutOfRange,
}

impl ValidationCode {
    pub fn as_code(&self) -> &'static str {
        match self {
            ValidationCode::NonNumericInput => "non-numeric-input",
            ValidationCode::MissingSolarHours => "missing-solar-hours",
            ValidationCode::NegativeValue => "negative-value",
            ValidationCode::LossCoefficientOutOfRange => "loss-coefficient-out-of-range",
        }
    }

    /// 번역 키
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ValidationCode::NonNumericInput => "validation.non_numeric_input",
            ValidationCode::MissingSolarHours => "validation.missing_solar_hours",
            ValidationCode::NegativeValue => "validation.negative_value",
            ValidationCode::LossCoefficientOutOfRange => "validation.loss_coefficient_out_of_range",
        }
    }
}

/// 입력 검증 실패. 상태를 바꾸지 않으며 사용자가 고쳐서 다시 시도할 수 있다.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid input ({})", .code.as_code())]
pub struct ValidationError {
    pub code: ValidationCode,
}

impl From<ValidationCode> for ValidationError {
    fn from(code: ValidationCode) -> Self {
        Self { code }
    }
}

/// 입력을 검증한다. 여러 규칙이 동시에 실패하면 아래 순서로 첫 번째를 보고한다:
/// 숫자 아님 → 일조시간 누락 → 음수 → 손실계수 범위.
pub fn validate(input: &OperatingPointInput) -> Result<(), ValidationError> {
    let values = [
        input.h1_m,
        input.h2_m,
        input.distance_m,
        input.flow,
        input.loss_coefficient,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ValidationCode::NonNumericInput.into());
    }
    // NaN은 비교가 모두 거짓이므로 `> 0` 실패로 잡힌다.
    if input.flow_unit.needs_solar_hours() && !(input.solar_hours > 0.0) {
        return Err(ValidationCode::MissingSolarHours.into());
    }
    if values.iter().any(|v| *v < 0.0) {
        return Err(ValidationCode::NegativeValue.into());
    }
    if input.loss_coefficient > 1.0 {
        return Err(ValidationCode::LossCoefficientOutOfRange.into());
    }
    Ok(())
}

/// 유량을 m³/h로 정규화하고 전양정을 계산한다.
///
/// `전양정 = h1 + h2 + (h1 + h2 + 거리) * k`
///
/// 정수두 h1 + h2가 손실 항의 경로 길이에도 다시 들어간다. 현장에서 쓰던
/// 간이식 그대로이며 임의로 고치지 않는다.
pub fn compute(input: &OperatingPointInput) -> Result<OperatingPoint, ValidationError> {
    validate(input)?;
    let flow_m3_per_h = to_cubic_meter_per_hour(input.flow, input.flow_unit, input.solar_hours);
    let total_distance = input.h1_m + input.h2_m + input.distance_m;
    let head_m = input.h1_m + input.h2_m + total_distance * input.loss_coefficient;
    Ok(OperatingPoint {
        flow_m3_per_h,
        head_m,
    })
}
