use thiserror::Error;

use crate::units::FlowUnit;

/// 단위 문자열 해석 시 발생 가능한 오류.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// 문자열로 전달된 유량 단위명을 enum으로 변환한다.
///
/// 예시: `m3/h`, `m³/h`, `l/h`, `L/h`, `l/day`, `l/d`, 그리고 입력 폼에서
/// 쓰던 코드 `m3_hora`, `l_hora`, `l_dia`.
pub fn parse_flow_unit(s: &str) -> Result<FlowUnit, ConversionError> {
    let norm = s.trim().to_lowercase().replace('³', "3").replace(' ', "");
    let unit = match norm.as_str() {
        "m3/h" | "m3h" | "m3_hora" | "cubic-meters-per-hour" | "cmh" => {
            FlowUnit::CubicMeterPerHour
        }
        "l/h" | "lph" | "l_hora" | "liters-per-hour" => FlowUnit::LiterPerHour,
        "l/day" | "l/d" | "l/dia" | "lpd" | "l_dia" | "liters-per-day" => FlowUnit::LiterPerDay,
        _ => return Err(ConversionError::UnknownUnit(s.trim().to_string())),
    };
    Ok(unit)
}
