use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 내부 기준은 m³/h 이다.
///
/// `LiterPerDay`는 하루 총량을 의미하므로 시간당 유량으로 바꾸려면
/// 태양광 펌핑 기준 일조시간(HSP)이 필요하다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowUnit {
    #[serde(rename = "m3/h", alias = "m3_hora", alias = "cubic-meters-per-hour")]
    CubicMeterPerHour,
    #[serde(rename = "l/h", alias = "l_hora", alias = "liters-per-hour")]
    LiterPerHour,
    #[serde(rename = "l/day", alias = "l_dia", alias = "liters-per-day")]
    LiterPerDay,
}

impl FlowUnit {
    pub const ALL: [FlowUnit; 3] = [
        FlowUnit::CubicMeterPerHour,
        FlowUnit::LiterPerHour,
        FlowUnit::LiterPerDay,
    ];

    /// 설정 파일/CLI에서 사용하는 코드.
    pub fn as_code(&self) -> &'static str {
        match self {
            FlowUnit::CubicMeterPerHour => "m3/h",
            FlowUnit::LiterPerHour => "l/h",
            FlowUnit::LiterPerDay => "l/day",
        }
    }

    /// 일조시간 입력이 필요한 단위인지 여부.
    pub fn needs_solar_hours(&self) -> bool {
        matches!(self, FlowUnit::LiterPerDay)
    }
}

impl std::fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// 유량을 m³/h로 환산한다. `solar_hours`는 `LiterPerDay`에서만 사용된다.
///
/// 일조시간 검증은 호출 측(운전점 계산기)의 몫이며, 여기서는 식만 적용한다.
pub fn to_cubic_meter_per_hour(value: f64, unit: FlowUnit, solar_hours: f64) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::LiterPerHour => value / 1000.0,
        FlowUnit::LiterPerDay => (value / solar_hours) / 1000.0,
    }
}

/// m³/h 값을 지정 단위로 되돌린다.
pub fn from_cubic_meter_per_hour(value_m3h: f64, unit: FlowUnit, solar_hours: f64) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value_m3h,
        FlowUnit::LiterPerHour => value_m3h * 1000.0,
        FlowUnit::LiterPerDay => value_m3h * 1000.0 * solar_hours,
    }
}

/// 유량을 다른 단위로 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit, solar_hours: f64) -> f64 {
    let m3h = to_cubic_meter_per_hour(value, from, solar_hours);
    from_cubic_meter_per_hour(m3h, to, solar_hours)
}
