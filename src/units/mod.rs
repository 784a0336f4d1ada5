//! 단위 정의 및 변환 모듈 모음.

pub mod flow;

pub use flow::{convert_flow, to_cubic_meter_per_hour, FlowUnit};
