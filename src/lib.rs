//! 펌프 선정 엔진을 라이브러리로 분리하여 CLI와 GUI가 함께 사용한다.

pub mod app;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod conversion;
pub mod curve;
pub mod i18n;
pub mod logging;
pub mod operating_point;
pub mod selection;
pub mod ui_cli;
pub mod units;
