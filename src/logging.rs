//! 로거 초기화.

use log::LevelFilter;
use std::io::Write;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// 문자열 레벨을 필터로 바꾼다. 알 수 없는 값은 Info.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// stderr 로거를 한 번만 설치한다. `RUST_LOG`가 있으면 설정값보다 우선한다.
pub fn init(level: &str) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(parse_level(level));
        builder.parse_default_env();
        builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
        let _ = builder.try_init();
    });
}
