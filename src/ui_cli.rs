use std::io::{self, BufRead, Write};

use crate::app::{self, AppError, Evaluation, Session};
use crate::catalog::{Catalog, CatalogError};
use crate::conversion::{parse_flow_unit, ConversionError};
use crate::i18n::{keys, resolve_language, Translator};
use crate::operating_point::OperatingPointInput;
use crate::units::FlowUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Sizing,
    Catalog,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SIZING));
    println!("{}", tr.t(keys::MAIN_MENU_CATALOG));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Sizing),
            "2" => return Ok(MenuChoice::Catalog),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 펌프 선정 메뉴를 처리한다. 입력 오류는 메시지만 보여주고 메뉴로 돌아간다.
pub fn handle_sizing(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    let catalog = match &session.catalog {
        Ok(c) => c,
        Err(e) => {
            print_catalog_error(session, e);
            return Ok(());
        }
    };
    println!("{}", tr.t(keys::SIZING_HEADING));
    let h1_m = read_f64(tr, &tr.t(keys::PROMPT_H1))?;
    let h2_m = read_f64(tr, &tr.t(keys::PROMPT_H2))?;
    let distance_m = read_f64(tr, &tr.t(keys::PROMPT_DISTANCE))?;
    let flow_unit = read_flow_unit(tr, session.config.default_flow_unit)?;
    let flow = read_f64(tr, &format!("{} [{flow_unit}]: ", flow_unit_label(tr, flow_unit)))?;
    let solar_hours = if flow_unit.needs_solar_hours() {
        read_f64(tr, &tr.t(keys::PROMPT_SOLAR_HOURS))?
    } else {
        0.0
    };
    let loss_coefficient = read_f64(tr, &tr.t(keys::PROMPT_LOSS))?;

    let input = OperatingPointInput {
        h1_m,
        h2_m,
        distance_m,
        flow,
        flow_unit,
        solar_hours,
        loss_coefficient,
    };
    match app::evaluate(&input, catalog) {
        Ok(eval) => print_evaluation(tr, &eval),
        Err(e) => println!("{}", e.user_message(tr, &session.config.catalog_path)),
    }
    Ok(())
}

/// 카탈로그 메뉴: 로드된 펌프 목록을 보여준다.
pub fn handle_catalog(session: &Session) {
    match &session.catalog {
        Ok(c) => print_catalog(&session.tr, c),
        Err(e) => print_catalog_error(session, e),
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        session.tr.fill(
            keys::SETTINGS_CURRENT_LANGUAGE,
            &[("value", session.config.language.clone())]
        )
    );
    let sel = read_line(&session.tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    session.config.language = sel.trim().to_lowercase();
    let resolved = resolve_language(&session.config.language, None);
    session.tr =
        Translator::new_with_pack(&resolved, session.config.language_pack_dir.as_deref());
    println!("{}", session.tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 평가 결과를 출력한다. 수치는 소수 둘째 자리까지.
pub fn print_evaluation(tr: &Translator, eval: &Evaluation) {
    println!(
        "{}",
        tr.fill(keys::RESULT_FLOW, &[("value", format!("{:.2}", eval.point.flow_m3_per_h))])
    );
    println!(
        "{}",
        tr.fill(keys::RESULT_HEAD, &[("value", format!("{:.2}", eval.point.head_m))])
    );
    let recommended = eval
        .selection
        .recommended_label()
        .unwrap_or_else(|| tr.t(keys::RESULT_NONE_FOUND));
    println!("{}", tr.fill(keys::RESULT_RECOMMENDED, &[("value", recommended)]));

    println!("\n{}:", tr.t(keys::RESULT_COMPATIBLE));
    for p in &eval.selection.compatible {
        println!(
            "  {:<16} {:<10} {}: {:.2} m",
            p.model,
            p.power.label,
            tr.t(keys::RESULT_HEAD_AT_FLOW),
            p.head_at_flow
        );
    }
    println!("{}:", tr.t(keys::RESULT_INCOMPATIBLE));
    for p in &eval.selection.incompatible {
        println!("  {:<16} {}", p.model, p.power.label);
    }
}

/// 카탈로그 내용과 로드 경고를 출력한다.
pub fn print_catalog(tr: &Translator, catalog: &Catalog) {
    println!("{}", tr.t(keys::CATALOG_HEADING));
    for p in &catalog.pumps {
        let (lo, hi) = crate::curve::flow_range(&p.curve).unwrap_or((0.0, 0.0));
        println!(
            "  {:<16} {:<10} {} {}, Q {lo:.1}–{hi:.1} m³/h",
            p.model,
            p.power.label,
            p.curve.len(),
            tr.t(keys::CATALOG_POINTS)
        );
    }
    if !catalog.warnings.is_empty() {
        println!("{}:", tr.t(keys::CATALOG_WARNINGS));
        for w in &catalog.warnings {
            println!("  {w}");
        }
    }
}

pub fn print_catalog_error(session: &Session, err: &CatalogError) {
    println!(
        "{}: {} ({err})",
        session.tr.t(keys::ERROR_PREFIX),
        session.tr.fill(
            keys::CATALOG_LOAD_ERROR,
            &[("path", session.config.catalog_path.display().to_string())]
        )
    );
}

/// 단위별 표시 이름.
pub fn flow_unit_label(tr: &Translator, unit: FlowUnit) -> String {
    let key = match unit {
        FlowUnit::CubicMeterPerHour => keys::FLOW_UNIT_M3H,
        FlowUnit::LiterPerHour => keys::FLOW_UNIT_LH,
        FlowUnit::LiterPerDay => keys::FLOW_UNIT_LDAY,
    };
    tr.t(key)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 읽는다. 입력이 닫혔으면(EOF) `UnexpectedEof` 오류.
fn read_line_from(reader: &mut impl BufRead) -> Result<String, AppError> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

/// 숫자를 읽는다. 쉼표 소수점(`2,5`)도 받는다.
fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().replace(',', ".").parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 알 수 없는 단위면 안내를 출력하고 다시 묻는다.
fn read_flow_unit(tr: &Translator, default: FlowUnit) -> Result<FlowUnit, AppError> {
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_FLOW_UNIT))?;
        match flow_unit_choice(&sel, default) {
            Ok(unit) => return Ok(unit),
            Err(e) => println!("{}", unknown_unit_message(tr, &e)),
        }
    }
}

/// 메뉴 번호(1/2/3), 단위 문자열, 빈 입력(기본값)을 해석한다.
fn flow_unit_choice(input: &str, default: FlowUnit) -> Result<FlowUnit, ConversionError> {
    match input.trim() {
        "1" => Ok(FlowUnit::CubicMeterPerHour),
        "2" => Ok(FlowUnit::LiterPerHour),
        "3" => Ok(FlowUnit::LiterPerDay),
        "" => Ok(default),
        other => parse_flow_unit(other),
    }
}

fn unknown_unit_message(tr: &Translator, err: &ConversionError) -> String {
    match err {
        ConversionError::UnknownUnit(unit) => {
            tr.fill(keys::ERROR_UNKNOWN_UNIT, &[("value", unit.clone())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_input_is_an_eof_error() {
        let mut empty: &[u8] = b"";
        match read_line_from(&mut empty) {
            Err(AppError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected EOF error, got {other:?}"),
        }
    }

    #[test]
    fn blank_line_is_not_eof() {
        let mut input: &[u8] = b"\n2\n";
        assert_eq!(read_line_from(&mut input).unwrap(), "\n");
        assert_eq!(read_line_from(&mut input).unwrap(), "2\n");
        assert!(read_line_from(&mut input).is_err());
    }

    #[test]
    fn flow_unit_choice_accepts_numbers_codes_and_default() {
        let default = FlowUnit::LiterPerDay;
        assert_eq!(flow_unit_choice("1\n", default), Ok(FlowUnit::CubicMeterPerHour));
        assert_eq!(flow_unit_choice(" l/h ", default), Ok(FlowUnit::LiterPerHour));
        assert_eq!(flow_unit_choice("\n", default), Ok(default));
    }

    #[test]
    fn unknown_unit_is_reported_not_replaced_by_default() {
        let err = flow_unit_choice("gpm\n", FlowUnit::LiterPerDay).unwrap_err();
        assert_eq!(err, ConversionError::UnknownUnit("gpm".into()));

        let tr = Translator::new("en-us");
        let msg = unknown_unit_message(&tr, &err);
        assert!(msg.contains("gpm"), "{msg}");
        assert!(msg.starts_with("Unknown flow unit"), "{msg}");
    }
}
