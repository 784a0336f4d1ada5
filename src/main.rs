use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use solar_pump_selector::{
    app::{self, AppError, Session},
    catalog, config,
    conversion::parse_flow_unit,
    i18n::{self, keys},
    logging,
    operating_point::OperatingPointInput,
    ui_cli,
    units::FlowUnit,
};

/// 태양광 펌프 선정 CLI.
#[derive(Debug, Parser)]
#[command(name = "solar_pump_selector_cli", version, about)]
struct Cli {
    /// 설정 파일 경로
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
    /// 펌프 카탈로그(JSON). 생략 시 설정값 사용
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// auto / en-us / pt-br
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 로그 레벨. 생략 시 설정값 사용
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 입력값으로 한 번 평가하고 종료한다
    Select {
        #[arg(long)]
        h1: f64,
        #[arg(long)]
        h2: f64,
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        flow: f64,
        /// m3/h, l/h, l/day
        #[arg(long, value_parser = parse_flow_unit)]
        unit: FlowUnit,
        /// 일조시간(HSP). l/day 단위에서 필수
        #[arg(long, default_value_t = 0.0)]
        solar_hours: f64,
        /// 손실 계수 k (0~1)
        #[arg(long)]
        loss: f64,
        /// 차트 데이터를 JSON으로 저장할 경로
        #[arg(long)]
        chart_json: Option<PathBuf>,
    },
    /// 카탈로그를 출력한다
    List,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    logging::init(cli.log_level.as_deref().unwrap_or(&cfg.log_level));
    if let Some(path) = cli.catalog {
        cfg.catalog_path = path;
    }
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    let catalog = catalog::load_from_path(&cfg.catalog_path, cfg.catalog_timeout());

    let mut session = Session {
        config: cfg,
        config_path: cli.config,
        tr,
        catalog,
    };

    match cli.command {
        None => {
            app::run(&mut session)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::List) => match &session.catalog {
            Ok(c) => {
                ui_cli::print_catalog(&session.tr, c);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                ui_cli::print_catalog_error(&session, e);
                Ok(ExitCode::FAILURE)
            }
        },
        Some(Command::Select {
            h1,
            h2,
            distance,
            flow,
            unit,
            solar_hours,
            loss,
            chart_json,
        }) => {
            let catalog = match &session.catalog {
                Ok(c) => c,
                Err(e) => {
                    ui_cli::print_catalog_error(&session, e);
                    return Ok(ExitCode::FAILURE);
                }
            };
            let input = OperatingPointInput {
                h1_m: h1,
                h2_m: h2,
                distance_m: distance,
                flow,
                flow_unit: unit,
                solar_hours,
                loss_coefficient: loss,
            };
            let eval = match app::evaluate(&input, catalog) {
                Ok(eval) => eval,
                Err(e) => {
                    eprintln!(
                        "{}",
                        e.user_message(&session.tr, &session.config.catalog_path)
                    );
                    return Ok(ExitCode::FAILURE);
                }
            };
            ui_cli::print_evaluation(&session.tr, &eval);
            if let Some(path) = chart_json {
                let json = serde_json::to_string_pretty(&eval.chart)?;
                std::fs::write(&path, json)?;
                println!(
                    "{}",
                    session
                        .tr
                        .fill(keys::RESULT_CHART_SAVED, &[("path", path.display().to_string())])
                );
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
