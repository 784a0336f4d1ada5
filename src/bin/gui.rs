#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use solar_pump_selector::{
    app::{self, Evaluation},
    catalog::{self, Catalog},
    chart::{self, AxisRange, ChartHandle},
    config, curve,
    i18n::{self, keys},
    logging,
    operating_point::OperatingPointInput,
    units::{convert_flow, FlowUnit},
};
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/pt-br)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut app_cfg = config::load_or_default().unwrap_or_default();
    logging::init(&app_cfg.log_level);
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(1100.0, 760.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Solar Pump Selector",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 입력란 문자열을 숫자로 읽는다. 읽을 수 없으면 NaN을 돌려 검증 단계에서 걸러지게 한다.
fn parse_field(s: &str) -> f64 {
    s.trim().replace(',', ".").parse::<f64>().unwrap_or(f64::NAN)
}

/// 단위를 바꿀 때 같은 물리 유량이 유지되도록 입력값을 환산한다.
/// 환산할 수 없으면(숫자 아님, 일조시간 없음) None.
fn convert_flow_field(text: &str, from: FlowUnit, to: FlowUnit, solar_hours: f64) -> Option<String> {
    let v = parse_field(text);
    if !v.is_finite() {
        return None;
    }
    let needs_hours = from.needs_solar_hours() || to.needs_solar_hours();
    if needs_hours && !(solar_hours.is_finite() && solar_hours > 0.0) {
        return None;
    }
    let out = convert_flow(v, from, to, solar_hours);
    Some(format_trimmed(out))
}

fn format_trimmed(v: f64) -> String {
    let s = format!("{v:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn palette_color(index: usize) -> egui::Color32 {
    let [r, g, b] = chart::PALETTE[index % chart::PALETTE.len()];
    egui::Color32::from_rgb(r, g, b)
}

/// 데이터 좌표를 화면 좌표로 바꾼다. 축 최솟값은 0.
fn to_screen(plot: egui::Rect, x_axis: AxisRange, y_axis: AxisRange, (x, y): (f64, f64)) -> egui::Pos2 {
    let fx = (x / x_axis.max).clamp(0.0, 1.0) as f32;
    let fy = (y / y_axis.max).clamp(0.0, 1.0) as f32;
    egui::pos2(
        plot.left() + fx * plot.width(),
        plot.bottom() - fy * plot.height(),
    )
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    settings_status: Option<String>,
    show_settings_modal: bool,
    // 카탈로그
    catalog: Option<Catalog>,
    catalog_error: Option<String>,
    // 입력 폼
    h1: String,
    h2: String,
    distance: String,
    flow: String,
    flow_unit: FlowUnit,
    solar_hours: String,
    loss: String,
    // 결과
    evaluation: Option<Evaluation>,
    message: Option<String>,
    chart: Option<ChartHandle>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let mut app = Self {
            lang_input: config.language.clone(),
            tr,
            settings_status: None,
            show_settings_modal: false,
            catalog: None,
            catalog_error: None,
            h1: String::new(),
            h2: String::new(),
            distance: String::new(),
            flow: String::new(),
            flow_unit: config.default_flow_unit,
            solar_hours: format_trimmed(config.default_solar_hours),
            loss: format_trimmed(config.default_loss_coefficient),
            evaluation: None,
            message: None,
            chart: None,
            config,
        };
        app.reload_catalog();
        app
    }

    /// 설정된 경로에서 카탈로그를 한 번 읽는다. 실패하면 평가를 막는다.
    fn reload_catalog(&mut self) {
        match catalog::load_from_path(&self.config.catalog_path, self.config.catalog_timeout()) {
            Ok(c) => {
                self.catalog = Some(c);
                self.catalog_error = None;
            }
            Err(e) => {
                log::error!("catalog load failed: {e}");
                self.catalog = None;
                self.catalog_error = Some(format!(
                    "{} ({e})",
                    self.tr.fill(
                        keys::CATALOG_LOAD_ERROR,
                        &[("path", self.config.catalog_path.display().to_string())]
                    )
                ));
            }
        }
        self.evaluation = None;
        self.chart = None;
        self.message = None;
    }

    fn form_input(&self) -> OperatingPointInput {
        let solar = self.solar_hours.trim();
        OperatingPointInput {
            h1_m: parse_field(&self.h1),
            h2_m: parse_field(&self.h2),
            distance_m: parse_field(&self.distance),
            flow: parse_field(&self.flow),
            flow_unit: self.flow_unit,
            // 빈 칸은 0으로 취급(일조시간 누락)
            solar_hours: if solar.is_empty() { 0.0 } else { parse_field(solar) },
            loss_coefficient: parse_field(&self.loss),
        }
    }

    /// 실패하면 이전 결과는 그대로 두고 메시지만 바꾼다.
    fn calculate(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        match app::evaluate(&self.form_input(), catalog) {
            Ok(eval) => {
                self.chart = Some(ChartHandle::replace(self.chart.take(), eval.chart.clone()));
                self.evaluation = Some(eval);
                self.message = None;
            }
            Err(e) => {
                self.message = Some(e.user_message(&self.tr, &self.config.catalog_path));
            }
        }
    }

    fn set_flow_unit(&mut self, unit: FlowUnit) {
        if unit == self.flow_unit {
            return;
        }
        let hours = parse_field(&self.solar_hours);
        if let Some(v) = convert_flow_field(&self.flow, self.flow_unit, unit, hours) {
            self.flow = v;
        }
        self.flow_unit = unit;
    }

    fn flow_unit_label(&self, unit: FlowUnit) -> String {
        solar_pump_selector::ui_cli::flow_unit_label(&self.tr, unit)
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        egui::Grid::new("sizing_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for (key, field) in [
                    ("gui.h1", &mut self.h1),
                    ("gui.h2", &mut self.h2),
                    ("gui.distance", &mut self.distance),
                ] {
                    ui.label(tr.t(key));
                    ui.add(egui::TextEdit::singleline(field).desired_width(120.0));
                    ui.end_row();
                }

                ui.label(tr.t("gui.flow_unit"));
                let mut unit = self.flow_unit;
                egui::ComboBox::from_id_source("flow_unit")
                    .selected_text(self.flow_unit_label(self.flow_unit))
                    .show_ui(ui, |ui| {
                        for u in FlowUnit::ALL {
                            ui.selectable_value(&mut unit, u, self.flow_unit_label(u));
                        }
                    });
                ui.end_row();
                self.set_flow_unit(unit);

                ui.label(format!("{} [{}]", tr.t("gui.flow"), self.flow_unit));
                let hint = self.flow_unit_label(self.flow_unit);
                ui.add(
                    egui::TextEdit::singleline(&mut self.flow)
                        .hint_text(hint)
                        .desired_width(120.0),
                );
                ui.end_row();

                if self.flow_unit.needs_solar_hours() {
                    ui.label(tr.t("gui.solar_hours"));
                    ui.add(egui::TextEdit::singleline(&mut self.solar_hours).desired_width(120.0));
                    ui.end_row();
                }

                ui.label(tr.t("gui.loss"));
                ui.add(egui::TextEdit::singleline(&mut self.loss).desired_width(120.0));
                ui.end_row();
            });

        ui.add_space(6.0);
        let enabled = self.catalog.is_some();
        if ui
            .add_enabled(enabled, egui::Button::new(tr.t("gui.calculate")))
            .clicked()
        {
            self.calculate();
        }
        if let Some(msg) = &self.message {
            ui.colored_label(egui::Color32::from_rgb(0xD0, 0x30, 0x30), msg);
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        let Some(eval) = &self.evaluation else {
            return;
        };
        let tr = &self.tr;
        ui.separator();
        ui.label(tr.fill(keys::RESULT_FLOW, &[("value", format!("{:.2}", eval.point.flow_m3_per_h))]));
        ui.label(tr.fill(keys::RESULT_HEAD, &[("value", format!("{:.2}", eval.point.head_m))]));
        let recommended = eval
            .selection
            .recommended_label()
            .unwrap_or_else(|| tr.t(keys::RESULT_NONE_FOUND));
        ui.strong(tr.fill(keys::RESULT_RECOMMENDED, &[("value", recommended)]));
        ui.add_space(6.0);

        egui::Grid::new("selection_table")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.strong(tr.t("gui.model"));
                ui.strong(tr.t("gui.power"));
                ui.strong(format!("{} (m)", tr.t(keys::RESULT_HEAD_AT_FLOW)));
                ui.strong("");
                ui.end_row();
                let recommended = eval.selection.recommended.as_ref().map(|p| p.model.as_str());
                for p in &eval.selection.compatible {
                    let text = egui::RichText::new(&p.model);
                    if recommended == Some(p.model.as_str()) {
                        ui.label(text.strong());
                    } else {
                        ui.label(text);
                    }
                    ui.label(&p.power.label);
                    ui.label(format!("{:.2}", p.head_at_flow));
                    ui.label(tr.t(keys::RESULT_COMPATIBLE));
                    ui.end_row();
                }
                for p in &eval.selection.incompatible {
                    let head = curve::head_at(&p.curve, eval.point.flow_m3_per_h)
                        .map(|h| format!("{h:.2}"))
                        .unwrap_or_else(|_| "—".into());
                    ui.weak(&p.model);
                    ui.weak(&p.power.label);
                    ui.weak(head);
                    ui.weak(tr.t(keys::RESULT_INCOMPATIBLE));
                    ui.end_row();
                }
            });
    }

    fn ui_chart(&self, ui: &mut egui::Ui) {
        let Some(handle) = &self.chart else {
            return;
        };
        let data = &handle.data;
        let tr = &self.tr;
        ui.separator();
        ui.heading(tr.t("gui.chart_title"));

        let size = egui::vec2(ui.available_width().max(320.0), 380.0);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let outer = response.rect;
        let plot = egui::Rect::from_min_max(
            outer.min + egui::vec2(52.0, 10.0),
            outer.max - egui::vec2(12.0, 36.0),
        );
        let text_color = ui.visuals().text_color();
        let grid_color = ui.visuals().weak_text_color().gamma_multiply(0.3);
        let font = egui::FontId::proportional(11.0);
        let pt = |p: (f64, f64)| to_screen(plot, data.x_axis, data.y_axis, p);

        // 격자와 눈금
        for x in data.x_axis.ticks() {
            let p = pt((x, 0.0));
            painter.line_segment([p, egui::pos2(p.x, plot.top())], egui::Stroke::new(1.0, grid_color));
            painter.text(p + egui::vec2(0.0, 4.0), egui::Align2::CENTER_TOP, format!("{x:.0}"), font.clone(), text_color);
        }
        for y in data.y_axis.ticks() {
            let p = pt((0.0, y));
            painter.line_segment([p, egui::pos2(plot.right(), p.y)], egui::Stroke::new(1.0, grid_color));
            painter.text(p - egui::vec2(6.0, 0.0), egui::Align2::RIGHT_CENTER, format!("{y:.0}"), font.clone(), text_color);
        }
        painter.rect_stroke(plot, 0.0, egui::Stroke::new(1.0, text_color));
        painter.text(
            egui::pos2(plot.center().x, outer.bottom() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            tr.t("gui.axis_x"),
            font.clone(),
            text_color,
        );
        painter.text(
            egui::pos2(outer.left() + 2.0, plot.top()),
            egui::Align2::LEFT_BOTTOM,
            tr.t("gui.axis_y"),
            font.clone(),
            text_color,
        );

        // 펌프 곡선. 추천 펌프는 굵게.
        for s in &data.series {
            let width = if s.highlighted { 3.5 } else { 1.5 };
            let points: Vec<egui::Pos2> = s.points.iter().map(|p| pt(*p)).collect();
            painter.add(egui::Shape::line(points, egui::Stroke::new(width, palette_color(s.palette_index))));
        }

        // 운전점과 보조선
        let red = egui::Color32::from_rgb(0xFF, 0x00, 0x00);
        for guide in &data.guides {
            painter.extend(egui::Shape::dashed_line(
                &[pt(guide[0]), pt(guide[1])],
                egui::Stroke::new(1.0, red),
                6.0,
                4.0,
            ));
        }
        painter.circle_filled(pt(data.operating_point), 6.0, red);

        // 범례
        ui.horizontal_wrapped(|ui| {
            for s in &data.series {
                let text = egui::RichText::new(format!("■ {}", s.label)).color(palette_color(s.palette_index));
                ui.label(if s.highlighted { text.strong() } else { text });
            }
            ui.label(egui::RichText::new(format!("● {}", tr.t("gui.operating_point"))).color(red));
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        if !self.show_settings_modal {
            return;
        }
        let tr = self.tr.clone();
        let mut save = false;
        egui::Window::new(tr.t("gui.settings"))
            .collapsible(false)
            .resizable(false)
            .open(&mut self.show_settings_modal)
            .show(ctx, |ui| {
                ui.label(tr.t("gui.language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "pt-br".into(), "Português (BR)");
                    });
                if ui.button(tr.t("gui.save")).clicked() {
                    save = true;
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        if save {
            self.config.language = self.lang_input.clone();
            let resolved = i18n::resolve_language(&self.config.language, None);
            self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
            self.settings_status = Some(match self.config.save() {
                Ok(()) => self.tr.t(keys::SETTINGS_SAVED),
                Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
            });
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t("gui.app_title"));
                ui.separator();
                if ui.button(tr.t("gui.open_catalog")).clicked() {
                    if let Some(path) = FileDialog::new().add_filter("JSON", &["json"]).pick_file() {
                        self.config.catalog_path = path;
                        self.reload_catalog();
                    }
                }
                if ui.button(tr.t("gui.reload_catalog")).clicked() {
                    self.reload_catalog();
                }
                if ui.button(tr.t("gui.settings")).clicked() {
                    self.show_settings_modal = true;
                }
            });
            match (&self.catalog, &self.catalog_error) {
                (Some(c), _) => {
                    ui.small(tr.fill(
                        "gui.catalog_status",
                        &[
                            ("count", c.len().to_string()),
                            ("path", self.config.catalog_path.display().to_string()),
                        ],
                    ));
                    for w in &c.warnings {
                        ui.small(egui::RichText::new(w.to_string()).color(egui::Color32::from_rgb(0xC0, 0x80, 0x00)));
                    }
                }
                (None, Some(err)) => {
                    ui.colored_label(egui::Color32::from_rgb(0xD0, 0x30, 0x30), err);
                }
                (None, None) => {}
            }
        });

        self.ui_settings(ctx);

        egui::SidePanel::left("form")
            .resizable(true)
            .min_width(260.0)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                self.ui_form(ui);
                self.ui_results(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_chart(ui));
        });
    }
}
