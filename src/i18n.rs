use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SIZING: &str = "main_menu.sizing";
    pub const MAIN_MENU_CATALOG: &str = "main_menu.catalog";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";

    pub const SIZING_HEADING: &str = "sizing.heading";
    pub const PROMPT_H1: &str = "prompt.h1";
    pub const PROMPT_H2: &str = "prompt.h2";
    pub const PROMPT_DISTANCE: &str = "prompt.distance";
    pub const PROMPT_FLOW_UNIT: &str = "prompt.flow_unit";
    pub const PROMPT_SOLAR_HOURS: &str = "prompt.solar_hours";
    pub const PROMPT_LOSS: &str = "prompt.loss_coefficient";

    pub const FLOW_UNIT_M3H: &str = "unit.flow.m3h";
    pub const FLOW_UNIT_LH: &str = "unit.flow.lh";
    pub const FLOW_UNIT_LDAY: &str = "unit.flow.lday";

    pub const RESULT_FLOW: &str = "result.flow";
    pub const RESULT_HEAD: &str = "result.head";
    pub const RESULT_RECOMMENDED: &str = "result.recommended";
    pub const RESULT_NONE_FOUND: &str = "result.none_found";
    pub const RESULT_COMPATIBLE: &str = "result.compatible";
    pub const RESULT_INCOMPATIBLE: &str = "result.incompatible";
    pub const RESULT_HEAD_AT_FLOW: &str = "result.head_at_flow";
    pub const RESULT_CHART_SAVED: &str = "result.chart_saved";

    pub const CATALOG_HEADING: &str = "catalog.heading";
    pub const CATALOG_LOAD_ERROR: &str = "catalog.load_error";
    pub const CATALOG_WARNINGS: &str = "catalog.warnings";
    pub const CATALOG_POINTS: &str = "catalog.points";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const VALIDATION_NON_NUMERIC: &str = "validation.non_numeric_input";
    pub const VALIDATION_MISSING_SOLAR_HOURS: &str = "validation.missing_solar_hours";
    pub const VALIDATION_NEGATIVE: &str = "validation.negative_value";
    pub const VALIDATION_LOSS_RANGE: &str = "validation.loss_coefficient_out_of_range";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    PtBr,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("pt") {
            Language::PtBr
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en-us",
            Language::PtBr => "pt-br",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    pack: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(en/pt)에 따라 내장 언어팩만으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let pack = pack_dir
            .and_then(|dir| load_overrides(dir, lang.as_code()))
            .or_else(|| built_in_pack(lang))
            .unwrap_or_default();
        Self {
            lang,
            pack,
            fallback: built_in_pack(Language::En).unwrap_or_default(),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 키를 조회해 문자열을 반환한다. 현재 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.pack.get(key).cloned()
    }

    /// 번역을 가져온다. 없으면 영어, 그래도 없으면 키 자체를 돌려준다.
    pub fn t(&self, key: &str) -> String {
        self.pack
            .get(key)
            .or_else(|| self.fallback.get(key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// `{name}` 자리표시자를 채운 번역.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// `{key}` 형태 자리표시자를 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("pt") => Some("pt-br".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "pt" => Some("pt-br".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., pt-br)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., pt)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> Option<HashMap<String, String>> {
    match lang {
        Language::En => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        Language::PtBr => parse_toml_to_map(include_str!("../locales/pt-br.toml")),
    }
}
