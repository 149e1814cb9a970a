use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_START: &str = "main_menu.start";
    pub const MAIN_MENU_STOP: &str = "main_menu.stop";
    pub const MAIN_MENU_STEP: &str = "main_menu.step";
    pub const MAIN_MENU_SET_PARAMETER: &str = "main_menu.set_parameter";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_STATUS: &str = "main_menu.status";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const RUN_STATE: &str = "run.state";
    pub const RUN_RUNNING: &str = "run.running";
    pub const RUN_STOPPED: &str = "run.stopped";
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_HALTED: &str = "run.halted";
    pub const PROMPT_STEP_COUNT: &str = "prompt.step_count";

    pub const PARAMETER_HEADING: &str = "parameter.heading";
    pub const PARAMETER_HELP: &str = "parameter.help";
    pub const PROMPT_PARAMETER_NAME: &str = "prompt.parameter_name";
    pub const PROMPT_PARAMETER_VALUE: &str = "prompt.parameter_value";
    pub const PARAMETER_APPLIED: &str = "parameter.applied";
    pub const PARAMETER_FELL_BACK: &str = "parameter.fell_back";

    pub const RESET_DONE: &str = "reset.done";

    pub const TABLE_HEADING: &str = "table.heading";
    pub const TABLE_ELEMENT: &str = "table.element";
    pub const TABLE_TEMPERATURE: &str = "table.temperature";
    pub const TABLE_CONDUCTIVITY: &str = "table.conductivity";
    pub const TABLE_ENERGY: &str = "table.energy";
    pub const TABLE_FLUX_ENERGY: &str = "table.flux_energy";
    pub const TABLE_PEAK_ENERGY: &str = "table.peak_energy";
    pub const TABLE_SOURCE: &str = "table.source";
    pub const TABLE_SINK: &str = "table.sink";
    pub const TABLE_GEOMETRY: &str = "table.geometry";
    pub const TABLE_ELAPSED: &str = "table.elapsed";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_UNIT: &str = "settings.prompt_unit";
    pub const SETTINGS_POLICY_OPTIONS: &str = "settings.policy_options";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const CUBE_HEADING: &str = "cube.heading";
    pub const CUBE_RATES: &str = "cube.rates";
    pub const CUBE_TEMPERATURE: &str = "cube.temperature";
    pub const CUBE_WINDOW: &str = "cube.window";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 내장 문자열 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn detect_system_language() -> Option<String> {
    get_locale().and_then(|loc| normalize_lang(&loc))
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 열전도 시뮬레이터 ===",
        MAIN_MENU_START => "1) 시뮬레이션 시작",
        MAIN_MENU_STOP => "2) 시뮬레이션 정지",
        MAIN_MENU_STEP => "3) 단계 진행",
        MAIN_MENU_SET_PARAMETER => "4) 파라미터 설정",
        MAIN_MENU_RESET => "5) 초기화",
        MAIN_MENU_STATUS => "6) 상태표",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        RUN_STATE => "실행 상태:",
        RUN_RUNNING => "실행 중",
        RUN_STOPPED => "정지됨",
        RUN_STARTED => "시뮬레이션을 시작했습니다. 주기(ms):",
        RUN_HALTED => "시뮬레이션을 정지했습니다.",
        PROMPT_STEP_COUNT => "진행할 단계 수: ",
        PARAMETER_HEADING => "\n-- 파라미터 설정 --",
        PARAMETER_HELP => "항목: source, conductivity[:n], thickness[:n], area[:n] (n은 재료 번호)",
        PROMPT_PARAMETER_NAME => "항목 이름: ",
        PROMPT_PARAMETER_VALUE => "값: ",
        PARAMETER_APPLIED => "적용됨:",
        PARAMETER_FELL_BACK => "잘못된 값이므로 다음 값을 사용합니다:",
        RESET_DONE => "초기 상태로 되돌렸습니다.",
        TABLE_HEADING => "\n-- 상태표 --",
        TABLE_ELEMENT => "요소",
        TABLE_TEMPERATURE => "평균 온도",
        TABLE_CONDUCTIVITY => "열전도율",
        TABLE_ENERGY => "전달 에너지",
        TABLE_FLUX_ENERGY => "순간 에너지",
        TABLE_PEAK_ENERGY => "최대 에너지",
        TABLE_SOURCE => "열원",
        TABLE_SINK => "열흡수원",
        TABLE_GEOMETRY => "면적/두께",
        TABLE_ELAPSED => "경과 시간(s):",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_OPTIONS => "1) 온도 입력 단위  2) 두께 입력 단위  3) 면적 입력 단위  4) 잘못된 입력 처리  5) 열전도율 입력 단위  6) 에너지 표시 단위",
        SETTINGS_PROMPT_UNIT => "단위 입력 (예: C, F, K / m, cm, mm / m2, cm2 / W/mK / J, kJ): ",
        SETTINGS_POLICY_OPTIONS => "1) 기본값 복원  2) 현재 값 유지",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        CUBE_HEADING => "\n-- 근접 가열 큐브 --",
        CUBE_RATES => "가열/냉각 속도:",
        CUBE_TEMPERATURE => "큐브 온도:",
        CUBE_WINDOW => "최근 구간 표본 수:",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Heat Conduction Simulator ===",
        MAIN_MENU_START => "1) Start simulation",
        MAIN_MENU_STOP => "2) Stop simulation",
        MAIN_MENU_STEP => "3) Advance steps",
        MAIN_MENU_SET_PARAMETER => "4) Set parameter",
        MAIN_MENU_RESET => "5) Reset",
        MAIN_MENU_STATUS => "6) Status table",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        RUN_STATE => "Run state:",
        RUN_RUNNING => "running",
        RUN_STOPPED => "stopped",
        RUN_STARTED => "Simulation started. Interval (ms):",
        RUN_HALTED => "Simulation stopped.",
        PROMPT_STEP_COUNT => "Steps to advance: ",
        PARAMETER_HEADING => "\n-- Set Parameter --",
        PARAMETER_HELP => "Names: source, conductivity[:n], thickness[:n], area[:n] (n = material number)",
        PROMPT_PARAMETER_NAME => "Parameter name: ",
        PROMPT_PARAMETER_VALUE => "Value: ",
        PARAMETER_APPLIED => "Applied:",
        PARAMETER_FELL_BACK => "Invalid value; using:",
        RESET_DONE => "Simulation reset to defaults.",
        TABLE_HEADING => "\n-- Status --",
        TABLE_ELEMENT => "Element",
        TABLE_TEMPERATURE => "Avg temp",
        TABLE_CONDUCTIVITY => "Conductivity",
        TABLE_ENERGY => "Energy",
        TABLE_FLUX_ENERGY => "Tick energy",
        TABLE_PEAK_ENERGY => "Peak energy",
        TABLE_SOURCE => "Heat source",
        TABLE_SINK => "Heat sink",
        TABLE_GEOMETRY => "Area/thickness",
        TABLE_ELAPSED => "Elapsed (s):",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_OPTIONS => "1) Temperature input unit  2) Thickness input unit  3) Area input unit  4) Invalid input policy  5) Conductivity input unit  6) Energy display unit",
        SETTINGS_PROMPT_UNIT => "Unit (ex: C, F, K / m, cm, mm / m2, cm2 / W/mK / J, kJ): ",
        SETTINGS_POLICY_OPTIONS => "1) Restore default  2) Keep current value",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings saved.",
        CUBE_HEADING => "\n-- Proximity Cube --",
        CUBE_RATES => "Heating/cooling rate:",
        CUBE_TEMPERATURE => "Cube temperature:",
        CUBE_WINDOW => "Samples in visible window:",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("en-US", Some("ko")), "en");
        assert_eq!(resolve_language("auto", Some("ko-KR")), "ko");
    }

    #[test]
    fn unknown_code_falls_back_to_korean_strings() {
        let tr = Translator::new("de");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::ERROR_PREFIX), "오류");
        assert_eq!(Translator::new("en").t(keys::ERROR_PREFIX), "Error");
    }
}
