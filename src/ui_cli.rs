use std::io::{self, Write};
use std::sync::MutexGuard;

use crate::app::AppError;
use crate::conduction::{summary_rows, Element, InvalidInputPolicy, Parameter, Simulation};
use crate::config::{Config, DisplayUnits};
use crate::conversion;
use crate::cube::ProximityCube;
use crate::i18n::{keys, Translator};
use crate::scheduler::{RunState, SharedSimulation, ThreadTicker, TickScheduler};
use crate::units::*;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Stop,
    Step,
    SetParameter,
    Reset,
    Status,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator, state: RunState) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    let state_label = match state {
        RunState::Running => tr.t(keys::RUN_RUNNING),
        RunState::Stopped => tr.t(keys::RUN_STOPPED),
    };
    println!("{} {state_label}", tr.t(keys::RUN_STATE));
    for key in [
        keys::MAIN_MENU_START,
        keys::MAIN_MENU_STOP,
        keys::MAIN_MENU_STEP,
        keys::MAIN_MENU_SET_PARAMETER,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_STATUS,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Start),
            "2" => return Ok(MenuChoice::Stop),
            "3" => return Ok(MenuChoice::Step),
            "4" => return Ok(MenuChoice::SetParameter),
            "5" => return Ok(MenuChoice::Reset),
            "6" => return Ok(MenuChoice::Status),
            "7" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

pub(crate) fn lock(sim: &SharedSimulation) -> Result<MutexGuard<'_, Simulation>, AppError> {
    sim.lock().map_err(|_| AppError::Poisoned)
}

/// 주기 실행을 (재)시작한다.
pub fn handle_start(tr: &Translator, ticker: &mut ThreadTicker, cfg: &Config) {
    ticker.start(cfg.tick_interval());
    println!("{} {}", tr.t(keys::RUN_STARTED), cfg.tick_interval().as_millis());
}

pub fn handle_stop(tr: &Translator, ticker: &mut ThreadTicker) {
    ticker.stop();
    println!("{}", tr.t(keys::RUN_HALTED));
}

/// 콘솔에서 한 번에 진행할 수 있는 최대 단계 수.
pub const MAX_STEPS_PER_COMMAND: usize = 100_000;

/// 단계 수 입력을 해석한다. 정수가 아니면 `None`, 상한을 넘으면 상한으로 줄인다.
pub fn parse_step_count(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return Some(n.min(MAX_STEPS_PER_COMMAND));
    }
    // 자릿수가 usize를 넘는 양의 정수
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .then_some(MAX_STEPS_PER_COMMAND)
}

/// 지정한 단계 수만큼 즉시 진행한다.
pub fn handle_step(tr: &Translator, sim: &SharedSimulation) -> Result<(), AppError> {
    let n = loop {
        match parse_step_count(&read_line(tr.t(keys::PROMPT_STEP_COUNT))?) {
            Some(n) => break n,
            None => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    };
    lock(sim)?.step_n(n);
    Ok(())
}

/// 파라미터 설정 메뉴를 처리한다. 숫자 입력 오류는 기본값으로 치환되어 보고된다.
pub fn handle_set_parameter(tr: &Translator, sim: &SharedSimulation) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PARAMETER_HEADING));
    println!("{}", tr.t(keys::PARAMETER_HELP));
    let name = read_line(tr.t(keys::PROMPT_PARAMETER_NAME))?;
    let parameter: Parameter = match name.parse() {
        Ok(p) => p,
        Err(e) => {
            println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
            return Ok(());
        }
    };
    let raw = read_line(tr.t(keys::PROMPT_PARAMETER_VALUE))?;
    match lock(sim)?.set_parameter(parameter, raw.trim()) {
        Ok(outcome) if outcome.fell_back() => {
            println!("{} {parameter} = {}", tr.t(keys::PARAMETER_FELL_BACK), outcome.value())
        }
        Ok(outcome) => println!("{} {parameter} = {}", tr.t(keys::PARAMETER_APPLIED), outcome.value()),
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

pub fn handle_reset(tr: &Translator, sim: &SharedSimulation) -> Result<(), AppError> {
    lock(sim)?.reset();
    println!("{}", tr.t(keys::RESET_DONE));
    Ok(())
}

/// 설정 메뉴를 처리한다. 변경 내용은 실행 중인 시뮬레이션에도 바로 반영한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    sim: &SharedSimulation,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    let applied = match sel.trim() {
        "1" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_UNIT))?;
            conversion::parse_temperature_unit(&unit)
                .map(|u| cfg.input_units.temperature = u)
                .is_ok()
        }
        "2" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_UNIT))?;
            conversion::parse_length_unit(&unit)
                .map(|u| cfg.input_units.thickness = u)
                .is_ok()
        }
        "3" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_UNIT))?;
            conversion::parse_area_unit(&unit)
                .map(|u| cfg.input_units.area = u)
                .is_ok()
        }
        "4" => {
            println!("{}", tr.t(keys::SETTINGS_POLICY_OPTIONS));
            match read_line(tr.t(keys::PROMPT_MENU_SELECT))?.trim() {
                "1" => {
                    cfg.invalid_input = InvalidInputPolicy::RestoreDefault;
                    true
                }
                "2" => {
                    cfg.invalid_input = InvalidInputPolicy::KeepCurrent;
                    true
                }
                _ => false,
            }
        }
        "5" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_UNIT))?;
            conversion::parse_conductivity_unit(&unit)
                .map(|u| cfg.input_units.conductivity = u)
                .is_ok()
        }
        "6" => {
            let unit = read_line(tr.t(keys::SETTINGS_PROMPT_UNIT))?;
            conversion::parse_energy_unit(&unit)
                .map(|u| cfg.display_units.energy = u)
                .is_ok()
        }
        _ => false,
    };
    if applied {
        lock(sim)?.set_input_settings(cfg.input_units, cfg.invalid_input);
    } else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
    }
    Ok(())
}

/// 상태표를 출력한다.
pub fn print_summary(tr: &Translator, sim: &Simulation, units: &DisplayUnits) {
    println!("{}", tr.t(keys::TABLE_HEADING));
    println!("{} {:.1}", tr.t(keys::TABLE_ELAPSED), sim.elapsed_s());
    println!(
        "{:<14} {:>14} {:>16} {:>14} {:>14} {:>14}",
        tr.t(keys::TABLE_ELEMENT),
        tr.t(keys::TABLE_TEMPERATURE),
        tr.t(keys::TABLE_CONDUCTIVITY),
        tr.t(keys::TABLE_ENERGY),
        tr.t(keys::TABLE_FLUX_ENERGY),
        tr.t(keys::TABLE_PEAK_ENERGY),
    );

    let temp = |c: f64| {
        format!(
            "{:.1} {}",
            convert_temperature(c, TemperatureUnit::Celsius, units.temperature),
            units.temperature.symbol()
        )
    };
    let energy = |j: Option<f64>| {
        j.map_or_else(
            || "-".to_string(),
            |j| {
                format!(
                    "{:.2} {}",
                    convert_energy(j, EnergyUnit::Joule, units.energy),
                    units.energy.symbol()
                )
            },
        )
    };

    for row in summary_rows(sim) {
        let name = match &row.element {
            Element::Source => tr.t(keys::TABLE_SOURCE).to_string(),
            Element::Material { label, .. } => label.clone(),
            Element::Sink => tr.t(keys::TABLE_SINK).to_string(),
        };
        let k = row.conductivity.map_or_else(
            || "-".to_string(),
            |k| {
                format!(
                    "{:.2} {}",
                    convert_conductivity(k, ConductivityUnit::WPerMeterK, units.conductivity),
                    units.conductivity.symbol()
                )
            },
        );
        println!(
            "{:<14} {:>14} {:>16} {:>14} {:>14} {:>14}",
            name,
            temp(row.temperature_c),
            k,
            energy(row.table_energy_j),
            energy(row.instantaneous_energy_j),
            energy(row.peak_energy_j),
        );
        if let (Some(area), Some(thickness)) = (row.area_m2, row.thickness_m) {
            println!(
                "{:<14} {}: {:.1} {} / {:.1} {}",
                "",
                tr.t(keys::TABLE_GEOMETRY),
                convert_area(area, AreaUnit::SquareMeter, units.area),
                units.area.symbol(),
                convert_length(thickness, LengthUnit::Meter, units.thickness),
                units.thickness.symbol()
            );
        }
    }
}

/// 큐브 모델 결과를 출력한다.
pub fn print_cube(tr: &Translator, cube: &ProximityCube) {
    println!("{}", tr.t(keys::CUBE_HEADING));
    println!(
        "{} {:.4} / {:.4}",
        tr.t(keys::CUBE_RATES),
        cube.heating_rate(),
        cube.cooling_rate()
    );
    println!("{} {:.1} °C", tr.t(keys::CUBE_TEMPERATURE), cube.temperature());
    println!(
        "{} {}",
        tr.t(keys::CUBE_WINDOW),
        cube.history().visible_window().len()
    );
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_is_an_integer() {
        assert_eq!(parse_step_count(" 25\n"), Some(25));
        assert_eq!(parse_step_count("0"), Some(0));
        assert_eq!(parse_step_count("1e30"), None);
        assert_eq!(parse_step_count("2.5"), None);
        assert_eq!(parse_step_count("-3"), None);
        assert_eq!(parse_step_count(""), None);
        assert_eq!(parse_step_count("+"), None);
    }

    #[test]
    fn step_count_is_capped() {
        assert_eq!(parse_step_count("250000"), Some(MAX_STEPS_PER_COMMAND));
        assert_eq!(
            parse_step_count("99999999999999999999999999"),
            Some(MAX_STEPS_PER_COMMAND)
        );
    }
}
