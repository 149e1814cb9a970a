use std::path::Path;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::conduction::Simulation;
use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::scheduler::{ThreadTicker, TickScheduler};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error("알 수 없는 재료 프리셋: {0}")]
    UnknownPreset(String),
    #[error("시뮬레이션 상태 잠금이 오염되었습니다")]
    Poisoned,
}

/// 대화형 콘솔의 메인 루프를 실행한다. 종료 시 설정을 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    let sim = Arc::new(Mutex::new(config.build_simulation()));
    let mut ticker = ThreadTicker::new(
        Arc::clone(&sim),
        Arc::new(|s: &Simulation| {
            log::trace!("열흡수원 {:.2} °C", s.sink_temperature());
        }),
    );

    loop {
        match ui_cli::main_menu(tr, ticker.state())? {
            MenuChoice::Start => ui_cli::handle_start(tr, &mut ticker, config),
            MenuChoice::Stop => ui_cli::handle_stop(tr, &mut ticker),
            MenuChoice::Step => ui_cli::handle_step(tr, &sim)?,
            MenuChoice::SetParameter => ui_cli::handle_set_parameter(tr, &sim)?,
            MenuChoice::Reset => ui_cli::handle_reset(tr, &sim)?,
            MenuChoice::Status => {
                let guard = ui_cli::lock(&sim)?;
                ui_cli::print_summary(tr, &guard, &config.display_units);
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config, &sim)?;
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                ticker.stop();
                config.save_to(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
