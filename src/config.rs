use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::conduction::{InputUnits, InvalidInputPolicy, MaterialLayout, Simulation, StepperConfig};
use crate::units::*;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 상태표 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub thickness: LengthUnit,
    pub area: AreaUnit,
    pub conductivity: ConductivityUnit,
    pub energy: EnergyUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
            thickness: LengthUnit::Centimeter,
            area: AreaUnit::SquareCentimeter,
            conductivity: ConductivityUnit::WPerMeterK,
            energy: EnergyUnit::Joule,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en)
    pub language: String,
    pub layout: MaterialLayout,
    pub invalid_input: InvalidInputPolicy,
    /// 틱 주기 [ms]
    pub tick_interval_ms: u64,
    pub stepper: StepperConfig,
    pub input_units: InputUnits,
    pub display_units: DisplayUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            layout: MaterialLayout::Single,
            invalid_input: InvalidInputPolicy::RestoreDefault,
            tick_interval_ms: 50,
            stepper: StepperConfig::default(),
            input_units: InputUnits::default(),
            display_units: DisplayUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Deserialize(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        log::debug!("설정 로드: {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        log::info!("기본 설정 생성: {}", path.display());
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 틱 주기. 0이면 1 ms로 올린다.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// 설정값으로 새 시뮬레이션을 만든다.
    pub fn build_simulation(&self) -> Simulation {
        Simulation::new(self.stepper.clone(), self.layout)
            .with_input_settings(self.input_units, self.invalid_input)
    }
}
