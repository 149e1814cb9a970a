//! 사용자가 입력한 단위 문자열(`cm`, `m2`, `F` 등)을 단위 enum으로 해석한다.

use thiserror::Error;

use crate::units::*;

/// 단위 해석 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
}

pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "cm" => Ok(LengthUnit::Centimeter),
        "mm" => Ok(LengthUnit::Millimeter),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_area_unit(s: &str) -> Result<AreaUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m2" | "m^2" | "m²" | "sqm" => Ok(AreaUnit::SquareMeter),
        "cm2" | "cm^2" | "cm²" => Ok(AreaUnit::SquareCentimeter),
        "ft2" | "ft^2" | "ft²" | "sqft" => Ok(AreaUnit::SquareFoot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_energy_unit(s: &str) -> Result<EnergyUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "j" | "joule" => Ok(EnergyUnit::Joule),
        "kj" | "kilojoule" => Ok(EnergyUnit::Kilojoule),
        "kcal" | "kilocalorie" => Ok(EnergyUnit::KiloCalorie),
        "btu" => Ok(EnergyUnit::Btu),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_conductivity_unit(s: &str) -> Result<ConductivityUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "w/mk" | "w/(m·k)" | "w/m-k" => Ok(ConductivityUnit::WPerMeterK),
        "btu/h-ft-f" | "btu/(h·ft·f)" => Ok(ConductivityUnit::BtuPerHourFootF),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
