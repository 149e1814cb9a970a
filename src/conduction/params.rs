//! 사용자 입력 문자열을 물성값으로 바꾸는 규칙.
//!
//! 숫자가 아닌 입력은 오류로 돌려주지 않고 항상 안전한 값으로 치환한다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::{
    convert_area, convert_conductivity, convert_length, convert_temperature, AreaUnit,
    ConductivityUnit, LengthUnit, TemperatureUnit,
};

/// 설정 가능한 입력 항목. 재료 인덱스는 0부터 시작한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Conductivity(usize),
    Thickness(usize),
    Area(usize),
    SourceTemperature,
}

impl Parameter {
    pub fn material(&self) -> Option<usize> {
        match self {
            Parameter::Conductivity(i) | Parameter::Thickness(i) | Parameter::Area(i) => Some(*i),
            Parameter::SourceTemperature => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Conductivity(i) => write!(f, "conductivity:{}", i + 1),
            Parameter::Thickness(i) => write!(f, "thickness:{}", i + 1),
            Parameter::Area(i) => write!(f, "area:{}", i + 1),
            Parameter::SourceTemperature => write!(f, "source"),
        }
    }
}

/// 항목 이름 해석 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("알 수 없는 항목: {0}")]
    UnknownName(String),
    #[error("재료 번호는 1부터 시작해야 합니다: {0}")]
    BadMaterialIndex(String),
    #[error("존재하지 않는 재료: {0}")]
    NoSuchMaterial(usize),
}

/// `source`, `conductivity`, `thickness:2`, `area:3` 형식을 해석한다.
/// 재료 번호는 1부터 세며 생략하면 첫 번째 재료이다.
impl FromStr for Parameter {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        let (name, index) = match s.split_once(':') {
            Some((name, idx)) => {
                let n: usize = idx
                    .trim()
                    .parse()
                    .map_err(|_| ParameterError::BadMaterialIndex(idx.to_string()))?;
                if n == 0 {
                    return Err(ParameterError::BadMaterialIndex(idx.to_string()));
                }
                (name.trim().to_string(), n - 1)
            }
            None => (s.clone(), 0),
        };
        match name.as_str() {
            "k" | "conductivity" => Ok(Parameter::Conductivity(index)),
            "l" | "thickness" => Ok(Parameter::Thickness(index)),
            "a" | "area" => Ok(Parameter::Area(index)),
            "source" | "source-temp" | "heat-source" => Ok(Parameter::SourceTemperature),
            _ => Err(ParameterError::UnknownName(s)),
        }
    }
}

/// 잘못된 숫자 입력을 받았을 때의 처리 방식.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InvalidInputPolicy {
    /// 항목의 문서화된 기본값으로 되돌린다.
    #[default]
    RestoreDefault,
    /// 현재 값을 그대로 둔다.
    KeepCurrent,
}

/// 입력 문자열을 해석할 때 사용하는 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputUnits {
    pub temperature: TemperatureUnit,
    pub thickness: LengthUnit,
    pub area: AreaUnit,
    pub conductivity: ConductivityUnit,
}

impl Default for InputUnits {
    fn default() -> Self {
        Self {
            temperature: TemperatureUnit::Celsius,
            thickness: LengthUnit::Meter,
            area: AreaUnit::SquareMeter,
            conductivity: ConductivityUnit::WPerMeterK,
        }
    }
}

impl InputUnits {
    /// 입력 단위 값을 내부 기준 단위(°C, m, m², W/m·K)로 환산한다.
    pub fn to_base(&self, parameter: Parameter, value: f64) -> f64 {
        match parameter {
            Parameter::Conductivity(_) => {
                convert_conductivity(value, self.conductivity, ConductivityUnit::WPerMeterK)
            }
            Parameter::Thickness(_) => convert_length(value, self.thickness, LengthUnit::Meter),
            Parameter::Area(_) => convert_area(value, self.area, AreaUnit::SquareMeter),
            Parameter::SourceTemperature => {
                convert_temperature(value, self.temperature, TemperatureUnit::Celsius)
            }
        }
    }
}

/// 입력 적용 결과. 값은 적용 후 실제로 사용 중인 내부 단위 값이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterOutcome {
    Applied(f64),
    FellBack(f64),
}

impl ParameterOutcome {
    pub fn value(&self) -> f64 {
        match self {
            ParameterOutcome::Applied(v) | ParameterOutcome::FellBack(v) => *v,
        }
    }

    pub fn fell_back(&self) -> bool {
        matches!(self, ParameterOutcome::FellBack(_))
    }
}

/// 문자열 앞부분의 10진수 숫자만 읽는다. `"12 cm"`은 12, `"abc"`는 `None`.
///
/// 부호, 소수점, 지수(`1e-3`)를 허용하며 숫자가 하나도 없으면 `None`을 돌려준다.
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// 입력을 해석해 내부 단위 값을 만든다. 유한한 양수가 아니면 `None`.
pub(crate) fn accept(raw: &str, parameter: Parameter, units: &InputUnits) -> Option<f64> {
    let value = parse_leading_number(raw)?;
    let base = units.to_base(parameter, value);
    (base.is_finite() && base > 0.0).then_some(base)
}
