//! 단위 정의 및 변환 모듈 모음.
//!
//! 시뮬레이션 내부 기준은 °C, m, m², W/m·K, J 이다.

pub mod area;
pub mod conductivity;
pub mod energy;
pub mod length;
pub mod temperature;

pub use area::{convert_area, AreaUnit};
pub use conductivity::{convert_conductivity, ConductivityUnit};
pub use energy::{convert_energy, EnergyUnit};
pub use length::{convert_length, LengthUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
