//! 1차원 열전도 스테퍼와 보고용 계산.
//!
//! 열원 → 세그먼트[0] → … → 세그먼트[n-1] → 열흡수원 체인을 명시적 유한차분으로 진행한다.

pub mod color;
pub mod material;
pub mod params;
pub mod report;
pub mod stepper;

pub use color::{temperature_to_color, Rgb};
pub use material::Material;
pub use params::{InputUnits, InvalidInputPolicy, Parameter, ParameterError, ParameterOutcome};
pub use report::{summary_rows, table_energy, Element, SummaryRow};
pub use stepper::{MaterialLayout, Simulation, SinkCoupling, StepperConfig};
