//! 열전도 계산 로직을 라이브러리로 분리하여 CLI 콘솔 뿐 아니라 다른 표시 계층에서도 쓰도록 한다.

pub mod app;
pub mod conduction;
pub mod config;
pub mod conversion;
pub mod cube;
pub mod i18n;
pub mod material_db;
pub mod scheduler;
pub mod ui_cli;
pub mod units;
