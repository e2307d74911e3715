//! Pipeline module - the dataset, the cleaning stages and the runner

pub mod config;
pub mod consistency;
pub mod dataset;
pub mod dedup;
pub mod encode;
pub mod error;
pub mod impute;
pub mod integrity;
pub mod loader;
pub mod outliers;
pub mod report;
pub mod runner;
pub mod scale;
pub mod text;

pub use config::*;
pub use consistency::*;
pub use dataset::*;
pub use dedup::*;
pub use encode::*;
pub use error::PrepError;
pub use impute::*;
pub use integrity::*;
pub use loader::*;
pub use outliers::*;
pub use report::*;
pub use runner::*;
pub use scale::*;
pub use text::*;
