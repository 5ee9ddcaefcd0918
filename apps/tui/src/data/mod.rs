pub mod coords;
pub mod error;
pub mod loader;
pub mod models;

pub use error::DataError;
pub use loader::{load_dataset, Dataset};
pub use models::{LandUseRecord, ProductionRecord, RegionalRecord, ScoreTable};
