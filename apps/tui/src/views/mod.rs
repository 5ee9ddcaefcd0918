pub mod land_use;
pub mod production;
pub mod racing;
pub mod radar;
pub mod scale;

pub use land_use::{LandUseFrame, LandUseView};
pub use production::ProductionView;
pub use racing::{RacingBar, RacingView};
