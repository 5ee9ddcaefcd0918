pub mod charts;
pub mod legend;
pub mod map;
pub mod popup;
pub mod radar;
