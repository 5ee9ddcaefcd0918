pub mod land_use;
pub mod production;
pub mod racing;
pub mod radar;
