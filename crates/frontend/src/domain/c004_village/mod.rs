pub mod catalog;
pub mod select;

pub use catalog::VILLAGE;
pub use select::VillageSelect;
