pub mod catalog;
pub mod select;

pub use catalog::POLI;
pub use select::PoliSelect;
