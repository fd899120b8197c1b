pub mod catalog;
pub mod select;

pub use catalog::DRUG_BATCH;
pub use select::DrugBatchSelect;
