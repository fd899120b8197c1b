pub mod c001_doctor;
pub mod c002_poli;
pub mod c003_drug_batch;
pub mod c004_village;
pub mod c005_tariff;
