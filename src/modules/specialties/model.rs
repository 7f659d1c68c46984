pub use cetis_models::specialties::*;
