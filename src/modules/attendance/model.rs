pub use cetis_models::attendance::*;
