pub use cetis_models::teachers::*;
