pub use cetis_models::students::*;
