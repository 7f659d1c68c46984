pub use cetis_models::reports::*;
