pub use cetis_models::groups::*;
