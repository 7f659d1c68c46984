pub use cetis_models::periods::*;
