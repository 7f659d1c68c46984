pub use cetis_models::subjects::*;
