pub use cetis_models::users::*;
