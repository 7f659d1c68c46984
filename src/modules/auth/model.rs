pub use cetis_models::auth::*;
