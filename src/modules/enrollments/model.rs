pub use cetis_models::enrollments::*;
