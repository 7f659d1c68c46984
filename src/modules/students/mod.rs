pub mod controller;
pub mod credential;
pub mod model;
pub mod router;
pub mod service;

pub use router::init_students_router;
