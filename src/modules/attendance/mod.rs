pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod sheet;
pub mod stats;

pub use router::init_attendance_router;
