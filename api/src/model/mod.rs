pub mod reservation;
pub mod service;
