pub mod health;
pub mod reservation;
pub mod service;
