pub mod health;
pub mod pet;
pub mod reservation;
pub mod service;
