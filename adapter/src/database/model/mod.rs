pub mod pet;
pub mod reservation;
pub mod service;
