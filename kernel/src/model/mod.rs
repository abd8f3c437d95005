pub mod id;
pub mod pet;
pub mod reservation;
pub mod service;
