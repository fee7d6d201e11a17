//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod department_service;
pub mod device_service;
pub mod reservation_service;
pub mod user_service;

#[cfg(test)]
mod testing;
