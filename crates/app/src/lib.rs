//! # devbook-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `UserRepository`, `DepartmentRepository`, `DeviceRepository` — CRUD
//!   - `ReservationRepository` — CRUD plus atomic check-and-write for bookings
//!   - `ImageStore` — device image blobs
//!   - `CredentialHasher` — one-way password hashing
//! - Define **driving/inbound ports** as use-case structs:
//!   - `UserService` — register, update, list, get, delete
//!   - `DepartmentService` — CRUD
//!   - `DeviceService` — register with department and serial checks, images
//!   - `ReservationService` — book, confirm, move, cancel, availability
//! - Define the transfer types (`dto`) that cross the service boundary
//!
//! ## Dependency rule
//! Depends on `devbook-domain` only. Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod dto;
pub mod ports;
pub mod services;
