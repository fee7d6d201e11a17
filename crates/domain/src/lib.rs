//! # devbook-domain
//!
//! Pure domain model for the devbook device-reservation backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Users** (people who book devices)
//! - Define **Departments** (organisational units that own devices)
//! - Define **Devices** (bookable equipment, unique by serial number)
//! - Define **Reservations** (a user's booking of a device over a time window)
//! - Contain all single-record invariant enforcement
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod department;
pub mod device;
pub mod reservation;
pub mod user;
