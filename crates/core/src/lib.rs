//! Pure domain logic for the pawclass booking marketplace.
//!
//! This crate has zero internal deps so it can be used by both the DB and
//! API layers (and any future worker or CLI tooling).

pub mod application;
pub mod benefits;
pub mod booking;
pub mod error;
pub mod roles;
pub mod schedule;
pub mod types;
