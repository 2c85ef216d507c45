//! # Storage Module
//!
//! Data persistence for the baby tracker: the storage traits the domain
//! layer depends on, and the local-file backend (CSV event table plus JSON
//! settings documents).

pub mod csv;
pub mod traits;

pub use traits::*;
