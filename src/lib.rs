//! locsel - Location Selector Library
//!
//! A terminal client for picking a country, then a state within it, then a
//! city within that state, backed by a remote lookup service.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
