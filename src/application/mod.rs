//! Application layer managing the selection session and screen state.
//!
//! This module sits between the domain layer and the presentation layer:
//! it owns the single selection session and the visual state around it.

pub mod session;
pub mod state;

pub use session::*;
pub use state::*;
