//! Infrastructure layer providing external service integrations.
//!
//! This module contains the HTTP lookup client, background fetch dispatch,
//! configuration, logging, and clipboard access.

pub mod clipboard;
pub mod config;
pub mod dispatcher;
pub mod http;
pub mod logging;

pub use clipboard::*;
pub use config::*;
pub use dispatcher::*;
pub use http::*;
pub use logging::*;
