pub mod models;
pub mod errors;
pub mod lookup;
pub mod cascade;

pub use models::*;
pub use errors::*;
pub use lookup::*;
pub use cascade::*;
