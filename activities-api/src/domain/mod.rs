mod activity;
mod directory;
mod email;
mod error;
pub mod seed;

pub use activity::*;
pub use directory::*;
pub use email::*;
pub use error::*;
