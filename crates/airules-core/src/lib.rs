pub mod error;
pub mod hook;
pub mod io;
pub mod logs;
pub mod paths;
pub mod registry;
pub mod scan;
pub mod state;
pub mod sync;

pub use error::{AirulesError, Result};
