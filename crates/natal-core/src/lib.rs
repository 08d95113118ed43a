pub mod birth;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod signs;
pub mod subscription;
pub mod validation;
pub mod zodiac;

pub use error::{NatalError, Result};
