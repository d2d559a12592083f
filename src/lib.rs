pub mod cli;
pub mod data;
pub mod error;
pub mod format;
pub mod id;
pub mod parallel;
pub mod rules;
pub mod team;
pub mod validate;

pub use error::{Error, Result};
