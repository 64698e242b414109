#![forbid(unsafe_code)]
#![doc = "Common error types for the ztls cipher-suite core."]

pub mod error;

pub use error::*;
