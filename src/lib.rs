#![warn(rust_2018_idioms)]

mod error;
pub mod extension;
pub mod header;
pub mod packet;
pub mod padding;

pub use error::{Error, Result};
