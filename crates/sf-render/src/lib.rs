//! sf-render: offline rendering through the scream filter
//!
//! Reads a WAV file, streams it block by block through
//! [`sf_host::ScreamFilterProcessor`] exactly as a host callback would, and
//! writes the result as 32-bit float WAV.

mod config;
mod error;
mod render;
mod wav;

pub use config::*;
pub use error::*;
pub use render::*;
pub use wav::*;
