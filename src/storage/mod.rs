//! File collaborators for the CLI layer
//!
//! The core never opens files itself; it consumes and produces byte buffers.

pub mod file_io;

pub use file_io::{read_bytes, write_bytes_atomic};
