//! # Built-in subscribers
//!
//! - [`LogWriter`]: writes events as `tracing` records (demo/debug).

mod log;

pub use log::LogWriter;
