//! Background Tasks Module
//!
//! # Tasks
//! - Cache cleanup: drops expired favorites cache entries at a fixed interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
