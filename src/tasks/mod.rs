//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache engine.
//!
//! # Tasks
//! - TTL sweep: removes expired cache entries when the clock signals a
//!   sweep is due

mod cleanup;

pub(crate) use cleanup::spawn_sweep_task;
