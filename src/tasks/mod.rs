//! Background Tasks Module
//!
//! Contains background tasks that run periodically for each cache.
//!
//! # Tasks
//! - Sweeper: expires stale entries and evicts under memory pressure

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
