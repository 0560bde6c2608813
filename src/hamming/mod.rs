//! Hamming cost matrices over the joint states of N binary nodes.
//!
//! Small matrices live in a table shared by the whole process.
//! Large ones are computed on first request and memoized in a [`Store`],
//! which outlives the process when backed by [`Disk`].
pub mod disk;
pub use disk::*;

pub mod matrix;
pub use matrix::*;

pub mod memory;
pub use memory::*;

pub mod provider;
pub use provider::*;

pub mod store;
pub use store::*;
