//! Synthetic memory-access trace generator: locality-controlled access patterns
//! for validating cache simulator hit/miss behavior.

pub mod core;
pub mod error;
pub mod metrics;
pub mod random;
pub mod trace;
pub mod workload;

pub use crate::core::{Address, Operation, TraceRecord, BLOCK_SIZE};
pub use crate::error::{Result, TraceError};
pub use crate::metrics::TraceSummary;
pub use crate::random::RandomSource;
pub use crate::workload::Pattern;
