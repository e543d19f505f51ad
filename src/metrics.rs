//! Trace summary: operation mix, block footprint, and address spread.

use crate::core::{TraceRecord, BLOCK_SIZE};
use std::collections::HashSet;

/// Aggregate statistics over a generated or parsed trace.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct TraceSummary {
    /// Total data records (header excluded).
    pub records: u64,
    pub loads: u64,
    pub stores: u64,
    /// Distinct 64-byte blocks touched.
    pub distinct_blocks: u64,
    /// Distinct byte addresses touched.
    pub distinct_addresses: u64,
    pub min_address: u64,
    pub max_address: u64,
    /// Arithmetic mean of addresses.
    pub mean_address: f64,
    /// Population standard deviation of addresses.
    pub address_std_dev: f64,
}

impl TraceSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TraceRecord>,
    {
        let mut summary = Self::new();
        let mut blocks = HashSet::new();
        let mut addresses = HashSet::new();
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        summary.min_address = u64::MAX;

        for record in records {
            summary.records += 1;
            if record.is_store() {
                summary.stores += 1;
            } else {
                summary.loads += 1;
            }
            blocks.insert(record.address / BLOCK_SIZE);
            addresses.insert(record.address);
            summary.min_address = summary.min_address.min(record.address);
            summary.max_address = summary.max_address.max(record.address);
            let a = record.address as f64;
            sum += a;
            sum_sq += a * a;
        }

        if summary.records == 0 {
            summary.min_address = 0;
            return summary;
        }

        let n = summary.records as f64;
        let mean = sum / n;
        summary.distinct_blocks = blocks.len() as u64;
        summary.distinct_addresses = addresses.len() as u64;
        summary.mean_address = mean;
        summary.address_std_dev = (sum_sq / n - mean * mean).max(0.0).sqrt();
        summary
    }

    /// Fraction of records that are stores; 0 for an empty trace.
    pub fn store_fraction(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        self.stores as f64 / self.records as f64
    }

    pub fn load_fraction(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        self.loads as f64 / self.records as f64
    }

    /// Bytes between the lowest and highest touched block, inclusive.
    pub fn span_bytes(&self) -> u64 {
        if self.records == 0 {
            return 0;
        }
        (self.max_address / BLOCK_SIZE - self.min_address / BLOCK_SIZE + 1) * BLOCK_SIZE
    }
}
