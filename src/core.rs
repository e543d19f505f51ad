//! Trace record model: operations, addresses, and block geometry.

use std::fmt;

/// Cache line size assumed by every generator (bytes).
pub const BLOCK_SIZE: u64 = 64;

/// Byte address in the traced address space.
pub type Address = u64;

/// Kind of memory access a record performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Store,
}

impl Operation {
    /// Single-character code used in trace files.
    pub fn code(self) -> char {
        match self {
            Operation::Load => 'L',
            Operation::Store => 'S',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'L' => Some(Operation::Load),
            'S' => Some(Operation::Store),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single access in a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TraceRecord {
    pub operation: Operation,
    pub address: Address,
}

impl TraceRecord {
    pub fn load(address: Address) -> Self {
        Self {
            operation: Operation::Load,
            address,
        }
    }

    pub fn store(address: Address) -> Self {
        Self {
            operation: Operation::Store,
            address,
        }
    }

    /// Index of the 64-byte block containing this record's address.
    pub fn block(&self) -> u64 {
        self.address / BLOCK_SIZE
    }

    pub fn is_store(&self) -> bool {
        matches!(self.operation, Operation::Store)
    }
}

/// Renders the data-line layout: `L       0x1A40`.
impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}       0x{:X}", self.operation, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_display_uses_uppercase_hex() {
        assert_eq!(TraceRecord::load(0x1a40).to_string(), "L       0x1A40");
        assert_eq!(TraceRecord::store(0).to_string(), "S       0x0");
    }

    #[test]
    fn operation_codes() {
        assert_eq!(Operation::from_code('L'), Some(Operation::Load));
        assert_eq!(Operation::from_code('S'), Some(Operation::Store));
        assert_eq!(Operation::from_code('M'), None);
        assert_eq!(Operation::Store.code(), 'S');
    }

    #[test]
    fn record_block_index() {
        let r = TraceRecord::load(0x50038);
        assert_eq!(r.block(), 0x50000 / 64);
        assert!(!r.is_store());
        assert!(TraceRecord::store(0x40).is_store());
    }
}
