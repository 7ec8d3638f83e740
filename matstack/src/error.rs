//! Error types for matrix stack operations
//!
//! Every variant is a contract violation surfaced synchronously to the
//! caller. A failing call leaves the stack exactly as it was.

use thiserror::Error;

/// Errors reported by [`MatrixStack`](crate::stack::MatrixStack) operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// Construction requested fewer than one slot
    #[error("stack capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// `push` called while the cursor was already at the last slot
    #[error("max stack size of {capacity} reached")]
    Overflow { capacity: usize },

    /// `pop` called while the cursor was already at the bottom
    #[error("already at the bottom of the stack")]
    Underflow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StackError::InvalidCapacity(0).to_string(),
            "stack capacity must be at least 1, got 0"
        );
        assert_eq!(
            StackError::Overflow { capacity: 16 }.to_string(),
            "max stack size of 16 reached"
        );
        assert_eq!(
            StackError::Underflow.to_string(),
            "already at the bottom of the stack"
        );
    }
}
