//! Condition flags.
//!
//! APEX keeps three flags. The zero flag is written by most arithmetic
//! instructions; compares write all three so that exactly one is set.

use std::cmp::Ordering;

/// Zero, negative and positive condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConditionFlags {
    /// Last flag-setting result was zero, or the compared values were equal.
    pub zero: bool,
    /// Left compare operand was smaller.
    pub negative: bool,
    /// Left compare operand was larger.
    pub positive: bool,
}

impl ConditionFlags {
    /// Flags after a three-way compare of `lhs` against `rhs`.
    pub fn compare(lhs: i32, rhs: i32) -> Self {
        match lhs.cmp(&rhs) {
            Ordering::Equal => Self {
                zero: true,
                ..Self::default()
            },
            Ordering::Less => Self {
                negative: true,
                ..Self::default()
            },
            Ordering::Greater => Self {
                positive: true,
                ..Self::default()
            },
        }
    }

    /// Updates only the zero flag from an arithmetic result.
    pub const fn set_zero_from(&mut self, result: i32) {
        self.zero = result == 0;
    }
}
