//! ALU arithmetic operations.
//!
//! Implements addition, subtraction, multiplication, and division on
//! 32-bit two's complement words. Overflow wraps; `i32::MIN / -1` wraps
//! to `i32::MIN`.

use super::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be an arithmetic variant).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The wrapped result, `None` when dividing by zero. Returns `Some(0)` for
/// non-arithmetic opcodes.
pub fn execute(op: AluOp, a: i32, b: i32) -> Option<i32> {
    match op {
        AluOp::Add => Some(a.wrapping_add(b)),
        AluOp::Sub => Some(a.wrapping_sub(b)),
        AluOp::Mul => Some(a.wrapping_mul(b)),
        AluOp::Div => {
            if b == 0 {
                None
            } else {
                Some(a.wrapping_div(b))
            }
        }
        AluOp::And | AluOp::Or | AluOp::Xor => Some(0),
    }
}
