//! ALU bitwise logical operations.

use super::AluOp;

/// Executes a bitwise logical operation.
///
/// Returns `0` for non-logical opcodes.
pub fn execute(op: AluOp, a: i32, b: i32) -> i32 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Div => 0,
    }
}
