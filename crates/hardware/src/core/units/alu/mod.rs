//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage.
//! All operations work on signed 32-bit words and wrap on overflow.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Div
//! - [`logic`]:      And, Or, Xor

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor).
pub mod logic;

use crate::isa::Opcode;

/// Operation performed by the ALU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping multiplication.
    Mul,
    /// Signed division, truncating toward zero.
    Div,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
}

impl AluOp {
    /// ALU operation used by an opcode, `None` if the opcode bypasses the ALU.
    ///
    /// The literal forms share the operation of their register forms.
    pub const fn from_opcode(op: Opcode) -> Option<Self> {
        match op {
            Opcode::Add | Opcode::Addl => Some(Self::Add),
            Opcode::Sub | Opcode::Subl => Some(Self::Sub),
            Opcode::Mul => Some(Self::Mul),
            Opcode::Div => Some(Self::Div),
            Opcode::And => Some(Self::And),
            Opcode::Or => Some(Self::Or),
            Opcode::Xor => Some(Self::Xor),
            _ => None,
        }
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand
    ///
    /// # Returns
    ///
    /// The 32-bit result, or `None` for a division by zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use apex_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), Some(50));
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), Some(i32::MIN));
    /// assert_eq!(Alu::execute(AluOp::Xor, 0b1100, 0b1010), Some(0b0110));
    /// assert_eq!(Alu::execute(AluOp::Div, 7, 0), None);
    /// ```
    pub fn execute(op: AluOp, a: i32, b: i32) -> Option<i32> {
        match op {
            AluOp::Add | AluOp::Sub | AluOp::Mul | AluOp::Div => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Xor => Some(logic::execute(op, a, b)),
        }
    }
}
