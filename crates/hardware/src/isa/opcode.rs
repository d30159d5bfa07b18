//! APEX opcodes and their static properties.
//!
//! Every per-opcode decision the pipeline makes (which registers are read,
//! which are written, whether the zero flag is touched, which condition a
//! branch tests) is answered here by an exhaustive `match`, so adding an
//! opcode forces every table to be revisited.

use std::fmt;
use std::str::FromStr;

use crate::core::arch::flags::ConditionFlags;

/// The closed set of APEX operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `rd = rs1 + rs2`
    Add,
    /// `rd = rs1 + imm`
    Addl,
    /// `rd = rs1 - rs2`
    Sub,
    /// `rd = rs1 - imm`
    Subl,
    /// `rd = rs1 * rs2`
    Mul,
    /// `rd = rs1 / rs2`
    Div,
    /// `rd = rs1 & rs2`
    And,
    /// `rd = rs1 | rs2`
    Or,
    /// `rd = rs1 ^ rs2`
    Xor,
    /// `rd = imm`
    Movc,
    /// `rd = MEM[rs1 + imm]`
    Load,
    /// `rd = MEM[rs1 + imm]; rs1 += 4`
    Loadp,
    /// `MEM[rs1 + imm] = rs2`
    Store,
    /// `MEM[rs1 + imm] = rs2; rs1 += 4`
    Storep,
    /// Three-way compare of two registers.
    Cmp,
    /// Three-way compare of a register with a literal.
    Cml,
    /// Branch if the zero flag is set.
    Bz,
    /// Branch if the zero flag is clear.
    Bnz,
    /// Branch if the positive flag is set.
    Bp,
    /// Branch if the positive flag is clear.
    Bnp,
    /// Branch if the negative flag is set.
    Bn,
    /// Branch if the negative flag is clear.
    Bnn,
    /// `PC = rs1 + imm`
    Jump,
    /// `rd = pc + 4; PC = rs1 + imm`
    Jalr,
    /// Stop fetching; ends the run when it retires.
    Halt,
    /// Consumed by Fetch and never decoded.
    #[default]
    Nop,
}

/// Operand layout of an instruction's text form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `OP,Rd,Rs1,Rs2`
    ThreeReg,
    /// `OP,Rd,Rs1,#imm`
    RegRegImm,
    /// `OP,Rsrc,Rbase,#imm`; the base lands in `rs1`, the value in `rs2`.
    Store,
    /// `OP,Rd,#imm`
    DestImm,
    /// `OP,Rs1,#imm`
    SourceImm,
    /// `OP,Rs1,Rs2`
    TwoSource,
    /// `OP,#imm`
    Imm,
    /// `OP`
    Bare,
}

impl Format {
    /// Number of operands following the mnemonic.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::ThreeReg | Self::RegRegImm | Self::Store => 3,
            Self::DestImm | Self::SourceImm | Self::TwoSource => 2,
            Self::Imm => 1,
            Self::Bare => 0,
        }
    }
}

/// Coarse instruction category used for the statistics mix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionClass {
    /// Register and immediate arithmetic, logic, `MOVC`, and compares.
    Alu,
    /// `LOAD`, `LOADP`.
    Load,
    /// `STORE`, `STOREP`.
    Store,
    /// Conditional branches.
    Branch,
    /// `JUMP`, `JALR`.
    Control,
    /// `HALT`, `NOP`.
    System,
}

/// Flag condition tested by a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCondition {
    /// Zero flag set.
    Zero,
    /// Zero flag clear.
    NotZero,
    /// Positive flag set.
    Positive,
    /// Positive flag clear.
    NotPositive,
    /// Negative flag set.
    Negative,
    /// Negative flag clear.
    NotNegative,
}

impl BranchCondition {
    /// Returns `true` if the branch is taken under `flags`.
    pub const fn holds(self, flags: ConditionFlags) -> bool {
        match self {
            Self::Zero => flags.zero,
            Self::NotZero => !flags.zero,
            Self::Positive => flags.positive,
            Self::NotPositive => !flags.positive,
            Self::Negative => flags.negative,
            Self::NotNegative => !flags.negative,
        }
    }
}

impl Opcode {
    /// Every opcode, in table order.
    pub const ALL: [Self; 26] = [
        Self::Add,
        Self::Addl,
        Self::Sub,
        Self::Subl,
        Self::Mul,
        Self::Div,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Movc,
        Self::Load,
        Self::Loadp,
        Self::Store,
        Self::Storep,
        Self::Cmp,
        Self::Cml,
        Self::Bz,
        Self::Bnz,
        Self::Bp,
        Self::Bnp,
        Self::Bn,
        Self::Bnn,
        Self::Jump,
        Self::Jalr,
        Self::Halt,
        Self::Nop,
    ];

    /// Canonical upper-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Addl => "ADDL",
            Self::Sub => "SUB",
            Self::Subl => "SUBL",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Movc => "MOVC",
            Self::Load => "LOAD",
            Self::Loadp => "LOADP",
            Self::Store => "STORE",
            Self::Storep => "STOREP",
            Self::Cmp => "CMP",
            Self::Cml => "CML",
            Self::Bz => "BZ",
            Self::Bnz => "BNZ",
            Self::Bp => "BP",
            Self::Bnp => "BNP",
            Self::Bn => "BN",
            Self::Bnn => "BNN",
            Self::Jump => "JUMP",
            Self::Jalr => "JALR",
            Self::Halt => "HALT",
            Self::Nop => "NOP",
        }
    }

    /// Operand layout of the text form.
    pub const fn format(self) -> Format {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::And | Self::Or | Self::Xor => {
                Format::ThreeReg
            }
            Self::Addl | Self::Subl | Self::Load | Self::Loadp | Self::Jalr => Format::RegRegImm,
            Self::Store | Self::Storep => Format::Store,
            Self::Movc => Format::DestImm,
            Self::Cml | Self::Jump => Format::SourceImm,
            Self::Cmp => Format::TwoSource,
            Self::Bz | Self::Bnz | Self::Bp | Self::Bnp | Self::Bn | Self::Bnn => Format::Imm,
            Self::Halt | Self::Nop => Format::Bare,
        }
    }

    /// Category for the statistics mix.
    pub const fn class(self) -> InstructionClass {
        match self {
            Self::Add
            | Self::Addl
            | Self::Sub
            | Self::Subl
            | Self::Mul
            | Self::Div
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Movc
            | Self::Cmp
            | Self::Cml => InstructionClass::Alu,
            Self::Load | Self::Loadp => InstructionClass::Load,
            Self::Store | Self::Storep => InstructionClass::Store,
            Self::Bz | Self::Bnz | Self::Bp | Self::Bnp | Self::Bn | Self::Bnn => {
                InstructionClass::Branch
            }
            Self::Jump | Self::Jalr => InstructionClass::Control,
            Self::Halt | Self::Nop => InstructionClass::System,
        }
    }

    /// Whether Decode reads `rs1`.
    pub const fn reads_rs1(self) -> bool {
        matches!(
            self.format(),
            Format::ThreeReg | Format::RegRegImm | Format::Store | Format::SourceImm | Format::TwoSource
        )
    }

    /// Whether Decode reads `rs2`.
    pub const fn reads_rs2(self) -> bool {
        matches!(self.format(), Format::ThreeReg | Format::Store | Format::TwoSource)
    }

    /// Whether Writeback stores the result buffer into `rd`.
    pub const fn writes_rd(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Addl
                | Self::Sub
                | Self::Subl
                | Self::Mul
                | Self::Div
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Movc
                | Self::Load
                | Self::Loadp
                | Self::Jalr
        )
    }

    /// Whether the base register `rs1` is post-incremented.
    pub const fn post_increments(self) -> bool {
        matches!(self, Self::Loadp | Self::Storep)
    }

    /// Whether the Memory stage reads data memory.
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Load | Self::Loadp)
    }

    /// Whether the Memory stage writes data memory.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store | Self::Storep)
    }

    /// Whether Execute updates the zero flag from the result.
    pub const fn sets_zero_flag(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Addl
                | Self::Sub
                | Self::Subl
                | Self::Mul
                | Self::Div
                | Self::And
                | Self::Movc
        )
    }

    /// Condition tested by a conditional branch, `None` for everything else.
    pub const fn branch_condition(self) -> Option<BranchCondition> {
        match self {
            Self::Bz => Some(BranchCondition::Zero),
            Self::Bnz => Some(BranchCondition::NotZero),
            Self::Bp => Some(BranchCondition::Positive),
            Self::Bnp => Some(BranchCondition::NotPositive),
            Self::Bn => Some(BranchCondition::Negative),
            Self::Bnn => Some(BranchCondition::NotNegative),
            _ => None,
        }
    }

    /// Whether Fetch consults the branch target buffer for this opcode.
    ///
    /// `BN` and `BNN` are conditional but never predicted.
    pub const fn is_predicted(self) -> bool {
        matches!(self, Self::Bz | Self::Bnz | Self::Bp | Self::Bnp)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Error returned when a mnemonic is not part of the instruction set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownMnemonic(pub String);

impl fmt::Display for UnknownMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mnemonic '{}'", self.0)
    }
}

impl std::error::Error for UnknownMnemonic {}

impl FromStr for Opcode {
    type Err = UnknownMnemonic;

    /// Parses a mnemonic, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_owned()))
    }
}
