use serde::{Deserialize, Serialize};
use std::fmt;

/// Opcodes of the implemented ISA subset. Short ("narrow") forms carry the
/// `.n` suffix and occupy 2 bytes; everything else occupies 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    // 24-bit forms
    J,
    Beqz,
    Bnez,
    Bltz,
    Bgez,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Addi,
    L32i,
    S32i,
    Lsi,
    Ssi,
    // 16-bit density forms
    AddN,
    AddiN,
    MovN,
    L32iN,
    S32iN,
    RetN,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::J => "j",
            Opcode::Beqz => "beqz",
            Opcode::Bnez => "bnez",
            Opcode::Bltz => "bltz",
            Opcode::Bgez => "bgez",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::Addi => "addi",
            Opcode::L32i => "l32i",
            Opcode::S32i => "s32i",
            Opcode::Lsi => "lsi",
            Opcode::Ssi => "ssi",
            Opcode::AddN => "add.n",
            Opcode::AddiN => "addi.n",
            Opcode::MovN => "mov.n",
            Opcode::L32iN => "l32i.n",
            Opcode::S32iN => "s32i.n",
            Opcode::RetN => "ret.n",
        }
    }
}

/// A register reference: index 0..=15 into one of the two disjoint banks.
/// `A` is the general-purpose bank, `F` the floating-point bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reg {
    A(u8),
    F(u8),
}

impl Reg {
    /// Raw index placed into a register bit-field on encode.
    pub fn index(self) -> u8 {
        match self {
            Reg::A(n) | Reg::F(n) => n,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::A(n) => write!(f, "a{}", n),
            Reg::F(n) => write!(f, "f{}", n),
        }
    }
}

/// An unresolved reference to a label/symbol plus a constant addend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymExpr {
    pub symbol: String,
    pub addend: i32,
}

impl SymExpr {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self { symbol: symbol.into(), addend: 0 }
    }

    pub fn with_addend(symbol: impl Into<String>, addend: i32) -> Self {
        Self { symbol: symbol.into(), addend }
    }
}

impl fmt::Display for SymExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.addend == 0 {
            write!(f, "{}", self.symbol)
        } else if self.addend > 0 {
            write!(f, "{}+{:#x}", self.symbol, self.addend)
        } else {
            write!(f, "{}-{:#x}", self.symbol, -(self.addend as i64))
        }
    }
}

/// Exactly one variant is active: a register reference, a resolved signed
/// immediate, or a still-symbolic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Reg(Reg),
    Imm(i32),
    Sym(SymExpr),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{}", r),
            Operand::Imm(v) => write!(f, "{:#x}", v),
            Operand::Sym(e) => write!(f, "{}", e),
        }
    }
}

/// An opcode plus its ordered operands. The operand list must match the
/// opcode's declared field layout; the decoder guarantees this and the
/// encoder treats a mismatch as a fatal programming error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
}

impl Instruction {
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }
}
