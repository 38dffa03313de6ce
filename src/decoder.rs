use thiserror::Error;
use tracing::trace;

use crate::insn::{Instruction, Operand, Reg};
use crate::isa::core::{PATTERNS16, PATTERNS24};
use crate::isa::fields::{sign_ext, FieldKind, Pattern};

/// Malformed-input failures. The caller's byte position is not advanced, so
/// it can report or skip at the exact offset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("insufficient bytes at {addr:#010x}: need {need}, have {have}")]
    InsufficientBytes { addr: u32, need: usize, have: usize },
    #[error("unknown instruction encoding {word:#08x} at {addr:#010x}")]
    UnknownEncoding { word: u32, addr: u32 },
    #[error("register index {index} out of range (register banks have 16 entries)")]
    RegisterOutOfRange { index: u32 },
}

/// Validate a raw general-purpose register field. Out-of-range values fail;
/// they are never wrapped or clamped.
pub fn decode_gpr(raw: u32) -> Result<Reg, DecodeError> {
    if raw > 15 {
        return Err(DecodeError::RegisterOutOfRange { index: raw });
    }
    Ok(Reg::A(raw as u8))
}

/// Validate a raw floating-point register field.
pub fn decode_fpr(raw: u32) -> Result<Reg, DecodeError> {
    if raw > 15 {
        return Err(DecodeError::RegisterOutOfRange { index: raw });
    }
    Ok(Reg::F(raw as u8))
}

/// Decode one instruction from the start of `bytes`. On success returns the
/// structured instruction and the number of bytes consumed (exactly 2 or 3,
/// fixed by the header bit before table dispatch).
pub fn decode(bytes: &[u8], addr: u32) -> Result<(Instruction, usize), DecodeError> {
    if bytes.len() < 2 {
        return Err(DecodeError::InsufficientBytes { addr, need: 2, have: bytes.len() });
    }

    // Bit 3 of the first byte discriminates the length class.
    let (word, size, table) = if bytes[0] & 0x08 != 0 {
        let word = u32::from(bytes[0]) | (u32::from(bytes[1]) << 8);
        (word, 2, PATTERNS16)
    } else {
        if bytes.len() < 3 {
            return Err(DecodeError::InsufficientBytes { addr, need: 3, have: bytes.len() });
        }
        let word =
            u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2]) << 16);
        (word, 3, PATTERNS24)
    };

    for pat in table {
        if word & pat.mask == pat.bits {
            let insn = decode_fields(pat, word)?;
            trace!(addr, size, opcode = insn.opcode.mnemonic(), "decoded");
            return Ok((insn, size));
        }
    }

    Err(DecodeError::UnknownEncoding { word, addr })
}

fn decode_fields(pat: &Pattern, word: u32) -> Result<Instruction, DecodeError> {
    let mut operands = Vec::with_capacity(pat.fields.len());
    for field in pat.fields {
        let raw = field.extract(word);
        let operand = match field.kind {
            FieldKind::Gpr => Operand::Reg(decode_gpr(raw)?),
            FieldKind::Fpr => Operand::Reg(decode_fpr(raw)?),
            FieldKind::Imm { scale, signed } => {
                let v = if signed { sign_ext(raw, field.width as u32) } else { raw as i32 };
                Operand::Imm(v * scale as i32)
            }
            // Targets are stored biased by -4; report the unbiased value.
            FieldKind::JumpTarget | FieldKind::BranchTarget => {
                Operand::Imm(sign_ext(raw, field.width as u32) + 4)
            }
            FieldKind::LdStOffset => Operand::Imm((raw << 1) as i32),
        };
        operands.push(operand);
    }
    Ok(Instruction::new(pat.opcode, operands))
}
