//! Bit-pattern tables for the core ISA subset.
//!
//! Two independent tables, one per length class: bit 3 of the first byte
//! (0x08) selects the 2-byte density encodings, otherwise the instruction is
//! the 3-byte form. Matching is a plain linear scan over (mask, bits) tuples;
//! the tables are static and never mutated, so decoder and encoder share them
//! without synchronization.

use super::fields::{FieldDesc, FieldKind, Pattern};
use crate::insn::Opcode;

const fn gpr(offset: u8) -> FieldDesc {
    FieldDesc { offset, width: 4, kind: FieldKind::Gpr }
}

const fn fpr(offset: u8) -> FieldDesc {
    FieldDesc { offset, width: 4, kind: FieldKind::Fpr }
}

const fn imm(offset: u8, width: u8, scale: u8, signed: bool) -> FieldDesc {
    FieldDesc { offset, width, kind: FieldKind::Imm { scale, signed } }
}

const JUMP18: FieldDesc = FieldDesc { offset: 6, width: 18, kind: FieldKind::JumpTarget };
const BRANCH12: FieldDesc = FieldDesc { offset: 12, width: 12, kind: FieldKind::BranchTarget };
const LDST4X2: FieldDesc = FieldDesc { offset: 12, width: 4, kind: FieldKind::LdStOffset };

/// 3-byte (24-bit) encodings. Operand order matches assembly order:
/// destination first for ALU ops, source register then target for branches.
pub static PATTERNS24: &[Pattern] = &[
    // J offset18 (CALL format, op0=6)
    Pattern { opcode: Opcode::J, mask: 0x00003F, bits: 0x000006, fields: &[JUMP18] },
    // BRI12 conditional branches: m field at bits 6..7 selects the condition
    Pattern { opcode: Opcode::Beqz, mask: 0x0000FF, bits: 0x000016, fields: &[gpr(8), BRANCH12] },
    Pattern { opcode: Opcode::Bnez, mask: 0x0000FF, bits: 0x000056, fields: &[gpr(8), BRANCH12] },
    Pattern { opcode: Opcode::Bltz, mask: 0x0000FF, bits: 0x000096, fields: &[gpr(8), BRANCH12] },
    Pattern { opcode: Opcode::Bgez, mask: 0x0000FF, bits: 0x0000D6, fields: &[gpr(8), BRANCH12] },
    // RRR: op2 at bits 20..23 selects the operation
    Pattern { opcode: Opcode::Add, mask: 0xFF000F, bits: 0x800000, fields: &[gpr(12), gpr(8), gpr(4)] },
    Pattern { opcode: Opcode::Sub, mask: 0xFF000F, bits: 0xC00000, fields: &[gpr(12), gpr(8), gpr(4)] },
    Pattern { opcode: Opcode::And, mask: 0xFF000F, bits: 0x100000, fields: &[gpr(12), gpr(8), gpr(4)] },
    Pattern { opcode: Opcode::Or, mask: 0xFF000F, bits: 0x200000, fields: &[gpr(12), gpr(8), gpr(4)] },
    Pattern { opcode: Opcode::Xor, mask: 0xFF000F, bits: 0x300000, fields: &[gpr(12), gpr(8), gpr(4)] },
    // RRI8: r field at bits 12..15 selects the operation, imm8 at bits 16..23
    Pattern { opcode: Opcode::Addi, mask: 0x00F00F, bits: 0x00C002, fields: &[gpr(4), gpr(8), imm(16, 8, 1, true)] },
    Pattern { opcode: Opcode::L32i, mask: 0x00F00F, bits: 0x002002, fields: &[gpr(4), gpr(8), imm(16, 8, 4, false)] },
    Pattern { opcode: Opcode::S32i, mask: 0x00F00F, bits: 0x006002, fields: &[gpr(4), gpr(8), imm(16, 8, 4, false)] },
    // FP load/store with the 4-bit x2 offset field at bits 12..15
    Pattern { opcode: Opcode::Lsi, mask: 0xFF000F, bits: 0x000003, fields: &[fpr(4), gpr(8), LDST4X2] },
    Pattern { opcode: Opcode::Ssi, mask: 0xFF000F, bits: 0x080003, fields: &[fpr(4), gpr(8), LDST4X2] },
];

/// 2-byte (16-bit) density encodings; bit 3 of the first byte is always set.
pub static PATTERNS16: &[Pattern] = &[
    Pattern { opcode: Opcode::RetN, mask: 0xFFFF, bits: 0xF00D, fields: &[] },
    Pattern { opcode: Opcode::MovN, mask: 0xF00F, bits: 0x000D, fields: &[gpr(4), gpr(8)] },
    Pattern { opcode: Opcode::AddN, mask: 0x000F, bits: 0x000A, fields: &[gpr(12), gpr(8), gpr(4)] },
    Pattern { opcode: Opcode::AddiN, mask: 0x000F, bits: 0x000B, fields: &[gpr(12), gpr(8), imm(4, 4, 1, true)] },
    Pattern { opcode: Opcode::L32iN, mask: 0x000F, bits: 0x0008, fields: &[gpr(4), gpr(8), imm(12, 4, 4, false)] },
    Pattern { opcode: Opcode::S32iN, mask: 0x000F, bits: 0x0009, fields: &[gpr(4), gpr(8), imm(12, 4, 4, false)] },
];

/// Encoding-side lookup. A missing entry means the tables are incomplete,
/// which is a bug, not an input condition.
pub fn layout_of(opcode: Opcode) -> &'static Pattern {
    PATTERNS16
        .iter()
        .chain(PATTERNS24.iter())
        .find(|p| p.opcode == opcode)
        .unwrap_or_else(|| panic!("no field layout for opcode {:?}", opcode))
}
