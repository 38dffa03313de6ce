use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::insn::SymExpr;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FixupFlags: u8 {
        /// The field value is relative to the address of the instruction
        /// containing it.
        const PC_REL = 1 << 0;
    }
}

/// One kind per relocatable field shape, plus the generic data kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FixupKind {
    /// 4-bit load/store offset, byte value scaled by 2.
    LdStImm4Scale2,
    /// 18-bit jump target at bit offset 6.
    JumpTarget,
    /// 12-bit conditional-branch target at bit offset 12.
    CondBranch12,
    Data1,
    Data2,
    Data4,
    Data8,
    PcRel4,
}

/// Static description of where a fixup kind's bits live.
#[derive(Debug, Clone, Copy)]
pub struct FixupInfo {
    pub name: &'static str,
    pub bit_offset: u32,
    pub bit_width: u32,
    pub flags: FixupFlags,
}

impl FixupKind {
    pub fn info(self) -> FixupInfo {
        match self {
            FixupKind::LdStImm4Scale2 => FixupInfo {
                name: "fixup_ldst_imm4_scale2",
                bit_offset: 12,
                bit_width: 4,
                flags: FixupFlags::empty(),
            },
            FixupKind::JumpTarget => FixupInfo {
                name: "fixup_jump_target",
                bit_offset: 6,
                bit_width: 18,
                flags: FixupFlags::PC_REL,
            },
            FixupKind::CondBranch12 => FixupInfo {
                name: "fixup_cond_branch12_target",
                bit_offset: 12,
                bit_width: 12,
                flags: FixupFlags::PC_REL,
            },
            FixupKind::Data1 => FixupInfo {
                name: "fixup_data_1",
                bit_offset: 0,
                bit_width: 8,
                flags: FixupFlags::empty(),
            },
            FixupKind::Data2 => FixupInfo {
                name: "fixup_data_2",
                bit_offset: 0,
                bit_width: 16,
                flags: FixupFlags::empty(),
            },
            FixupKind::Data4 => FixupInfo {
                name: "fixup_data_4",
                bit_offset: 0,
                bit_width: 32,
                flags: FixupFlags::empty(),
            },
            FixupKind::Data8 => FixupInfo {
                name: "fixup_data_8",
                bit_offset: 0,
                bit_width: 64,
                flags: FixupFlags::empty(),
            },
            FixupKind::PcRel4 => FixupInfo {
                name: "fixup_pcrel_4",
                bit_offset: 0,
                bit_width: 32,
                flags: FixupFlags::PC_REL,
            },
        }
    }

    pub fn is_pc_rel(self) -> bool {
        self.info().flags.contains(FixupFlags::PC_REL)
    }

    /// Number of output bytes the fixup touches.
    pub fn num_bytes(self) -> usize {
        match self {
            FixupKind::Data1 => 1,
            FixupKind::Data2 | FixupKind::CondBranch12 => 2,
            FixupKind::JumpTarget => 3,
            FixupKind::Data4 | FixupKind::PcRel4 => 4,
            FixupKind::Data8 => 8,
            FixupKind::LdStImm4Scale2 => panic!("unknown fixup kind: {:?}", self),
        }
    }

    /// Kind-specific value adjustment, applied exactly once before the bits
    /// are placed. Branch and jump targets are relative to the address 4
    /// bytes past the instruction start.
    pub fn adjust(self, value: i64) -> u64 {
        match self {
            FixupKind::Data1
            | FixupKind::Data2
            | FixupKind::Data4
            | FixupKind::Data8
            | FixupKind::PcRel4 => value as u64,
            FixupKind::JumpTarget => (value.wrapping_sub(4) as u64) & 0x3FFFF,
            FixupKind::CondBranch12 => (value.wrapping_sub(4) as u64) & 0xFFF,
            FixupKind::LdStImm4Scale2 => panic!("unhandled fixup kind: {:?}", self),
        }
    }
}

/// Either already resolved to a numeric value or still a symbolic expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FixupTarget {
    Resolved(i64),
    Sym(SymExpr),
}

/// A deferred bit-field patch recorded during encoding. Consumed exactly
/// once: either patched into the output bytes or rewritten as a relocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixup {
    /// Byte offset within the output buffer.
    pub offset: usize,
    pub kind: FixupKind,
    pub target: FixupTarget,
}

impl Fixup {
    pub fn symbolic(offset: usize, kind: FixupKind, expr: SymExpr) -> Self {
        Self { offset, kind, target: FixupTarget::Sym(expr) }
    }

    pub fn resolved(offset: usize, kind: FixupKind, value: i64) -> Self {
        Self { offset, kind, target: FixupTarget::Resolved(value) }
    }
}

/// Patch `value` into `data` at the fixup's position. The adjusted value is
/// shifted to the field's bit offset and OR-merged byte-by-byte: the encoder
/// wrote zero placeholder bits there, and the other fields sharing those
/// bytes must be preserved. An adjusted value of 0 touches nothing.
pub fn apply_fixup(fixup: &Fixup, value: i64, data: &mut [u8]) {
    let adjusted = fixup.kind.adjust(value);
    if adjusted == 0 {
        return;
    }

    let shifted = adjusted << fixup.kind.info().bit_offset;
    let num_bytes = fixup.kind.num_bytes();
    assert!(
        fixup.offset + num_bytes <= data.len(),
        "invalid fixup offset {} ({:?}, buffer is {} bytes)",
        fixup.offset,
        fixup.kind,
        data.len()
    );

    for i in 0..num_bytes {
        data[fixup.offset + i] |= ((shifted >> (i * 8)) & 0xFF) as u8;
    }
}
