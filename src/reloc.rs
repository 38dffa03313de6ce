use serde::{Deserialize, Serialize};

use crate::fixup::FixupKind;

/// Object-file relocation types for this target's subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelocType {
    /// No linker action needed; simple data references carry no addend-based
    /// relocation in this backend's subset.
    None,
    /// 18-bit jump-target field.
    Jump18,
    /// 12-bit conditional-branch field.
    CBranch12,
}

/// A persisted instruction to the linker. Output-only: written into the
/// object container, never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relocation {
    pub offset: u32,
    pub rtype: RelocType,
    pub symbol: String,
}

/// Fixed identification handed to the object container along with the
/// relocation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectArch {
    pub machine: u16,
    pub is_64bit: bool,
    pub little_endian: bool,
    pub has_reloc_addends: bool,
}

/// EM_XTENSA, 32-bit, little-endian, implicit addends only.
pub const ARCH: ObjectArch = ObjectArch {
    machine: 94,
    is_64bit: false,
    little_endian: true,
    has_reloc_addends: false,
};

/// Map a fixup that survived to object-file emission onto its relocation
/// type. A kind with no entry here means a fixup kind was added without
/// updating this table, which is a bug.
pub fn reloc_type(kind: FixupKind) -> RelocType {
    match kind {
        FixupKind::Data4 | FixupKind::Data8 | FixupKind::PcRel4 => RelocType::None,
        FixupKind::JumpTarget => RelocType::Jump18,
        FixupKind::CondBranch12 => RelocType::CBranch12,
        FixupKind::LdStImm4Scale2 | FixupKind::Data1 | FixupKind::Data2 => {
            panic!("invalid fixup kind for relocation: {:?}", kind)
        }
    }
}
