use crate::insn::Opcode;

/// Role of one bit-field inside a packed instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 4-bit index into the general-purpose bank.
    Gpr,
    /// 4-bit index into the floating-point bank.
    Fpr,
    /// Plain immediate; the stored field is `value / scale`, sign-extended on
    /// decode when `signed`.
    Imm { scale: u8, signed: bool },
    /// 18-bit jump target, biased by -4 on encode.
    JumpTarget,
    /// 12-bit conditional-branch target, biased by -4 on encode.
    BranchTarget,
    /// 4-bit load/store byte offset stored right-shifted by 1; odd offsets
    /// are invalid.
    LdStOffset,
}

/// Bit offset/width/role of one operand field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDesc {
    pub offset: u8,
    pub width: u8,
    pub kind: FieldKind,
}

impl FieldDesc {
    pub fn extract(&self, word: u32) -> u32 {
        (word >> self.offset) & bit_mask(self.width)
    }

    pub fn place(&self, value: u32) -> u32 {
        (value & bit_mask(self.width)) << self.offset
    }
}

/// One opcode's bit pattern: the instruction matches when
/// `word & mask == bits`. Fields never overlap the mask or each other.
#[derive(Debug, Clone, Copy)]
pub struct Pattern {
    pub opcode: Opcode,
    pub mask: u32,
    pub bits: u32,
    pub fields: &'static [FieldDesc],
}

#[inline]
pub fn bit_mask(width: u8) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

#[inline]
pub fn sign_ext(v: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((v << s) as i32) >> s
}
