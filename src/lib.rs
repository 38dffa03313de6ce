pub mod buffer;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod fixup;
pub mod insn;
pub mod reloc;

pub mod isa {
    pub mod core; // bit-pattern tables for the core ISA subset
    pub mod fields;
}

pub use buffer::CodeBuffer;
pub use decoder::{decode, DecodeError};
pub use encoder::{encode, Encoded};
pub use fixup::{apply_fixup, Fixup, FixupFlags, FixupKind, FixupTarget};
pub use insn::{Instruction, Opcode, Operand, Reg, SymExpr};
pub use reloc::{reloc_type, ObjectArch, RelocType, Relocation, ARCH};
