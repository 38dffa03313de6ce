use crate::fixup::{Fixup, FixupKind};
use crate::insn::{Instruction, Operand, Reg};
use crate::isa::core::layout_of;
use crate::isa::fields::{FieldDesc, FieldKind};

/// Encoder output: the packed instruction bytes plus any fixups recorded for
/// operands whose value is not yet known. Fixup offsets are relative to the
/// start of `bytes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub fixups: Vec<Fixup>,
}

/// Encode one instruction. By the time an instruction reaches the encoder it
/// must be well-formed; a shape mismatch against the opcode's field layout,
/// a misaligned scaled immediate or a missing table entry is a fatal
/// programming error, not a recoverable input condition.
pub fn encode(insn: &Instruction) -> Encoded {
    let pat = layout_of(insn.opcode);
    if insn.operands.len() != pat.fields.len() {
        panic!(
            "operand count mismatch for {}: have {}, layout expects {}",
            insn.opcode.mnemonic(),
            insn.operands.len(),
            pat.fields.len()
        );
    }

    let mut word = pat.bits;
    let mut fixups = Vec::new();
    for (idx, (field, operand)) in pat.fields.iter().zip(&insn.operands).enumerate() {
        word |= encode_field(insn, idx, field, operand, &mut fixups);
    }

    // The packed word is self-describing: the 3rd byte is emitted only when
    // the short-form discriminator bit is clear.
    let mut bytes = Vec::with_capacity(3);
    bytes.push((word & 0xFF) as u8);
    bytes.push(((word >> 8) & 0xFF) as u8);
    if word & 0x08 == 0 {
        bytes.push(((word >> 16) & 0xFF) as u8);
    }

    Encoded { bytes, fixups }
}

fn encode_field(
    insn: &Instruction,
    idx: usize,
    field: &FieldDesc,
    operand: &Operand,
    fixups: &mut Vec<Fixup>,
) -> u32 {
    match (field.kind, operand) {
        (FieldKind::Gpr, Operand::Reg(Reg::A(n))) => field.place(u32::from(*n)),
        (FieldKind::Fpr, Operand::Reg(Reg::F(n))) => field.place(u32::from(*n)),
        (FieldKind::Imm { scale, .. }, Operand::Imm(v)) => {
            let scale = i32::from(scale);
            if v % scale != 0 {
                panic!(
                    "misaligned immediate {} for {} operand {}: must be a multiple of {}",
                    v,
                    insn.opcode.mnemonic(),
                    idx,
                    scale
                );
            }
            field.place((v / scale) as u32)
        }
        // Resolved targets carry the -4 bias here; for symbolic targets the
        // same bias is folded into the fixup's value adjustment, so both
        // paths produce identical final bits.
        (FieldKind::JumpTarget | FieldKind::BranchTarget, Operand::Imm(v)) => {
            field.place(v.wrapping_sub(4) as u32)
        }
        (FieldKind::JumpTarget, Operand::Sym(expr)) => {
            fixups.push(Fixup::symbolic(0, FixupKind::JumpTarget, expr.clone()));
            0
        }
        (FieldKind::BranchTarget, Operand::Sym(expr)) => {
            fixups.push(Fixup::symbolic(0, FixupKind::CondBranch12, expr.clone()));
            0
        }
        (FieldKind::LdStOffset, Operand::Imm(v)) => {
            if v & 1 != 0 {
                panic!(
                    "unaligned load/store offset {} for {} operand {}",
                    v,
                    insn.opcode.mnemonic(),
                    idx
                );
            }
            field.place((v >> 1) as u32)
        }
        (FieldKind::LdStOffset, Operand::Sym(expr)) => {
            fixups.push(Fixup::symbolic(0, FixupKind::LdStImm4Scale2, expr.clone()));
            0
        }
        (kind, operand) => panic!(
            "operand {} of {} does not match its field layout: field {:?}, operand {:?}",
            idx,
            insn.opcode.mnemonic(),
            kind,
            operand
        ),
    }
}
