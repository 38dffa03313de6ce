use xtensa_rs::encoder::encode;
use xtensa_rs::fixup::{FixupKind, FixupTarget};
use xtensa_rs::{Instruction, Opcode, Operand, Reg, SymExpr};

fn reg_a(n: u8) -> Operand {
    Operand::Reg(Reg::A(n))
}

#[test]
fn rrr_packs_three_register_fields() {
    let insn = Instruction::new(Opcode::Add, vec![reg_a(3), reg_a(2), reg_a(4)]);
    let enc = encode(&insn);
    assert_eq!(enc.bytes, vec![0x40, 0x32, 0x80]);
    assert!(enc.fixups.is_empty());
}

#[test]
fn density_form_emits_two_bytes() {
    let insn = Instruction::new(Opcode::AddN, vec![reg_a(3), reg_a(2), reg_a(4)]);
    let enc = encode(&insn);
    assert_eq!(enc.bytes, vec![0x4A, 0x32]);
    // the discriminator bit in the emitted word decides the byte count
    assert_ne!(enc.bytes[0] & 0x08, 0);
}

#[test]
fn resolved_jump_target_is_biased_by_minus_four() {
    let insn = Instruction::new(Opcode::J, vec![Operand::Imm(132)]);
    let enc = encode(&insn);
    // (132 - 4) << 6 | 0b000110
    assert_eq!(enc.bytes, vec![0x06, 0x20, 0x00]);
    assert!(enc.fixups.is_empty());
}

#[test]
fn symbolic_jump_emits_placeholder_and_fixup() {
    let insn = Instruction::new(Opcode::J, vec![Operand::Sym(SymExpr::new("target"))]);
    let enc = encode(&insn);
    assert_eq!(enc.bytes, vec![0x06, 0x00, 0x00]);
    assert_eq!(enc.fixups.len(), 1);

    let f = &enc.fixups[0];
    assert_eq!(f.offset, 0);
    assert_eq!(f.kind, FixupKind::JumpTarget);
    assert_eq!(f.target, FixupTarget::Sym(SymExpr::new("target")));
    assert!(f.kind.is_pc_rel());
    assert_eq!(f.kind.num_bytes(), 3);
    assert_eq!(f.kind.info().bit_offset, 6);
    assert_eq!(f.kind.info().bit_width, 18);
}

#[test]
fn symbolic_branch_emits_cond_branch12_fixup() {
    let insn = Instruction::new(
        Opcode::Bnez,
        vec![reg_a(7), Operand::Sym(SymExpr::with_addend("loop", 8))],
    );
    let enc = encode(&insn);
    assert_eq!(enc.bytes, vec![0x56, 0x07, 0x00]);
    assert_eq!(enc.fixups.len(), 1);
    let f = &enc.fixups[0];
    assert_eq!(f.kind, FixupKind::CondBranch12);
    assert_eq!(f.kind.num_bytes(), 2);
    assert_eq!(f.target, FixupTarget::Sym(SymExpr::with_addend("loop", 8)));
}

#[test]
fn symbolic_ldst_offset_records_scale2_fixup() {
    let insn = Instruction::new(
        Opcode::Lsi,
        vec![Operand::Reg(Reg::F(1)), reg_a(2), Operand::Sym(SymExpr::new("slot"))],
    );
    let enc = encode(&insn);
    assert_eq!(enc.fixups.len(), 1);
    assert_eq!(enc.fixups[0].kind, FixupKind::LdStImm4Scale2);
    assert!(!enc.fixups[0].kind.is_pc_rel());
}

#[test]
fn ldst_offset_is_halved_before_packing() {
    let insn =
        Instruction::new(Opcode::Lsi, vec![Operand::Reg(Reg::F(2)), reg_a(3), Operand::Imm(10)]);
    let enc = encode(&insn);
    assert_eq!(enc.bytes, vec![0x23, 0x53, 0x00]);
}

#[test]
#[should_panic(expected = "unaligned load/store offset")]
fn odd_ldst_offset_is_fatal() {
    let insn =
        Instruction::new(Opcode::Lsi, vec![Operand::Reg(Reg::F(0)), reg_a(1), Operand::Imm(7)]);
    encode(&insn);
}

#[test]
#[should_panic(expected = "misaligned immediate")]
fn misaligned_word_offset_is_fatal() {
    let insn = Instruction::new(Opcode::L32i, vec![reg_a(1), reg_a(2), Operand::Imm(6)]);
    encode(&insn);
}

#[test]
#[should_panic(expected = "operand count mismatch")]
fn wrong_operand_count_is_fatal() {
    let insn = Instruction::new(Opcode::Add, vec![reg_a(1), reg_a(2)]);
    encode(&insn);
}

#[test]
#[should_panic(expected = "does not match its field layout")]
fn wrong_operand_kind_is_fatal() {
    // FP register in a GPR field
    let insn = Instruction::new(
        Opcode::Add,
        vec![Operand::Reg(Reg::F(1)), reg_a(2), reg_a(3)],
    );
    encode(&insn);
}

#[test]
fn negative_immediates_pack_into_the_field() {
    let insn = Instruction::new(Opcode::Addi, vec![reg_a(1), reg_a(2), Operand::Imm(-5)]);
    let enc = encode(&insn);
    assert_eq!(enc.bytes, vec![0x12, 0xC2, 0xFB]);
}
