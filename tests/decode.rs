use xtensa_rs::decoder::{decode, decode_fpr, decode_gpr, DecodeError};
use xtensa_rs::{Instruction, Opcode, Operand, Reg};

#[test]
fn short_form_consumes_exactly_two_bytes() {
    // add.n a3, a2, a4; first byte has bit 3 set
    let bytes = [0x4A, 0x32];
    let (insn, size) = decode(&bytes, 0).unwrap();
    assert_eq!(size, 2);
    assert_eq!(
        insn,
        Instruction::new(
            Opcode::AddN,
            vec![
                Operand::Reg(Reg::A(3)),
                Operand::Reg(Reg::A(2)),
                Operand::Reg(Reg::A(4)),
            ]
        )
    );
}

#[test]
fn short_form_ignores_bytes_past_the_window() {
    // Trailing garbage after a 2-byte instruction must not affect the result.
    let bytes = [0x4A, 0x32, 0xFF, 0xFF];
    let (insn, size) = decode(&bytes, 0).unwrap();
    assert_eq!(size, 2);
    assert_eq!(insn.opcode, Opcode::AddN);
}

#[test]
fn long_form_with_two_bytes_is_insufficient() {
    // bit 3 clear selects the 3-byte form, but only 2 bytes are available
    let bytes = [0x06, 0x20];
    let err = decode(&bytes, 0x100).unwrap_err();
    assert_eq!(err, DecodeError::InsufficientBytes { addr: 0x100, need: 3, have: 2 });
}

#[test]
fn fewer_than_two_bytes_is_always_insufficient() {
    let err = decode(&[0x06], 0).unwrap_err();
    assert_eq!(err, DecodeError::InsufficientBytes { addr: 0, need: 2, have: 1 });
    let err = decode(&[], 0).unwrap_err();
    assert_eq!(err, DecodeError::InsufficientBytes { addr: 0, need: 2, have: 0 });
}

#[test]
fn unknown_patterns_fail() {
    // short word with an undefined op0 nibble
    let err = decode(&[0x0F, 0x00], 0x40).unwrap_err();
    assert_eq!(err, DecodeError::UnknownEncoding { word: 0x000F, addr: 0x40 });
    // long word with an undefined RRR op2 nibble
    let err = decode(&[0x00, 0x00, 0xF0], 0x40).unwrap_err();
    assert_eq!(err, DecodeError::UnknownEncoding { word: 0xF00000, addr: 0x40 });
}

#[test]
fn register_fields_fail_out_of_range() {
    // 16 must fail, not wrap to register 0
    assert_eq!(decode_gpr(16).unwrap_err(), DecodeError::RegisterOutOfRange { index: 16 });
    assert_eq!(decode_fpr(16).unwrap_err(), DecodeError::RegisterOutOfRange { index: 16 });
    assert_eq!(decode_gpr(15).unwrap(), Reg::A(15));
    assert_eq!(decode_fpr(0).unwrap(), Reg::F(0));
}

#[test]
fn jump_target_is_unbiased_on_decode() {
    // (132 - 4) << 6 | 0b000110
    let bytes = [0x06, 0x20, 0x00];
    let (insn, size) = decode(&bytes, 0).unwrap();
    assert_eq!(size, 3);
    assert_eq!(insn, Instruction::new(Opcode::J, vec![Operand::Imm(132)]));
}

#[test]
fn branch_target_sign_extends() {
    // beqz a5, -8: field = (-8 - 4) & 0xFFF = 0xFF4
    let bytes = [0x16, 0x45, 0xFF];
    let (insn, _) = decode(&bytes, 0).unwrap();
    assert_eq!(
        insn,
        Instruction::new(Opcode::Beqz, vec![Operand::Reg(Reg::A(5)), Operand::Imm(-8)])
    );
}

#[test]
fn scaled_immediates_are_restored() {
    // l32i a1, a2, 12: imm8 field holds 12/4 = 3
    let (insn, _) = decode(&[0x12, 0x22, 0x03], 0).unwrap();
    assert_eq!(
        insn,
        Instruction::new(
            Opcode::L32i,
            vec![Operand::Reg(Reg::A(1)), Operand::Reg(Reg::A(2)), Operand::Imm(12)]
        )
    );

    // lsi f2, a3, 10 — 4-bit field holds 10 >> 1 = 5
    let (insn, _) = decode(&[0x23, 0x53, 0x00], 0).unwrap();
    assert_eq!(
        insn,
        Instruction::new(
            Opcode::Lsi,
            vec![Operand::Reg(Reg::F(2)), Operand::Reg(Reg::A(3)), Operand::Imm(10)]
        )
    );
}

#[test]
fn signed_immediate_sign_extends() {
    // addi a1, a2, -5: imm8 field = 0xFB
    let (insn, _) = decode(&[0x12, 0xC2, 0xFB], 0).unwrap();
    assert_eq!(
        insn,
        Instruction::new(
            Opcode::Addi,
            vec![Operand::Reg(Reg::A(1)), Operand::Reg(Reg::A(2)), Operand::Imm(-5)]
        )
    );
}

#[test]
fn ret_n_has_no_operands() {
    let (insn, size) = decode(&[0x0D, 0xF0], 0).unwrap();
    assert_eq!(size, 2);
    assert_eq!(insn, Instruction::new(Opcode::RetN, vec![]));
}
