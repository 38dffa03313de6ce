use crate::insn::{Instruction, Opcode, Operand};

/// Render an instruction as text. Load/store forms print a bracketed
/// base+offset address; everything else is a flat operand list.
pub fn fmt_inst(insn: &Instruction) -> String {
    match insn.opcode {
        Opcode::L32i | Opcode::Lsi | Opcode::L32iN => mem(insn, false),
        Opcode::S32i | Opcode::Ssi | Opcode::S32iN => mem(insn, true),
        _ => {
            let ops: Vec<String> = insn.operands.iter().map(|o| o.to_string()).collect();
            if ops.is_empty() {
                insn.opcode.mnemonic().to_string()
            } else {
                format!("{} {}", insn.opcode.mnemonic(), ops.join(", "))
            }
        }
    }
}

fn mem(insn: &Instruction, store: bool) -> String {
    let mn = insn.opcode.mnemonic();
    match insn.operands.as_slice() {
        [value, Operand::Reg(base), off] => {
            if store {
                format!("{} [{}+{}], {}", mn, base, off, value)
            } else {
                format!("{} {}, [{}+{}]", mn, value, base, off)
            }
        }
        _ => {
            let ops: Vec<String> = insn.operands.iter().map(|o| o.to_string()).collect();
            format!("{} {}", mn, ops.join(", "))
        }
    }
}
