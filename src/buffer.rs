use tracing::debug;

use crate::encoder::encode;
use crate::fixup::{apply_fixup, Fixup, FixupTarget};
use crate::insn::Instruction;
use crate::reloc::{reloc_type, Relocation};

/// An append-only emission buffer. Instructions are encoded into it and
/// their fixups rebased to buffer offsets; `finish` then runs every fixup
/// once, patching resolvable targets in place and turning the rest into
/// relocation records. Each fixup touches disjoint bit ranges, so the order
/// of application does not matter. Every placeholder must be written before
/// its fixup is applied; the append-then-finish split guarantees that.
#[derive(Debug, Default)]
pub struct CodeBuffer {
    bytes: Vec<u8>,
    fixups: Vec<Fixup>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn fixups(&self) -> &[Fixup] {
        &self.fixups
    }

    /// Encode `insn` at the current end of the buffer; returns its offset.
    pub fn push(&mut self, insn: &Instruction) -> usize {
        let at = self.bytes.len();
        let enc = encode(insn);
        for mut fixup in enc.fixups {
            fixup.offset += at;
            self.fixups.push(fixup);
        }
        self.bytes.extend_from_slice(&enc.bytes);
        at
    }

    /// Record a raw fixup (e.g. a data directive) against the buffer.
    pub fn push_fixup(&mut self, fixup: Fixup) {
        self.fixups.push(fixup);
    }

    /// Resolve every fixup. `lookup` maps a symbol name to its address if
    /// the symbol is defined within the current layout; anything it cannot
    /// resolve is emitted as a relocation record. `base` is the address of
    /// the buffer's first byte, used for PC-relative adjustment.
    pub fn finish<F>(mut self, base: u32, lookup: F) -> (Vec<u8>, Vec<Relocation>)
    where
        F: Fn(&str) -> Option<u32>,
    {
        let mut relocs = Vec::new();
        let fixups = std::mem::take(&mut self.fixups);
        for fixup in fixups {
            match &fixup.target {
                FixupTarget::Resolved(value) => {
                    let value = *value;
                    apply_fixup(&fixup, value, &mut self.bytes);
                }
                FixupTarget::Sym(expr) => match lookup(&expr.symbol) {
                    Some(addr) => {
                        let mut value = i64::from(addr) + i64::from(expr.addend);
                        if fixup.kind.is_pc_rel() {
                            value -= i64::from(base) + fixup.offset as i64;
                        }
                        apply_fixup(&fixup, value, &mut self.bytes);
                    }
                    None => {
                        debug!(
                            offset = fixup.offset,
                            kind = fixup.kind.info().name,
                            symbol = %expr.symbol,
                            "emitting relocation"
                        );
                        relocs.push(Relocation {
                            offset: fixup.offset as u32,
                            rtype: reloc_type(fixup.kind),
                            symbol: expr.symbol.clone(),
                        });
                    }
                },
            }
        }
        (self.bytes, relocs)
    }
}
