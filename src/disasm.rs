//! Renders machine words back into assembly text for the monitor and for
//! error reporting.

use crate::isa::{self, CodecError, Mnemonic, OperandKind, REGISTER_NAMES};
use crate::Word;
use std::collections::HashMap;

/// Map from absolute code address to label name, used to annotate branch
/// and jump targets.
pub type AddressMap = HashMap<Word, String>;

/// Disassembles single instructions, replacing addresses with labels if an
/// address map is available.
pub struct Disassembler {
    map: Option<AddressMap>,
}

impl Disassembler {
    pub fn new(map: Option<AddressMap>) -> Disassembler {
        Disassembler { map }
    }

    /// Disassembles one word. `pc` is the address the word was fetched
    /// from; it is only used to resolve relative branch displacements to
    /// absolute label addresses.
    pub fn process(&self, word: Word, pc: Word) -> Result<(Mnemonic, String), CodecError> {
        let (entry, values) = isa::decode(word)?;

        let mut parts = Vec::with_capacity(entry.operands.len());
        for (&kind, &value) in entry.operands.iter().zip(&values) {
            match kind {
                OperandKind::Reg => parts.push(REGISTER_NAMES[value as usize].to_owned()),
                OperandKind::AddrBase => {
                    parts.push(format!("[{}", REGISTER_NAMES[value as usize]))
                }
                OperandKind::Off4 => parts.push(format!("{}]", value)),
                OperandKind::Imm4 | OperandKind::Imm8 | OperandKind::Shamt4 => {
                    parts.push(value.to_string())
                }
                OperandKind::Rel8 => {
                    let target = ((pc as i32 + 1 + value) & 0xFFFF) as Word;
                    parts.push(self.name_or(target, value))
                }
                OperandKind::Abs12 => parts.push(self.name_or(value as Word, value)),
            }
        }

        let text = if parts.is_empty() {
            entry.mnemonic.to_string()
        } else {
            format!("{:<4} {}", entry.mnemonic.as_str(), parts.join(", "))
        };

        Ok((entry.mnemonic, text))
    }

    fn name_or(&self, target: Word, raw: i32) -> String {
        match self.map.as_ref().and_then(|m| m.get(&target)) {
            Some(label) => format!("@{}", label),
            None => raw.to_string(),
        }
    }
}

impl Default for Disassembler {
    fn default() -> Disassembler {
        Disassembler::new(None)
    }
}
