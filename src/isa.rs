use crate::{constants, Word};
use num_derive::{FromPrimitive, ToPrimitive};
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

/// Instruction word layout (bit 15 on the left):
///
/// | Field | Bits 15-12 | Bits 11-8 | Bits 7-4 | Bits 3-0 |
/// |-------|------------|-----------|----------|----------|
/// | RRR   | opcode     | r1        | r2       | r3       |
/// | RRC   | opcode     | r1        | r2       | c4       |
/// | RC    | opcode     | r1        | c8       | c8       |
/// | C     | opcode     | c12       | c12      | c12      |
///
/// Instructions sharing an opcode nibble are told apart by a minor bit
/// pattern in the low end of the word (branch conditions sit in the r1
/// field and are folded into the prefix instead).

/// List of available registers. r13..r15 double as the frame pointer,
/// stack pointer and program counter.
#[derive(Clone, Copy, PartialEq, Eq, Debug, FromPrimitive, ToPrimitive)]
pub enum RegisterId {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
    R9,
    R10,
    R11,
    R12,
    /// Frame pointer (r13).
    FP,
    /// Stack pointer (r14).
    SP,
    /// Program counter (r15).
    PC,
}

pub const REGISTER_NAMES: [&str; constants::REGISTER_COUNT] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "fp", "sp",
    "pc",
];

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(REGISTER_NAMES[*self as usize])
    }
}

/// Failure to parse a register or mnemonic name.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseNameError {
    pub value: String,
    pub kind: &'static str,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" is not a {}", &self.value, self.kind)
    }
}

impl StdError for ParseNameError {}

impl FromStr for RegisterId {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use num::FromPrimitive;

        match s {
            "fp" => return Ok(RegisterId::FP),
            "sp" => return Ok(RegisterId::SP),
            "pc" => return Ok(RegisterId::PC),
            _ => {}
        }

        s.strip_prefix('r')
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(RegisterId::from_usize)
            .ok_or_else(|| ParseNameError {
                value: s.to_owned(),
                kind: "register",
            })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Mnemonic {
    Mov,
    Movt,
    B,
    Bz,
    Bnz,
    Bcs,
    Bcc,
    Blt,
    Bge,
    Jmp,
    Ldr,
    Str,
    Push,
    Pop,
    Ret,
    Add,
    Sub,
    Shft,
    And,
    Or,
    Xor,
}

impl Mnemonic {
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Mov => "mov",
            Mnemonic::Movt => "movt",
            Mnemonic::B => "b",
            Mnemonic::Bz => "bz",
            Mnemonic::Bnz => "bnz",
            Mnemonic::Bcs => "bcs",
            Mnemonic::Bcc => "bcc",
            Mnemonic::Blt => "blt",
            Mnemonic::Bge => "bge",
            Mnemonic::Jmp => "jmp",
            Mnemonic::Ldr => "ldr",
            Mnemonic::Str => "str",
            Mnemonic::Push => "push",
            Mnemonic::Pop => "pop",
            Mnemonic::Ret => "ret",
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Shft => "shft",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Xor => "xor",
        }
    }

    pub fn is_branch(self) -> bool {
        match self {
            Mnemonic::B
            | Mnemonic::Bz
            | Mnemonic::Bnz
            | Mnemonic::Bcs
            | Mnemonic::Bcc
            | Mnemonic::Blt
            | Mnemonic::Bge => true,
            _ => false,
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mnemonic {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ENCODINGS
            .iter()
            .find(|e| e.mnemonic.as_str() == s)
            .map(|e| e.mnemonic)
            .ok_or_else(|| ParseNameError {
                value: s.to_owned(),
                kind: "mnemonic",
            })
    }
}

/// The closed set of operand kinds an encoding can carry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OperandKind {
    /// Register, 4 bits.
    Reg,
    /// Register used as an address base, printed in brackets.
    AddrBase,
    /// Signed 4-bit load/store offset, -8..7.
    Off4,
    /// Unsigned 4-bit ALU immediate, 0..15.
    Imm4,
    /// Shift field: low three bits hold `amount - 1`, the top bit selects
    /// right shift. The operand value is the signed count, -8..8 sans 0.
    Shamt4,
    /// Unsigned 8-bit immediate.
    Imm8,
    /// Signed 8-bit PC-relative branch displacement.
    Rel8,
    /// Unsigned 12-bit absolute code address.
    Abs12,
}

impl OperandKind {
    pub fn width(self) -> u32 {
        match self {
            OperandKind::Imm8 | OperandKind::Rel8 => 8,
            OperandKind::Abs12 => 12,
            _ => 4,
        }
    }
}

/// A single row of the instruction table: the bit-level shape of one
/// operand pattern of one mnemonic.
///
/// `prefix` is matched against the most significant `prefix_bits` of a
/// word, `minor` against the least significant `minor_bits`. Operand `i`
/// occupies `operands[i].width()` bits starting `prefix_bits + 4 * i` from
/// the top.
#[derive(Debug, PartialEq)]
pub struct Encoding {
    pub mnemonic: Mnemonic,
    pub prefix: Word,
    pub prefix_bits: u32,
    pub minor: Word,
    pub minor_bits: u32,
    pub operands: &'static [OperandKind],
}

impl Encoding {
    fn matches(&self, word: Word) -> bool {
        word >> (constants::WORD_WIDTH - self.prefix_bits) == self.prefix
            && (self.minor_bits == 0 || word & mask(self.minor_bits) == self.minor)
    }

    /// Number of bits pinned by prefix and minor; the decoder prefers the
    /// most specific match.
    fn fixed_bits(&self) -> u32 {
        self.prefix_bits + self.minor_bits
    }
}

use self::OperandKind::*;

macro_rules! encoding {
    ($mnemonic:ident, $prefix:tt/$pbits:tt, $minor:tt/$mbits:tt, [$($kind:ident),*]) => {
        Encoding {
            mnemonic: Mnemonic::$mnemonic,
            prefix: $prefix,
            prefix_bits: $pbits,
            minor: $minor,
            minor_bits: $mbits,
            operands: &[$($kind),*],
        }
    };
}

/// The instruction table. Read-only after construction; both the
/// assembler and the disassembler index into it.
pub const ENCODINGS: &[Encoding] = &[
    encoding!(Mov,  0b0000/4,          0/0,          [Reg, Imm8]),
    encoding!(Movt, 0b0001/4,          0/0,          [Reg, Imm8]),
    encoding!(B,    0b0010_0000/8,     0/0,          [Rel8]),
    encoding!(Bz,   0b0010_0001/8,     0/0,          [Rel8]),
    encoding!(Bnz,  0b0010_0010/8,     0/0,          [Rel8]),
    encoding!(Bcs,  0b0010_0011/8,     0/0,          [Rel8]),
    encoding!(Bcc,  0b0010_0100/8,     0/0,          [Rel8]),
    encoding!(Blt,  0b0010_0101/8,     0/0,          [Rel8]),
    encoding!(Bge,  0b0010_0110/8,     0/0,          [Rel8]),
    encoding!(Jmp,  0b0011/4,          0/0,          [Abs12]),
    encoding!(Ldr,  0b0100/4,          0/0,          [Reg, AddrBase, Off4]),
    encoding!(Str,  0b0101/4,          0/0,          [Reg, AddrBase, Off4]),
    // The push minor pattern spans the r1/r2 fields and overlaps the bit
    // pattern of r14; it is only ever matched as a constant, never read as
    // a register.
    encoding!(Push, 0b0110_0000_1110/12, 0/0,        [Reg]),
    encoding!(Ret,  0b0111_1111/8,     0b1110_0000/8, []),
    encoding!(Pop,  0b0111/4,          0b1110_0000/8, [Reg]),
    encoding!(Add,  0b1000/4,          0/0,          [Reg, Reg, Reg]),
    // `mov r1, r2` is add-immediate with c4 = 0; the longer minor makes
    // the decoder give the alias back instead of the add.
    encoding!(Mov,  0b1001/4,          0b0000/4,     [Reg, Reg]),
    encoding!(Add,  0b1001/4,          0/0,          [Reg, Reg, Imm4]),
    encoding!(Sub,  0b1010/4,          0/0,          [Reg, Reg, Reg]),
    encoding!(Sub,  0b1011/4,          0/0,          [Reg, Reg, Imm4]),
    encoding!(Shft, 0b1100/4,          0/0,          [Reg, Reg, Shamt4]),
    encoding!(And,  0b1101/4,          0/0,          [Reg, Reg, Reg]),
    encoding!(Or,   0b1110/4,          0/0,          [Reg, Reg, Reg]),
    encoding!(Xor,  0b1111/4,          0/0,          [Reg, Reg, Reg]),
];

/// Finds the table row for a mnemonic and operand-kind shape.
pub fn lookup(mnemonic: Mnemonic, operands: &[OperandKind]) -> Option<&'static Encoding> {
    ENCODINGS
        .iter()
        .find(|e| e.mnemonic == mnemonic && e.operands == operands)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CodecError {
    OperandCount {
        mnemonic: Mnemonic,
        expected: usize,
        found: usize,
    },
    OperandRange {
        mnemonic: Mnemonic,
        kind: OperandKind,
        value: i32,
    },
    UnknownWord(Word),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::OperandCount {
                mnemonic,
                expected,
                found,
            } => write!(
                f,
                "{} takes {} operand(s), found {}",
                mnemonic, expected, found
            ),
            CodecError::OperandRange {
                mnemonic,
                kind,
                value,
            } => write!(
                f,
                "operand {} out of range for {:?} field of {}",
                value, kind, mnemonic
            ),
            CodecError::UnknownWord(word) => write!(f, "illegal instruction {:016b}", word),
        }
    }
}

impl StdError for CodecError {}

fn mask(bits: u32) -> Word {
    (1u32 << bits).wrapping_sub(1) as Word
}

fn field_bits(kind: OperandKind, value: i32, mnemonic: Mnemonic) -> Result<Word, CodecError> {
    let out_of_range = || CodecError::OperandRange {
        mnemonic,
        kind,
        value,
    };

    match kind {
        Reg | AddrBase | Imm4 => {
            if value < 0 || value > 15 {
                return Err(out_of_range());
            }
            Ok(value as Word)
        }
        Off4 => {
            if value < -8 || value > 7 {
                return Err(out_of_range());
            }
            Ok(value as Word & mask(4))
        }
        Shamt4 => match value {
            1..=8 => Ok((value - 1) as Word),
            -8..=-1 => Ok((8 - value - 1) as Word),
            _ => Err(out_of_range()),
        },
        Imm8 => {
            if value < 0 || value > 255 {
                return Err(out_of_range());
            }
            Ok(value as Word)
        }
        Rel8 => {
            if value < -128 || value > 127 {
                return Err(out_of_range());
            }
            Ok(value as Word & mask(8))
        }
        Abs12 => {
            if value < 0 || value > 4095 {
                return Err(out_of_range());
            }
            Ok(value as Word)
        }
    }
}

fn field_value(kind: OperandKind, bits: Word) -> i32 {
    match kind {
        Off4 => ((bits << 12) as i16 >> 12) as i32,
        Rel8 => ((bits << 8) as i16 >> 8) as i32,
        Shamt4 => {
            let amount = (bits & 7) as i32 + 1;
            if bits > 7 {
                -amount
            } else {
                amount
            }
        }
        _ => bits as i32,
    }
}

/// Packs resolved operand values into a word. Values must already have
/// passed the assembler's range checks; a failure here is reported as a
/// fatal error by the caller.
pub fn encode(entry: &Encoding, operands: &[i32]) -> Result<Word, CodecError> {
    if operands.len() != entry.operands.len() {
        return Err(CodecError::OperandCount {
            mnemonic: entry.mnemonic,
            expected: entry.operands.len(),
            found: operands.len(),
        });
    }

    let mut word = entry.prefix << (constants::WORD_WIDTH - entry.prefix_bits);
    word |= entry.minor;

    for (i, (&kind, &value)) in entry.operands.iter().zip(operands).enumerate() {
        let offset = entry.prefix_bits + 4 * i as u32;
        let bits = field_bits(kind, value, entry.mnemonic)?;
        word |= bits << (constants::WORD_WIDTH - offset - kind.width());
    }

    Ok(word)
}

/// Finds the unique table row matching a fetched word and unpacks its
/// operand values. Inverse of [`encode`] on every valid encoding; unknown
/// encodings fail loudly.
pub fn decode(word: Word) -> Result<(&'static Encoding, Vec<i32>), CodecError> {
    let entry = ENCODINGS
        .iter()
        .filter(|e| e.matches(word))
        .max_by_key(|e| e.fixed_bits())
        .ok_or(CodecError::UnknownWord(word))?;

    let operands = entry
        .operands
        .iter()
        .enumerate()
        .map(|(i, &kind)| {
            let offset = entry.prefix_bits + 4 * i as u32;
            let bits = word >> (constants::WORD_WIDTH - offset - kind.width()) & mask(kind.width());
            field_value(kind, bits)
        })
        .collect();

    Ok((entry, operands))
}
