//! Assembler for the [puc16](../puc16/index.html) processor.
//!
//! [`Preprocessor`](struct.Preprocessor.html) turns one or more source
//! files into a stream of addressed records, and
//! [`assemble`](fn.assemble.html) resolves and encodes those records into
//! an [`Image`](../pimage/struct.Image.html) ready for the simulator or
//! the emitters. Parsing is implemented with [pest]; anything the grammar
//! rejects is reported with the file and line it came from.
//!
//! # Assembly dialect
//!
//! A program is split over the three memory sections `io`, `code` and
//! `data`, selected with `.section`. Comments run from `;` to the end of
//! the line. Labels are `name:` at the start of a line and may stand
//! alone, in which case they bind to the next emitted word.
//!
//! Directives:
//!
//!  Directive | Effect
//! -----------|----------------------------------------------------------
//! `.section s` | Switch to section `io`, `code` or `data`
//! `.org N`     | Move the current section's cursor to slot `N`
//! `.equ NAME V`| Substitute `NAME` by `V` on all following lines
//! `.include "f"` | Splice in another source file, relative to this one
//! `.dw v, ...` | Emit literal words; a string emits one word per character
//! `.ds N`      | Reserve `N` zeroed words
//!
//! Numbers are decimal, hex (`0x1F`) or character literals (`'a'`).
//! Registers are `r0`..`r15` with the aliases `fp` (r13), `sp` (r14) and
//! `pc` (r15). Label operands are written `@name`; the low and high bytes
//! of a label's address are `low(@name)` and `high(@name)`.
//!
//! Mnemonics:
//!
//!  Mnemonic | Syntax | Effect
//! ----------|--------------------------|--------------------------------
//! `mov`     | `mov r, imm8` or `mov r, r` | Load immediate / copy register
//! `movt`    | `movt r, imm8`           | Load immediate into high byte
//! `b` `bz` `bnz` `bcs` `bcc` `blt` `bge` | `b @target` | Conditional branches, PC-relative
//! `jmp`     | `jmp @target`            | Absolute jump
//! `ldr`     | `ldr r, [r, off]`        | Load from memory
//! `str`     | `str r, [r, off]`        | Store to memory
//! `push`    | `push r`                 | Push register, grows stack down
//! `pop`     | `pop r`                  | Pop register
//! `ret`     | `ret`                    | Pop the program counter
//! `add` `sub` | `add r, r, r` or `add r, r, imm4` | Arithmetic
//! `and` `or` `xor` | `and r, r, r`     | Bitwise logic
//! `shl` `shr` | `shl r, r, n`          | Shift by 1..8; `shft r, r, ±n` is the decoded spelling
//!
//! [pest]: https://docs.rs/pest/

mod assembler;
mod frontend;
mod int_util;
mod parser;
mod preprocess;


pub use assembler::assemble;
pub use frontend::{adapt, BOOT};
pub use parser::{AsmParser, Rule};
pub use preprocess::{Preprocessor, Record};

use pimage::{Image, Origins};
use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Error {
    Io(PathBuf, io::Error),
    Source {
        file: PathBuf,
        line: usize,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(path, err) => write!(f, "reading \"{}\" failed: {}", path.display(), err),
            Error::Source {
                file,
                line,
                message,
            } => write!(f, "{}:{}: {}", file.display(), line, message),
        }
    }
}

impl StdError for Error {}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn source_error(file: &Path, line: usize, message: String) -> Error {
    Error::Source {
        file: file.to_owned(),
        line,
        message,
    }
}

/// Preprocesses and assembles one source file with the default section
/// origins, returning both the record stream and the finished image.
pub fn assemble_file(path: &Path) -> Result<(Vec<Record>, Image)> {
    let records = Preprocessor::new().process(path)?;
    let image = assemble(&records, Origins::default())?;
    Ok((records, image))
}
