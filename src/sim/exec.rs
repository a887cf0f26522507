use std::error::Error as StdError;
use std::fmt;

use crate::constants::{self, CARRY_BIT, MAX_VAL, MEM_SIZE, NEG_BIT};
use crate::isa::{self, Mnemonic, OperandKind};
use crate::sim::{Console, State};
use crate::Word;

/// A fatal condition hit while executing one instruction. Carries the
/// address and the offending word for diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepError {
    StackOverflow { pc: Word, word: Word },
    StackUnderflow { pc: Word, word: Word },
    IllegalInstruction { pc: Word, word: Word },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StepError::StackOverflow { pc, word } => {
                write!(f, "stack overflow at pc {} ({:016b})", pc, word)
            }
            StepError::StackUnderflow { pc, word } => {
                write!(f, "stack underflow at pc {} ({:016b})", pc, word)
            }
            StepError::IllegalInstruction { pc, word } => {
                write!(f, "illegal instruction at pc {} ({:016b})", pc, word)
            }
        }
    }
}

impl StdError for StepError {}

/// Executes the instruction at the current program counter. State
/// transitions are a pure function of the current state and the console's
/// input; wall-clock time never enters here.
pub fn step(state: &mut State, console: &mut dyn Console) -> Result<(), StepError> {
    let pc = state.regs[constants::PC];
    let word = state.mem[pc as usize % MEM_SIZE];

    let (entry, ops) = match isa::decode(word) {
        Ok(decoded) => decoded,
        Err(_) => return Err(StepError::IllegalInstruction { pc, word }),
    };

    // The ALU value register is sampled before the program counter
    // advances; every other register read sees the incremented pc.
    let r3_sampled = state.regs[(word & constants::R3_MASK) as usize];

    state.regs[constants::PC] = pc.wrapping_add(1);

    match entry.mnemonic {
        Mnemonic::Ldr => {
            let (r1, r2, off) = (ops[0] as usize, ops[1] as usize, ops[2]);
            let addr = (i32::from(state.regs[r2]) + off) as Word;
            state.regs[r1] = if addr == constants::KBD_PORT {
                console.read_key()
            } else {
                state.mem[addr as usize % MEM_SIZE]
            };
        }

        Mnemonic::Str => {
            let (r1, r2, off) = (ops[0] as usize, ops[1] as usize, ops[2]);
            let addr = (i32::from(state.regs[r2]) + off) as Word;
            let value = state.regs[r1];
            if addr == constants::CHR_PORT {
                console.put_char(value);
            } else if addr == constants::NL_PORT && value == 1 {
                console.newline();
            } else {
                state.mem[addr as usize % MEM_SIZE] = value;
            }
        }

        Mnemonic::Mov => {
            if entry.operands[1] == OperandKind::Imm8 {
                state.regs[ops[0] as usize] = ops[1] as Word;
            } else {
                let value = state.regs[ops[1] as usize];
                state.regs[ops[0] as usize] = value;
                state.flags.zero = value == 0;
                state.flags.carry = false;
                state.flags.negative = u32::from(value) & NEG_BIT != 0;
                state.flags.overflow = false;
            }
        }

        Mnemonic::Movt => {
            let r1 = ops[0] as usize;
            state.regs[r1] = (state.regs[r1] & 0xFF) | (ops[1] as Word) << 8;
        }

        Mnemonic::B
        | Mnemonic::Bz
        | Mnemonic::Bnz
        | Mnemonic::Bcs
        | Mnemonic::Bcc
        | Mnemonic::Blt
        | Mnemonic::Bge => {
            let flags = state.flags;
            let taken = match entry.mnemonic {
                Mnemonic::B => true,
                Mnemonic::Bz => flags.zero,
                Mnemonic::Bnz => !flags.zero,
                Mnemonic::Bcs => flags.carry,
                Mnemonic::Bcc => !flags.carry,
                Mnemonic::Blt => flags.negative != flags.overflow,
                Mnemonic::Bge => flags.negative == flags.overflow,
                _ => unreachable!(),
            };
            if taken {
                let next = state.regs[constants::PC];
                state.regs[constants::PC] = (i32::from(next) + ops[0]) as Word;
            }
        }

        Mnemonic::Jmp => {
            state.regs[constants::PC] = ops[0] as Word;
        }

        Mnemonic::Push => {
            let sp = state.regs[constants::SP];
            if sp == Word::max_value() {
                return Err(StepError::StackOverflow { pc, word });
            }
            state.mem[sp as usize % MEM_SIZE] = state.regs[ops[0] as usize];
            state.regs[constants::SP] = sp.wrapping_sub(1);
        }

        Mnemonic::Pop | Mnemonic::Ret => {
            let sp = state.regs[constants::SP];
            if sp == constants::STACK_START {
                return Err(StepError::StackUnderflow { pc, word });
            }
            let value = state.mem[sp.wrapping_add(1) as usize % MEM_SIZE];
            let r1 = match entry.mnemonic {
                Mnemonic::Ret => constants::PC,
                _ => ops[0] as usize,
            };
            state.regs[r1] = value;
            state.regs[constants::SP] = sp.wrapping_add(1);
        }

        Mnemonic::Add | Mnemonic::Sub | Mnemonic::Shft | Mnemonic::And | Mnemonic::Or
        | Mnemonic::Xor => alu(state, entry.mnemonic, entry.operands, &ops, r3_sampled),
    }

    Ok(())
}

fn alu(
    state: &mut State,
    mnemonic: Mnemonic,
    kinds: &[OperandKind],
    ops: &[i32],
    r3_sampled: Word,
) {
    let r1 = ops[0] as usize;
    let r2 = u32::from(state.regs[ops[1] as usize]);

    let value = match kinds[2] {
        OperandKind::Reg => u32::from(r3_sampled),
        _ => ops[2] as u32,
    };

    state.flags.overflow = false;

    // All arithmetic runs in a 17-bit intermediate so the carry falls out
    // of bit 16.
    let res = match mnemonic {
        Mnemonic::Add => {
            let res = r2 + value;
            state.flags.overflow = !(r2 ^ value) & (r2 ^ res) & NEG_BIT != 0;
            res
        }
        Mnemonic::Sub => {
            let res = r2 + (CARRY_BIT - value);
            state.flags.overflow = (r2 ^ value) & (r2 ^ res) & NEG_BIT != 0;
            res
        }
        Mnemonic::Shft => {
            let count = ops[2];
            if count < 0 {
                r2 >> -count as u32
            } else {
                r2 << count as u32
            }
        }
        Mnemonic::And => r2 & value,
        Mnemonic::Or => r2 | value,
        Mnemonic::Xor => r2 ^ value,
        _ => unreachable!(),
    };

    state.flags.zero = res & MAX_VAL == 0;
    state.flags.carry = res & CARRY_BIT != 0;
    state.flags.negative = res & NEG_BIT != 0;
    state.regs[r1] = (res & MAX_VAL) as Word;
}
