use std::error::Error as StdError;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crate::constants;
use crate::disasm::Disassembler;
use crate::sim::{step, Console, State, StepError};
use crate::video::VideoSink;
use crate::Word;

const HELP: &str = "Available commands:
   h       This help.
   n       Advance to next instruction.
   b a     Set or clear breakpoint at address a.
   c       Execute continuously until halted.
   p       Print current state.
   q       Exit simulator.
   rx      Print contents of register x.
   rx = y  Set register x to value y.
   [a]     Print contents of memory address a.
   [a] = y Set memory address a to value y.
";

/// Video refresh period in continue mode, roughly 60 Hz. Program
/// correctness never depends on the cadence.
const REFRESH: Duration = Duration::from_micros(16_667);

#[derive(Debug)]
pub enum MonitorError {
    Io(io::Error),
    Step(StepError),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MonitorError::Io(err) => write!(f, "monitor i/o failed: {}", err),
            MonitorError::Step(err) => write!(f, "{}", err),
        }
    }
}

impl StdError for MonitorError {}

impl From<io::Error> for MonitorError {
    fn from(err: io::Error) -> MonitorError {
        MonitorError::Io(err)
    }
}

impl From<StepError> for MonitorError {
    fn from(err: StepError) -> MonitorError {
        MonitorError::Step(err)
    }
}

/// Line-oriented debugger REPL over an abstract stream pair. Bad command
/// input is non-fatal and reprints the help text; simulator errors abort.
pub struct Monitor<R: BufRead, W: Write> {
    input: R,
    output: W,
    disasm: Disassembler,
    breakpoints: Vec<Word>,
}

impl<R: BufRead, W: Write> Monitor<R, W> {
    pub fn new(input: R, output: W, disasm: Disassembler) -> Monitor<R, W> {
        Monitor {
            input,
            output,
            disasm,
            breakpoints: Vec::new(),
        }
    }

    pub fn run(
        &mut self,
        state: &mut State,
        console: &mut dyn Console,
        mut video: Option<&mut dyn VideoSink>,
    ) -> Result<(), MonitorError> {
        let mut last_refresh: Option<Instant> = None;

        loop {
            let pc = state.regs[constants::PC];
            let word = state.mem[pc as usize % constants::MEM_SIZE];
            let dis = match self.disasm.process(word, pc) {
                Ok((_, text)) => text,
                Err(err) => err.to_string(),
            };
            writeln!(self.output, "{:3}: {} ({})", pc, nibbles(word), dis)?;

            if let Some(sink) = video.as_mut() {
                sink.refresh(&state.mem);
            }

            write!(self.output, ">> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let cmd = line.trim();

            let prev = state.clone();

            if cmd.is_empty() || cmd == "n" {
                step(state, console)?;
            } else if cmd == "c" {
                loop {
                    if let Some(sink) = video.as_mut() {
                        if last_refresh.map_or(true, |t| t.elapsed() >= REFRESH) {
                            sink.refresh(&state.mem);
                            last_refresh = Some(Instant::now());
                        }
                    }

                    let before = state.regs[constants::PC];
                    step(state, console)?;
                    let after = state.regs[constants::PC];
                    if after == before || self.breakpoints.contains(&after) {
                        break;
                    }
                }
                continue;
            } else if let Some(arg) = cmd.strip_prefix("b ") {
                match parse_int(arg.trim()) {
                    Ok(addr) => {
                        let addr = (addr & i64::from(constants::MAX_VAL)) as Word;
                        match self.breakpoints.iter().position(|&b| b == addr) {
                            Some(at) => {
                                self.breakpoints.remove(at);
                            }
                            None => self.breakpoints.push(addr),
                        }
                        writeln!(self.output, "breakpoints: {:?}", self.breakpoints)?;
                    }
                    Err(err) => writeln!(self.output, "{}", err)?,
                }
            } else if cmd == "p" {
                writeln!(self.output, "{}", state)?;
            } else if cmd == "q" {
                return Ok(());
            } else if cmd.starts_with('r') && cmd.len() > 1 {
                self.register_command(state, cmd)?;
            } else if cmd.starts_with('[') {
                self.memory_command(state, cmd)?;
            } else {
                write!(self.output, "{}", HELP)?;
            }

            let diff = prev.diff(state);
            if !diff.is_empty() {
                writeln!(self.output, "     {}", diff)?;
            }
        }
    }

    fn register_command(&mut self, state: &mut State, cmd: &str) -> io::Result<()> {
        let tokens: Vec<&str> = cmd.splitn(2, '=').map(str::trim).collect();

        let index = match tokens[0][1..].parse::<usize>() {
            Ok(index) if index < constants::REGISTER_COUNT => index,
            _ => {
                write!(self.output, "{}", HELP)?;
                return Ok(());
            }
        };

        if tokens.len() == 1 {
            writeln!(self.output, "r{} = {}", index, state.regs[index])
        } else {
            match parse_int(tokens[1]) {
                Ok(value) => {
                    state.regs[index] = (value & i64::from(constants::MAX_VAL)) as Word;
                    Ok(())
                }
                Err(err) => writeln!(self.output, "{}", err),
            }
        }
    }

    fn memory_command(&mut self, state: &mut State, cmd: &str) -> io::Result<()> {
        let tokens: Vec<&str> = cmd.splitn(2, '=').map(str::trim).collect();

        let addr = tokens[0]
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .and_then(|t| parse_int(t.trim()).ok())
            .map(|a| (a & i64::from(constants::MAX_VAL)) as usize % constants::MEM_SIZE);

        let addr = match addr {
            Some(addr) => addr,
            None => {
                write!(self.output, "{}", HELP)?;
                return Ok(());
            }
        };

        if tokens.len() == 1 {
            writeln!(self.output, "[{}] = {}", addr, state.mem[addr])
        } else {
            match parse_int(tokens[1]) {
                Ok(value) => {
                    state.mem[addr] = (value & i64::from(constants::MAX_VAL)) as Word;
                    Ok(())
                }
                Err(err) => writeln!(self.output, "{}", err),
            }
        }
    }
}

/// Formats a word as four nibble groups for the monitor's fetch display.
fn nibbles(word: Word) -> String {
    let bits = format!("{:016b}", word);
    format!("{} {} {} {}", &bits[0..4], &bits[4..8], &bits[8..12], &bits[12..16])
}

/// Parses an integer in the monitor's command syntax: decimal by default,
/// `0x`/`0o`/`0b` prefixes for other radixes, optional leading minus.
fn parse_int(s: &str) -> Result<i64, String> {
    let (sign, body) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s),
    };

    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x") {
        (16, hex)
    } else if let Some(oct) = body.strip_prefix("0o") {
        (8, oct)
    } else if let Some(bin) = body.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, body)
    };

    i64::from_str_radix(digits, radix)
        .map(|v| sign * v)
        .map_err(|err| format!("invalid number \"{}\": {}", s, err))
}
