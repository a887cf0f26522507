use crate::Word;
use std::collections::VecDeque;
use std::io::{self, Write};

/// The keyboard and character-output collaborator behind the memory-mapped
/// I/O ports. The simulator itself never touches process stdio directly.
pub trait Console {
    /// One character from the keyboard port; 0 when no input is available.
    fn read_key(&mut self) -> Word;
    /// Writes one character to the output port, without a newline.
    fn put_char(&mut self, value: Word);
    /// Writes a newline to the output port.
    fn newline(&mut self);
}

/// Console wired to the process's stdin/stdout.
pub struct StdConsole;

impl Console for StdConsole {
    fn read_key(&mut self) -> Word {
        print!("Enter keyboard character: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            return 0;
        }

        match line.chars().next() {
            Some(c) if c != '\n' => (c as u32 & 0xFFFF) as Word,
            _ => 0,
        }
    }

    fn put_char(&mut self, value: Word) {
        print!(
            "{}",
            std::char::from_u32(u32::from(value)).unwrap_or('\u{FFFD}')
        );
        io::stdout().flush().ok();
    }

    fn newline(&mut self) {
        println!();
    }
}

/// Console with a canned key queue and an in-memory transcript.
pub struct ScriptedConsole {
    keys: VecDeque<Word>,
    pub output: String,
}

impl ScriptedConsole {
    pub fn new(keys: &[Word]) -> ScriptedConsole {
        ScriptedConsole {
            keys: keys.iter().cloned().collect(),
            output: String::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn read_key(&mut self) -> Word {
        self.keys.pop_front().unwrap_or(0)
    }

    fn put_char(&mut self, value: Word) {
        self.output
            .push(std::char::from_u32(u32::from(value)).unwrap_or('\u{FFFD}'));
    }

    fn newline(&mut self) {
        self.output.push('\n');
    }
}
