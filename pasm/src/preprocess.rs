use crate::int_util::process_int;
use crate::parser::{AsmParser, Rule};
use crate::{source_error, Error, Result};
use pest::iterators::Pair;
use pest::Parser;
use pimage::Section;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One preprocessed source line: a slot in a section, the labels bound to
/// it, and the (substituted) text the assembler will encode. Gap slots
/// from `.ds` carry empty text.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Record {
    pub section: Section,
    pub index: usize,
    pub labels: Vec<String>,
    pub text: String,
    pub file: PathBuf,
    pub line: usize,
}

impl Record {
    pub fn error(&self, message: String) -> Error {
        source_error(&self.file, self.line, message)
    }

    /// The record as it appears in listings: labels, then the text.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for label in &self.labels {
            out.push_str(label);
            out.push_str(": ");
        }
        out.push_str(&self.text);
        out
    }
}

/// Reads source files and flattens them into a record stream: includes
/// are spliced, comments and blank lines dropped, `.equ` names
/// substituted, and every remaining line given its slot in the current
/// section.
pub struct Preprocessor {
    section: Section,
    cursors: [usize; 3],
    equs: Vec<(String, String)>,
    pending: Vec<String>,
    stack: Vec<PathBuf>,
    records: Vec<Record>,
}

impl Preprocessor {
    pub fn new() -> Preprocessor {
        Preprocessor {
            section: Section::Code,
            cursors: [0; 3],
            equs: Vec::new(),
            pending: Vec::new(),
            stack: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Processes a top-level file and returns the record stream.
    pub fn process(mut self, path: &Path) -> Result<Vec<Record>> {
        self.read_file(path, None)?;
        self.finish()
    }

    /// Processes in-memory source, for callers that do not read from the
    /// filesystem (tests, generated code).
    pub fn process_str(mut self, source: &str, name: &str) -> Result<Vec<Record>> {
        self.run(source, Path::new(name))?;
        self.finish()
    }

    fn finish(self) -> Result<Vec<Record>> {
        if let Some(label) = self.pending.first() {
            let last = self.records.last();
            return Err(source_error(
                last.map_or(Path::new("<input>"), |r| &r.file),
                last.map_or(0, |r| r.line),
                format!("label \"{}\" is not attached to anything", label),
            ));
        }
        Ok(self.records)
    }

    fn read_file(&mut self, path: &Path, at: Option<(&Path, usize)>) -> Result<()> {
        let io_error = |err| match at {
            Some((file, line)) => source_error(
                file,
                line,
                format!("cannot include \"{}\": {}", path.display(), err),
            ),
            None => Error::Io(path.to_owned(), err),
        };

        let canonical = path.canonicalize().map_err(io_error)?;
        if self.stack.contains(&canonical) {
            let (file, line) = at.unwrap_or((path, 0));
            return Err(source_error(
                file,
                line,
                format!("include cycle through \"{}\"", path.display()),
            ));
        }

        let source = fs::read_to_string(path).map_err(io_error)?;

        self.stack.push(canonical);
        self.run(&source, path)?;
        self.stack.pop();
        Ok(())
    }

    fn run(&mut self, source: &str, file: &Path) -> Result<()> {
        for (i, raw) in source.lines().enumerate() {
            self.process_line(raw, file, i + 1)?;
        }
        Ok(())
    }

    fn process_line(&mut self, raw: &str, file: &Path, line: usize) -> Result<()> {
        let text = match raw.find(';') {
            Some(at) => &raw[..at],
            None => raw,
        };
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let text = self.substitute(text);

        let parsed = AsmParser::parse(Rule::line, &text)
            .map_err(|err| source_error(file, line, format!("syntax error\n{}", err)))?
            .next()
            .unwrap();

        let mut item = None;
        for pair in parsed.into_inner() {
            match pair.as_rule() {
                Rule::label => {
                    let name = pair.into_inner().next().unwrap().as_str().to_owned();
                    self.pending.push(name);
                }
                Rule::directive | Rule::instruction => item = Some(pair),
                Rule::EOI => {}
                _ => unreachable!(),
            }
        }

        match item {
            None => Ok(()),
            Some(pair) => match pair.as_rule() {
                Rule::instruction => {
                    let text = pair.as_str().trim().to_owned();
                    self.emit(text, file, line);
                    Ok(())
                }
                Rule::directive => self.directive(pair.into_inner().next().unwrap(), file, line),
                _ => unreachable!(),
            },
        }
    }

    fn directive(&mut self, pair: Pair<Rule>, file: &Path, line: usize) -> Result<()> {
        let err = |message| source_error(file, line, message);

        match pair.as_rule() {
            Rule::section_dir => {
                let name = pair.into_inner().next().unwrap().as_str();
                self.section = Section::from_str(name).map_err(|e| err(e.to_string()))?;
            }

            Rule::org_dir => {
                let value = process_int(pair.into_inner().next().unwrap()).map_err(err)?;
                if value < 0 {
                    return Err(err(format!(".org target {} is negative", value)));
                }
                *self.cursor() = value as usize;
            }

            Rule::equ_dir => {
                let mut inner = pair.into_inner();
                let name = inner.next().unwrap().as_str().to_owned();
                let value = inner.next().unwrap().as_str().to_owned();
                if self.equs.iter().any(|(n, _)| *n == name) {
                    return Err(err(format!(".equ \"{}\" is already defined", name)));
                }
                self.equs.push((name, value));
            }

            Rule::include_dir => {
                let quoted = pair.into_inner().next().unwrap();
                let rel = quoted.into_inner().next().unwrap().as_str();
                let target = file.parent().unwrap_or_else(|| Path::new(".")).join(rel);
                self.read_file(&target, Some((file, line)))?;
            }

            Rule::dw_dir => {
                for value in pair.into_inner() {
                    let inner = value.into_inner().next().unwrap();
                    match inner.as_rule() {
                        Rule::int => {
                            let token = inner.as_str().to_owned();
                            process_int(inner).map_err(err)?;
                            self.emit(format!(".dw {}", token), file, line);
                        }
                        Rule::string => {
                            let text = inner.into_inner().next().unwrap().as_str().to_owned();
                            for c in text.chars() {
                                self.emit(format!(".dw '{}'", c), file, line);
                            }
                        }
                        _ => unreachable!(),
                    }
                }
            }

            Rule::ds_dir => {
                let count = process_int(pair.into_inner().next().unwrap()).map_err(err)?;
                if count < 0 {
                    return Err(err(format!(".ds count {} is negative", count)));
                }
                if count > 0 {
                    self.emit(format!(".ds {}", count), file, line);
                    *self.cursor() += count as usize - 1;
                }
            }

            _ => unreachable!(),
        }
        Ok(())
    }

    fn emit(&mut self, text: String, file: &Path, line: usize) {
        let index = *self.cursor();
        *self.cursor() += 1;

        self.records.push(Record {
            section: self.section,
            index,
            labels: std::mem::replace(&mut self.pending, Vec::new()),
            text,
            file: file.to_owned(),
            line,
        });
    }

    fn cursor(&mut self) -> &mut usize {
        let at = match self.section {
            Section::Io => 0,
            Section::Code => 1,
            Section::Data => 2,
        };
        &mut self.cursors[at]
    }

    /// Token-wise replacement of `.equ` names. Tokens are identifier
    /// runs, so a name never matches inside a longer symbol or a number.
    fn substitute(&self, line: &str) -> String {
        if self.equs.is_empty() {
            return line.to_owned();
        }

        let mut out = String::with_capacity(line.len());
        let mut token = String::new();

        for c in line.chars().chain(std::iter::once('\n')) {
            if c.is_ascii_alphanumeric() || c == '_' {
                token.push(c);
            } else {
                if !token.is_empty() {
                    match self.equs.iter().find(|(name, _)| *name == token) {
                        Some((_, value)) => out.push_str(value),
                        None => out.push_str(&token),
                    }
                    token.clear();
                }
                if c != '\n' {
                    out.push(c);
                }
            }
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Preprocessor {
        Preprocessor::new()
    }
}
