#[macro_use]
extern crate clap;

use clap::{Arg, ArgMatches};
use pimage::{emit, Image, Origins, Section};
use puc16::disasm::Disassembler;
use puc16::sim::{run_steps, Monitor, State, StdConsole};
use puc16::video::{TextPresenter, VideoSink};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

#[derive(Debug)]
enum Error {
    Asm(pasm::Error),
    Io(std::io::Error, String),
    Monitor(puc16::sim::MonitorError),
    Step(puc16::sim::StepError),
    TestMismatch { actual: u16, expected: u16 },
    BadArgument(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Asm(err) => write!(f, "{}", err),
            Error::Io(err, path) => write!(f, "writing output \"{}\" failed: {}", path, err),
            Error::Monitor(err) => write!(f, "{}", err),
            Error::Step(err) => write!(f, "{}", err),
            Error::TestMismatch { actual, expected } => write!(
                f,
                "PC after 1000 steps is {}, expected {}",
                actual, expected
            ),
            Error::BadArgument(message) => f.write_str(message),
        }
    }
}

impl From<pasm::Error> for Error {
    fn from(err: pasm::Error) -> Error {
        Error::Asm(err)
    }
}

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("INPUT")
                .help("ASM source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("OUTPUT")
                .default_value("-")
                .help("Sets the output file to write to"),
        )
        .arg(
            Arg::with_name("preprocess")
                .short("E")
                .help("Output preprocessed assembly code"),
        )
        .arg(
            Arg::with_name("simulate")
                .short("s")
                .long("simulate")
                .help("Simulate resulting program"),
        )
        .arg(
            Arg::with_name("vga")
                .short("v")
                .long("vga")
                .help("Visualize VGA output during simulation"),
        )
        .arg(
            Arg::with_name("test")
                .short("t")
                .long("test")
                .takes_value(true)
                .value_name("N")
                .help("Simulate for 1000 steps and check whether PC == N"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("INPUT").unwrap();
    let output = matches.value_of("output").unwrap();

    let records = pasm::Preprocessor::new().process(Path::new(input))?;

    if matches.is_present("preprocess") {
        let mut out = open_output(output)?;
        for record in &records {
            writeln!(out, "{} {}", record.index, record.display())
                .map_err(|e| Error::Io(e, output.to_owned()))?;
        }
        return Ok(());
    }

    let image = pasm::assemble(&records, Origins::default())?;

    if let Some(expected) = matches.value_of("test") {
        let expected: u16 = expected
            .parse()
            .map_err(|_| Error::BadArgument(format!("invalid test PC \"{}\"", expected)))?;
        let mut state = load_state(&image);
        let actual =
            run_steps(&mut state, &mut StdConsole, 1000).map_err(Error::Step)?;
        if actual != expected {
            return Err(Error::TestMismatch { actual, expected });
        }
        return Ok(());
    }

    if matches.is_present("simulate") {
        let mut state = load_state(&image);
        let disasm = Disassembler::new(Some(image.code_address_map()));
        let stdin = io::stdin();
        let mut monitor = Monitor::new(stdin.lock(), io::stdout(), disasm);

        let mut presenter = TextPresenter::new(io::stdout());
        let video: Option<&mut dyn VideoSink> = if matches.is_present("vga") {
            Some(&mut presenter)
        } else {
            None
        };

        return monitor
            .run(&mut state, &mut StdConsole, video)
            .map_err(Error::Monitor);
    }

    if output == "-" {
        let stdout = io::stdout();
        emit::write_vhdl(&image, &mut stdout.lock(), None)
            .map_err(|e| Error::Io(e, output.to_owned()))?;
    } else {
        let package = Path::new(output)
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_owned)
            .ok_or_else(|| Error::BadArgument(format!("invalid output path \"{}\"", output)))?;
        let mut out = open_output(output)?;
        emit::write_vhdl(&image, &mut out, Some(&package))
            .map_err(|e| Error::Io(e, output.to_owned()))?;
    }

    Ok(())
}

fn load_state(image: &Image) -> State {
    let mut state = State::new();
    for &section in &Section::ALL {
        state.load(image.origins().get(section), &image.words(section));
    }
    state
}

fn open_output(path: &str) -> Result<Box<dyn Write>, Error> {
    if path == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        let file = File::create(path).map_err(|e| Error::Io(e, path.to_owned()))?;
        Ok(Box::new(BufWriter::new(file)))
    }
}
