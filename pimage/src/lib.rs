//! The assembled program representation shared between the assembler, the
//! simulator front-end and the emitters: three origin-anchored sections of
//! 16-bit slots plus the global label map. Frozen once assembly finishes.

pub mod emit;

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;


/// A named region of the address space. Emission order is `io`, `code`,
/// `data`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Section {
    Io,
    Code,
    Data,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Io, Section::Code, Section::Data];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Io => "io",
            Section::Code => "code",
            Section::Data => "data",
        }
    }

    fn index(self) -> usize {
        match self {
            Section::Io => 0,
            Section::Code => 1,
            Section::Data => 2,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown section \"{}\"", self.0)
    }
}

impl StdError for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "io" => Ok(Section::Io),
            "code" => Ok(Section::Code),
            "data" => Ok(Section::Data),
            _ => Err(UnknownSection(s.to_owned())),
        }
    }
}

/// One 16-bit cell of a section: the encoded word and the source text it
/// came from. Gap slots carry an empty source.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Slot {
    pub word: u16,
    pub source: String,
}

impl Slot {
    pub fn new(word: u16, source: String) -> Slot {
        Slot { word, source }
    }

    pub fn is_empty(&self) -> bool {
        self.word == 0 && self.source.is_empty()
    }
}

/// The absolute address of slot 0 of each section.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Origins {
    pub io: u16,
    pub code: u16,
    pub data: u16,
}

impl Origins {
    pub fn get(self, section: Section) -> u16 {
        match section {
            Section::Io => self.io,
            Section::Code => self.code,
            Section::Data => self.data,
        }
    }
}

impl Default for Origins {
    fn default() -> Origins {
        Origins {
            io: 0,
            code: 16,
            data: 4096,
        }
    }
}

/// A fully assembled program image.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Image {
    origins: Origins,
    sections: [Vec<Slot>; 3],
    labels: HashMap<String, (Section, u16)>,
}

impl Image {
    pub fn new(origins: Origins) -> Image {
        Image {
            origins,
            sections: [Vec::new(), Vec::new(), Vec::new()],
            labels: HashMap::new(),
        }
    }

    pub fn origins(&self) -> Origins {
        self.origins
    }

    pub fn section(&self, section: Section) -> &[Slot] {
        &self.sections[section.index()]
    }

    /// Places a slot at a section-local index, zero-filling any gap left
    /// by `.org`.
    pub fn set_slot(&mut self, section: Section, index: usize, slot: Slot) {
        let slots = &mut self.sections[section.index()];
        if index >= slots.len() {
            slots.resize_with(index + 1, Slot::default);
        }
        slots[index] = slot;
    }

    /// Binds a label. Returns the previous binding when the name was
    /// already taken, so the assembler can reject the duplicate.
    pub fn define_label(
        &mut self,
        name: &str,
        section: Section,
        address: u16,
    ) -> Option<(Section, u16)> {
        self.labels.insert(name.to_owned(), (section, address))
    }

    pub fn label(&self, name: &str) -> Option<(Section, u16)> {
        self.labels.get(name).cloned()
    }

    pub fn labels(&self) -> &HashMap<String, (Section, u16)> {
        &self.labels
    }

    /// The inverse label map over the code section, used by the
    /// disassembler to annotate branch and jump targets.
    pub fn code_address_map(&self) -> HashMap<u16, String> {
        self.labels
            .iter()
            .filter(|(_, &(section, _))| section == Section::Code)
            .map(|(name, &(_, address))| (address, name.clone()))
            .collect()
    }

    /// The bare words of a section, for loading into simulator memory.
    pub fn words(&self, section: Section) -> Vec<u16> {
        self.section(section).iter().map(|slot| slot.word).collect()
    }
}
