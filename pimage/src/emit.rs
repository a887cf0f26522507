//! Text emitters over a frozen image: an assembly listing that
//! re-assembles to the same image, and a VHDL ROM package for synthesis.

use crate::{Image, Section};
use std::io::{self, Write};

/// Size of the synthesizable ROM; only the words below this bound end up
/// in hardware.
pub const ROM_SIZE: usize = 8192;

/// Emits the image as assembly. Runs of empty slots collapse into a
/// single `.org` line.
pub fn write_listing<W: Write>(image: &Image, out: &mut W) -> io::Result<()> {
    for &section in &Section::ALL {
        writeln!(out, ".section {}", section)?;

        let mut skipped = false;
        for (addr, slot) in image.section(section).iter().enumerate() {
            if slot.source.is_empty() {
                skipped = true;
            } else {
                if skipped {
                    writeln!(out, ".org {}", addr)?;
                    skipped = false;
                }
                writeln!(out, "{}", slot.source)?;
            }
        }
    }
    Ok(())
}

/// Emits the image as a VHDL ROM initializer. With a package name the
/// output is a self-contained package; without one (emission to stdout) a
/// bare signal declaration is produced. Only slots with a non-zero word or
/// non-empty source are listed; everything else defaults to zero.
pub fn write_vhdl<W: Write>(image: &Image, out: &mut W, package: Option<&str>) -> io::Result<()> {
    match package {
        Some(pkg) => write!(
            out,
            "library ieee;\n\
             use ieee.std_logic_1164.all;\n\
             \n\
             package {pkg} is\n\
             \x20 type {pkg}_t is array(0 to {size}) of std_logic_vector(15 downto 0);\n\
             \n\
             \x20 constant {pkg}_init: {pkg}_t := (\n",
            pkg = pkg,
            size = ROM_SIZE - 1
        )?,
        None => writeln!(out, "  signal ram: ram_t := (")?,
    }

    for &section in &Section::ALL {
        let origin = image.origins().get(section) as usize;
        for (i, slot) in image.section(section).iter().enumerate() {
            if !slot.is_empty() {
                writeln!(
                    out,
                    "    {:4} => \"{:016b}\", -- {}",
                    origin + i,
                    slot.word,
                    slot.source
                )?;
            }
        }
    }

    writeln!(out, "  others => (others => '0'));")?;

    if let Some(pkg) = package {
        writeln!(out, "end package {};", pkg)?;
    }
    Ok(())
}
