use crate::int_util::process_int;
use crate::parser::{AsmParser, Rule};
use crate::preprocess::Record;
use crate::Result;
use matches::debug_assert_matches;
use pest::iterators::Pair;
use pest::Parser;
use pimage::{Image, Origins, Section, Slot};
use puc16::isa::{self, Encoding, Mnemonic, OperandKind, RegisterId};
use std::str::FromStr;

/// A parsed operand before resolution against the label map.
#[derive(Clone, PartialEq, Eq, Debug)]
enum Operand {
    Reg(RegisterId),
    Base(RegisterId),
    Num(i32),
    Label(String),
    Low(String),
    High(String),
}

/// Two-pass assembly of a record stream into an image.
///
/// Pass 1 assigns every slot its absolute address and freezes the global
/// label map; pass 2 re-parses each record, resolves operands and
/// relocations against that map, and encodes.
pub fn assemble(records: &[Record], origins: Origins) -> Result<Image> {
    let mut image = Image::new(origins);

    for record in records {
        let address = absolute(origins, record)?;
        for label in &record.labels {
            if image.define_label(label, record.section, address).is_some() {
                return Err(record.error(format!("duplicate label \"{}\"", label)));
            }
        }
    }

    for record in records {
        let address = absolute(origins, record)?;
        let word = encode_record(record, address, &image)?;
        image.set_slot(record.section, record.index, Slot::new(word, record.display()));
    }

    Ok(image)
}

fn absolute(origins: Origins, record: &Record) -> Result<u16> {
    let address = origins.get(record.section) as usize + record.index;
    if address > 0xFFFF {
        return Err(record.error(format!(
            "address {} is outside the 16-bit address space",
            address
        )));
    }
    Ok(address as u16)
}

fn encode_record(record: &Record, address: u16, image: &Image) -> Result<u16> {
    if record.text.is_empty() {
        return Ok(0);
    }

    let line = AsmParser::parse(Rule::line, &record.text)
        .map_err(|err| record.error(format!("syntax error\n{}", err)))?
        .next()
        .unwrap();

    let item = line
        .into_inner()
        .find(|p| p.as_rule() != Rule::EOI)
        .ok_or_else(|| record.error("empty record".to_owned()))?;

    match item.as_rule() {
        Rule::instruction => encode_instruction(item, record, address, image),
        Rule::directive => {
            let inner = item.into_inner().next().unwrap();
            match inner.as_rule() {
                Rule::dw_dir => {
                    let value = inner.into_inner().next().unwrap();
                    let int = value.into_inner().next().unwrap();
                    debug_assert_matches!(int.as_rule(), Rule::int);
                    let value = process_int(int).map_err(|m| record.error(m))?;
                    Ok(value as u16)
                }
                Rule::ds_dir => Ok(0),
                _ => Err(record.error("directive is not allowed at this stage".to_owned())),
            }
        }
        _ => unreachable!(),
    }
}

fn encode_instruction(
    pair: Pair<Rule>,
    record: &Record,
    address: u16,
    image: &Image,
) -> Result<u16> {
    let mut pairs = pair.into_inner();
    let name = pairs.next().unwrap().as_str();

    let mut operands = Vec::new();
    for operand in pairs {
        flatten_operand(operand, record, &mut operands)?;
    }

    let mnemonic = match name {
        // Surface spellings of the shift instruction; the shift count is
        // signed in the encoding, negative meaning right.
        "shl" | "shr" => {
            match operands.last_mut() {
                Some(Operand::Num(n)) if *n >= 1 && *n <= 8 => {
                    if name == "shr" {
                        *n = -*n;
                    }
                }
                _ => {
                    return Err(
                        record.error(format!("{} takes a shift count between 1 and 8", name))
                    );
                }
            }
            Mnemonic::Shft
        }
        _ => Mnemonic::from_str(name).map_err(|e| record.error(e.to_string()))?,
    };

    let entry = select_encoding(mnemonic, &operands).ok_or_else(|| {
        record.error(format!(
            "wrong operand count or kinds for \"{}\"",
            mnemonic
        ))
    })?;

    let values = resolve(entry, &operands, address, image, record)?;

    isa::encode(entry, &values).map_err(|e| record.error(e.to_string()))
}

fn flatten_operand(pair: Pair<Rule>, record: &Record, out: &mut Vec<Operand>) -> Result<()> {
    debug_assert_matches!(pair.as_rule(), Rule::operand);
    let inner = pair.into_inner().next().unwrap();

    let parse_reg = |p: Pair<Rule>| {
        RegisterId::from_str(p.as_str()).map_err(|e| record.error(e.to_string()))
    };

    match inner.as_rule() {
        Rule::register => out.push(Operand::Reg(parse_reg(inner)?)),
        Rule::address => {
            let mut parts = inner.into_inner();
            out.push(Operand::Base(parse_reg(parts.next().unwrap())?));
            let offset = match parts.next() {
                Some(int) => process_int(int).map_err(|m| record.error(m))?,
                None => 0,
            };
            out.push(Operand::Num(offset));
        }
        Rule::int => out.push(Operand::Num(
            process_int(inner).map_err(|m| record.error(m))?,
        )),
        Rule::label_ref => out.push(Operand::Label(name_of(inner))),
        Rule::low_ref => out.push(Operand::Low(name_of(inner))),
        Rule::high_ref => out.push(Operand::High(name_of(inner))),
        _ => unreachable!(),
    }
    Ok(())
}

fn name_of(pair: Pair<Rule>) -> String {
    pair.into_inner().next().unwrap().as_str().to_owned()
}

fn compatible(kind: OperandKind, operand: &Operand) -> bool {
    match (kind, operand) {
        (OperandKind::Reg, Operand::Reg(_)) => true,
        (OperandKind::AddrBase, Operand::Base(_)) => true,
        (OperandKind::Off4, Operand::Num(_))
        | (OperandKind::Imm4, Operand::Num(_))
        | (OperandKind::Shamt4, Operand::Num(_)) => true,
        (OperandKind::Imm8, Operand::Num(_))
        | (OperandKind::Imm8, Operand::Low(_))
        | (OperandKind::Imm8, Operand::High(_)) => true,
        (OperandKind::Rel8, Operand::Num(_)) | (OperandKind::Rel8, Operand::Label(_)) => true,
        (OperandKind::Abs12, Operand::Num(_)) | (OperandKind::Abs12, Operand::Label(_)) => true,
        _ => false,
    }
}

fn select_encoding(mnemonic: Mnemonic, operands: &[Operand]) -> Option<&'static Encoding> {
    isa::ENCODINGS.iter().find(|e| {
        e.mnemonic == mnemonic
            && e.operands.len() == operands.len()
            && e.operands
                .iter()
                .zip(operands)
                .all(|(&kind, op)| compatible(kind, op))
    })
}

fn resolve(
    entry: &Encoding,
    operands: &[Operand],
    address: u16,
    image: &Image,
    record: &Record,
) -> Result<Vec<i32>> {
    let lookup = |name: &str| {
        image
            .label(name)
            .map(|(_, target)| i32::from(target))
            .ok_or_else(|| record.error(format!("unknown label \"{}\"", name)))
    };

    entry
        .operands
        .iter()
        .zip(operands)
        .map(|(&kind, operand)| match operand {
            Operand::Reg(r) | Operand::Base(r) => Ok(*r as i32),
            Operand::Num(v) => Ok(*v),
            Operand::Label(name) => {
                let target = lookup(name)?;
                match kind {
                    OperandKind::Rel8 => {
                        let displacement = target - (i32::from(address) + 1);
                        if displacement < -128 || displacement > 127 {
                            Err(record.error(format!(
                                "branch target @{} is out of range ({} words away)",
                                name, displacement
                            )))
                        } else {
                            Ok(displacement)
                        }
                    }
                    OperandKind::Abs12 => Ok(target),
                    _ => unreachable!(),
                }
            }
            Operand::Low(name) => Ok(lookup(name)? & 0xFF),
            Operand::High(name) => Ok(lookup(name)? >> 8 & 0xFF),
        })
        .collect()
}
