use crate::parser::Rule;
use matches::debug_assert_matches;
use num::Num;
use pest::iterators::Pair;
use std::num::ParseIntError;

fn parse_radix<T>(digits: &str, radix: u32) -> Result<T, String>
where
    T: Num<FromStrRadixErr = ParseIntError>,
{
    T::from_str_radix(digits, radix).map_err(|err| format!("parsing integer failed: {}", err))
}

/// Extracts the value of an `int` parse node: decimal, `0x` hex or a
/// character literal. Values are bounded to what can appear in a 16-bit
/// word (including negated word values, which wrap).
pub fn process_int(pair: Pair<Rule>) -> Result<i32, String> {
    debug_assert_matches!(pair.as_rule(), Rule::int);

    let inner = pair.into_inner().next().unwrap();
    let value = match inner.as_rule() {
        Rule::hex_int => parse_radix::<i64>(inner.into_inner().next().unwrap().as_str(), 16)?,
        Rule::dec_int => parse_radix::<i64>(inner.as_str(), 10)?,
        Rule::char_int => {
            let c = inner.into_inner().next().unwrap().as_str().chars().next();
            i64::from(c.unwrap_or('\0') as u32)
        }
        _ => unreachable!(),
    };

    if value < -0x10000 || value > 0xFFFF {
        return Err(format!("integer {} does not fit in 16 bits", value));
    }
    Ok(value as i32)
}
