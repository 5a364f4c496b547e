use std::fmt;

pub const SEMICOLON: u8 = b';';
pub const NEWLINE: u8 = b'\n';

/// Why a single record failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    MissingSeparator,
    BadMeasurement,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingSeparator => write!(f, "missing ';' separator"),
            ParseError::BadMeasurement => {
                write!(f, "measurement is not a signed 1-2 digit decimal with one fractional digit")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits one line (no trailing newline) at the first `;` and decodes the
/// remainder. The returned name is a view into `line`, never a copy.
pub fn split(line: &[u8]) -> Result<(&[u8], i32), ParseError> {
    let sep = line
        .iter()
        .position(|&b| b == SEMICOLON)
        .ok_or(ParseError::MissingSeparator)?;
    let tenths = decode_tenths(&line[sep + 1..])?;
    Ok((&line[..sep], tenths))
}

/// Decodes an ASCII literal with an optional minus, a one or two digit
/// integer part and exactly one fractional digit into tenths. No floats.
pub fn decode_tenths(raw: &[u8]) -> Result<i32, ParseError> {
    let (negative, digits) = match raw.first() {
        Some(&b'-') => (true, &raw[1..]),
        _ => (false, raw),
    };
    let magnitude = match *digits {
        [units, b'.', frac] => digit(units)? * 10 + digit(frac)?,
        [tens, units, b'.', frac] => digit(tens)? * 100 + digit(units)? * 10 + digit(frac)?,
        _ => return Err(ParseError::BadMeasurement),
    };
    Ok(if negative { -magnitude } else { magnitude })
}

#[inline]
fn digit(b: u8) -> Result<i32, ParseError> {
    if b.is_ascii_digit() {
        Ok((b - b'0') as i32)
    } else {
        Err(ParseError::BadMeasurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tenths: i32) -> String {
        let sign = if tenths < 0 { "-" } else { "" };
        let mag = tenths.abs();
        format!("{sign}{}.{}", mag / 10, mag % 10)
    }

    #[test]
    fn decodes_every_representable_value() {
        for tenths in -999..=999 {
            let text = render(tenths);
            assert_eq!(decode_tenths(text.as_bytes()), Ok(tenths), "literal {text}");
        }
    }

    #[test]
    fn rendering_a_decoded_literal_reproduces_it() {
        for text in ["0.0", "0.3", "9.9", "10.0", "99.9", "-0.1", "-9.9", "-10.0", "-99.9"] {
            let tenths = decode_tenths(text.as_bytes()).unwrap();
            assert_eq!(render(tenths), text);
        }
    }

    #[test]
    fn negative_zero_decodes_to_zero() {
        assert_eq!(decode_tenths(b"-0.0"), Ok(0));
    }

    #[test]
    fn rejects_malformed_literals() {
        let bad: &[&[u8]] = &[
            b"", b"-", b"5", b"12", b"1.", b".5", b"1.23", b"123.4", b"x.1", b"1.x", b"-1x.0",
            b"1..0", b"+1.0", b" 1.0", b"1.0 ", b"12,0", b"--1.0",
        ];
        for raw in bad {
            assert_eq!(
                decode_tenths(raw),
                Err(ParseError::BadMeasurement),
                "literal {:?}",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn splits_name_from_measurement() {
        assert_eq!(split(b"Hamburg;12.0"), Ok((&b"Hamburg"[..], 120)));
        assert_eq!(split(b"Berlin;-3.2"), Ok((&b"Berlin"[..], -32)));
    }

    #[test]
    fn split_uses_the_first_separator() {
        // anything after the first ';' must be a bare measurement
        assert_eq!(split(b"a;b;1.0"), Err(ParseError::BadMeasurement));
    }

    #[test]
    fn split_allows_an_empty_name() {
        assert_eq!(split(b";3.4"), Ok((&b""[..], 34)));
    }

    #[test]
    fn split_without_separator_fails() {
        assert_eq!(split(b"Berlin:12.0"), Err(ParseError::MissingSeparator));
        assert_eq!(split(b""), Err(ParseError::MissingSeparator));
    }
}
