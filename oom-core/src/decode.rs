//! Decoders and encoders between raw module memory and [`Value`]s

use crate::{OomError, Result, Value};
use std::fmt::Write;

/// Render raw bytes as space separated hex
///
/// - `[]` → `""`
/// - `[0x00, 0x90, 0x65]` → `"00 90 65"`
pub fn hexstr(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        // write! to String is infallible
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

/// How a key's raw bytes become a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// ASCII text, trailing spaces and NULs trimmed
    Ascii,
    /// Big-endian unsigned integer (1 to 8 bytes)
    UInt,
    /// Raw bytes
    Hex,
    /// `YYMMDD` date code rendered as `20YY-MM-DD`
    DateCode,
    /// Signed 8.8 fixed point, degrees Celsius
    Temperature,
    /// Unsigned 16-bit in units of 100 µV, volts
    Voltage,
    /// Unsigned 16-bit in units of 2 µA, milliamps
    Bias,
    /// Unsigned 16-bit in units of 0.1 µW, milliwatts
    Power,
}

impl Decoder {
    /// Decode raw bytes
    pub fn decode(&self, raw: &[u8]) -> Result<Value> {
        match self {
            Decoder::Ascii => Ok(Value::Str(ascii(raw))),
            Decoder::UInt => {
                if raw.is_empty() || raw.len() > 8 {
                    return Err(OomError::Decode(format!(
                        "Integer field must be 1-8 bytes, got {}",
                        raw.len()
                    )));
                }
                Ok(Value::Int(
                    raw.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64),
                ))
            }
            Decoder::Hex => Ok(Value::Bytes(raw.to_vec())),
            Decoder::DateCode => decode_date(raw),
            Decoder::Temperature => {
                let [hi, lo] = word(raw)?;
                Ok(Value::Float(i16::from_be_bytes([hi, lo]) as f64 / 256.0))
            }
            Decoder::Voltage => {
                let [hi, lo] = word(raw)?;
                Ok(Value::Float(u16::from_be_bytes([hi, lo]) as f64 * 0.0001))
            }
            Decoder::Bias => {
                let [hi, lo] = word(raw)?;
                Ok(Value::Float(u16::from_be_bytes([hi, lo]) as f64 * 0.002))
            }
            Decoder::Power => {
                let [hi, lo] = word(raw)?;
                Ok(Value::Float(u16::from_be_bytes([hi, lo]) as f64 * 0.0001))
            }
        }
    }
}

/// How a value becomes raw bytes for a writable key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// ASCII text, space padded
    Ascii,
    /// Big-endian unsigned integer
    UInt,
    /// Raw bytes of exactly the field length
    Hex,
}

impl Encoder {
    /// Encode a value into exactly `length` bytes
    pub fn encode(&self, value: &Value, length: usize) -> Result<Vec<u8>> {
        match (self, value) {
            (Encoder::Ascii, Value::Str(s)) => {
                if !s.is_ascii() {
                    return Err(OomError::Encode(format!("Not ASCII: {:?}", s)));
                }
                if s.len() > length {
                    return Err(OomError::Encode(format!(
                        "Text '{}' exceeds field length {}",
                        s, length
                    )));
                }
                let mut out = s.as_bytes().to_vec();
                out.resize(length, b' ');
                Ok(out)
            }
            (Encoder::UInt, Value::Int(n)) => {
                if length == 0 || length > 8 {
                    return Err(OomError::Encode(format!(
                        "Integer field must be 1-8 bytes, got {}",
                        length
                    )));
                }
                if length < 8 && *n >> (length * 8) != 0 {
                    return Err(OomError::Encode(format!(
                        "Value {} does not fit in {} byte(s)",
                        n, length
                    )));
                }
                Ok(n.to_be_bytes()[8 - length..].to_vec())
            }
            (Encoder::Hex, Value::Bytes(b)) => {
                if b.len() != length {
                    return Err(OomError::Encode(format!(
                        "Expected {} bytes, got {}",
                        length,
                        b.len()
                    )));
                }
                Ok(b.clone())
            }
            (encoder, value) => Err(OomError::Encode(format!(
                "{:?} encoder cannot encode {:?}",
                encoder, value
            ))),
        }
    }
}

fn ascii(raw: &[u8]) -> String {
    raw.iter()
        .map(|&b| b as char)
        .collect::<String>()
        .trim_end_matches([' ', '\0'])
        .to_string()
}

fn word(raw: &[u8]) -> Result<[u8; 2]> {
    raw.try_into().map_err(|_| {
        OomError::Decode(format!("Expected a 2-byte field, got {} bytes", raw.len()))
    })
}

fn decode_date(raw: &[u8]) -> Result<Value> {
    // Unprogrammed EEPROM reads back as all NULs or all spaces
    if raw.iter().all(|&b| b == 0 || b == b' ') {
        return Ok(Value::Str(String::new()));
    }
    if raw.len() < 6 || !raw[..6].iter().all(u8::is_ascii_digit) {
        return Err(OomError::Decode(format!(
            "Invalid date code: {}",
            hexstr(raw)
        )));
    }
    let text = ascii(&raw[..6]);
    Ok(Value::Str(format!(
        "20{}-{}-{}",
        &text[0..2],
        &text[2..4],
        &text[4..6]
    )))
}
