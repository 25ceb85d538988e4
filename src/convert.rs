//! Bidirectional `wire bytes <-> human form` conversion for each [ValueKind].
//!
//! Every conversion obeys the round-trip law: `from_human(to_human(b)) == b` for every `b` that
//! is a legal wire value of its kind. `to_human` never fails for well-formed input of the
//! declared width — callers (the Enricher) are responsible for checking width first and
//! downgrading to `hex_string` on mismatch rather than calling `to_human` with the wrong width.

use std::convert::{TryFrom, TryInto};
use std::net::{Ipv4Addr, Ipv6Addr};

use serde_json::Value as Json;

use crate::registry::ValueKind;

/// A human-readable form of a TLV value: whatever the Format Bridge / CLI-adjacent caller would
/// want to display or accept as input. Numbers round-trip through `serde_json::Number` so that
/// ingest doesn't need to special-case string-vs-number formatted values.
pub type Human = Json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub input: String,
}

pub type Result<T> = std::result::Result<T, ParseError>;

fn parse_err(input: impl Into<String>) -> ParseError {
    ParseError { input: input.into() }
}

/// Converts wire bytes to a human-readable form for `kind`. Returns `None` if `bytes` isn't a
/// legal wire value for `kind` (wrong width for a fixed-width kind) — the Enricher treats this
/// as a downgrade signal, never a hard error.
pub fn to_human(kind: ValueKind, bytes: &[u8]) -> Option<Human> {
    match kind {
        ValueKind::Uint8 => fixed(bytes, 1).map(|b| Json::from(b[0] as u64)),
        ValueKind::Uint16 => fixed(bytes, 2).map(|b| Json::from(u16::from_be_bytes([b[0], b[1]]) as u64)),
        ValueKind::Uint32 => fixed(bytes, 4).map(|b| Json::from(u32::from_be_bytes(b.try_into().unwrap()) as u64)),
        ValueKind::Uint64 => fixed(bytes, 8).map(|b| Json::from(u64::from_be_bytes(b.try_into().unwrap()))),
        ValueKind::Int8 => fixed(bytes, 1).map(|b| Json::from(b[0] as i8 as i64)),
        ValueKind::Int16 => fixed(bytes, 2).map(|b| Json::from(i16::from_be_bytes([b[0], b[1]]) as i64)),
        ValueKind::Int32 => fixed(bytes, 4).map(|b| Json::from(i32::from_be_bytes(b.try_into().unwrap()) as i64)),
        ValueKind::Boolean => fixed(bytes, 1).map(|b| match b[0] {
            0x00 => Json::from("disabled"),
            0x01 => Json::from("enabled"),
            _ => Json::from("enabled"),
        }),
        ValueKind::String => std::str::from_utf8(bytes).ok().map(Json::from),
        ValueKind::Ipv4 => fixed(bytes, 4)
            .map(|b| Ipv4Addr::new(b[0], b[1], b[2], b[3]))
            .map(|ip| Json::from(ip.to_string())),
        ValueKind::Ipv6 => fixed(bytes, 16)
            .map(|b| {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(b);
                Ipv6Addr::from(octets)
            })
            .map(|ip| Json::from(ip.to_string())),
        ValueKind::MacAddress => fixed(bytes, 6).map(|b| Json::from(format_colon_hex(b))),
        ValueKind::VendorOui => fixed(bytes, 3).map(|b| Json::from(format_colon_hex(b))),
        ValueKind::Frequency => fixed(bytes, 4).map(|b| Json::from(format_frequency(u32::from_be_bytes(b.try_into().unwrap())))),
        ValueKind::Bandwidth => fixed(bytes, 4).map(|b| Json::from(format_bandwidth(u32::from_be_bytes(b.try_into().unwrap())))),
        ValueKind::Duration => duration_to_human(bytes),
        ValueKind::Percentage => fixed(bytes, 1).map(|b| Json::from(format!("{}%", b[0]))),
        ValueKind::PowerQuarterDb => fixed(bytes, 1).map(|b| Json::from(format!("{:.2} dBmV", (b[0] as i8) as f64 / 4.0))),
        ValueKind::Oid => oid_to_human(bytes),
        ValueKind::Asn1Der => Some(Json::from(hex::encode_upper(bytes))),
        ValueKind::ServiceFlowRef => fixed(bytes, 2).map(|b| Json::from(u16::from_be_bytes([b[0], b[1]]) as u64)),
        ValueKind::Marker => fixed(bytes, 0).map(|_| Json::from("present")),
        ValueKind::HexString => Some(Json::from(format_spaced_hex(bytes))),
        ValueKind::Binary => Some(Json::from(hex::encode_upper(bytes))),
        ValueKind::Compound => None,
    }
}

/// Converts a human-readable form back to wire bytes for `kind`.
pub fn from_human(kind: ValueKind, human: &Human) -> Result<Vec<u8>> {
    match kind {
        ValueKind::Uint8 => as_u64(human)?.try_into().map(|v: u8| vec![v]).map_err(|_| parse_err(human.to_string())),
        ValueKind::Uint16 => as_u64(human).map(|v| (v as u16).to_be_bytes().to_vec()),
        ValueKind::Uint32 => as_u64(human).map(|v| (v as u32).to_be_bytes().to_vec()),
        ValueKind::Uint64 => as_u64(human).map(|v| v.to_be_bytes().to_vec()),
        ValueKind::Int8 => as_i64(human).map(|v| vec![v as i8 as u8]),
        ValueKind::Int16 => as_i64(human).map(|v| (v as i16).to_be_bytes().to_vec()),
        ValueKind::Int32 => as_i64(human).map(|v| (v as i32).to_be_bytes().to_vec()),
        ValueKind::Boolean => boolean_from_human(human),
        ValueKind::String => as_str(human).map(|s| s.as_bytes().to_vec()),
        ValueKind::Ipv4 => as_str(human)?.parse::<Ipv4Addr>().map(|ip| ip.octets().to_vec()).map_err(|_| parse_err(human.to_string())),
        ValueKind::Ipv6 => as_str(human)?.parse::<Ipv6Addr>().map(|ip| ip.octets().to_vec()).map_err(|_| parse_err(human.to_string())),
        ValueKind::MacAddress => parse_colon_hex(as_str(human)?, 6),
        ValueKind::VendorOui => parse_colon_hex(as_str(human)?, 3),
        ValueKind::Frequency => frequency_from_human(human),
        ValueKind::Bandwidth => bandwidth_from_human(human),
        ValueKind::Duration => duration_from_human(human),
        ValueKind::Percentage => percentage_from_human(human),
        ValueKind::PowerQuarterDb => power_quarter_db_from_human(human),
        ValueKind::Oid => oid_from_human(as_str(human)?),
        ValueKind::Asn1Der => hex::decode(as_str(human)?).map_err(|_| parse_err(human.to_string())),
        ValueKind::ServiceFlowRef => as_u64(human).map(|v| (v as u16).to_be_bytes().to_vec()),
        ValueKind::Marker => match as_str(human)? {
            "present" => Ok(Vec::new()),
            other => Err(parse_err(other)),
        },
        ValueKind::HexString => parse_spaced_hex(as_str(human)?),
        ValueKind::Binary => hex::decode(as_str(human)?).map_err(|_| parse_err(human.to_string())),
        ValueKind::Compound => Err(parse_err("compound values have no direct human form")),
    }
}

fn fixed(bytes: &[u8], width: usize) -> Option<&[u8]> {
    if bytes.len() == width {
        Some(bytes)
    } else {
        None
    }
}

fn as_u64(human: &Human) -> Result<u64> {
    if let Some(n) = human.as_u64() {
        return Ok(n);
    }
    if let Some(s) = human.as_str() {
        return s.trim().parse::<u64>().map_err(|_| parse_err(s));
    }
    Err(parse_err(human.to_string()))
}

fn as_i64(human: &Human) -> Result<i64> {
    if let Some(n) = human.as_i64() {
        return Ok(n);
    }
    if let Some(s) = human.as_str() {
        return s.trim().parse::<i64>().map_err(|_| parse_err(s));
    }
    Err(parse_err(human.to_string()))
}

fn as_str(human: &Human) -> Result<&str> {
    human.as_str().ok_or_else(|| parse_err(human.to_string()))
}

fn boolean_from_human(human: &Human) -> Result<Vec<u8>> {
    if let Some(b) = human.as_bool() {
        return Ok(vec![if b { 1 } else { 0 }]);
    }
    if let Some(n) = human.as_u64() {
        return match n {
            0 => Ok(vec![0]),
            1 => Ok(vec![1]),
            _ => Err(parse_err(human.to_string())),
        };
    }
    let s = as_str(human)?;
    match s.to_ascii_lowercase().as_str() {
        "enabled" | "on" | "true" | "1" => Ok(vec![1]),
        "disabled" | "off" | "false" | "0" => Ok(vec![0]),
        _ => Err(parse_err(s)),
    }
}

fn format_colon_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(":")
}

fn parse_colon_hex(s: &str, width: usize) -> Result<Vec<u8>> {
    let cleaned: String = s.chars().filter(|c| *c != ':' && *c != '-').collect();
    if cleaned.len() != width * 2 {
        return Err(parse_err(s));
    }
    hex::decode(&cleaned).map_err(|_| parse_err(s))
}

fn format_spaced_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

fn parse_spaced_hex(s: &str) -> Result<Vec<u8>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&cleaned).map_err(|_| parse_err(s))
}

// --- Frequency ----------------------------------------------------------------------------------

fn format_frequency(hz: u32) -> String {
    if hz % 1_000_000_000 == 0 && hz >= 1_000_000_000 {
        format!("{} GHz", hz / 1_000_000_000)
    } else if hz % 1_000_000 == 0 && hz >= 1_000_000 {
        format!("{} MHz", hz / 1_000_000)
    } else if hz % 1_000 == 0 && hz >= 1_000 {
        format!("{} KHz", hz / 1_000)
    } else {
        format!("{} Hz", hz)
    }
}

fn frequency_from_human(human: &Human) -> Result<Vec<u8>> {
    let hz = scaled_value_from_human(
        human,
        &[("ghz", 1_000_000_000.0), ("mhz", 1_000_000.0), ("khz", 1_000.0), ("hz", 1.0)],
    )?;
    Ok((hz.round() as u32).to_be_bytes().to_vec())
}

fn format_bandwidth(bps: u32) -> String {
    if bps % 1_000_000_000 == 0 && bps >= 1_000_000_000 {
        format!("{} Gbps", bps / 1_000_000_000)
    } else if bps % 1_000_000 == 0 && bps >= 1_000_000 {
        format!("{} Mbps", bps / 1_000_000)
    } else if bps % 1_000 == 0 && bps >= 1_000 {
        format!("{} Kbps", bps / 1_000)
    } else {
        format!("{} bps", bps)
    }
}

fn bandwidth_from_human(human: &Human) -> Result<Vec<u8>> {
    let bps = scaled_value_from_human(
        human,
        &[("gbps", 1_000_000_000.0), ("mbps", 1_000_000.0), ("kbps", 1_000.0), ("bps", 1.0)],
    )?;
    Ok((bps.round() as u32).to_be_bytes().to_vec())
}

/// Parses `"<number> <unit>"` or a bare number (implicitly the smallest unit) against a list of
/// `(unit_suffix, multiplier)` pairs, case-insensitively, tried longest-suffix-first.
fn scaled_value_from_human(human: &Human, units: &[(&str, f64)]) -> Result<f64> {
    if let Some(n) = human.as_f64() {
        return Ok(n);
    }
    let s = as_str(human)?;
    let trimmed = s.trim();
    let lower = trimmed.to_ascii_lowercase();
    for (suffix, mult) in units {
        if let Some(prefix) = lower.strip_suffix(suffix) {
            let num_part = prefix.trim();
            if let Ok(n) = num_part.parse::<f64>() {
                return Ok(n * mult);
            }
        }
    }
    trimmed.parse::<f64>().map_err(|_| parse_err(s))
}

// --- Duration -------------------------------------------------------------------------------------

fn duration_to_human(bytes: &[u8]) -> Option<Human> {
    let secs = match bytes.len() {
        1 => bytes[0] as u64,
        2 => u16::from_be_bytes(bytes.try_into().unwrap()) as u64,
        4 => u32::from_be_bytes(bytes.try_into().unwrap()) as u64,
        _ => return None,
    };
    Some(Json::from(format_duration(secs)))
}

fn format_duration(secs: u64) -> String {
    if secs != 0 && secs % 86400 == 0 {
        format!("{} days", secs / 86400)
    } else if secs != 0 && secs % 3600 == 0 {
        format!("{} hours", secs / 3600)
    } else if secs != 0 && secs % 60 == 0 {
        format!("{} minutes", secs / 60)
    } else {
        format!("{} seconds", secs)
    }
}

fn duration_from_human(human: &Human) -> Result<Vec<u8>> {
    let secs = if let Some(n) = human.as_u64() {
        n
    } else {
        let s = as_str(human)?;
        let lower = s.trim().to_ascii_lowercase();
        let (num_part, mult) = if let Some(p) = lower.strip_suffix("days") {
            (p, 86400)
        } else if let Some(p) = lower.strip_suffix("day") {
            (p, 86400)
        } else if let Some(p) = lower.strip_suffix("hours") {
            (p, 3600)
        } else if let Some(p) = lower.strip_suffix("hour") {
            (p, 3600)
        } else if let Some(p) = lower.strip_suffix("minutes") {
            (p, 60)
        } else if let Some(p) = lower.strip_suffix("minute") {
            (p, 60)
        } else if let Some(p) = lower.strip_suffix("seconds") {
            (p, 1)
        } else if let Some(p) = lower.strip_suffix("second") {
            (p, 1)
        } else {
            (lower.as_str(), 1)
        };
        let n: u64 = num_part.trim().parse().map_err(|_| parse_err(s))?;
        n * mult
    };
    // Mirrors duration_to_human's accepted widths so a value formatted from a 1-byte TLV
    // re-encodes back to 1 byte rather than silently widening it.
    if secs <= u8::MAX as u64 {
        Ok(vec![secs as u8])
    } else if secs <= u16::MAX as u64 {
        Ok((secs as u16).to_be_bytes().to_vec())
    } else {
        Ok((secs as u32).to_be_bytes().to_vec())
    }
}

fn percentage_from_human(human: &Human) -> Result<Vec<u8>> {
    let s = if let Some(n) = human.as_u64() {
        return u8::try_from(n).map(|v| vec![v]).map_err(|_| parse_err(human.to_string()));
    } else {
        as_str(human)?
    };
    let trimmed = s.trim().trim_end_matches('%');
    trimmed.parse::<u8>().map(|v| vec![v]).map_err(|_| parse_err(s))
}

fn power_quarter_db_from_human(human: &Human) -> Result<Vec<u8>> {
    let s = as_str(human)?;
    let trimmed = s.trim().trim_end_matches("dBmV").trim();
    let db: f64 = trimmed.parse().map_err(|_| parse_err(s))?;
    Ok(vec![(db * 4.0).round() as i8 as u8])
}

// --- OID (ASN.1 BER) ------------------------------------------------------------------------------

fn oid_to_human(bytes: &[u8]) -> Option<Human> {
    if bytes.is_empty() {
        return None;
    }
    let mut parts = Vec::new();
    let first = bytes[0];
    parts.push((first / 40) as u64);
    parts.push((first % 40) as u64);

    let mut value: u64 = 0;
    for &b in &bytes[1..] {
        value = (value << 7) | (b & 0x7F) as u64;
        if b & 0x80 == 0 {
            parts.push(value);
            value = 0;
        }
    }
    let dotted = parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
    Some(Json::from(dotted))
}

fn oid_from_human(s: &str) -> Result<Vec<u8>> {
    let parts: Vec<u64> = s
        .trim()
        .split('.')
        .map(|p| p.parse::<u64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| parse_err(s))?;
    if parts.len() < 2 {
        return Err(parse_err(s));
    }
    let mut out = Vec::new();
    out.push((parts[0] * 40 + parts[1]) as u8);
    for &p in &parts[2..] {
        out.extend(encode_base128(p));
    }
    Ok(out)
}

fn encode_base128(mut value: u64) -> Vec<u8> {
    let mut groups = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        groups.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    groups.reverse();
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn boolean_round_trip() {
        let human = to_human(ValueKind::Boolean, &[0x01]).unwrap();
        assert_eq!(human, Json::from("enabled"));
        assert_eq!(from_human(ValueKind::Boolean, &human).unwrap(), vec![0x01]);
    }

    #[test]
    fn boolean_accepts_alternate_spellings() {
        assert_eq!(from_human(ValueKind::Boolean, &Json::from("on")).unwrap(), vec![1]);
        assert_eq!(from_human(ValueKind::Boolean, &Json::from("OFF")).unwrap(), vec![0]);
        assert_eq!(from_human(ValueKind::Boolean, &Json::from(true)).unwrap(), vec![1]);
    }

    #[test]
    fn frequency_round_trip_591_mhz() {
        let bytes = 591_000_000u32.to_be_bytes();
        let human = to_human(ValueKind::Frequency, &bytes).unwrap();
        assert_eq!(human, Json::from("591 MHz"));
        assert_eq!(from_human(ValueKind::Frequency, &human).unwrap(), bytes.to_vec());
    }

    #[test]
    fn frequency_round_trip_non_divisible_value() {
        // 1_234_567 Hz doesn't divide evenly into MHz; it must stay in the narrowest unit that
        // round-trips exactly rather than being rounded to a lossy "1.235 MHz".
        let bytes = 1_234_567u32.to_be_bytes();
        let human = to_human(ValueKind::Frequency, &bytes).unwrap();
        assert_eq!(from_human(ValueKind::Frequency, &human).unwrap(), bytes.to_vec());
    }

    #[test]
    fn frequency_accepts_bare_number_as_hz() {
        assert_eq!(
            from_human(ValueKind::Frequency, &Json::from("591000000")).unwrap(),
            591_000_000u32.to_be_bytes().to_vec()
        );
    }

    #[test]
    fn bandwidth_round_trip_100_mbps() {
        let bytes = 100_000_000u32.to_be_bytes();
        let human = to_human(ValueKind::Bandwidth, &bytes).unwrap();
        assert_eq!(human, Json::from("100 Mbps"));
        assert_eq!(from_human(ValueKind::Bandwidth, &human).unwrap(), bytes.to_vec());
    }

    #[test]
    fn mac_address_round_trip_and_alt_inputs() {
        let bytes = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
        let human = to_human(ValueKind::MacAddress, &bytes).unwrap();
        assert_eq!(human, Json::from("aa:bb:cc:dd:ee:ff"));
        assert_eq!(from_human(ValueKind::MacAddress, &human).unwrap(), bytes.to_vec());
        assert_eq!(
            from_human(ValueKind::MacAddress, &Json::from("aa-bb-cc-dd-ee-ff")).unwrap(),
            bytes.to_vec()
        );
        assert_eq!(
            from_human(ValueKind::MacAddress, &Json::from("aabbccddeeff")).unwrap(),
            bytes.to_vec()
        );
    }

    #[test]
    fn ipv4_rejects_wrong_length() {
        assert!(to_human(ValueKind::Ipv4, &[1, 2, 3]).is_none());
    }

    #[test]
    fn oid_round_trip() {
        // 1.3.6.1.4.1 -> 2B 06 01 04 01
        let bytes = [0x2B, 0x06, 0x01, 0x04, 0x01];
        let human = to_human(ValueKind::Oid, &bytes).unwrap();
        assert_eq!(human, Json::from("1.3.6.1.4.1"));
        assert_eq!(from_human(ValueKind::Oid, &human).unwrap(), bytes.to_vec());
    }

    #[test]
    fn hex_string_round_trip() {
        let bytes = [0xDE, 0xAD, 0xBE, 0xEF];
        let human = to_human(ValueKind::HexString, &bytes).unwrap();
        assert_eq!(human, Json::from("DE AD BE EF"));
        assert_eq!(from_human(ValueKind::HexString, &human).unwrap(), bytes.to_vec());
    }

    #[test]
    fn marker_round_trip() {
        let human = to_human(ValueKind::Marker, &[]).unwrap();
        assert_eq!(human, Json::from("present"));
        assert_eq!(from_human(ValueKind::Marker, &human).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn duration_round_trip_one_byte_width() {
        let bytes = [200u8];
        let human = to_human(ValueKind::Duration, &bytes).unwrap();
        assert_eq!(from_human(ValueKind::Duration, &human).unwrap(), bytes.to_vec());
    }

    #[test]
    fn uint32_round_trip_boundary_values() {
        for v in [0u32, 1, 255, 65536, u32::MAX] {
            let bytes = v.to_be_bytes();
            let human = to_human(ValueKind::Uint32, &bytes).unwrap();
            assert_eq!(from_human(ValueKind::Uint32, &human).unwrap(), bytes.to_vec());
        }
    }
}
