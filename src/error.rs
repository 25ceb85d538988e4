//! The public, contextualized error type returned by this crate's parse/emit/convert operations.
//!
//! Mirrors the split in the low-level [crate::types] module: [types::Error] knows only about
//! byte framing failures, while [Error] here wraps those (and every other failure kind this
//! crate can produce) together with [ErrorLocation] — where in the TLV tree the problem was
//! found.

use std::fmt::Display;

use crate::types::{self, ByteOffset};

pub type Result<T> = std::result::Result<T, Error>;

// --- Error --------------------------------------------------------------------------------------

/// Details of a parse/emit/convert failure and the location in the TLV tree where it occurred.
#[derive(Debug)]
#[non_exhaustive]
pub struct Error {
    kind: ErrorKind,
    location: ErrorLocation,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, location: ErrorLocation) -> Self {
        Self { kind, location }
    }

    pub(crate) fn at(kind: impl Into<ErrorKind>, location: impl Into<ErrorLocation>) -> Self {
        Self { kind: kind.into(), location: location.into() }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> &ErrorLocation {
        &self.location
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (at {})", self.kind, self.location)
    }
}

// --- ErrorKind ------------------------------------------------------------------------------------

/// The closed set of ways a parse/emit/convert operation can fail.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The decoder ran out of bytes mid-field.
    TruncatedInput,
    /// An extended-length prefix was followed by an unrecognized number of follow bytes.
    InvalidLengthEncoding,
    /// A declared length exceeds the bytes actually remaining in the buffer.
    OverlongValue { declared: usize, available: usize },
    /// A converter could not represent a value at its declared kind. The Enricher handles this
    /// itself by downgrading the node to `hex_string`; this variant exists for callers of the
    /// Value Converter directly.
    ValueKindMismatch { r#type: u8, expected_width: usize, actual_width: usize },
    /// `from_human` could not recognize a human-form input for the given kind.
    HumanFormParseError { kind: crate::registry::ValueKind, input: String },
    /// A stored MIC did not match the freshly computed one.
    MicInvalid { which: MicWhich, stored_hex: String, computed_hex: String },
    /// The relevant MIC TLV was absent from the stream.
    MicMissing { which: MicWhich },
    /// The stored MIC value was not exactly 16 bytes.
    MicWrongLength { which: MicWhich, actual: usize },
    /// The Format Bridge encountered a `value_type` string outside the closed kind set.
    UnknownValueKind { name: String },
}

/// Which of the two DOCSIS MICs an error or validation result concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicWhich {
    Cm,
    Cmts,
}

impl Display for MicWhich {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MicWhich::Cm => f.write_str("CM MIC (TLV 6)"),
            MicWhich::Cmts => f.write_str("CMTS MIC (TLV 7)"),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TruncatedInput => write!(f, "truncated input"),
            ErrorKind::InvalidLengthEncoding => write!(f, "invalid extended-length encoding"),
            ErrorKind::OverlongValue { declared, available } => write!(
                f,
                "declared length {} exceeds {} available bytes",
                declared, available
            ),
            ErrorKind::ValueKindMismatch { r#type, expected_width, actual_width } => write!(
                f,
                "TLV {} has width {} but kind expects {}",
                r#type, actual_width, expected_width
            ),
            ErrorKind::HumanFormParseError { kind, input } => {
                write!(f, "could not parse {:?} as a {} value", input, kind)
            }
            ErrorKind::MicInvalid { which, stored_hex, computed_hex } => write!(
                f,
                "{} is invalid: stored {} but computed {}",
                which, stored_hex, computed_hex
            ),
            ErrorKind::MicMissing { which } => write!(f, "{} is missing", which),
            ErrorKind::MicWrongLength { which, actual } => {
                write!(f, "{} has length {} but expected 16", which, actual)
            }
            ErrorKind::UnknownValueKind { name } => {
                write!(f, "unknown value_type {:?}", name)
            }
        }
    }
}

impl From<types::Error> for ErrorKind {
    fn from(err: types::Error) -> Self {
        match err {
            types::Error::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            types::Error::InvalidLengthEncoding { .. } => ErrorKind::InvalidLengthEncoding,
            types::Error::OverlongValue { declared, available } => {
                ErrorKind::OverlongValue { declared, available }
            }
        }
    }
}

// --- ErrorLocation --------------------------------------------------------------------------------

/// Where in the TLV tree a failure occurred: a byte offset and/or a chain of parent TLV types.
#[derive(Clone, Debug, Default)]
pub struct ErrorLocation {
    offset: Option<ByteOffset>,
    parent_types: Vec<u8>,
    r#type: Option<u8>,
}

impl ErrorLocation {
    pub(crate) fn unknown() -> Self {
        Self::default()
    }

    pub(crate) fn with_offset(mut self, offset: impl Into<ByteOffset>) -> Self {
        self.offset.get_or_insert(offset.into());
        self
    }

    pub(crate) fn with_parent_types(mut self, parent_types: &[u8]) -> Self {
        if self.parent_types.is_empty() {
            self.parent_types.extend_from_slice(parent_types);
        }
        self
    }

    pub(crate) fn with_type(mut self, r#type: u8) -> Self {
        self.r#type.get_or_insert(r#type);
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.offset.is_none() && self.parent_types.is_empty() && self.r#type.is_none()
    }

    pub fn offset(&self) -> Option<ByteOffset> {
        self.offset
    }

    pub fn parent_types(&self) -> &[u8] {
        &self.parent_types
    }

    pub fn r#type(&self) -> Option<u8> {
        self.r#type
    }
}

impl From<usize> for ErrorLocation {
    fn from(offset: usize) -> Self {
        ErrorLocation::default().with_offset(offset)
    }
}

impl From<ByteOffset> for ErrorLocation {
    fn from(offset: ByteOffset) -> Self {
        ErrorLocation::default().with_offset(offset)
    }
}

impl From<u8> for ErrorLocation {
    fn from(r#type: u8) -> Self {
        ErrorLocation::default().with_type(r#type)
    }
}

impl Display for ErrorLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            return f.write_str("unknown");
        }

        let mut sep_str = "";
        let mut sep = || {
            let s = sep_str;
            sep_str = ", ";
            s
        };

        if let Some(offset) = self.offset {
            write!(f, "{}offset {}", sep(), offset)?;
        }
        if !self.parent_types.is_empty() {
            write!(f, "{}parents", sep())?;
            for t in &self.parent_types {
                write!(f, " {}", t)?;
            }
        }
        if let Some(r#type) = self.r#type {
            write!(f, "{}type {}", sep(), r#type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_location_displays_as_unknown() {
        assert_eq!(ErrorLocation::unknown().to_string(), "unknown");
    }

    #[test]
    fn location_with_offset_and_type_displays_both() {
        let loc = ErrorLocation::from(42usize).with_type(24);
        assert_eq!(loc.to_string(), "offset 42, type 24");
    }

    #[test]
    fn mic_missing_error_displays_which_mic() {
        let err = Error::at(ErrorKind::MicMissing { which: MicWhich::Cm }, ErrorLocation::unknown());
        assert!(err.to_string().contains("CM MIC"));
    }
}
