//! A crate to decode, enrich, and re-encode DOCSIS and PacketCable cable modem configuration
//! files in the binary Type-Length-Value (TLV) format.
//!
//! This is the detailed API documentation. For a higher level introduction see the [README].
//!
//! [README]: https://crates.io/crates/docsis-tlv/
//!
//! Note that this crate only (de)serializes the TLV binary format and its JSON/YAML sibling; it
//! does not speak TFTP, does not generate PacketCable MTA provisioning files, and does not
//! implement SNMPv3 kickstart key derivation. See the [GLOSSARY](https://www.cablelabs.com/)
//! specifications for the full DOCSIS provisioning model this crate's TLV layer sits inside.
//!
//! # Usage
//!
//! Add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! docsis-tlv = "0.1.0"
//! ```
//!
//! ## Decoding and enriching a configuration file
//!
//! ```
//! use docsis_tlv::{Codec, Config, enrich};
//!
//! let buf = [3u8, 1, 0x01, 0xFF]; // Network Access Control = enabled, then terminator
//! let (nodes, _) = Codec::decode(&buf, 0).unwrap();
//! let tree = enrich(&nodes, None, &Config::default());
//! assert_eq!(tree[0].name, "Network Access Control");
//! assert_eq!(tree[0].formatted_value().unwrap(), &serde_json::json!("enabled"));
//! ```
//!
//! ## Computing and validating the CM/CMTS Message Integrity Checks
//!
//! ```
//! use docsis_tlv::{Codec, PlainTlv, mic};
//!
//! let tlvs = vec![PlainTlv::new(3, vec![0x01])];
//! let secret_bytes = b"shared_secret".to_vec();
//! let secret = mic::Secret::new(&secret_bytes);
//! let tag = mic::compute_cm_mic(&tlvs, &secret);
//!
//! let mut with_mic = tlvs.clone();
//! with_mic.push(PlainTlv::new(6, tag.to_vec()));
//! assert_eq!(mic::validate_cm_mic(&with_mic, Some(&secret)), mic::MicValidation::Valid);
//! ```
//!
//! ## Converting to and from JSON
//!
//! ```
//! use docsis_tlv::{Codec, Config, bridge, enrich};
//!
//! let buf = [3u8, 1, 0x01];
//! let (nodes, _) = Codec::decode(&buf, 0).unwrap();
//! let tree = enrich(&nodes, None, &Config::default());
//! let json = bridge::to_json(&tree).unwrap();
//! let restored = bridge::from_json(&json).unwrap();
//! assert_eq!(Codec::encode(&restored, false), buf);
//! ```
//!
//! # Module layout
//!
//! - [types] — the wire-level [PlainTlv] node and the [Codec] that frames it to/from bytes. No
//!   DOCSIS semantics live here, only TLV byte framing.
//! - [registry] — static tables mapping `(TLV type, parent context)` pairs to their DOCSIS/
//!   PacketCable semantics: name, description, value kind, and whether they carry sub-TLVs.
//! - [convert] — bidirectional `wire bytes <-> human-readable form` conversion per value kind.
//! - [enrich] — walks a plain TLV tree into an [enrich::EnrichedTlv] tree using the registry and
//!   converter, and back (`unenrich`).
//! - [mic] — HMAC-MD5 computation and validation for the CM (TLV 6) and CMTS (TLV 7) Message
//!   Integrity Checks.
//! - [bridge] — lossless JSON/YAML serialization of an enriched tree.
//! - [error] — the public, location-annotated [error::Error] returned by this crate's fallible
//!   operations.

pub mod bridge;
pub mod convert;
pub mod enrich;
pub mod error;
pub mod mic;
pub mod registry;
pub mod types;

pub use convert::{from_human, to_human, Human};
pub use enrich::{enrich, unenrich, unenrich_from_formatted, Content, EnrichedTlv, MetadataSource};
pub use error::{Error, ErrorKind, ErrorLocation, MicWhich, Result};
pub use registry::{lookup_sub, lookup_top_level, MaxLength, SpecEntry, ValueKind};
pub use types::{ByteOffset, Codec, Config, PlainTlv, TLV_CMTS_MIC, TLV_CM_MIC, TLV_TERMINATOR};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_pipeline_decode_enrich_mic_bridge_round_trip() {
        let secret_bytes = b"config_file_secret".to_vec();
        let secret = mic::Secret::new(&secret_bytes);

        let base = vec![PlainTlv::new(3, vec![0x01]), PlainTlv::new(2, vec![0x05])];
        let cm_tag = mic::compute_cm_mic(&base, &secret);

        let mut with_mic = base.clone();
        with_mic.push(PlainTlv::new(6, cm_tag.to_vec()));
        let wire = Codec::encode(&with_mic, true);

        let (decoded, _) = Codec::decode(&wire, 0).unwrap();
        assert_eq!(mic::validate_cm_mic(&decoded, Some(&secret)), mic::MicValidation::Valid);

        let tree = enrich(&decoded, None, &Config::default());
        let json = bridge::to_json(&tree).unwrap();
        let restored = bridge::from_json(&json).unwrap();
        assert_eq!(Codec::encode(&restored, true), wire);
    }
}
