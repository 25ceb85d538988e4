//! Lossless conversion between an [EnrichedTlv] tree and JSON/YAML documents.
//!
//! The wire format and the document format are kept in sync through one shared DTO
//! ([TlvRecord]) that both `serde_json` and `serde_yaml` serialize identically — the Format
//! Bridge has no format-specific logic beyond choosing which serde backend to call. On ingest,
//! the DTO's `value_type` field is authoritative: it is resolved against the Spec Registry kind
//! table by name, not against the `(type, parent)` pair the registry would otherwise infer, so a
//! caller can deliberately reinterpret a field's kind.

use serde::{Deserialize, Serialize};

use crate::enrich::{Content, EnrichedTlv};
use crate::error::{Error, ErrorKind, ErrorLocation, Result};
use crate::registry::ValueKind;
use crate::types::{Codec, Config, PlainTlv};

/// The document-level wrapper: an ordered list of top-level TLV records, plus an optional
/// informational DOCSIS version tag. `docsis_version` is never consulted on ingest — it exists
/// purely as a human-facing label a caller may set when emitting a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TlvDocument {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub docsis_version: Option<String>,
    pub tlvs: Vec<TlvRecord>,
}

/// One TLV's JSON/YAML representation. `length` and `raw_value_hex` are diagnostic-only: they are
/// always emitted on the way out, but ignored on the way in (bytes are derived fresh from
/// `value`/`sub_tlvs` per `value_type`, never read back from `raw_value_hex`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TlvRecord {
    pub r#type: u8,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub value_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub raw_value_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sub_tlvs: Option<Vec<TlvRecord>>,
}

/// Serializes an enriched tree to a [TlvDocument] DTO.
pub fn to_document(tree: &[EnrichedTlv]) -> TlvDocument {
    to_document_with_version(tree, None)
}

/// As [to_document], additionally stamping the document with an informational DOCSIS version
/// label (e.g. `"3.1"`). Purely cosmetic: ingest never reads this field back.
pub fn to_document_with_version(tree: &[EnrichedTlv], docsis_version: Option<String>) -> TlvDocument {
    TlvDocument { docsis_version, tlvs: tree.iter().map(record_from_enriched).collect() }
}

fn record_from_enriched(node: &EnrichedTlv) -> TlvRecord {
    let (value, sub_tlvs) = match &node.content {
        Content::Leaf(human) => (Some(human.clone()), None),
        Content::Compound(children) => (None, Some(children.iter().map(record_from_enriched).collect())),
    };

    TlvRecord {
        r#type: node.r#type,
        name: node.name.clone(),
        description: if node.description.is_empty() { None } else { Some(node.description.clone()) },
        value_type: node.value_kind.as_str().to_string(),
        length: Some(node.value.len()),
        raw_value_hex: Some(hex::encode_upper(&node.value)),
        value,
        sub_tlvs,
    }
}

/// Serializes an enriched tree to pretty-printed JSON.
pub fn to_json(tree: &[EnrichedTlv]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&to_document(tree))
}

/// Serializes an enriched tree to YAML.
pub fn to_yaml(tree: &[EnrichedTlv]) -> Result<String> {
    serde_yaml::to_string(&to_document(tree))
        .map_err(|e| Error::at(ErrorKind::UnknownValueKind { name: e.to_string() }, ErrorLocation::unknown()))
}

/// Parses a JSON document back to a plain TLV tree, ready for [Codec::encode].
pub fn from_json(input: &str) -> Result<Vec<PlainTlv>> {
    let doc: TlvDocument = serde_json::from_str(input)
        .map_err(|e| Error::at(ErrorKind::UnknownValueKind { name: e.to_string() }, ErrorLocation::unknown()))?;
    document_to_plain(&doc)
}

/// Parses a YAML document back to a plain TLV tree, ready for [Codec::encode].
pub fn from_yaml(input: &str) -> Result<Vec<PlainTlv>> {
    let doc: TlvDocument = serde_yaml::from_str(input)
        .map_err(|e| Error::at(ErrorKind::UnknownValueKind { name: e.to_string() }, ErrorLocation::unknown()))?;
    document_to_plain(&doc)
}

fn document_to_plain(doc: &TlvDocument) -> Result<Vec<PlainTlv>> {
    doc.tlvs.iter().map(record_to_plain).collect()
}

fn record_to_plain(record: &TlvRecord) -> Result<PlainTlv> {
    let kind = ValueKind::from_str(&record.value_type).ok_or_else(|| {
        Error::at(
            ErrorKind::UnknownValueKind { name: record.value_type.clone() },
            ErrorLocation::unknown().with_type(record.r#type),
        )
    })?;

    if let Some(children) = &record.sub_tlvs {
        let child_nodes: Vec<PlainTlv> = children.iter().map(record_to_plain).collect::<Result<_>>()?;
        let value = Codec::encode(&child_nodes, false);
        return Ok(PlainTlv::new(record.r#type, value));
    }

    let human = record.value.clone().unwrap_or(serde_json::Value::Null);
    let bytes = crate::convert::from_human(kind, &human).map_err(|e| {
        Error::at(
            ErrorKind::HumanFormParseError { kind, input: e.input },
            ErrorLocation::unknown().with_type(record.r#type),
        )
    })?;
    Ok(PlainTlv::new(record.r#type, bytes))
}

/// Round-trips raw wire bytes through enrichment and the Format Bridge in one call, for callers
/// who only care about the JSON form and never touch [EnrichedTlv] directly.
pub fn bytes_to_json(buf: &[u8], config: &Config) -> serde_json::Result<String> {
    let (nodes, _) = Codec::decode_bounded(buf, 0, config).unwrap_or_default();
    let tree = crate::enrich::enrich(&nodes, None, config);
    to_json(&tree)
}
