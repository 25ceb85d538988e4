//! Walks a plain TLV tree and produces an [EnrichedTlv] tree annotated with Spec Registry
//! metadata and human-readable forms, plus the inverse `unenrich` operation.

use tracing::{debug, warn};

use crate::convert::{self, Human};
use crate::registry::{self, SpecEntry, ValueKind};
use crate::types::{Codec, Config, PlainTlv};

/// Which table in the Spec Registry produced an [EnrichedTlv]'s metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    TopLevel,
    SubTlv,
    /// No registry entry existed for this `(parent, type)` pair; metadata was synthesized.
    Synthesized,
}

/// The leaf-vs-compound payload of an [EnrichedTlv]; exactly one variant applies to a given node.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Leaf(Human),
    Compound(Vec<EnrichedTlv>),
}

/// A [PlainTlv] augmented with the metadata and human form the Spec Registry and Value
/// Converter attach to it. The raw `value` bytes are always retained so the tree can always be
/// restored to its exact original wire bytes via [unenrich].
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTlv {
    pub r#type: u8,
    pub name: String,
    pub description: String,
    pub introduced_version: String,
    pub value_kind: ValueKind,
    pub metadata_source: MetadataSource,
    pub value: Vec<u8>,
    pub content: Content,
}

impl EnrichedTlv {
    pub fn formatted_value(&self) -> Option<&Human> {
        match &self.content {
            Content::Leaf(h) => Some(h),
            Content::Compound(_) => None,
        }
    }

    pub fn sub_tlvs(&self) -> Option<&[EnrichedTlv]> {
        match &self.content {
            Content::Leaf(_) => None,
            Content::Compound(children) => Some(children),
        }
    }
}

/// Enriches a freshly decoded plain TLV tree. `parent` is `None` at the top level.
pub fn enrich(nodes: &[PlainTlv], parent: Option<u8>, config: &Config) -> Vec<EnrichedTlv> {
    enrich_at_depth(nodes, parent, config, 0)
}

fn enrich_at_depth(nodes: &[PlainTlv], parent: Option<u8>, config: &Config, depth: usize) -> Vec<EnrichedTlv> {
    nodes.iter().map(|node| enrich_node(node, parent, config, depth)).collect()
}

fn enrich_node(node: &PlainTlv, parent: Option<u8>, config: &Config, depth: usize) -> EnrichedTlv {
    let r#type = node.r#type();
    let value = node.value();

    let (spec, source): (SpecEntry, MetadataSource) = match parent {
        None => match registry::lookup_top_level(r#type) {
            Some(e) => (*e, MetadataSource::TopLevel),
            None => (synthesized_entry(), MetadataSource::Synthesized),
        },
        Some(p) => match registry::lookup_sub(p, r#type) {
            Some(e) => (*e, MetadataSource::SubTlv),
            None => (synthesized_entry(), MetadataSource::Synthesized),
        },
    };

    let name = if matches!(source, MetadataSource::Synthesized) {
        registry::unknown_sub_name(r#type)
    } else {
        spec.name.to_string()
    };

    debug!(tlv_type = r#type, parent = ?parent, kind = %spec.value_kind, "enriching TLV");

    let to_hex_leaf = |value: &[u8]| {
        Content::Leaf(convert::to_human(ValueKind::HexString, value).expect("hex_string always converts"))
    };

    let (content, value_kind) = if spec.value_kind.is_atomic() {
        match convert::to_human(spec.value_kind, value) {
            Some(human) => (Content::Leaf(human), spec.value_kind),
            None => {
                warn!(tlv_type = r#type, kind = %spec.value_kind, len = value.len(), "value width mismatch, downgrading to hex_string");
                (to_hex_leaf(value), ValueKind::HexString)
            }
        }
    } else if spec.supports_sub_tlvs && value.len() >= 2 && depth < config.max_depth {
        match try_parse_compound(value, r#type, config, depth) {
            Some(children) => (Content::Compound(children), ValueKind::Compound),
            None => {
                warn!(tlv_type = r#type, "sub-TLV decode or re-encode mismatch, downgrading to hex_string");
                (to_hex_leaf(value), ValueKind::HexString)
            }
        }
    } else {
        (to_hex_leaf(value), ValueKind::HexString)
    };

    EnrichedTlv {
        r#type,
        name,
        description: spec.description.to_string(),
        introduced_version: spec.introduced_version.to_string(),
        value_kind,
        metadata_source: source,
        value: value.to_vec(),
        content,
    }
}

fn synthesized_entry() -> SpecEntry {
    SpecEntry {
        name: "",
        description: "No registry entry for this TLV in this context",
        value_kind: ValueKind::HexString,
        max_length: crate::registry::MaxLength::Unlimited,
        fixed_length: None,
        introduced_version: "unknown",
        supports_sub_tlvs: false,
    }
}

/// The compound branch's hard precondition: decode `value` as a non-terminated TLV stream, and
/// only recurse if every child re-encodes to the exact same bytes as the corresponding slice of
/// `value`. This is what keeps malformed vendor fields round-trip-safe.
fn try_parse_compound(value: &[u8], parent_type: u8, config: &Config, depth: usize) -> Option<Vec<EnrichedTlv>> {
    let (children, end) = Codec::decode(value, 0).ok()?;
    if end != value.len() {
        return None;
    }
    let reencoded = Codec::encode(&children, false);
    if reencoded != value {
        return None;
    }
    Some(enrich_at_depth(&children, Some(parent_type), config, depth + 1))
}

/// Reduces an enriched tree back to plain nodes that re-encode to the exact original bytes.
pub fn unenrich(tree: &[EnrichedTlv]) -> Vec<PlainTlv> {
    tree.iter().map(unenrich_node).collect()
}

fn unenrich_node(node: &EnrichedTlv) -> PlainTlv {
    match &node.content {
        Content::Leaf(_) => PlainTlv::new(node.r#type, node.value.clone()),
        Content::Compound(children) => {
            let child_nodes = unenrich(children);
            let value = Codec::encode(&child_nodes, false);
            PlainTlv::new(node.r#type, value)
        }
    }
}

/// Reduces an enriched tree back to plain nodes using each node's *current* `formatted_value`
/// rather than its cached raw bytes — the path used when a caller has edited `formatted_value`
/// in place and wants the edit reflected in the re-encoded bytes. Falls back to the cached raw
/// bytes if conversion fails (e.g. the node was downgraded to `hex_string` and the human form is
/// already the hex rendering of those exact bytes).
pub fn unenrich_from_formatted(tree: &[EnrichedTlv]) -> Vec<PlainTlv> {
    tree.iter().map(unenrich_node_from_formatted).collect()
}

fn unenrich_node_from_formatted(node: &EnrichedTlv) -> PlainTlv {
    match &node.content {
        Content::Leaf(human) => {
            let bytes = convert::from_human(node.value_kind, human).unwrap_or_else(|_| node.value.clone());
            PlainTlv::new(node.r#type, bytes)
        }
        Content::Compound(children) => {
            let child_nodes = unenrich_from_formatted(children);
            let value = Codec::encode(&child_nodes, false);
            PlainTlv::new(node.r#type, value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Codec as TypesCodec;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cfg() -> Config {
        Config::default()
    }

    #[test]
    fn simple_boolean_tlv_enriches_correctly() {
        let buf = [3u8, 1, 0x01];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        assert_eq!(tree[0].name, "Network Access Control");
        assert_eq!(tree[0].value_kind, ValueKind::Boolean);
        assert_eq!(tree[0].formatted_value().unwrap(), &json!("enabled"));
    }

    #[test]
    fn frequency_tlv_round_trips() {
        let buf = [1u8, 4, 0x23, 0x39, 0xF1, 0xC0];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        assert_eq!(tree[0].formatted_value().unwrap(), &json!("591 MHz"));
        let plain = unenrich(&tree);
        let reencoded = TypesCodec::encode(&plain, false);
        assert_eq!(reencoded, buf);
    }

    #[test]
    fn class_of_service_compound_enriches_sub_tlvs() {
        let buf = [
            4u8, 0x0F, 1, 1, 1, 2, 4, 0x00, 0x0F, 0x42, 0x40, 3, 4, 0x00, 0x03, 0x0D, 0x40,
        ];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        let subs = tree[0].sub_tlvs().unwrap();
        assert_eq!(subs.len(), 3);
        assert_eq!(subs[0].formatted_value().unwrap(), &json!(1));
        assert_eq!(subs[1].formatted_value().unwrap(), &json!(1_000_000));
        assert_eq!(subs[2].formatted_value().unwrap(), &json!(200_000));

        let plain = unenrich(&tree);
        let reencoded = TypesCodec::encode(&plain, false);
        assert_eq!(reencoded, buf);
    }

    #[test]
    fn service_flow_sub_tlv_1_is_reference_not_mic() {
        // Service flow TLV 24 whose value begins 01 02 00 01 06 01 07: sub-TLV 1 is Service Flow
        // Reference = 1, sub-TLV 6 is QoS Parameter Set containing Traffic Priority = 7.
        let buf = [24u8, 7, 1, 2, 0x00, 0x01, 6, 1, 7];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        let subs = tree[0].sub_tlvs().unwrap();
        assert_eq!(subs[0].name, "Service Flow Reference");
        assert_eq!(subs[0].formatted_value().unwrap(), &json!(1));
        assert_eq!(subs[1].name, "QoS Parameter Set");
        assert_ne!(subs[1].name, "CM Message Integrity Check");
    }

    #[test]
    fn length_mismatch_downgrades_to_hex_string() {
        // TLV 2 (Upstream Channel ID) declares uint8 (1 byte) but carries 2 bytes.
        let buf = [2u8, 2, 0xAB, 0xCD];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        assert_eq!(tree[0].value_kind, ValueKind::HexString);
        let plain = unenrich(&tree);
        assert_eq!(plain[0].value(), &[0xAB, 0xCD]);
    }

    #[test]
    fn asn1_der_is_never_parsed_as_sub_tlvs() {
        // Bytes that look like valid sub-TLV framing (type 1, len 1, value 0x01) but are
        // declared asn1_der under SNMP object value (sub-TLV 2 under parent 11) must stay atomic.
        let buf = [11u8, 5, 2, 3, 1, 1, 0x01];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        let subs = tree[0].sub_tlvs().unwrap();
        assert_eq!(subs[0].value_kind, ValueKind::Asn1Der);
        assert!(subs[0].sub_tlvs().is_none());
    }

    #[test]
    fn unknown_sub_tlv_synthesizes_default_entry() {
        let buf = [24u8, 2, 250, 0];
        let (nodes, _) = TypesCodec::decode(&buf, 0).unwrap();
        let tree = enrich(&nodes, None, &cfg());
        let subs = tree[0].sub_tlvs().unwrap();
        assert_eq!(subs[0].name, "Unknown Sub-TLV 250");
        assert_eq!(subs[0].value_kind, ValueKind::HexString);
    }
}
