//! Static tables mapping `(TLV type, parent context)` pairs to their semantic metadata.
//!
//! The registry is read-only and zero-cost to consult: a top-level lookup and a per-parent
//! sub-TLV lookup, both backed by `&'static` arrays searched linearly. There is no fallback from
//! sub-TLV lookup to top-level lookup — the same type number means different things under
//! different parents, and conflating them would, for instance, label a Service Flow's QoS
//! Parameter Set sub-TLV as the top-level CM Message Integrity Check.

use std::fmt::{self, Display};

/// The closed set of semantic value kinds a TLV's bytes can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Boolean,
    String,
    Ipv4,
    Ipv6,
    MacAddress,
    Frequency,
    Bandwidth,
    Duration,
    Percentage,
    PowerQuarterDb,
    Oid,
    Asn1Der,
    ServiceFlowRef,
    VendorOui,
    Marker,
    HexString,
    Compound,
    Binary,
}

impl ValueKind {
    /// All TLVs whose kind is not `Compound` are atomic leaves.
    pub fn is_atomic(self) -> bool {
        !matches!(self, ValueKind::Compound)
    }

    /// The lowercase snake_case name used by the Format Bridge's `value_type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Uint8 => "uint8",
            ValueKind::Uint16 => "uint16",
            ValueKind::Uint32 => "uint32",
            ValueKind::Uint64 => "uint64",
            ValueKind::Int8 => "int8",
            ValueKind::Int16 => "int16",
            ValueKind::Int32 => "int32",
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Ipv4 => "ipv4",
            ValueKind::Ipv6 => "ipv6",
            ValueKind::MacAddress => "mac_address",
            ValueKind::Frequency => "frequency",
            ValueKind::Bandwidth => "bandwidth",
            ValueKind::Duration => "duration",
            ValueKind::Percentage => "percentage",
            ValueKind::PowerQuarterDb => "power_quarter_db",
            ValueKind::Oid => "oid",
            ValueKind::Asn1Der => "asn1_der",
            ValueKind::ServiceFlowRef => "service_flow_ref",
            ValueKind::VendorOui => "vendor_oui",
            ValueKind::Marker => "marker",
            ValueKind::HexString => "hex_string",
            ValueKind::Compound => "compound",
            ValueKind::Binary => "binary",
        }
    }

    pub fn from_str(name: &str) -> Option<Self> {
        Some(match name {
            "uint8" => ValueKind::Uint8,
            "uint16" => ValueKind::Uint16,
            "uint32" => ValueKind::Uint32,
            "uint64" => ValueKind::Uint64,
            "int8" => ValueKind::Int8,
            "int16" => ValueKind::Int16,
            "int32" => ValueKind::Int32,
            "boolean" => ValueKind::Boolean,
            "string" => ValueKind::String,
            "ipv4" => ValueKind::Ipv4,
            "ipv6" => ValueKind::Ipv6,
            "mac_address" => ValueKind::MacAddress,
            "frequency" => ValueKind::Frequency,
            "bandwidth" => ValueKind::Bandwidth,
            "duration" => ValueKind::Duration,
            "percentage" => ValueKind::Percentage,
            "power_quarter_db" => ValueKind::PowerQuarterDb,
            "oid" => ValueKind::Oid,
            "asn1_der" => ValueKind::Asn1Der,
            "service_flow_ref" => ValueKind::ServiceFlowRef,
            "vendor_oui" => ValueKind::VendorOui,
            "marker" => ValueKind::Marker,
            "hex_string" => ValueKind::HexString,
            "compound" => ValueKind::Compound,
            "binary" => ValueKind::Binary,
            _ => return None,
        })
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A maximum length declared by a spec entry: either a concrete byte count or unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxLength {
    Bytes(usize),
    Unlimited,
}

/// A static record describing one `(type, parent context)` pair's semantics.
#[derive(Debug, Clone, Copy)]
pub struct SpecEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub value_kind: ValueKind,
    pub max_length: MaxLength,
    pub fixed_length: Option<usize>,
    pub introduced_version: &'static str,
    pub supports_sub_tlvs: bool,
}

macro_rules! entry {
    ($type:expr, $name:expr, $desc:expr, $kind:expr, $max:expr, $fixed:expr, $ver:expr, $sub:expr) => {
        (
            $type,
            SpecEntry {
                name: $name,
                description: $desc,
                value_kind: $kind,
                max_length: $max,
                fixed_length: $fixed,
                introduced_version: $ver,
                supports_sub_tlvs: $sub,
            },
        )
    };
}

use MaxLength::{Bytes, Unlimited};
use ValueKind::*;

/// Top-level TLV definitions, types 1..=255.
static TOP_LEVEL: &[(u8, SpecEntry)] = &[
    entry!(1, "Downstream Frequency", "Downstream modulation center frequency", Frequency, Bytes(4), Some(4), "1.0", false),
    entry!(2, "Upstream Channel ID", "Upstream channel identifier", Uint8, Bytes(1), Some(1), "1.0", false),
    entry!(3, "Network Access Control", "Enables/disables network access", Boolean, Bytes(1), Some(1), "1.0", false),
    entry!(4, "Class of Service", "Legacy DOCSIS 1.0 class-of-service parameters", Compound, Unlimited, None, "1.0", true),
    entry!(5, "Modem Capabilities", "Modem capabilities compound TLV", Compound, Unlimited, None, "1.0", true),
    entry!(6, "CM Message Integrity Check", "HMAC-MD5 tag covering the preceding TLVs, keyed by the CM shared secret", HexString, Bytes(16), Some(16), "1.0", false),
    entry!(7, "CMTS Message Integrity Check", "HMAC-MD5 tag covering the preceding TLVs including TLV 6, keyed by the CMTS shared secret", HexString, Bytes(16), Some(16), "1.0", false),
    entry!(8, "Vendor ID", "IEEE vendor organizationally unique identifier", VendorOui, Bytes(3), Some(3), "1.0", false),
    entry!(9, "Software Upgrade Filename", "Filename of a software image to download", String, Unlimited, None, "1.0", false),
    entry!(10, "SNMP Write-Access Control", "Community string write-access control entries", Compound, Unlimited, None, "1.0", true),
    entry!(11, "SNMP MIB Object", "An SNMP OID/value pair to set at provisioning time", Compound, Unlimited, None, "1.0", true),
    entry!(12, "Modem IP Address", "IP address to assign to the cable modem", Ipv4, Bytes(4), Some(4), "1.0", false),
    entry!(13, "Service(s) Not Available Response", "Action to take when a requested class of service is unavailable", Uint8, Bytes(1), Some(1), "1.0", false),
    entry!(14, "CPE Ethernet MAC Address", "MAC address of a permitted customer premises device", MacAddress, Bytes(6), Some(6), "1.0", false),
    entry!(17, "Upstream Service Flow", "Upstream service flow parameter compound", Compound, Unlimited, None, "1.1", true),
    entry!(18, "Maximum Number of CPEs", "Maximum number of customer premises devices", Uint8, Bytes(1), Some(1), "1.0", false),
    entry!(19, "TFTP Timestamp", "Time the configuration file was generated", Uint32, Bytes(4), Some(4), "1.0", false),
    entry!(20, "TFTP Modem IP Address", "IP address the modem used to request this file", Ipv4, Bytes(4), Some(4), "1.0", false),
    entry!(21, "Software Upgrade TFTP Server", "TFTP server for software upgrade downloads", Ipv4, Bytes(4), Some(4), "1.0", false),
    entry!(22, "Upstream Packet Classification", "Upstream packet classifier compound", Compound, Unlimited, None, "1.1", true),
    entry!(23, "Downstream Packet Classification", "Downstream packet classifier compound", Compound, Unlimited, None, "1.1", true),
    entry!(24, "Upstream Service Flow (Service Class)", "Service flow reference/class compound, also used for generic service flows", Compound, Unlimited, None, "1.1", true),
    entry!(25, "Downstream Service Flow", "Downstream service flow parameter compound", Compound, Unlimited, None, "1.1", true),
    entry!(28, "Payload Header Suppression", "Payload header suppression rule compound", Compound, Unlimited, None, "1.1", true),
    entry!(29, "Max Number of Classifiers", "Maximum number of active packet classifiers", Uint16, Bytes(2), Some(2), "1.1", false),
    entry!(30, "Privacy Enable", "Baseline Privacy Interface enable flag", Boolean, Bytes(1), Some(1), "1.1", false),
    entry!(31, "Payload Header Suppression Class", "PHS classifier compound", Compound, Unlimited, None, "1.1", true),
    entry!(32, "Authorization Block", "BPI+ authorization block", Binary, Unlimited, None, "1.1", false),
    entry!(33, "Subscriber Management Control", "Subscriber management CPE control compound", Compound, Unlimited, None, "2.0", true),
    entry!(34, "Subscriber Management CPE IP Table", "Permitted CPE IP address table compound", Compound, Unlimited, None, "2.0", true),
    entry!(35, "Subscriber Management Filter Groups", "Subscriber management filter group compound", Compound, Unlimited, None, "2.0", true),
    entry!(36, "SNMPv3 Kickstart Value", "SNMPv3 kickstart security name/value compound", Compound, Unlimited, None, "2.0", true),
    entry!(37, "Docsis 2.0 Enable", "DOCSIS 2.0 mode enable flag", Boolean, Bytes(1), Some(1), "2.0", false),
    entry!(38, "Upstream Drop Packet Classification", "Upstream drop classifier compound", Compound, Unlimited, None, "2.0", true),
    entry!(39, "Subscriber Management Control (MAC)", "Subscriber management MAC address control compound", Compound, Unlimited, None, "2.0", true),
    entry!(40, "MTA", "PacketCable MTA configuration compound", Compound, Unlimited, None, "2.0", true),
    entry!(41, "Aggregate Service Flow", "Aggregate service flow compound", Compound, Unlimited, None, "3.0", true),
    entry!(42, "Metro Ethernet Service Profile", "Metro Ethernet service profile compound", Compound, Unlimited, None, "3.0", true),
    entry!(43, "Vendor Specific", "Vendor-specific sub-TLVs, first three bytes are the vendor OUI", Compound, Unlimited, None, "1.0", true),
    entry!(44, "Downstream Channel List", "Downstream channel list compound", Compound, Unlimited, None, "3.0", true),
    entry!(45, "Vendor Identifier", "Vendor identification compound", Compound, Unlimited, None, "3.0", true),
    entry!(60, "DOCSIS Version", "DOCSIS version the config targets", Uint8, Bytes(1), Some(1), "3.0", false),
    entry!(61, "CM Upstream Management Service Flow", "Management service flow compound", Compound, Unlimited, None, "3.0", true),
    entry!(62, "Upstream OFDMA Profile", "DOCSIS 3.1 OFDMA profile compound; per-sub-type layout not enumerated, round-trips via hex_string fallback", Compound, Unlimited, None, "3.1", true),
    entry!(63, "Downstream OFDM Profile", "DOCSIS 3.1 OFDM profile compound; per-sub-type layout not enumerated, round-trips via hex_string fallback", Compound, Unlimited, None, "3.1", true),
    entry!(64, "PacketCable Configuration", "PacketCable MTA provisioning compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(65, "PacketCable Flow Identifier", "Gate/flow identifier for a PacketCable media stream", Uint32, Bytes(4), Some(4), "PacketCable 1.0", false),
    entry!(66, "PacketCable Service Class Name", "Service class name used by PacketCable flows", String, Unlimited, None, "PacketCable 1.0", false),
    entry!(67, "PacketCable Media Stream", "PacketCable media stream descriptor compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(68, "PacketCable NCS Options", "Network-based Call Signaling configuration compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(69, "PacketCable Gate Usage", "PacketCable gate usage parameters compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(70, "PacketCable MTA DNS Server", "DNS server address used by the MTA", Ipv4, Bytes(4), Some(4), "PacketCable 1.0", false),
    entry!(71, "PacketCable MTA SYSLOG Server", "Syslog server address used by the MTA", Ipv4, Bytes(4), Some(4), "PacketCable 1.0", false),
    entry!(72, "PacketCable Provisioning Flow Log", "Provisioning event log compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(73, "PacketCable Kerberos Realm", "Kerberos realm name for MTA authentication", String, Unlimited, None, "PacketCable 1.0", false),
    entry!(74, "PacketCable Provisioning Timer", "Provisioning timeout in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(75, "PacketCable Call Management Servers", "Call management server list compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(76, "PacketCable MTA T1 Timer", "MTA T1 retry timer in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(77, "PacketCable MTA T2 Timer", "MTA T2 retry timer in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(78, "PacketCable MIB Object", "PacketCable SNMP OID/value pair compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(79, "PacketCable MTA T1p Timer", "MTA T1p retry timer in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(80, "PacketCable Service Provider Name", "Service provider name string", String, Unlimited, None, "PacketCable 1.0", false),
    entry!(81, "PacketCable MTA T2p Timer", "MTA T2p retry timer in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(82, "PacketCable MTA Event Log", "MTA event log compound", Compound, Unlimited, None, "PacketCable 1.0", true),
    entry!(83, "PacketCable T3 Timer", "T3 retry timer in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(84, "PacketCable T4 Timer", "T4 retry timer in seconds", Duration, Bytes(2), Some(2), "PacketCable 1.0", false),
    entry!(85, "PacketCable MTA Provisioning Flags", "MTA provisioning behavior flags", Uint8, Bytes(1), Some(1), "PacketCable 1.0", false),
];

/// Sub-TLV definitions, keyed by `(parent type, sub type)`.
static SUB_TLV: &[(u8, u8, SpecEntry)] = &[
    // TLV 4: Class of Service
    (4, 1, SpecEntry { name: "Class ID", description: "Class of service identifier", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.0", supports_sub_tlvs: false }),
    (4, 2, SpecEntry { name: "Max Downstream Rate", description: "Maximum downstream rate in bits per second", value_kind: Bandwidth, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.0", supports_sub_tlvs: false }),
    (4, 3, SpecEntry { name: "Max Upstream Rate", description: "Maximum upstream rate in bits per second", value_kind: Bandwidth, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.0", supports_sub_tlvs: false }),
    (4, 4, SpecEntry { name: "Upstream Channel Priority", description: "Relative priority on the upstream channel", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.0", supports_sub_tlvs: false }),
    (4, 5, SpecEntry { name: "Min Reserved Rate", description: "Guaranteed minimum upstream rate in bits per second", value_kind: Bandwidth, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.0", supports_sub_tlvs: false }),
    (4, 6, SpecEntry { name: "Max Burst Size", description: "Maximum transmit burst in bytes", value_kind: Uint16, max_length: Bytes(2), fixed_length: Some(2), introduced_version: "1.0", supports_sub_tlvs: false }),
    (4, 7, SpecEntry { name: "CoS Privacy Enable", description: "Baseline Privacy enable flag for this class of service", value_kind: Boolean, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.0", supports_sub_tlvs: false }),

    // TLV 17/24/25: Service Flow sub-TLVs share a namespace shape across the family.
    (17, 1, SpecEntry { name: "Service Flow Reference", description: "Reference number identifying this service flow within the file", value_kind: ServiceFlowRef, max_length: Bytes(2), fixed_length: Some(2), introduced_version: "1.1", supports_sub_tlvs: false }),
    (17, 2, SpecEntry { name: "Service Flow ID", description: "CMTS-assigned service flow identifier", value_kind: Uint32, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (17, 6, SpecEntry { name: "QoS Parameter Set", description: "QoS Parameter Set compound for this service flow", value_kind: Compound, max_length: Unlimited, fixed_length: None, introduced_version: "1.1", supports_sub_tlvs: true }),
    (24, 1, SpecEntry { name: "Service Flow Reference", description: "Reference number identifying this service flow within the file", value_kind: ServiceFlowRef, max_length: Bytes(2), fixed_length: Some(2), introduced_version: "1.1", supports_sub_tlvs: false }),
    (24, 2, SpecEntry { name: "Service Flow ID", description: "CMTS-assigned service flow identifier", value_kind: Uint32, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (24, 6, SpecEntry { name: "QoS Parameter Set", description: "QoS Parameter Set compound for this service flow", value_kind: Compound, max_length: Unlimited, fixed_length: None, introduced_version: "1.1", supports_sub_tlvs: true }),
    (25, 1, SpecEntry { name: "Service Flow Reference", description: "Reference number identifying this service flow within the file", value_kind: ServiceFlowRef, max_length: Bytes(2), fixed_length: Some(2), introduced_version: "1.1", supports_sub_tlvs: false }),
    (25, 2, SpecEntry { name: "Service Flow ID", description: "CMTS-assigned service flow identifier", value_kind: Uint32, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (25, 6, SpecEntry { name: "QoS Parameter Set", description: "QoS Parameter Set compound for this service flow", value_kind: Compound, max_length: Unlimited, fixed_length: None, introduced_version: "1.1", supports_sub_tlvs: true }),

    // QoS Parameter Set sub-sub-TLVs (nested one level deeper, parent type 6 appearing under 17/24/25 is not
    // representable in a flat (parent, sub) table without ambiguity across grandparents; QoS internals beyond
    // Traffic Priority/Max Sustained Rate are intentionally left to hex_string fallback, matching the Open
    // Question treatment of OFDM/OFDMA profiles).
    (6, 1, SpecEntry { name: "Traffic Priority", description: "Relative scheduling priority within the service flow", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.1", supports_sub_tlvs: false }),
    (6, 2, SpecEntry { name: "Max Sustained Rate", description: "Maximum sustained traffic rate in bits per second", value_kind: Bandwidth, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (6, 8, SpecEntry { name: "Minimum Reserved Rate", description: "Guaranteed minimum traffic rate in bits per second", value_kind: Bandwidth, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),

    // TLV 22/23: packet classification
    (22, 1, SpecEntry { name: "Classifier Reference", description: "Reference number identifying this classifier within the file", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.1", supports_sub_tlvs: false }),
    (22, 3, SpecEntry { name: "Service Flow Reference", description: "Service flow this classifier applies traffic to", value_kind: ServiceFlowRef, max_length: Bytes(2), fixed_length: Some(2), introduced_version: "1.1", supports_sub_tlvs: false }),
    (22, 9, SpecEntry { name: "IP Source Address", description: "Source IP address to match", value_kind: Ipv4, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (22, 10, SpecEntry { name: "IP Destination Address", description: "Destination IP address to match", value_kind: Ipv4, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (23, 1, SpecEntry { name: "Classifier Reference", description: "Reference number identifying this classifier within the file", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.1", supports_sub_tlvs: false }),
    (23, 3, SpecEntry { name: "Service Flow Reference", description: "Service flow this classifier applies traffic to", value_kind: ServiceFlowRef, max_length: Bytes(2), fixed_length: Some(2), introduced_version: "1.1", supports_sub_tlvs: false }),
    (23, 9, SpecEntry { name: "IP Source Address", description: "Source IP address to match", value_kind: Ipv4, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),
    (23, 10, SpecEntry { name: "IP Destination Address", description: "Destination IP address to match", value_kind: Ipv4, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.1", supports_sub_tlvs: false }),

    // TLV 10/11: SNMP
    (10, 1, SpecEntry { name: "SNMP Community", description: "Community string granted write access", value_kind: String, max_length: Unlimited, fixed_length: None, introduced_version: "1.0", supports_sub_tlvs: false }),
    (10, 2, SpecEntry { name: "SNMP IP Address", description: "IP address the write-access entry is restricted to", value_kind: Ipv4, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "1.0", supports_sub_tlvs: false }),
    (11, 1, SpecEntry { name: "SNMP Object ID", description: "OID of the MIB object to set", value_kind: Oid, max_length: Unlimited, fixed_length: None, introduced_version: "1.0", supports_sub_tlvs: false }),
    (11, 2, SpecEntry { name: "SNMP Object Value", description: "ASN.1 DER encoded value to set on the object", value_kind: Asn1Der, max_length: Unlimited, fixed_length: None, introduced_version: "1.0", supports_sub_tlvs: false }),

    // TLV 43: Vendor Specific
    (43, 8, SpecEntry { name: "Vendor ID", description: "Vendor OUI this vendor-specific block applies to", value_kind: VendorOui, max_length: Bytes(3), fixed_length: Some(3), introduced_version: "1.0", supports_sub_tlvs: false }),

    // TLV 36: SNMPv3 Kickstart
    (36, 1, SpecEntry { name: "SNMPv3 Security Name", description: "SNMPv3 security name granted kickstart access", value_kind: String, max_length: Unlimited, fixed_length: None, introduced_version: "2.0", supports_sub_tlvs: false }),
    (36, 2, SpecEntry { name: "SNMPv3 Manager Public Number", description: "Diffie-Hellman public number for the manager", value_kind: Binary, max_length: Unlimited, fixed_length: None, introduced_version: "2.0", supports_sub_tlvs: false }),

    // TLV 28/31: Payload Header Suppression
    (28, 1, SpecEntry { name: "PHS Classifier Reference", description: "Classifier this suppression rule applies to", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.1", supports_sub_tlvs: false }),
    (31, 1, SpecEntry { name: "PHS Field", description: "Bytes of the header to suppress", value_kind: HexString, max_length: Unlimited, fixed_length: None, introduced_version: "1.1", supports_sub_tlvs: false }),
    (31, 2, SpecEntry { name: "PHS Mask", description: "Bitmask of which PHS Field bytes are verified", value_kind: HexString, max_length: Unlimited, fixed_length: None, introduced_version: "1.1", supports_sub_tlvs: false }),
    (31, 3, SpecEntry { name: "PHS Size", description: "Total number of bytes suppressed", value_kind: Uint8, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.1", supports_sub_tlvs: false }),
    (31, 4, SpecEntry { name: "PHS Verify", description: "Whether the CMTS must verify suppressed bytes before restoring them", value_kind: Boolean, max_length: Bytes(1), fixed_length: Some(1), introduced_version: "1.1", supports_sub_tlvs: false }),

    // PacketCable (TLV 64): Network-based Call Signaling
    (64, 65, SpecEntry { name: "PacketCable Flow Identifier", description: "Gate/flow identifier for a PacketCable media stream", value_kind: Uint32, max_length: Bytes(4), fixed_length: Some(4), introduced_version: "PacketCable 1.0", supports_sub_tlvs: false }),
    (64, 73, SpecEntry { name: "PacketCable Kerberos Realm", description: "Kerberos realm name for MTA authentication", value_kind: String, max_length: Unlimited, fixed_length: None, introduced_version: "PacketCable 1.0", supports_sub_tlvs: false }),
    (75, 1, SpecEntry { name: "Primary DNS Server", description: "Primary call management server DNS name", value_kind: String, max_length: Unlimited, fixed_length: None, introduced_version: "PacketCable 1.0", supports_sub_tlvs: false }),
];

/// Looks up a top-level (depth-0) TLV definition.
pub fn lookup_top_level(r#type: u8) -> Option<&'static SpecEntry> {
    TOP_LEVEL.iter().find(|(t, _)| *t == r#type).map(|(_, e)| e)
}

/// Looks up a sub-TLV definition scoped to `parent_type`. Never falls back to
/// [lookup_top_level] — ambiguity between namespaces must be resolved by the caller's context,
/// not papered over here.
pub fn lookup_sub(parent_type: u8, sub_type: u8) -> Option<&'static SpecEntry> {
    SUB_TLV
        .iter()
        .find(|(p, s, _)| *p == parent_type && *s == sub_type)
        .map(|(_, _, e)| e)
}

/// Formats the synthesized name for a sub-TLV absent from the registry.
pub fn unknown_sub_name(sub_type: u8) -> std::string::String {
    format!("Unknown Sub-TLV {}", sub_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_6_is_cm_mic() {
        let e = lookup_top_level(6).unwrap();
        assert_eq!(e.name, "CM Message Integrity Check");
    }

    #[test]
    fn sub_tlv_namespaces_are_disjoint() {
        // Sub-TLV 1 under 24 is Service Flow Reference, never mistaken for top-level TLV 1
        // (Downstream Frequency).
        let top = lookup_top_level(1).unwrap();
        let sub = lookup_sub(24, 1).unwrap();
        assert_ne!(top.name, sub.name);
        assert_eq!(sub.name, "Service Flow Reference");
    }

    #[test]
    fn qos_sub_tlv_6_is_not_cm_mic() {
        // Sub-TLV 6 under service-flow parent 24 is QoS Parameter Set, never the top-level CM MIC.
        let sub = lookup_sub(24, 6).unwrap();
        assert_eq!(sub.name, "QoS Parameter Set");
        assert_ne!(sub.name, lookup_top_level(6).unwrap().name);
    }

    #[test]
    fn unknown_sub_tlv_has_no_entry() {
        assert!(lookup_sub(24, 250).is_none());
    }

    #[test]
    fn lookup_sub_never_falls_back_to_top_level() {
        // Parent 99 has no sub-TLV table at all; lookup_sub must return None, not silently
        // consult lookup_top_level(1).
        assert!(lookup_sub(99, 1).is_none());
    }

    #[test]
    fn ofdm_profiles_declare_compound_with_no_sub_table() {
        let e = lookup_top_level(62).unwrap();
        assert!(e.supports_sub_tlvs);
        assert!(lookup_sub(62, 1).is_none());
    }
}
