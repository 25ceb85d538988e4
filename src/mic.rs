//! HMAC-MD5 computation and verification for TLV 6 (CM MIC) and TLV 7 (CMTS MIC).
//!
//! Both preimages are built by a single dedicated routine ([build_preimage]) that never sees the
//! `0xFF` terminator, always substitutes a zero placeholder for the tag being computed (never a
//! previously stored value), and takes the secret only as a borrowed byte slice for the duration
//! of the call. [Secret] refuses to be formatted so the key can't end up in a log line by
//! accident.

use hmac::{Hmac, Mac};
use md5::Md5;

use crate::types::{Codec, PlainTlv, TLV_CMTS_MIC, TLV_CM_MIC};

type HmacMd5 = Hmac<Md5>;

/// The shared secret used to key a MIC HMAC. Bytes are never normalized (no trimming, no case
/// folding) and never exposed through `Debug`/`Display`.
pub struct Secret<'a>(&'a [u8]);

impl<'a> Secret<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for Secret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Result of validating a stored MIC against a freshly computed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MicValidation {
    Valid,
    Invalid { stored_hex: String, computed_hex: String },
    Missing,
    WrongLength { actual: usize, expected: usize },
}

/// How a caller wants an invalid MIC handled by the surrounding parse. The MIC Engine's own
/// compute/validate functions are policy-free; only the caller's higher-level parse entry point
/// consults this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicPolicy {
    /// An invalid MIC fails the enclosing parse.
    Strict,
    /// An invalid MIC is logged via `tracing::warn!` and parsing continues.
    Warn,
}

/// Builds the 16-byte placeholder-inserted preimage for `mic_type` (6 or 7) over `tlvs`, after
/// stripping any existing entries of the types in `strip_types` from the list (regardless of
/// position) and inserting the literal `<mic_type, 0x10, 0x00 * 16>` marker. The result is fed to
/// HMAC-MD5, never the terminator byte.
///
/// The CM MIC strips both TLV 6 and TLV 7; the CMTS MIC strips TLV 7 only and leaves any real
/// TLV 6 in place — `strip_types` is how callers express that difference, and `insert_cm_mic`
/// lets `compute_cmts_mic` add a synthesized TLV 6 when one was genuinely absent rather than
/// present-but-stripped.
fn build_preimage(tlvs: &[PlainTlv], mic_type: u8, strip_types: &[u8], insert_cm_mic: Option<&PlainTlv>) -> Vec<u8> {
    let mut stripped: Vec<PlainTlv> = tlvs.iter().filter(|t| !strip_types.contains(&t.r#type())).cloned().collect();

    if let Some(cm) = insert_cm_mic {
        stripped.push(cm.clone());
    }

    let mut preimage = Codec::encode(&stripped, false);
    preimage.push(mic_type);
    preimage.push(0x10);
    preimage.extend_from_slice(&[0u8; 16]);
    preimage
}

fn hmac_md5(secret: &Secret, preimage: &[u8]) -> [u8; 16] {
    let mut mac = <HmacMd5 as Mac>::new_from_slice(secret.0).expect("HMAC accepts keys of any length");
    mac.update(preimage);
    let result = mac.finalize().into_bytes();
    let mut out = [0u8; 16];
    out.copy_from_slice(&result);
    out
}

/// Computes the CM MIC (TLV 6) tag: strip existing 6/7, encode the remainder, append the
/// zero-placeholder TLV 6 marker, HMAC-MD5 the result.
pub fn compute_cm_mic(tlvs: &[PlainTlv], secret: &Secret) -> [u8; 16] {
    let preimage = build_preimage(tlvs, TLV_CM_MIC, &[TLV_CM_MIC, TLV_CMTS_MIC], None);
    hmac_md5(secret, &preimage)
}

/// Computes the CMTS MIC (TLV 7) tag: strip existing 7 only, leaving any real TLV 6 in place; if
/// TLV 6 is absent, compute it first and insert it; append the zero-placeholder TLV 7 marker;
/// HMAC-MD5 the result.
pub fn compute_cmts_mic(tlvs: &[PlainTlv], secret: &Secret) -> [u8; 16] {
    let has_cm_mic = tlvs.iter().any(|t| t.r#type() == TLV_CM_MIC);

    let synthesized_cm_mic;
    let cm_mic_to_insert = if has_cm_mic {
        None
    } else {
        let tag = compute_cm_mic(tlvs, secret);
        synthesized_cm_mic = PlainTlv::new(TLV_CM_MIC, tag.to_vec());
        Some(&synthesized_cm_mic)
    };

    let preimage = build_preimage(tlvs, TLV_CMTS_MIC, &[TLV_CMTS_MIC], cm_mic_to_insert);
    hmac_md5(secret, &preimage)
}

/// Finds the value bytes of the last occurrence of `mic_type` among `tlvs`. Duplicate MIC TLVs
/// are tolerated by using the last one.
fn find_last_mic<'a>(tlvs: &'a [PlainTlv], mic_type: u8) -> Option<&'a [u8]> {
    tlvs.iter().rev().find(|t| t.r#type() == mic_type).map(|t| t.value())
}

fn validate(tlvs: &[PlainTlv], mic_type: u8, secret: Option<&Secret>, computed: impl FnOnce() -> [u8; 16]) -> MicValidation {
    let stored = match find_last_mic(tlvs, mic_type) {
        Some(v) => v,
        None => return MicValidation::Missing,
    };

    if secret.is_none() {
        // A missing secret suppresses MIC validation entirely; this isn't an error.
        return MicValidation::Valid;
    }

    if stored.len() != 16 {
        return MicValidation::WrongLength { actual: stored.len(), expected: 16 };
    }

    let computed = computed();
    if stored == computed {
        MicValidation::Valid
    } else {
        MicValidation::Invalid {
            stored_hex: hex::encode_upper(stored),
            computed_hex: hex::encode_upper(computed),
        }
    }
}

/// Validates the stored CM MIC (TLV 6) against one freshly computed over `tlvs` and `secret`.
/// `secret: None` suppresses validation (returns `Valid` unconditionally if TLV 6 is present).
pub fn validate_cm_mic(tlvs: &[PlainTlv], secret: Option<&Secret>) -> MicValidation {
    validate(tlvs, TLV_CM_MIC, secret, || compute_cm_mic(tlvs, secret.expect("checked above")))
}

/// Validates the stored CMTS MIC (TLV 7) against one freshly computed over `tlvs` and `secret`.
pub fn validate_cmts_mic(tlvs: &[PlainTlv], secret: Option<&Secret>) -> MicValidation {
    validate(tlvs, TLV_CMTS_MIC, secret, || compute_cmts_mic(tlvs, secret.expect("checked above")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn secret() -> Vec<u8> {
        b"bindocsis_test".to_vec()
    }

    #[test]
    fn cm_mic_is_16_bytes_and_validates() {
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tag = compute_cm_mic(&tlvs, &secret);
        assert_eq!(tag.len(), 16);

        let mut with_mic = tlvs.clone();
        with_mic.push(PlainTlv::new(6, tag.to_vec()));
        assert_eq!(validate_cm_mic(&with_mic, Some(&secret)), MicValidation::Valid);
    }

    #[test]
    fn changing_a_tlv_byte_invalidates_the_mic() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        let tag = compute_cm_mic(&tlvs, &secret);

        let tampered = vec![PlainTlv::new(3, vec![0x00]), PlainTlv::new(6, tag.to_vec())];
        assert_matches::assert_matches!(validate_cm_mic(&tampered, Some(&secret)), MicValidation::Invalid { .. });
    }

    #[test]
    fn reordering_siblings_invalidates_the_mic() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01]), PlainTlv::new(2, vec![0x05])];
        let tag = compute_cm_mic(&tlvs, &secret);

        let mut reordered = vec![PlainTlv::new(2, vec![0x05]), PlainTlv::new(3, vec![0x01])];
        reordered.push(PlainTlv::new(6, tag.to_vec()));
        assert_matches::assert_matches!(validate_cm_mic(&reordered, Some(&secret)), MicValidation::Invalid { .. });
    }

    #[test]
    fn cm_and_cmts_mic_differ_for_same_secret() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        let cm = compute_cm_mic(&tlvs, &secret);
        let cmts = compute_cmts_mic(&tlvs, &secret);
        assert_ne!(cm, cmts);
    }

    #[test]
    fn cmts_mic_inserts_cm_mic_when_absent() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        let cmts_tag = compute_cmts_mic(&tlvs, &secret);

        let cm_tag = compute_cm_mic(&tlvs, &secret);
        let mut full = tlvs.clone();
        full.push(PlainTlv::new(6, cm_tag.to_vec()));
        full.push(PlainTlv::new(7, cmts_tag.to_vec()));

        assert_eq!(validate_cm_mic(&full, Some(&secret)), MicValidation::Valid);
        assert_eq!(validate_cmts_mic(&full, Some(&secret)), MicValidation::Valid);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        let tag = compute_cm_mic(&tlvs, &secret);

        let mut with_mic = tlvs.clone();
        with_mic.push(PlainTlv::new(6, tag.to_vec()));

        let other_secret_bytes = b"other_secret".to_vec();
        let other_secret = Secret::new(&other_secret_bytes);
        assert_matches::assert_matches!(
            validate_cm_mic(&with_mic, Some(&other_secret)),
            MicValidation::Invalid { .. }
        );
    }

    #[test]
    fn missing_mic_is_reported() {
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        assert_eq!(validate_cm_mic(&tlvs, None), MicValidation::Missing);
    }

    #[test]
    fn missing_secret_suppresses_validation() {
        let tlvs = vec![PlainTlv::new(3, vec![0x01]), PlainTlv::new(6, vec![0u8; 16])];
        assert_eq!(validate_cm_mic(&tlvs, None), MicValidation::Valid);
    }

    #[test]
    fn wrong_length_mic_is_reported() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01]), PlainTlv::new(6, vec![0u8; 4])];
        assert_matches::assert_matches!(
            validate_cm_mic(&tlvs, Some(&secret)),
            MicValidation::WrongLength { actual: 4, expected: 16 }
        );
    }

    #[test]
    fn duplicate_mic_uses_last_occurrence() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01])];
        let correct_tag = compute_cm_mic(&tlvs, &secret);

        let mut with_dupes = tlvs.clone();
        with_dupes.push(PlainTlv::new(6, vec![0xFFu8; 16])); // wrong, earlier
        with_dupes.push(PlainTlv::new(6, correct_tag.to_vec())); // correct, last
        assert_eq!(validate_cm_mic(&with_dupes, Some(&secret)), MicValidation::Valid);
    }

    #[test]
    fn recompute_is_a_fixed_point() {
        let secret_bytes = secret();
        let secret = Secret::new(&secret_bytes);
        let tlvs = vec![PlainTlv::new(3, vec![0x01]), PlainTlv::new(2, vec![0x05])];
        let tag1 = compute_cm_mic(&tlvs, &secret);

        let mut with_mic = tlvs.clone();
        with_mic.push(PlainTlv::new(6, tag1.to_vec()));

        // Stripping and recomputing over the same base TLVs reproduces the same tag.
        let tag2 = compute_cm_mic(&tlvs, &secret);
        assert_eq!(tag1, tag2);
        assert_eq!(validate_cm_mic(&with_mic, Some(&secret)), MicValidation::Valid);
    }

    #[test]
    fn secret_is_never_in_debug_output() {
        let secret_bytes = b"super_secret_value".to_vec();
        let secret = Secret::new(&secret_bytes);
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("super_secret_value"));
    }
}


