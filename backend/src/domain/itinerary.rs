//! Generated itinerary records and their stored representation.
//!
//! Stored payloads are `"<version>:<json>"`. The version marker lets a deploy
//! that changes the record layout recognise entries written by an older
//! release instead of misreading them.

use serde::{Deserialize, Serialize};

use super::TravelRequest;

/// Version marker written in front of every stored record.
pub const PAYLOAD_VERSION: &str = "v1";

/// Itinerary produced for one travel request.
///
/// Echoes the originating request alongside the generated `plan` text. Built
/// only by the itinerary cache after a successful generation, or decoded
/// verbatim from the key store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItineraryRecord {
    destination: String,
    days: u32,
    preferences: Vec<String>,
    plan: String,
}

impl ItineraryRecord {
    /// Assemble a record from the request and the generated plan.
    pub fn new(request: &TravelRequest, plan: impl Into<String>) -> Self {
        Self {
            destination: request.destination().to_owned(),
            days: request.days(),
            preferences: request.preferences().to_vec(),
            plan: plan.into(),
        }
    }

    /// Destination echoed from the request.
    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    /// Trip length echoed from the request.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Preferences echoed from the request.
    pub fn preferences(&self) -> &[String] {
        self.preferences.as_slice()
    }

    /// Generated day-by-day plan (opaque markdown-like text).
    pub fn plan(&self) -> &str {
        self.plan.as_str()
    }
}

/// Outcome of decoding a stored payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredItinerary {
    /// Payload written by the current format.
    Current(ItineraryRecord),
    /// Payload written under another format version; must be regenerated.
    Stale { version: String },
}

/// Reasons a stored payload cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadDecodeError {
    /// No `v<N>:` marker at the start of the payload.
    #[error("payload has no format version marker")]
    MissingVersion,
    /// The body under the current version is not a valid record.
    #[error("payload body is not a valid itinerary record: {message}")]
    InvalidBody { message: String },
}

/// Serialise a record into its stored form.
///
/// # Examples
/// ```
/// use itinerary_backend::domain::{ItineraryRecord, TravelRequest, encode_payload};
///
/// let request = TravelRequest::try_new("Italy", 3, vec!["food".into()]).expect("valid");
/// let payload = encode_payload(&ItineraryRecord::new(&request, "Day 1")).expect("encode");
/// assert!(payload.starts_with("v1:{"));
/// ```
pub fn encode_payload(record: &ItineraryRecord) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(record)?;
    Ok(format!("{PAYLOAD_VERSION}:{body}"))
}

/// Decode a stored payload, distinguishing stale formats from corruption.
pub fn decode_payload(payload: &str) -> Result<StoredItinerary, PayloadDecodeError> {
    let (version, body) = payload
        .split_once(':')
        .filter(|(version, _)| is_version_marker(version))
        .ok_or(PayloadDecodeError::MissingVersion)?;

    if version != PAYLOAD_VERSION {
        return Ok(StoredItinerary::Stale {
            version: version.to_owned(),
        });
    }

    serde_json::from_str(body)
        .map(StoredItinerary::Current)
        .map_err(|err| PayloadDecodeError::InvalidBody {
            message: err.to_string(),
        })
}

fn is_version_marker(candidate: &str) -> bool {
    candidate
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> ItineraryRecord {
        let request = TravelRequest::try_new("Italy", 3, vec!["food".into(), "history".into()])
            .expect("valid request");
        ItineraryRecord::new(&request, "Day 1: Rome")
    }

    #[rstest]
    fn stored_layout_is_versioned_json(record: ItineraryRecord) {
        let payload = encode_payload(&record).expect("encode");
        assert_eq!(
            payload,
            r#"v1:{"destination":"Italy","days":3,"preferences":["food","history"],"plan":"Day 1: Rome"}"#
        );
    }

    #[rstest]
    fn decodes_current_payload(record: ItineraryRecord) {
        let payload = encode_payload(&record).expect("encode");
        assert_eq!(decode_payload(&payload), Ok(StoredItinerary::Current(record)));
    }

    #[rstest]
    #[case("v2:{\"anything\":true}", "v2")]
    #[case("v0:", "v0")]
    fn reports_other_versions_as_stale(#[case] payload: &str, #[case] version: &str) {
        assert_eq!(
            decode_payload(payload),
            Ok(StoredItinerary::Stale {
                version: version.to_owned()
            })
        );
    }

    #[rstest]
    #[case(r#"{"destination":"Italy","days":3,"preferences":[],"plan":"x"}"#)]
    #[case("garbage")]
    #[case("version:{}")]
    #[case("v:{}")]
    fn rejects_payloads_without_marker(#[case] payload: &str) {
        assert_eq!(
            decode_payload(payload),
            Err(PayloadDecodeError::MissingVersion)
        );
    }

    #[rstest]
    #[case("v1:not json")]
    #[case(r#"v1:{"destination":"Italy"}"#)]
    #[case(r#"v1:{"destination":"Italy","days":-1,"preferences":[],"plan":"x"}"#)]
    fn rejects_corrupt_current_bodies(#[case] payload: &str) {
        assert!(matches!(
            decode_payload(payload),
            Err(PayloadDecodeError::InvalidBody { .. })
        ));
    }
}
