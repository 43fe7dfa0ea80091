//! Travel request accepted by the itinerary planner.
//!
//! A [`TravelRequest`] is validated once at construction and is immutable
//! afterwards; every downstream component (cache key, prompt, record) reads it
//! through accessors.

use serde_json::{Value, json};

/// Validation failures raised while building a [`TravelRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TravelRequestValidationError {
    /// Destination was empty or whitespace only.
    #[error("destination must not be empty")]
    BlankDestination,
    /// Trip length was zero, negative, or too large to represent.
    #[error("days must be at least 1 (got {days})")]
    DaysOutOfRange { days: i64 },
    /// A preference tag was empty after trimming.
    #[error("preference at index {index} must not be empty")]
    BlankPreference { index: usize },
}

impl TravelRequestValidationError {
    /// Name of the request field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankDestination => "destination",
            Self::DaysOutOfRange { .. } => "days",
            Self::BlankPreference { .. } => "preferences",
        }
    }

    /// Structured details suitable for an error payload.
    pub fn details(&self) -> Value {
        match self {
            Self::BlankDestination => json!({ "field": self.field(), "code": "blank" }),
            Self::DaysOutOfRange { days } => {
                json!({ "field": self.field(), "code": "out_of_range", "value": days })
            }
            Self::BlankPreference { index } => {
                json!({ "field": self.field(), "code": "blank", "index": index })
            }
        }
    }
}

/// Destination, trip length and ordered preference tags for one itinerary.
///
/// Destination text is kept exactly as supplied (no trimming or case
/// folding). Preferences are trimmed and keep their supplied order.
///
/// # Examples
/// ```
/// use itinerary_backend::domain::TravelRequest;
///
/// let request = TravelRequest::try_new("Italy", 3, vec![" food ".into(), "history".into()])
///     .expect("valid request");
/// assert_eq!(request.days(), 3);
/// assert_eq!(request.preferences(), ["food", "history"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TravelRequest {
    destination: String,
    days: u32,
    preferences: Vec<String>,
}

impl TravelRequest {
    /// Validate and build a request.
    ///
    /// `days` is accepted as a signed integer so callers can hand over
    /// unchecked client input and receive a validation error rather than a
    /// conversion failure.
    pub fn try_new(
        destination: impl Into<String>,
        days: i64,
        preferences: Vec<String>,
    ) -> Result<Self, TravelRequestValidationError> {
        let destination = destination.into();
        if destination.trim().is_empty() {
            return Err(TravelRequestValidationError::BlankDestination);
        }

        let days = u32::try_from(days)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(TravelRequestValidationError::DaysOutOfRange { days })?;

        let preferences = preferences
            .into_iter()
            .enumerate()
            .map(|(index, tag)| {
                let trimmed = tag.trim();
                if trimmed.is_empty() {
                    Err(TravelRequestValidationError::BlankPreference { index })
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            destination,
            days,
            preferences,
        })
    }

    /// Destination text as supplied by the caller.
    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    /// Trip length in days; always at least one.
    pub fn days(&self) -> u32 {
        self.days
    }

    /// Trimmed preference tags in caller order.
    pub fn preferences(&self) -> &[String] {
        self.preferences.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn prefs(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(i64::from(u32::MAX) + 1)]
    fn rejects_days_out_of_range(#[case] days: i64) {
        let err = TravelRequest::try_new("Tokyo", days, prefs(&["food"]))
            .expect_err("days out of range");
        assert_eq!(err, TravelRequestValidationError::DaysOutOfRange { days });
        assert_eq!(err.field(), "days");
    }

    #[rstest]
    #[case("")]
    #[case("  \t")]
    fn rejects_blank_destination(#[case] destination: &str) {
        let err = TravelRequest::try_new(destination, 2, Vec::new())
            .expect_err("blank destination");
        assert_eq!(err, TravelRequestValidationError::BlankDestination);
    }

    #[rstest]
    fn rejects_blank_preference_with_index() {
        let err = TravelRequest::try_new("Lisbon", 2, prefs(&["food", "  "]))
            .expect_err("blank preference");
        assert_eq!(err, TravelRequestValidationError::BlankPreference { index: 1 });
        assert_eq!(err.details()["index"], 1);
    }

    #[rstest]
    fn trims_preferences_and_keeps_order() {
        let request = TravelRequest::try_new("Tokyo", 5, prefs(&[" culture", "food "]))
            .expect("valid request");
        assert_eq!(request.preferences(), ["culture", "food"]);
    }

    #[rstest]
    fn keeps_destination_verbatim() {
        let request = TravelRequest::try_new(" italy", 1, Vec::new()).expect("valid request");
        assert_eq!(request.destination(), " italy");
    }

    #[rstest]
    fn accepts_empty_preferences() {
        let request = TravelRequest::try_new("Oslo", 1, Vec::new()).expect("valid request");
        assert!(request.preferences().is_empty());
    }
}
