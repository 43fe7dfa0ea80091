//! Cache key shared by the itinerary cache and key store adapters.
use crate::domain::TravelRequest;

/// Separator between destination, days and the preference list.
const FIELD_DELIMITER: char = '-';
/// Separator between individual preferences.
const PREFERENCE_DELIMITER: &str = ",";

/// Key used to store and retrieve itinerary records.
///
/// Built as `"{destination}-{days}-{preferences joined by ','}"`. Preference
/// order and destination case are significant: `["food", "beach"]` and
/// `["beach", "food"]` map to different keys, as do `"Italy"` and `"italy"`.
/// Delimiter characters inside destination or preference text are not
/// escaped, so distinct requests can in principle collide.
///
/// # Examples
/// ```
/// use itinerary_backend::domain::TravelRequest;
/// use itinerary_backend::domain::ports::ItineraryCacheKey;
///
/// let request = TravelRequest::try_new("Italy", 3, vec!["food".into(), "history".into()])
///     .expect("valid request");
/// assert_eq!(ItineraryCacheKey::for_request(&request).as_str(), "Italy-3-food,history");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItineraryCacheKey(String);

impl ItineraryCacheKey {
    /// Derive the key for `request`.
    pub fn for_request(request: &TravelRequest) -> Self {
        Self(format!(
            "{destination}{FIELD_DELIMITER}{days}{FIELD_DELIMITER}{preferences}",
            destination = request.destination(),
            days = request.days(),
            preferences = request.preferences().join(PREFERENCE_DELIMITER),
        ))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ItineraryCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ItineraryCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
