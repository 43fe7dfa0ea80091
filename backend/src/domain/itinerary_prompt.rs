//! Natural-language prompt handed to the itinerary generator.

use super::TravelRequest;

/// Prompt text derived from a travel request.
///
/// The wording is part of the contract with the generator backend and is
/// reproduced verbatim for every request.
///
/// # Examples
/// ```
/// use itinerary_backend::domain::{ItineraryPrompt, TravelRequest};
///
/// let request = TravelRequest::try_new("Italy", 3, vec!["food".into(), "history".into()])
///     .expect("valid request");
/// assert_eq!(
///     ItineraryPrompt::for_request(&request).as_str(),
///     "Create a 3-day travel itinerary for Italy focused on: food, history. \
///      Return it in a day-by-day plan."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryPrompt(String);

impl ItineraryPrompt {
    /// Render the prompt for `request`.
    pub fn for_request(request: &TravelRequest) -> Self {
        Self(format!(
            "Create a {days}-day travel itinerary for {destination} focused on: {preferences}. \
             Return it in a day-by-day plan.",
            days = request.days(),
            destination = request.destination(),
            preferences = request.preferences().join(", "),
        ))
    }

    /// Borrow the prompt text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ItineraryPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ItineraryPrompt {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_preferences_leave_focus_blank() {
        let request = TravelRequest::try_new("Oslo", 1, Vec::new()).expect("valid request");
        assert_eq!(
            ItineraryPrompt::for_request(&request).to_string(),
            "Create a 1-day travel itinerary for Oslo focused on: . Return it in a day-by-day plan."
        );
    }

    #[rstest]
    fn preferences_keep_caller_order() {
        let request =
            TravelRequest::try_new("Tokyo", 5, vec!["food".into(), "culture".into()])
                .expect("valid request");
        assert!(
            ItineraryPrompt::for_request(&request)
                .as_str()
                .contains("focused on: food, culture.")
        );
    }
}
