//! Port interface for the text-generation backend.
use async_trait::async_trait;

use super::define_port_error;
use crate::domain::ItineraryPrompt;

define_port_error! {
    /// Errors surfaced by generator adapters.
    pub enum GenerationError {
        /// The backend could not be reached or the exchange was interrupted.
        Transport { message: String } => "generation request failed: {message}",
        /// The backend answered with a non-success status.
        Upstream { status: u16, message: String } => "generation backend returned {status}: {message}",
        /// The backend answered but its body could not be understood.
        Decode { message: String } => "generation response could not be decoded: {message}",
        /// The backend answered without any itinerary text.
        EmptyResponse => "generation backend returned no content",
    }
}

/// Turns a prompt into unstructured itinerary text.
///
/// Implementations own their transport concerns (timeouts, authentication).
/// Callers do not retry failed generations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItineraryGenerator: Send + Sync {
    /// Generate itinerary text for `prompt`.
    async fn generate(&self, prompt: &ItineraryPrompt) -> Result<String, GenerationError>;
}
