//! Itinerary HTTP handler.
//!
//! ```text
//! POST /api/itinerary
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ItineraryError;
use crate::domain::{ItineraryRecord, TravelRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request payload for an itinerary.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ItineraryRequest {
    /// Place to visit, used verbatim.
    #[schema(example = "Italy")]
    pub destination: String,
    /// Trip length; must be at least 1.
    #[schema(example = 3, minimum = 1)]
    pub days: i64,
    /// Ordered interest tags. Order matters for caching.
    #[serde(default)]
    #[schema(example = json!(["food", "history"]))]
    pub preferences: Vec<String>,
}

/// Generated (or cached) itinerary.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ItineraryResponse {
    #[schema(example = "Italy")]
    pub destination: String,
    #[schema(example = 3)]
    pub days: u32,
    #[schema(example = json!(["food", "history"]))]
    pub preferences: Vec<String>,
    /// Day-by-day plan text.
    #[schema(example = "Day 1: Rome ...")]
    pub plan: String,
}

impl From<ItineraryRecord> for ItineraryResponse {
    fn from(record: ItineraryRecord) -> Self {
        Self {
            destination: record.destination().to_owned(),
            days: record.days(),
            preferences: record.preferences().to_vec(),
            plan: record.plan().to_owned(),
        }
    }
}

impl TryFrom<ItineraryRequest> for TravelRequest {
    type Error = ItineraryError;

    fn try_from(payload: ItineraryRequest) -> Result<Self, Self::Error> {
        Ok(TravelRequest::try_new(
            payload.destination,
            payload.days,
            payload.preferences,
        )?)
    }
}

/// Return the itinerary for a destination, generating it on a cache miss.
#[utoipa::path(
    post,
    path = "/api/itinerary",
    request_body = ItineraryRequest,
    responses(
        (status = 200, description = "Itinerary", body = ItineraryResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["itinerary"],
    operation_id = "createItinerary"
)]
#[post("/itinerary")]
pub async fn create_itinerary(
    state: web::Data<HttpState>,
    payload: web::Json<ItineraryRequest>,
) -> ApiResult<web::Json<ItineraryResponse>> {
    let request = TravelRequest::try_from(payload.into_inner())?;
    let record = state.itineraries.resolve(request).await?;
    Ok(web::Json(ItineraryResponse::from(record)))
}
