//! Itinerary generator adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `ItineraryGenerator` port against the OpenAI chat-completions API.

mod dto;
mod openai;

pub use openai::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_TIMEOUT, OpenAiGeneratorError,
    OpenAiItineraryGenerator, OpenAiSettings,
};
