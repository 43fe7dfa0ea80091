//! Wire types for the OpenAI chat-completions API.
//!
//! Only the fields the adapter reads or writes are modelled; unknown response
//! fields are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatCompletionRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: [ChatMessageDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

impl<'a> ChatCompletionRequestDto<'a> {
    /// Single user turn carrying the whole prompt.
    pub(super) fn user_prompt(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: [ChatMessageDto {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatCompletionResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChatChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatChoiceDto {
    pub(super) message: ChatResponseMessageDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponseMessageDto {
    pub(super) content: Option<String>,
}

impl ChatCompletionResponseDto {
    /// Content of the first choice, if it carries any non-blank text.
    pub(super) fn into_first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorEnvelopeDto {
    pub(super) error: ApiErrorDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorDto {
    pub(super) message: String,
}
