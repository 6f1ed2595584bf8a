//! Wire types for the OpenAI-compatible chat-completions endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct ChatRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) messages: [ChatMessageDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct ChatMessageDto<'a> {
    pub(super) role: &'static str,
    pub(super) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponseDto {
    #[serde(default)]
    pub(super) choices: Vec<ChoiceDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceDto {
    pub(super) message: ReplyDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ReplyDto {
    #[serde(default)]
    pub(super) content: Option<String>,
}

impl<'a> ChatRequestDto<'a> {
    /// Single user-role message asking about `topic`.
    pub(super) fn for_topic(model: &'a str, topic: &'a str) -> Self {
        Self {
            model,
            messages: [ChatMessageDto {
                role: "user",
                content: topic,
            }],
        }
    }
}

impl ChatResponseDto {
    /// Content of the first choice, if the upstream returned one.
    pub(super) fn into_first_reply(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
    }
}
