//! Chat-completion proxy adapters.

mod dto;
mod openai;

pub use openai::{OpenAiCompletionSource, OpenAiSettings};
