//! Completion service adapters.

mod mock;
mod openai;

pub use mock::{MockCompletionService, MockError, MockResponse};
pub use openai::{OpenAiCompletionService, OpenAiConfig};
