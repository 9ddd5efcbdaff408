// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation windows and prompt assembly for Scribe.
//!
//! Assembles a drafting prompt from three parts:
//! - **System prompt**: loaded from config (file > inline > default)
//! - **Conversation**: a bounded window around the anchor message
//! - **Hints**: reference cards ranked against the conversation
//!
//! The [`ContextAssembler`] produces a [`ProviderRequest`] ready to send to
//! the language model.

pub mod format;
pub mod prompt;
pub mod window;

use std::sync::Arc;

use scribe_config::model::ScribeConfig;
use scribe_core::traits::MessageHistory;
use scribe_core::types::{Message, ProviderRequest};
use scribe_hints::{Card, LexicalHintIndex};
use tracing::debug;

pub use format::{render_hints, render_window};
pub use prompt::load_system_prompt;
pub use window::{ConversationWindow, StopReason, WindowBuilder};

/// Result of prompt assembly.
#[derive(Debug)]
pub struct AssembledPrompt {
    /// The provider request ready to send to the LLM.
    pub request: ProviderRequest,
    /// The window the prompt was built from.
    pub window: ConversationWindow,
    /// Ids of the cards included as hints, best first.
    pub hint_ids: Vec<String>,
}

/// Composes window building, hint retrieval and prompt formatting.
pub struct ContextAssembler {
    builder: WindowBuilder,
    index: Arc<LexicalHintIndex>,
    top_k: usize,
    system_prompt: String,
    model: String,
    max_tokens: u32,
}

impl ContextAssembler {
    /// Creates an assembler from configuration, loading the system prompt.
    pub async fn new(config: &ScribeConfig, index: Arc<LexicalHintIndex>) -> Self {
        Self {
            builder: WindowBuilder::new(config.window.clone()),
            index,
            top_k: config.hints.top_k,
            system_prompt: load_system_prompt(&config.agent).await,
            model: config.anthropic.model.clone(),
            max_tokens: config.anthropic.max_tokens,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn index(&self) -> &LexicalHintIndex {
        &self.index
    }

    /// Searches the hint index with the configured `top_k`.
    pub fn hints(&self, query: &str) -> Vec<&Card> {
        self.index.search(query, self.top_k)
    }

    /// Builds the window around `anchor` and the request that drafts a reply to it.
    pub async fn assemble(&self, history: &dyn MessageHistory, anchor: &Message) -> AssembledPrompt {
        let window = self.builder.build(history, anchor).await;
        let block = render_window(&window);

        let query = format!("{}\n{block}", anchor.content);
        let cards = self.index.search(&query, self.top_k);
        let hints = render_hints(&cards);
        let hint_ids: Vec<String> = cards.iter().map(|card| card.id.clone()).collect();

        debug!(
            anchor = %anchor.id,
            window = window.len(),
            stop = %window.stop_reason(),
            hints = hint_ids.len(),
            "assembled drafting prompt"
        );

        let mut prompt = String::from(
            "Conversation (the line marked >> is the message to reply to):\n\n",
        );
        prompt.push_str(&block);
        if let Some(hints) = hints {
            prompt.push('\n');
            prompt.push_str(&hints);
        }
        prompt.push_str("\nDraft a reply to the marked message.");

        AssembledPrompt {
            request: ProviderRequest {
                model: self.model.clone(),
                system: self.system_prompt.clone(),
                prompt,
                max_tokens: self.max_tokens,
            },
            window,
            hint_ids,
        }
    }
}
