// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Scribe integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests
//! without a chat platform or a language model.
//!
//! # Components
//!
//! - [`MockHistory`] - In-memory paged channel history with injectable failures
//! - [`MockProvider`] - Mock LLM provider with pre-configured responses
//! - [`MockReplySink`] - Reply sink that captures posted chunks

pub mod mock_history;
pub mod mock_provider;
pub mod mock_reply;

pub use mock_history::{MockHistory, TEST_CHANNEL, message_at};
pub use mock_provider::MockProvider;
pub use mock_reply::{MockReplySink, SentReply};
