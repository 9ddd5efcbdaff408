// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter and capability traits.
//!
//! External collaborators (chat platform, language model) implement these
//! traits; the core workflows only ever see the trait objects.

pub mod adapter;
pub mod drafts;
pub mod history;
pub mod provider;
pub mod reply;

pub use adapter::PluginAdapter;
pub use drafts::DraftStore;
pub use history::MessageHistory;
pub use provider::ProviderAdapter;
pub use reply::ReplySink;
