// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage capability for drafts awaiting approval.

use async_trait::async_trait;

use crate::types::{ApprovalToken, PendingDraft, UserId};

/// Shared table of pending drafts keyed by approval token.
///
/// Implementations must make [`take_if_owner`](DraftStore::take_if_owner)
/// atomic with respect to concurrent `put` calls for other drafts.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Stores a draft under its token.
    async fn put(&self, draft: PendingDraft);

    /// Removes and returns the draft if it exists and `user` requested it.
    ///
    /// Returns `None` (leaving the table untouched) for unknown tokens and
    /// for users other than the requester.
    async fn take_if_owner(&self, token: &ApprovalToken, user: UserId) -> Option<PendingDraft>;

    /// Puts back a draft previously taken, without evicting anything.
    ///
    /// May leave the table above its capacity until later drafts are taken.
    async fn restore(&self, draft: PendingDraft);

    /// Number of drafts currently pending.
    async fn len(&self) -> usize;
}
