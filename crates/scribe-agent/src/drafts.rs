// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded in-memory table of drafts awaiting approval.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use scribe_core::traits::DraftStore;
use scribe_core::types::{ApprovalToken, PendingDraft, UserId};
use tokio::sync::Mutex;
use tracing::warn;

struct Table {
    drafts: HashMap<ApprovalToken, PendingDraft>,
    /// Insertion order, oldest first. May hold tokens already taken.
    order: VecDeque<ApprovalToken>,
}

/// A [`DraftStore`] guarded by a single mutex.
///
/// Holds at most `capacity` drafts; inserting into a full table evicts the
/// oldest pending draft.
pub struct InMemoryDraftStore {
    capacity: usize,
    table: Mutex<Table>,
}

impl InMemoryDraftStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            table: Mutex::new(Table {
                drafts: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn put(&self, draft: PendingDraft) {
        let mut table = self.table.lock().await;

        while table.drafts.len() >= self.capacity {
            let Some(oldest) = table.order.pop_front() else {
                break;
            };
            if let Some(evicted) = table.drafts.remove(&oldest) {
                warn!(
                    token = %evicted.token,
                    requester = %evicted.requester,
                    capacity = self.capacity,
                    "draft store full, evicting oldest draft"
                );
            }
        }

        table.order.push_back(draft.token.clone());
        table.drafts.insert(draft.token.clone(), draft);
    }

    async fn take_if_owner(&self, token: &ApprovalToken, user: UserId) -> Option<PendingDraft> {
        let mut table = self.table.lock().await;
        if table.drafts.get(token)?.requester != user {
            return None;
        }
        let draft = table.drafts.remove(token)?;
        table.order.retain(|t| t != token);
        Some(draft)
    }

    /// Restored drafts rejoin at the front of the eviction order.
    async fn restore(&self, draft: PendingDraft) {
        let mut table = self.table.lock().await;
        if table.drafts.contains_key(&draft.token) {
            return;
        }
        table.order.push_front(draft.token.clone());
        table.drafts.insert(draft.token.clone(), draft);
    }

    async fn len(&self) -> usize {
        self.table.lock().await.drafts.len()
    }
}
