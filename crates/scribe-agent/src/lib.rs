// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Draft workflow for the Scribe assistant.
//!
//! The [`DraftAgent`] is the coordinator that:
//! - Builds a prompt around a chosen message and asks the model for a reply
//! - Holds the reply as a [`PendingDraft`] until its requester acts on it
//! - On approval, splits the reply into platform-sized chunks and posts them
//!   in order as replies to the original message

pub mod drafts;
pub mod recording;
pub mod split;

use std::sync::Arc;

use scribe_context::ContextAssembler;
use scribe_core::ScribeError;
use scribe_core::traits::{DraftStore, MessageHistory, ProviderAdapter, ReplySink};
use scribe_core::types::{ApprovalToken, ChannelId, MessageId, PendingDraft, UserId};
use scribe_hints::Card;
use tracing::{error, info};

pub use drafts::InMemoryDraftStore;
pub use split::{cut_index, split};

/// Coordinates drafting, approval and posting.
pub struct DraftAgent {
    assembler: Arc<ContextAssembler>,
    history: Arc<dyn MessageHistory>,
    provider: Arc<dyn ProviderAdapter>,
    replies: Arc<dyn ReplySink>,
    drafts: Arc<dyn DraftStore>,
    max_chunk_chars: usize,
}

impl DraftAgent {
    /// Creates a new draft agent over the given collaborators.
    pub fn new(
        assembler: Arc<ContextAssembler>,
        history: Arc<dyn MessageHistory>,
        provider: Arc<dyn ProviderAdapter>,
        replies: Arc<dyn ReplySink>,
        drafts: Arc<dyn DraftStore>,
        max_chunk_chars: usize,
    ) -> Self {
        Self {
            assembler,
            history,
            provider,
            replies,
            drafts,
            max_chunk_chars,
        }
    }

    /// Drafts a reply to `anchor_id` on behalf of `requester`.
    ///
    /// The draft is stored until [`approve`](Self::approve) or
    /// [`cancel`](Self::cancel) is called with its token.
    pub async fn draft(
        &self,
        channel: ChannelId,
        anchor_id: MessageId,
        requester: UserId,
    ) -> Result<PendingDraft, ScribeError> {
        let anchor = self.history.get(channel, anchor_id).await?;
        let assembled = self.assembler.assemble(self.history.as_ref(), &anchor).await;
        let window = assembled.window.len();
        let hints = assembled.hint_ids.len();

        let response = self.provider.complete(assembled.request).await?;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(ScribeError::provider("model returned an empty draft"));
        }

        let draft = PendingDraft {
            token: ApprovalToken::generate(),
            channel_id: channel,
            anchor_id,
            text: text.to_string(),
            requester,
        };
        self.drafts.put(draft.clone()).await;
        recording::record_draft_created();

        info!(
            token = %draft.token,
            channel = %channel,
            anchor = %anchor_id,
            requester = %requester,
            window,
            hints,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "draft created"
        );
        Ok(draft)
    }

    /// Posts the draft identified by `token` if `user` requested it.
    ///
    /// Returns the number of chunks posted, or `None` when the token is
    /// unknown or belongs to someone else. If the first chunk cannot be
    /// posted the draft is put back so it can be approved again.
    pub async fn approve(
        &self,
        token: &ApprovalToken,
        user: UserId,
    ) -> Result<Option<usize>, ScribeError> {
        let Some(draft) = self.drafts.take_if_owner(token, user).await else {
            return Ok(None);
        };

        let chunks = self.chunks(&draft.text);
        for (posted, chunk) in chunks.iter().enumerate() {
            if let Err(e) = self
                .replies
                .reply(draft.channel_id, draft.anchor_id, chunk)
                .await
            {
                error!(
                    token = %draft.token,
                    posted,
                    total = chunks.len(),
                    error = %e,
                    "failed to post draft chunk"
                );
                if posted == 0 {
                    self.drafts.restore(draft.clone()).await;
                }
                return Err(e);
            }
        }

        recording::record_draft_approved(chunks.len());
        info!(
            token = %draft.token,
            channel = %draft.channel_id,
            anchor = %draft.anchor_id,
            chunks = chunks.len(),
            "draft approved and posted"
        );
        Ok(Some(chunks.len()))
    }

    /// Drops the draft identified by `token` if `user` requested it.
    pub async fn cancel(&self, token: &ApprovalToken, user: UserId) -> bool {
        match self.drafts.take_if_owner(token, user).await {
            Some(draft) => {
                recording::record_draft_cancelled();
                info!(token = %draft.token, "draft cancelled");
                true
            }
            None => false,
        }
    }

    /// The chunks `text` would be posted as.
    pub fn chunks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split(text, self.max_chunk_chars)
    }

    /// Ranks reference cards against a free-text query.
    pub fn hints(&self, query: &str) -> Vec<Card> {
        self.assembler.hints(query).into_iter().cloned().collect()
    }

    /// Number of drafts waiting for approval.
    pub async fn pending(&self) -> usize {
        self.drafts.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_config::model::ScribeConfig;
    use scribe_hints::{LexicalHintIndex, parse_cards};
    use scribe_test_utils::{MockHistory, MockProvider, MockReplySink, TEST_CHANNEL, message_at};

    struct Fixture {
        agent: DraftAgent,
        provider: Arc<MockProvider>,
        replies: Arc<MockReplySink>,
    }

    async fn fixture(responses: Vec<String>, max_chunk_chars: usize) -> Fixture {
        let config = ScribeConfig::default();
        let index = LexicalHintIndex::new(
            parse_cards(r#"{"id":"Harmony.Patch","kind":"method","signature":"Patch(MethodBase)"}"#),
            config.hints.privileged_kinds.clone(),
        );
        let assembler = Arc::new(ContextAssembler::new(&config, Arc::new(index)).await);
        let history = Arc::new(MockHistory::new(vec![
            message_at(1, 10, 0, "earlier chatter"),
            message_at(2, 20, 30, "how do I patch a private method?"),
        ]));
        let provider = Arc::new(MockProvider::with_responses(responses));
        let replies = Arc::new(MockReplySink::new());

        let agent = DraftAgent::new(
            assembler,
            history,
            provider.clone(),
            replies.clone(),
            Arc::new(InMemoryDraftStore::new(8)),
            max_chunk_chars,
        );
        Fixture {
            agent,
            provider,
            replies,
        }
    }

    #[tokio::test]
    async fn draft_then_approve_posts_chunks_in_order() {
        let fx = fixture(vec!["AAAA\nBBBB\nCCCC".into()], 6).await;

        let draft = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(2), UserId(99))
            .await
            .unwrap();
        assert_eq!(draft.text, "AAAA\nBBBB\nCCCC");
        assert_eq!(fx.agent.pending().await, 1);

        let requests = fx.provider.requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("how do I patch a private method?"));

        let posted = fx.agent.approve(&draft.token, UserId(99)).await.unwrap();
        assert_eq!(posted, Some(3));
        assert_eq!(fx.replies.sent_texts().await, vec!["AAAA\n", "BBBB\n", "CCCC"]);
        assert!(
            fx.replies
                .sent()
                .await
                .iter()
                .all(|r| r.anchor == MessageId(2) && r.channel == TEST_CHANNEL)
        );
        assert_eq!(fx.agent.pending().await, 0);
    }

    #[tokio::test]
    async fn approve_by_other_user_is_silent() {
        let fx = fixture(vec!["reply".into()], 100).await;
        let draft = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(2), UserId(99))
            .await
            .unwrap();

        assert_eq!(fx.agent.approve(&draft.token, UserId(5)).await.unwrap(), None);
        assert!(fx.replies.sent().await.is_empty());
        assert_eq!(fx.agent.pending().await, 1);
    }

    #[tokio::test]
    async fn approve_twice_posts_once() {
        let fx = fixture(vec!["reply".into()], 100).await;
        let draft = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(2), UserId(99))
            .await
            .unwrap();

        assert_eq!(fx.agent.approve(&draft.token, UserId(99)).await.unwrap(), Some(1));
        assert_eq!(fx.agent.approve(&draft.token, UserId(99)).await.unwrap(), None);
        assert_eq!(fx.replies.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn cancel_drops_draft_without_posting() {
        let fx = fixture(vec!["reply".into()], 100).await;
        let draft = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(2), UserId(99))
            .await
            .unwrap();

        assert!(!fx.agent.cancel(&draft.token, UserId(1)).await);
        assert!(fx.agent.cancel(&draft.token, UserId(99)).await);
        assert_eq!(fx.agent.approve(&draft.token, UserId(99)).await.unwrap(), None);
        assert!(fx.replies.sent().await.is_empty());
    }

    #[tokio::test]
    async fn empty_completion_is_a_provider_error() {
        let fx = fixture(vec!["   \n".into()], 100).await;
        let err = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(2), UserId(99))
            .await
            .unwrap_err();
        assert!(matches!(err, ScribeError::Provider { .. }));
        assert_eq!(fx.agent.pending().await, 0);
    }

    #[tokio::test]
    async fn unknown_anchor_is_a_channel_error() {
        let fx = fixture(vec!["reply".into()], 100).await;
        let err = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(404), UserId(99))
            .await
            .unwrap_err();
        assert!(matches!(err, ScribeError::Channel { .. }));
    }

    #[tokio::test]
    async fn failed_first_chunk_keeps_draft() {
        let fx = fixture(vec!["reply".into()], 100).await;
        let draft = fx
            .agent
            .draft(TEST_CHANNEL, MessageId(2), UserId(99))
            .await
            .unwrap();

        fx.replies.set_failing(true).await;
        assert!(fx.agent.approve(&draft.token, UserId(99)).await.is_err());
        assert_eq!(fx.agent.pending().await, 1);

        fx.replies.set_failing(false).await;
        assert_eq!(fx.agent.approve(&draft.token, UserId(99)).await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn hints_search_uses_configured_index() {
        let fx = fixture(vec![], 100).await;
        let cards = fx.agent.hints("patch");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "Harmony.Patch");
        // A method card is still offered on its kind bonus alone.
        let cards = fx.agent.hints("transpiler");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "Harmony.Patch");
    }
}
