// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade; nothing is exported unless the embedding
//! process installs a recorder.

use metrics::describe_counter;

/// Register all Scribe metric descriptions.
pub fn register_metrics() {
    describe_counter!("scribe_drafts_total", "Drafts by lifecycle outcome");
    describe_counter!("scribe_chunks_posted_total", "Reply chunks posted to channels");
}

pub fn record_draft_created() {
    metrics::counter!("scribe_drafts_total", "outcome" => "created").increment(1);
}

pub fn record_draft_approved(chunks: usize) {
    metrics::counter!("scribe_drafts_total", "outcome" => "approved").increment(1);
    metrics::counter!("scribe_chunks_posted_total").increment(chunks as u64);
}

pub fn record_draft_cancelled() {
    metrics::counter!("scribe_drafts_total", "outcome" => "cancelled").increment(1);
}
