//! Query routing for the doctor and admin dashboards
//!
//! Keyword triage comes from `emr-core`; anything it cannot answer goes to
//! the completion service, or to a canned placeholder when smart replies
//! are switched off.

use std::sync::Arc;

use emr_core::{PatientDirectory, normalize_query, triage_admin, triage_doctor};

use crate::ai::{CompletionClient, SMART_REPLY_APOLOGY};
use crate::session::Role;

/// Answers dashboard queries
#[derive(Clone)]
pub struct Assistant {
    directory: Arc<PatientDirectory>,
    smart_replies: Option<CompletionClient>,
}

impl Assistant {
    /// `smart_replies` is `None` when forwarding to the completion service is disabled
    pub fn new(directory: Arc<PatientDirectory>, smart_replies: Option<CompletionClient>) -> Self {
        Self {
            directory,
            smart_replies,
        }
    }

    pub fn directory(&self) -> &PatientDirectory {
        &self.directory
    }

    pub fn smart_replies_enabled(&self) -> bool {
        self.smart_replies.is_some()
    }

    /// Answer a query typed on the doctor dashboard
    pub async fn answer_doctor(&self, raw_query: &str) -> String {
        let query = normalize_query(raw_query);
        let triage = triage_doctor(&query, &self.directory);
        tracing::debug!(outcome = triage.label(), "Doctor query triaged");

        match triage.reply() {
            Some(reply) => {
                record_reply(Role::Doctor, triage.label());
                reply
            }
            None => self.delegate(Role::Doctor, &query).await,
        }
    }

    /// Answer a query typed on the admin dashboard
    pub async fn answer_admin(&self, raw_query: &str) -> String {
        let query = normalize_query(raw_query);
        let triage = triage_admin(&query);
        tracing::debug!(outcome = triage.label(), "Admin query triaged");

        match triage.reply() {
            Some(reply) => {
                record_reply(Role::Admin, triage.label());
                reply.to_string()
            }
            None => self.delegate(Role::Admin, &query).await,
        }
    }

    async fn delegate(&self, view: Role, query: &str) -> String {
        let Some(client) = &self.smart_replies else {
            record_reply(view, "placeholder");
            return placeholder(view).to_string();
        };

        match client.complete(query).await {
            Ok(text) => {
                record_reply(view, "smart_reply");
                text
            }
            Err(e) => {
                tracing::warn!(
                    view = %view,
                    kind = e.kind(),
                    error = %e,
                    "Smart reply failed"
                );
                record_reply(view, "apology");
                SMART_REPLY_APOLOGY.to_string()
            }
        }
    }
}

/// Canned reply used when smart replies are disabled
fn placeholder(view: Role) -> &'static str {
    match view {
        Role::Doctor => "Doctor view: I'm analyzing your query...",
        Role::Admin => "Admin view: I'm analyzing your query...",
    }
}

fn record_reply(view: Role, source: &'static str) {
    metrics::counter!(
        "assistant_replies_total",
        "view" => view.as_str(),
        "source" => source
    )
    .increment(1);
}
