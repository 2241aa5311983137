//! Best-effort provisioning of a user on the realtime platform.
//!
//! Before a user-scoped token is handed out, the user record is upserted
//! and the required channel memberships and feed follows are set up so the
//! token is immediately usable. Every call here is best-effort: a failure
//! is recorded and logged, never propagated, because a missing membership
//! only degrades the experience while the token itself still works. All
//! calls are idempotent (upsert, add-member, follow), so repeating a plan
//! is always safe.

use tracing::warn;

use crate::services::gateways::{FeedFollow, RealtimeAdmin, RealtimeUser};

/// Everything to set up for one principal. Built per request, executed
/// once, discarded.
#[derive(Debug, Clone)]
pub struct ProvisioningPlan {
    pub user: RealtimeUser,
    /// Channels (cid form) the user is joined to.
    pub channels: Vec<String>,
    pub follows: Vec<FeedFollow>,
}

impl ProvisioningPlan {
    pub fn for_user(user: RealtimeUser) -> Self {
        Self {
            user,
            channels: Vec::new(),
            follows: Vec::new(),
        }
    }

    pub fn with_channels(mut self, channels: Vec<String>) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_follows(mut self, follows: Vec<FeedFollow>) -> Self {
        self.follows = follows;
        self
    }
}

/// What happened while executing a plan. Failures are captured here so the
/// caller can log them and tests can assert on swallowed errors.
#[derive(Debug, Default)]
pub struct ProvisionOutcome {
    pub attempted: usize,
    pub failures: Vec<String>,
}

impl ProvisionOutcome {
    fn record(&mut self, what: &str, result: Result<(), crate::error::AppError>) {
        self.attempted += 1;
        if let Err(e) = result {
            warn!(call = %what, error = %e, "provisioning call failed, continuing");
            self.failures.push(format!("{what}: {e}"));
        }
    }

    pub fn fully_applied(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute a plan sequentially. No retries; the external API's upsert
/// semantics are the only idempotency mechanism.
pub async fn execute(
    admin: &dyn RealtimeAdmin,
    credential: &str,
    plan: &ProvisioningPlan,
) -> ProvisionOutcome {
    let mut outcome = ProvisionOutcome::default();

    outcome.record(
        "upsert_user",
        admin.upsert_user(credential, &plan.user).await,
    );

    for cid in &plan.channels {
        outcome.record(
            &format!("ensure_channel {cid}"),
            admin.ensure_channel(credential, cid).await,
        );
        outcome.record(
            &format!("add_member {cid}"),
            admin.add_member(credential, cid, &plan.user.id).await,
        );
    }

    for follow in &plan.follows {
        outcome.record(
            &format!("follow {} -> {}", follow.source, follow.target),
            admin.follow_feed(credential, follow).await,
        );
    }

    outcome
}
