//! Vote ledger outcome and stats types.
//!
//! The ledger row itself is only ever read as its polarity inside the vote
//! transaction, so there is no row struct here; these are the values the
//! repository hands back to the handlers.

use quorum_core::types::DbId;
use serde::Serialize;

/// Result of a cast, resolved inside the vote transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOutcome {
    /// A ledger row was created or flipped; the count was adjusted.
    Accepted { vote_count: i64 },
    /// The voter already held a same-polarity vote; nothing changed.
    Noop { vote_count: i64 },
    /// The target row no longer exists.
    TargetMissing,
}

/// Result of a retraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetractOutcome {
    /// The ledger row was deleted; the count was adjusted.
    Removed { vote_count: i64 },
    /// The voter held no vote on this target.
    NotVoted,
    /// The target row no longer exists.
    TargetMissing,
}

/// Aggregate vote statistics recomputed from the ledger (audit view).
#[derive(Debug, Serialize)]
pub struct VoteStats {
    pub target_id: DbId,
    pub total_votes: i64,
    pub upvotes: i64,
    pub downvotes: i64,
    /// The viewing user's own polarity, if authenticated and voted.
    pub viewer_vote: Option<bool>,
}
