//! Vote ledger transition logic.
//!
//! A voter holds at most one ledger row per target. Casting a vote is an
//! idempotent toggle: a repeated same-polarity cast is a no-op, an
//! opposite-polarity cast flips the row in place. Every action carries the
//! exact `vote_count` delta the repository must apply in the same
//! transaction, so the denormalized count stays equal to
//! `upvote rows - downvote rows` at all times.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// What kind of content a vote points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteTarget {
    Question,
    Answer,
}

impl VoteTarget {
    /// Wire/storage representation, matching the `votes.target_kind` CHECK
    /// constraint.
    pub fn as_str(self) -> &'static str {
        match self {
            VoteTarget::Question => "question",
            VoteTarget::Answer => "answer",
        }
    }

    /// Entity name used in NotFound errors.
    pub fn entity(self) -> &'static str {
        match self {
            VoteTarget::Question => "Question",
            VoteTarget::Answer => "Answer",
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// The action a cast resolves to, given the voter's existing ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastAction {
    /// No ledger row exists: insert one and shift the count by +/-1.
    Create { delta: i64 },
    /// A row with the same polarity exists: nothing changes.
    Noop,
    /// A row with the opposite polarity exists: flip it in place. The count
    /// shifts by +/-2 because the old vote is removed and the new one added
    /// in the same direction.
    Flip { delta: i64 },
}

/// Count contribution of a single vote: +1 for an upvote, -1 for a downvote.
pub fn polarity_delta(is_upvote: bool) -> i64 {
    if is_upvote {
        1
    } else {
        -1
    }
}

/// Resolve a cast against the voter's existing ledger polarity (if any).
pub fn cast_action(existing: Option<bool>, requested: bool) -> CastAction {
    match existing {
        None => CastAction::Create {
            delta: polarity_delta(requested),
        },
        Some(current) if current == requested => CastAction::Noop,
        Some(_) => CastAction::Flip {
            delta: 2 * polarity_delta(requested),
        },
    }
}

/// Count delta when a ledger row is retracted: the inverse of its
/// contribution.
pub fn retract_delta(was_upvote: bool) -> i64 {
    -polarity_delta(was_upvote)
}

/// Reject votes on the voter's own content before any ledger mutation.
pub fn ensure_not_self_vote(voter_id: DbId, author_id: DbId) -> Result<(), CoreError> {
    if voter_id == author_id {
        return Err(CoreError::InvalidOperation(
            "You cannot vote on your own content".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- cast_action ---------------------------------------------------------

    #[test]
    fn first_upvote_creates_with_plus_one() {
        assert_eq!(cast_action(None, true), CastAction::Create { delta: 1 });
    }

    #[test]
    fn first_downvote_creates_with_minus_one() {
        assert_eq!(cast_action(None, false), CastAction::Create { delta: -1 });
    }

    #[test]
    fn repeated_same_polarity_is_noop() {
        assert_eq!(cast_action(Some(true), true), CastAction::Noop);
        assert_eq!(cast_action(Some(false), false), CastAction::Noop);
    }

    #[test]
    fn flip_moves_count_by_exactly_two() {
        // down -> up: remove -1, add +1.
        assert_eq!(cast_action(Some(false), true), CastAction::Flip { delta: 2 });
        // up -> down: remove +1, add -1.
        assert_eq!(
            cast_action(Some(true), false),
            CastAction::Flip { delta: -2 }
        );
    }

    #[test]
    fn flip_delta_is_never_one() {
        for existing in [Some(true), Some(false)] {
            for requested in [true, false] {
                if let CastAction::Flip { delta } = cast_action(existing, requested) {
                    assert_eq!(delta.abs(), 2);
                }
            }
        }
    }

    // -- ledger invariant ----------------------------------------------------

    /// Replay an arbitrary cast/retract sequence through the transition
    /// functions and check the running count always equals
    /// `upvotes - downvotes` derived from the simulated ledger row.
    #[test]
    fn count_tracks_ledger_through_any_sequence() {
        let mut ledger: Option<bool> = None;
        let mut count: i64 = 0;

        let casts = [true, true, false, false, true, false];
        for requested in casts {
            match cast_action(ledger, requested) {
                CastAction::Create { delta } | CastAction::Flip { delta } => {
                    ledger = Some(requested);
                    count += delta;
                }
                CastAction::Noop => {}
            }
            let expected = match ledger {
                Some(true) => 1,
                Some(false) => -1,
                None => 0,
            };
            assert_eq!(count, expected);
        }

        // Retract the final vote and land back at zero.
        let was_upvote = ledger.take().unwrap();
        count += retract_delta(was_upvote);
        assert_eq!(count, 0);
    }

    // -- retract_delta -------------------------------------------------------

    #[test]
    fn retract_inverts_contribution() {
        assert_eq!(retract_delta(true), -1);
        assert_eq!(retract_delta(false), 1);
    }

    // -- ensure_not_self_vote ------------------------------------------------

    #[test]
    fn self_vote_is_rejected() {
        assert_matches!(
            ensure_not_self_vote(7, 7),
            Err(CoreError::InvalidOperation(_))
        );
    }

    #[test]
    fn distinct_voter_passes() {
        assert!(ensure_not_self_vote(7, 8).is_ok());
    }

    // -- VoteTarget ----------------------------------------------------------

    #[test]
    fn target_kind_strings_match_check_constraint() {
        assert_eq!(VoteTarget::Question.as_str(), "question");
        assert_eq!(VoteTarget::Answer.as_str(), "answer");
    }
}
