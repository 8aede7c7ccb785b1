//! Event participants and participant-set reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::payment::PaymentType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantType {
    Organizer,
    User,
}

impl ParticipantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantType::Organizer => "organizer",
            ParticipantType::User => "user",
        }
    }
}

impl fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "organizer" => Ok(ParticipantType::Organizer),
            "user" => Ok(ParticipantType::User),
            other => Err(format!("unknown participant type '{}'", other)),
        }
    }
}

/// One row of an event's participant list.
///
/// `payment_type` is the type resolved at subscription time and is never
/// refreshed afterwards. Organizers carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParticipant {
    pub event_id: EventId,
    pub user_id: UserId,
    pub participant_type: ParticipantType,
    pub payment_type: Option<PaymentType>,
    pub created_at: Timestamp,
    pub dive_count: u32,
}

impl EventParticipant {
    pub fn organizer(event_id: EventId, user_id: UserId, now: Timestamp) -> Self {
        Self {
            event_id,
            user_id,
            participant_type: ParticipantType::Organizer,
            payment_type: None,
            created_at: now,
            dive_count: 0,
        }
    }

    pub fn user(
        event_id: EventId,
        user_id: UserId,
        payment_type: Option<PaymentType>,
        now: Timestamp,
    ) -> Self {
        Self {
            event_id,
            user_id,
            participant_type: ParticipantType::User,
            payment_type,
            created_at: now,
            dive_count: 0,
        }
    }

    pub fn is_organizer(&self) -> bool {
        self.participant_type == ParticipantType::Organizer
    }
}

/// Number of seats taken. Organizer rows do not occupy a seat.
pub fn seats_taken(participants: &[EventParticipant]) -> usize {
    participants.iter().filter(|p| !p.is_organizer()).count()
}

/// Outcome of comparing stored USER rows against a requested user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDiff {
    /// Rows kept untouched, with their original `created_at`.
    pub retained: Vec<EventParticipant>,
    pub removed: Vec<UserId>,
    /// Users needing a new row, in request order.
    pub added: Vec<UserId>,
}

impl ParticipantDiff {
    /// Seats occupied once the diff is applied.
    pub fn resulting_seats(&self) -> usize {
        self.retained.len() + self.added.len()
    }
}

/// Diffs the USER rows of `existing` against `requested`.
///
/// The organizer is dropped from `requested` and duplicates are ignored.
/// Organizer rows in `existing` are left out of the diff entirely.
pub fn diff_participants(
    existing: &[EventParticipant],
    requested: &[UserId],
    organizer: &UserId,
) -> ParticipantDiff {
    let mut seen = HashSet::new();
    let wanted: Vec<&UserId> = requested
        .iter()
        .filter(|u| *u != organizer)
        .filter(|u| seen.insert((*u).clone()))
        .collect();

    let mut diff = ParticipantDiff::default();
    let mut present = HashSet::new();

    for row in existing.iter().filter(|p| !p.is_organizer()) {
        if seen.contains(&row.user_id) {
            present.insert(row.user_id.clone());
            diff.retained.push(row.clone());
        } else {
            diff.removed.push(row.user_id.clone());
        }
    }

    diff.added = wanted
        .into_iter()
        .filter(|u| !present.contains(*u))
        .cloned()
        .collect();

    diff
}

/// Participant row changes persisted together with an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantChanges {
    pub removed: Vec<UserId>,
    pub inserted: Vec<EventParticipant>,
    /// When set, every existing organizer row is replaced by this one.
    pub organizer: Option<EventParticipant>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    fn row(event_id: EventId, user: &str) -> EventParticipant {
        EventParticipant::user(event_id, uid(user), Some(PaymentType::OneTime), Timestamp::now())
    }

    #[test]
    fn diff_keeps_retained_rows_and_splits_the_rest() {
        let event_id = EventId::new();
        let a = row(event_id, "a");
        let b = row(event_id, "b");
        let existing = vec![a, b.clone()];

        let diff = diff_participants(&existing, &[uid("b"), uid("c")], &uid("org"));

        assert_eq!(diff.retained, vec![b]);
        assert_eq!(diff.removed, vec![uid("a")]);
        assert_eq!(diff.added, vec![uid("c")]);
        assert_eq!(diff.resulting_seats(), 2);
    }

    #[test]
    fn diff_ignores_organizer_and_duplicates() {
        let event_id = EventId::new();
        let existing = vec![EventParticipant::organizer(event_id, uid("org"), Timestamp::now())];

        let diff = diff_participants(&existing, &[uid("org"), uid("c"), uid("c")], &uid("org"));

        assert!(diff.retained.is_empty());
        assert!(diff.removed.is_empty());
        assert_eq!(diff.added, vec![uid("c")]);
    }

    #[test]
    fn seats_exclude_organizer() {
        let event_id = EventId::new();
        let rows = vec![
            EventParticipant::organizer(event_id, uid("org"), Timestamp::now()),
            row(event_id, "a"),
        ];
        assert_eq!(seats_taken(&rows), 1);
    }
}
