//! Resume constraints: conditions checked before a loaded game resumes.
//!
//! RULE: resume never hard-codes a precondition. Each one is a
//! ResumeConstraint, so new rules plug in without touching snapshot.rs.
//!
//! Saved games carry their constraints as serializable descriptors
//! ([`Constraint`]). Callers can add runtime-only checks by passing their
//! own [`ResumeConstraint`] objects to `SnapshotModel::resume_play_with`.

use crate::{
    error::{SaveGameError, SaveResult},
    session::{LiveSession, SeatView},
    types::SeatNumber,
};
use serde::{Deserialize, Serialize};

/// A named precondition on the session being resumed.
pub trait ResumeConstraint {
    /// Stable name, used in error reports.
    fn name(&self) -> &str;

    /// `Err(reason)` if the session doesn't satisfy this constraint.
    fn check(&self, session: &dyn LiveSession) -> Result<(), String>;
}

/// Seat-occupant constraints stored in a saved game.
/// Variants are appended per model version, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    SeatVacant { seat: SeatNumber },
    SeatHuman { seat: SeatNumber },
    SeatRobot { seat: SeatNumber },
    SeatBuiltInRobot { seat: SeatNumber },
    /// Seat must hold an automated player of this class.
    SeatRobotClass { seat: SeatNumber, class: String },
}

impl Constraint {
    pub fn seat(&self) -> SeatNumber {
        match self {
            Self::SeatVacant { seat }
            | Self::SeatHuman { seat }
            | Self::SeatRobot { seat }
            | Self::SeatBuiltInRobot { seat }
            | Self::SeatRobotClass { seat, .. } => *seat,
        }
    }

    fn occupant<'a>(
        &self,
        session: &'a dyn LiveSession,
    ) -> Result<Option<&'a dyn SeatView>, String> {
        let seat = self.seat();
        if seat >= session.max_players() {
            return Err(format!(
                "seat {seat} does not exist (max players: {})",
                session.max_players()
            ));
        }
        if session.is_seat_vacant(seat) {
            return Ok(None);
        }
        session
            .seat(seat)
            .map(Some)
            .ok_or_else(|| format!("seat {seat} has no player"))
    }
}

impl ResumeConstraint for Constraint {
    fn name(&self) -> &str {
        match self {
            Self::SeatVacant { .. }       => "seat_vacant",
            Self::SeatHuman { .. }        => "seat_human",
            Self::SeatRobot { .. }        => "seat_robot",
            Self::SeatBuiltInRobot { .. } => "seat_built_in_robot",
            Self::SeatRobotClass { .. }   => "seat_robot_class",
        }
    }

    fn check(&self, session: &dyn LiveSession) -> Result<(), String> {
        let seat = self.seat();
        let occupant = self.occupant(session)?;
        let ok = match (self, occupant) {
            (Self::SeatVacant { .. }, occupant) => occupant.is_none(),
            (_, None) => return Err(format!("seat {seat} is vacant")),
            (Self::SeatHuman { .. }, Some(player)) => !player.is_robot(),
            (Self::SeatRobot { .. }, Some(player)) => player.is_robot(),
            (Self::SeatBuiltInRobot { .. }, Some(player)) => player.is_built_in_robot(),
            (Self::SeatRobotClass { class, .. }, Some(player)) => {
                player.robot_class() == Some(class.as_str())
            }
        };
        if ok {
            Ok(())
        } else {
            Err(format!("seat {seat} occupant does not match"))
        }
    }
}

/// Constraints saved with a game. Empty unless the saver asked for some.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }

    /// Check every stored constraint, then every `extra` one, in order.
    /// Stops at the first one not met.
    pub fn check_all(
        &self,
        session: &dyn LiveSession,
        extra: &[&dyn ResumeConstraint],
    ) -> SaveResult<()> {
        let stored = self.constraints.iter().map(|c| c as &dyn ResumeConstraint);
        for constraint in stored.chain(extra.iter().copied()) {
            if let Err(reason) = constraint.check(session) {
                log::warn!(
                    "game '{}': resume constraint '{}' not met: {reason}",
                    session.name(),
                    constraint.name()
                );
                return Err(SaveGameError::ConstraintViolation {
                    name: constraint.name().to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}
