//! Authoritative state of one in-progress game.
//!
//! [`GameState`] is owned by the orchestrator and mutated exclusively through
//! [`StateUpdater`](crate::StateUpdater). Everything else observes it through
//! a [`Snapshot`].

mod delta;
mod error;
mod format;
mod snapshot;

pub use delta::StateDelta;
pub use error::StateInvariantError;
pub use format::GameFormat;
pub use snapshot::Snapshot;

use crate::execution::PlayKind;
use crate::rules::{CoinToss, ExtraPointSetup, KickoffSetup};
use crate::team::Side;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameClock {
    pub quarter: u8,
    pub seconds_remaining: u32,
    /// Whether the clock runs between the previous play and the next snap.
    pub running: bool,
}

impl GameClock {
    pub const fn expired(&self) -> bool {
        self.seconds_remaining == 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoreboard {
    pub home: u32,
    pub away: u32,
}

impl Scoreboard {
    pub const fn points(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub const fn is_tied(&self) -> bool {
        self.home == self.away
    }

    pub fn leader(&self) -> Option<Side> {
        match self.home.cmp(&self.away) {
            core::cmp::Ordering::Greater => Some(Side::Home),
            core::cmp::Ordering::Less => Some(Side::Away),
            core::cmp::Ordering::Equal => None,
        }
    }

    pub(crate) fn add(&mut self, side: Side, points: u32) {
        match side {
            Side::Home => self.home += points,
            Side::Away => self.away += points,
        }
    }
}

/// Team with the ball and where the series stands.
///
/// `ball_on` is measured from the offense's own goal line; reaching
/// `field_length` is a touchdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Possession {
    pub offense: Side,
    pub ball_on: u8,
    pub down: u8,
    pub distance: u8,
}

impl Possession {
    pub const fn defense(&self) -> Side {
        self.offense.opponent()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeouts {
    pub home: u8,
    pub away: u8,
}

impl Timeouts {
    pub const fn remaining(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// Untimed play owed before normal scrimmage resumes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PendingPlay {
    Kickoff(KickoffSetup),
    PointAfter(ExtraPointSetup),
}

impl PendingPlay {
    pub const fn kind(&self) -> PlayKind {
        match self {
            Self::Kickoff(_) => PlayKind::Kickoff,
            Self::PointAfter(_) => PlayKind::PointAfter,
        }
    }
}

/// Canonical game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Incremented by every successful updater application.
    pub(crate) revision: u64,
    pub format: GameFormat,
    pub clock: GameClock,
    pub scoreboard: Scoreboard,
    pub possession: Possession,
    pub pending: Option<PendingPlay>,
    pub timeouts: Timeouts,
    /// Opening coin toss, once resolved.
    pub toss: Option<CoinToss>,
}

impl GameState {
    /// Pre-game state: first quarter on a full, stopped clock.
    ///
    /// Possession is a placeholder until the opening transition installs the
    /// kickoff.
    pub fn new(format: GameFormat) -> Self {
        Self {
            revision: 0,
            format,
            clock: GameClock {
                quarter: 1,
                seconds_remaining: format.quarter_seconds,
                running: false,
            },
            scoreboard: Scoreboard::default(),
            possession: Possession {
                offense: Side::Home,
                ball_on: format.field_length / 4,
                down: 1,
                distance: format.first_down_yards,
            },
            pending: None,
            timeouts: Timeouts {
                home: format.timeouts_per_half,
                away: format.timeouts_per_half,
            },
            toss: None,
        }
    }

    /// Number of updater applications behind this state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn pending_kind(&self) -> Option<PlayKind> {
        self.pending.as_ref().map(PendingPlay::kind)
    }

    pub fn is_point_after_pending(&self) -> bool {
        matches!(self.pending, Some(PendingPlay::PointAfter(_)))
    }

    /// Checks the structural invariants every committed state satisfies.
    pub fn check_invariants(&self) -> Result<(), StateInvariantError> {
        let f = &self.format;
        let p = &self.possession;

        if p.ball_on > f.field_length {
            return Err(StateInvariantError::BallOutOfBounds {
                ball_on: p.ball_on,
                field_length: f.field_length,
            });
        }
        if p.down == 0 || p.down > f.max_downs {
            return Err(StateInvariantError::DownOutOfRange {
                down: p.down,
                max_downs: f.max_downs,
            });
        }
        if p.distance == 0 {
            return Err(StateInvariantError::NonPositiveDistance);
        }

        let period = f.period_seconds(self.clock.quarter);
        if self.clock.quarter == 0 || self.clock.seconds_remaining > period {
            return Err(StateInvariantError::ClockOutOfRange {
                quarter: self.clock.quarter,
                seconds: self.clock.seconds_remaining,
                period,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn nfl_format() -> GameFormat {
        GameFormat {
            quarter_seconds: 900,
            regulation_quarters: 4,
            quarters_per_half: 2,
            overtime_seconds: 600,
            field_length: 100,
            first_down_yards: 10,
            max_downs: 4,
            players_on_field: 11,
            play_clock_seconds: 40,
            max_play_seconds: 60,
            timeouts_per_half: 3,
        }
    }

    #[test]
    fn new_state_satisfies_invariants() {
        let state = GameState::new(nfl_format());
        assert_eq!(state.check_invariants(), Ok(()));
        assert_eq!(state.clock.seconds_remaining, 900);
        assert_eq!(state.timeouts.remaining(Side::Away), 3);
        assert!(state.pending.is_none());
    }

    #[test]
    fn invariant_violations_are_reported() {
        let mut state = GameState::new(nfl_format());
        state.possession.down = 5;
        assert!(matches!(
            state.check_invariants(),
            Err(StateInvariantError::DownOutOfRange { down: 5, .. })
        ));

        let mut state = GameState::new(nfl_format());
        state.possession.ball_on = 101;
        assert!(matches!(
            state.check_invariants(),
            Err(StateInvariantError::BallOutOfBounds { .. })
        ));

        let mut state = GameState::new(nfl_format());
        state.clock.seconds_remaining = 901;
        assert!(matches!(
            state.check_invariants(),
            Err(StateInvariantError::ClockOutOfRange { .. })
        ));
    }

    #[test]
    fn scoreboard_leader() {
        let mut board = Scoreboard::default();
        assert!(board.is_tied());
        board.add(Side::Away, 3);
        assert_eq!(board.leader(), Some(Side::Away));
        assert_eq!(board.points(Side::Away), 3);
    }
}
