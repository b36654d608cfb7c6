use crate::team::Side;

use super::{GameState, Possession};

/// Summary of what one application changed.
///
/// Derived by comparing the state before and after, so it can never disagree
/// with the trajectory a replay reproduces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    /// Game time consumed, after clamping to the quarter boundary.
    pub seconds_run: u32,
    pub home_points: u32,
    pub away_points: u32,
    pub possession_before: Possession,
    pub possession_after: Possession,
    pub quarter_before: u8,
    pub quarter_after: u8,
}

impl StateDelta {
    pub fn from_states(before: &GameState, after: &GameState) -> Self {
        // A period start resets the clock; only time run inside one quarter counts.
        let seconds_run = if before.clock.quarter == after.clock.quarter {
            before
                .clock
                .seconds_remaining
                .saturating_sub(after.clock.seconds_remaining)
        } else {
            0
        };

        Self {
            seconds_run,
            home_points: after.scoreboard.home.saturating_sub(before.scoreboard.home),
            away_points: after.scoreboard.away.saturating_sub(before.scoreboard.away),
            possession_before: before.possession,
            possession_after: after.possession,
            quarter_before: before.clock.quarter,
            quarter_after: after.clock.quarter,
        }
    }

    pub fn points(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_points,
            Side::Away => self.away_points,
        }
    }

    pub fn possession_changed(&self) -> bool {
        self.possession_before.offense != self.possession_after.offense
    }

    /// Returns true if nothing observable changed.
    pub fn is_empty(&self) -> bool {
        self.seconds_run == 0
            && self.home_points == 0
            && self.away_points == 0
            && self.possession_before == self.possession_after
            && self.quarter_before == self.quarter_after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::nfl_format;

    #[test]
    fn delta_tracks_points_and_time() {
        let before = GameState::new(nfl_format());
        let mut after = before.clone();
        after.clock.seconds_remaining -= 12;
        after.scoreboard.away += 3;
        after.possession.offense = Side::Away;

        let delta = StateDelta::from_states(&before, &after);
        assert_eq!(delta.seconds_run, 12);
        assert_eq!(delta.points(Side::Away), 3);
        assert_eq!(delta.points(Side::Home), 0);
        assert!(delta.possession_changed());
        assert!(!delta.is_empty());
        assert!(StateDelta::from_states(&before, &before).is_empty());
    }
}
