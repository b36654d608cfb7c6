use crate::rules::ScoreAward;
use crate::state::{
    GameClock, GameFormat, GameState, PendingPlay, Possession, Scoreboard, StateInvariantError,
    Timeouts,
};
use crate::team::Side;

use super::GameEvent;

/// Wraps mutable access to a staged [`GameState`] with structured sub-reducers.
///
/// Every sub-reducer appends the events its mutations imply, so a transition
/// cannot change the state without the event trail noticing.
pub struct StateReducer<'a> {
    state: &'a mut GameState,
    events: Vec<GameEvent>,
}

impl<'a> StateReducer<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn into_events(self) -> Vec<GameEvent> {
        self.events
    }

    pub fn clock(&mut self) -> ClockReducer<'_> {
        ClockReducer {
            clock: &mut self.state.clock,
            format: self.state.format,
            events: &mut self.events,
        }
    }

    pub fn scoreboard(&mut self) -> ScoreReducer<'_> {
        ScoreReducer {
            scoreboard: &mut self.state.scoreboard,
            events: &mut self.events,
        }
    }

    pub fn possession(&mut self) -> PossessionReducer<'_> {
        PossessionReducer {
            possession: &mut self.state.possession,
            format: self.state.format,
            events: &mut self.events,
        }
    }

    pub fn timeouts(&mut self) -> TimeoutReducer<'_> {
        TimeoutReducer {
            timeouts: &mut self.state.timeouts,
            per_half: self.state.format.timeouts_per_half,
            events: &mut self.events,
        }
    }

    pub fn take_pending(&mut self) -> Option<PendingPlay> {
        self.state.pending.take()
    }

    /// Installs an untimed play and lines the ball up for it.
    pub fn install_pending(&mut self, pending: PendingPlay) {
        match &pending {
            PendingPlay::Kickoff(setup) => {
                self.possession().line_up(setup.kicking, setup.spot, None);
                self.emit(GameEvent::KickoffPending {
                    kicking: setup.kicking,
                });
            }
            PendingPlay::PointAfter(setup) => {
                let length = self.state.format.field_length;
                let distance = setup.options.first().map_or(1, |o| o.distance.max(1));
                self.possession().line_up(
                    setup.scoring,
                    length.saturating_sub(distance),
                    Some(distance),
                );
                self.emit(GameEvent::PointAfterPending {
                    side: setup.scoring,
                });
            }
        }
        self.state.pending = Some(pending);
    }

    pub fn set_toss(&mut self, toss: crate::rules::CoinToss) {
        self.state.toss = Some(toss);
    }
}

pub struct ClockReducer<'a> {
    clock: &'a mut GameClock,
    format: GameFormat,
    events: &'a mut Vec<GameEvent>,
}

impl ClockReducer<'_> {
    /// Runs `seconds` off the clock, never past the end of the quarter.
    ///
    /// Returns the seconds actually consumed.
    pub fn run(&mut self, seconds: u32) -> u32 {
        let applied = seconds.min(self.clock.seconds_remaining);
        let was_running_down = self.clock.seconds_remaining > 0;
        self.clock.seconds_remaining -= applied;
        if was_running_down && self.clock.seconds_remaining == 0 {
            self.events.push(GameEvent::QuarterEnded {
                quarter: self.clock.quarter,
            });
        }
        applied
    }

    pub fn set_running(&mut self, running: bool) {
        self.clock.running = running && self.clock.seconds_remaining > 0;
    }

    pub fn start_period(&mut self, quarter: u8) {
        debug_assert!(quarter >= self.clock.quarter);
        self.clock.quarter = quarter;
        self.clock.seconds_remaining = self.format.period_seconds(quarter);
        self.clock.running = false;
        self.events.push(GameEvent::QuarterStarted { quarter });
    }
}

pub struct ScoreReducer<'a> {
    scoreboard: &'a mut Scoreboard,
    events: &'a mut Vec<GameEvent>,
}

impl ScoreReducer<'_> {
    pub fn award(&mut self, award: &ScoreAward) {
        self.scoreboard.add(award.side, u32::from(award.points));
        self.events.push(GameEvent::Score {
            side: award.side,
            kind: award.kind,
            points: award.points,
        });
    }
}

pub struct PossessionReducer<'a> {
    possession: &'a mut Possession,
    format: GameFormat,
    events: &'a mut Vec<GameEvent>,
}

impl PossessionReducer<'_> {
    /// Places `offense` on `ball_on` with a fresh series.
    ///
    /// `distance` overrides the series distance (point-after attempts).
    pub fn line_up(&mut self, offense: Side, ball_on: u8, distance: Option<u8>) {
        self.possession.offense = offense;
        self.possession.ball_on = ball_on;
        self.possession.down = 1;
        self.possession.distance = distance.unwrap_or_else(|| self.format.series_distance(ball_on));
    }

    /// Hands the ball to the defense at `end_spot` (offense's yard line).
    pub fn flip_at(&mut self, end_spot: i32) {
        let length = i32::from(self.format.field_length);
        let mirrored = (length - end_spot).clamp(1, length - 1);
        let new_offense = self.possession.offense.opponent();
        // Clamped into 1..length, so the conversion cannot fail.
        let ball_on = u8::try_from(mirrored).unwrap_or(self.format.field_length / 2);
        self.line_up(new_offense, ball_on, None);
    }

    /// Moves the ball `yards` and advances the series.
    pub fn advance(&mut self, yards: i16) {
        let length = i32::from(self.format.field_length);
        let end = (i32::from(self.possession.ball_on) + i32::from(yards)).clamp(1, length - 1);
        let ball_on = u8::try_from(end).unwrap_or(self.possession.ball_on);

        if i32::from(yards) >= i32::from(self.possession.distance) {
            self.line_up(self.possession.offense, ball_on, None);
            self.events.push(GameEvent::FirstDown {
                side: self.possession.offense,
                ball_on,
            });
        } else {
            let remaining = i32::from(self.possession.distance) - i32::from(yards);
            self.possession.ball_on = ball_on;
            self.possession.down = self.possession.down.saturating_add(1);
            self.possession.distance = u8::try_from(remaining).unwrap_or(u8::MAX);
        }
    }
}

pub struct TimeoutReducer<'a> {
    timeouts: &'a mut Timeouts,
    per_half: u8,
    events: &'a mut Vec<GameEvent>,
}

impl TimeoutReducer<'_> {
    pub fn charge(&mut self, side: Side) -> Result<(), StateInvariantError> {
        let slot = self.timeouts.slot_mut(side);
        if *slot == 0 {
            return Err(StateInvariantError::NoTimeoutsLeft { side });
        }
        *slot -= 1;
        let remaining = *slot;
        self.events.push(GameEvent::TimeoutCharged { side, remaining });
        Ok(())
    }

    pub fn reset(&mut self) {
        self.timeouts.home = self.per_half;
        self.timeouts.away = self.per_half;
        self.events.push(GameEvent::TimeoutsReset);
    }
}
