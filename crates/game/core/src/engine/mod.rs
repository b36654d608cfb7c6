//! State mutation pipeline.
//!
//! The [`StateUpdater`] is the only writer of [`GameState`]. It consumes
//! immutable decisions produced elsewhere (execution data from models, rulings
//! and transitions from the rules oracle) and applies them through the
//! three-phase pipeline:
//!
//! pre_validate → apply → post_validate
//!
//! The apply phase runs on a staged copy; the live state is replaced only after
//! post-validation succeeds, so a failed application leaves it untouched.

mod errors;
mod events;
mod reducer;
mod transition;

pub use errors::{ApplyError, TransitionPhase, TransitionPhaseError};
pub use events::GameEvent;
pub use reducer::{ClockReducer, PossessionReducer, ScoreReducer, StateReducer, TimeoutReducer};

use crate::execution::ExecutionData;
use crate::rules::{PlayRuling, RulesTransition};
use crate::state::{GameState, Snapshot};

use transition::{PlayApplication, RulesApplication, drive_transition};

/// Sole mutation entry point for a [`GameState`].
pub struct StateUpdater<'a> {
    state: &'a mut GameState,
}

impl<'a> StateUpdater<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Applies one adjudicated play.
    ///
    /// `snapshot` must be the snapshot the play was decided on; anything older
    /// than the live state is rejected.
    pub fn apply_play(
        &mut self,
        snapshot: &Snapshot,
        execution: &ExecutionData,
        ruling: &PlayRuling,
    ) -> Result<Vec<GameEvent>, ApplyError> {
        let application = PlayApplication {
            snapshot,
            execution,
            ruling,
        };
        drive_transition(&application, self.state).map_err(ApplyError::Play)
    }

    /// Applies a between-plays transition: period start, timeout reset,
    /// kickoff installation, toss.
    pub fn apply_transition(
        &mut self,
        snapshot: &Snapshot,
        transition: &RulesTransition,
    ) -> Result<Vec<GameEvent>, ApplyError> {
        let application = RulesApplication {
            snapshot,
            transition,
        };
        drive_transition(&application, self.state).map_err(ApplyError::Transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{
        KickoffExecution, KickoffResult, PlayOutcome, PointAfterExecution, ScrimmageExecution,
    };
    use crate::rules::{
        KickType, KickoffSetup, PeriodStart, PointAfterChoice, PossessionChange, RulesOracle,
        ScoreAward, ScoringKind,
    };
    use crate::rules::NflRules;
    use crate::state::{PendingPlay, StateInvariantError};
    use crate::team::{Assignment, Playbook, Side};

    fn scrimmage(call: &str, outcome: PlayOutcome, elapsed: u32) -> ExecutionData {
        let book = Playbook::standard(11);
        ExecutionData::Scrimmage(ScrimmageExecution {
            runoff: 0,
            timeout: None,
            offense_call: book.find(call).cloned().unwrap(),
            defense_call: book.find("base 4-3").cloned().unwrap(),
            offense_personnel: Assignment::default(),
            defense_personnel: Assignment::default(),
            outcome,
            elapsed,
        })
    }

    fn kickoff_setup() -> KickoffSetup {
        KickoffSetup {
            kicking: Side::Away,
            receiving: Side::Home,
            kick_type: KickType::Kickoff,
            spot: 35,
            touchback_spot: 35,
        }
    }

    #[test]
    fn first_down_keeps_offense() {
        let mut state = GameState::new(NflRules::new().format());
        let snap = Snapshot::capture(&state);
        let events = StateUpdater::new(&mut state)
            .apply_play(&snap, &scrimmage("power", PlayOutcome::gain(10), 6), &PlayRuling::default())
            .unwrap();

        assert_eq!(state.revision, 1);
        assert_eq!(state.possession.offense, Side::Home);
        assert_eq!((state.possession.down, state.possession.distance), (1, 10));
        assert_eq!(state.possession.ball_on, 35);
        assert_eq!(state.clock.seconds_remaining, 894);
        assert!(state.clock.running);
        assert!(matches!(events.as_slice(), [GameEvent::FirstDown { .. }]));
    }

    #[test]
    fn stale_snapshot_is_rejected_without_mutation() {
        let mut state = GameState::new(NflRules::new().format());
        let stale = Snapshot::capture(&state);
        let play = scrimmage("power", PlayOutcome::gain(3), 5);
        StateUpdater::new(&mut state)
            .apply_play(&stale, &play, &PlayRuling::default())
            .unwrap();
        let before = state.clone();

        let err = StateUpdater::new(&mut state)
            .apply_play(&stale, &play, &PlayRuling::default())
            .unwrap_err();
        assert_eq!(err.phase(), TransitionPhase::PreValidate);
        assert_eq!(
            err.invariant(),
            &StateInvariantError::StaleSnapshot {
                snapshot: 0,
                state: 1
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn scrimmage_rejected_while_kickoff_pending() {
        let mut state = GameState::new(NflRules::new().format());
        state.pending = Some(PendingPlay::Kickoff(kickoff_setup()));
        let snap = Snapshot::capture(&state);

        let err = StateUpdater::new(&mut state)
            .apply_play(&snap, &scrimmage("power", PlayOutcome::gain(3), 5), &PlayRuling::default())
            .unwrap_err();
        assert!(matches!(
            err.invariant(),
            StateInvariantError::PendingMismatch { .. }
        ));
        assert_eq!(state.revision, 0);
    }

    #[test]
    fn kickoff_return_flips_possession() {
        let mut state = GameState::new(NflRules::new().format());
        let snap = Snapshot::capture(&state);
        StateUpdater::new(&mut state)
            .apply_transition(
                &snap,
                &RulesTransition {
                    kickoff: Some(kickoff_setup()),
                    ..RulesTransition::default()
                },
            )
            .unwrap();
        assert_eq!(state.possession.offense, Side::Away);

        let snap = Snapshot::capture(&state);
        let execution = ExecutionData::Kickoff(KickoffExecution {
            setup: kickoff_setup(),
            result: KickoffResult {
                distance: 60,
                touchback: false,
                return_yards: 22,
            },
            elapsed: 6,
        });
        let ruling = PlayRuling {
            change: Some(PossessionChange::Kickoff),
            placement: Some(27),
            ..PlayRuling::default()
        };
        let events = StateUpdater::new(&mut state)
            .apply_play(&snap, &execution, &ruling)
            .unwrap();

        assert!(state.pending.is_none());
        assert_eq!(state.possession.offense, Side::Home);
        assert_eq!(state.possession.ball_on, 27);
        assert!(!state.clock.running);
        assert_eq!(
            events,
            vec![GameEvent::KickoffReturned {
                receiving: Side::Home,
                ball_on: 27
            }]
        );
    }

    #[test]
    fn point_after_awards_and_installs_kickoff() {
        let rules = NflRules::new();
        let mut state = GameState::new(rules.format());
        let setup = rules
            .extra_point_setup(&Snapshot::capture(&state), Side::Home)
            .unwrap();
        state.pending = Some(PendingPlay::PointAfter(setup.clone()));
        let snap = Snapshot::capture(&state);

        let execution = ExecutionData::PointAfter(PointAfterExecution {
            setup,
            choice: PointAfterChoice::Kick,
            good: true,
        });
        let ruling = rules.adjudicate(&snap, &execution);
        let events = StateUpdater::new(&mut state)
            .apply_play(&snap, &execution, &ruling)
            .unwrap();

        assert_eq!(state.scoreboard.home, 1);
        assert_eq!(state.clock.seconds_remaining, 900);
        assert!(matches!(state.pending, Some(PendingPlay::Kickoff(k)) if k.kicking == Side::Home));
        assert_eq!(
            events,
            vec![
                GameEvent::Score {
                    side: Side::Home,
                    kind: ScoringKind::ExtraPointKick,
                    points: 1
                },
                GameEvent::KickoffPending {
                    kicking: Side::Home
                },
            ]
        );
    }

    #[test]
    fn timeout_stops_clock_and_charges_side() {
        let mut state = GameState::new(NflRules::new().format());
        state.clock.running = true;
        let snap = Snapshot::capture(&state);
        let mut play = scrimmage("power", PlayOutcome::gain(2), 5);
        if let ExecutionData::Scrimmage(s) = &mut play {
            s.timeout = Some(Side::Away);
        }

        StateUpdater::new(&mut state)
            .apply_play(&snap, &play, &PlayRuling::default())
            .unwrap();
        assert_eq!(state.timeouts.away, 2);
        assert!(!state.clock.running);
    }

    #[test]
    fn period_start_resets_clock() {
        let mut state = GameState::new(NflRules::new().format());
        state.clock.seconds_remaining = 0;
        let snap = Snapshot::capture(&state);
        let events = StateUpdater::new(&mut state)
            .apply_transition(
                &snap,
                &RulesTransition {
                    period: Some(PeriodStart {
                        quarter: 2,
                        seconds: 900,
                    }),
                    ..RulesTransition::default()
                },
            )
            .unwrap();
        assert_eq!(state.clock.quarter, 2);
        assert_eq!(state.clock.seconds_remaining, 900);
        assert_eq!(events, vec![GameEvent::QuarterStarted { quarter: 2 }]);
    }

    #[test]
    fn score_reaches_scoreboard_exactly() {
        let mut state = GameState::new(NflRules::new().format());
        state.possession.ball_on = 95;
        let snap = Snapshot::capture(&state);
        let ruling = PlayRuling {
            award: Some(ScoreAward {
                side: Side::Home,
                kind: ScoringKind::Touchdown,
                points: 6,
            }),
            ..PlayRuling::default()
        };
        StateUpdater::new(&mut state)
            .apply_play(&snap, &scrimmage("power", PlayOutcome::gain(5), 4), &ruling)
            .unwrap();
        assert_eq!(state.scoreboard.home, 6);
        assert_eq!(state.scoreboard.away, 0);
    }
}
