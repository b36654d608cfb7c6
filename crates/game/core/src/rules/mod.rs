//! League rules as a stateless oracle.
//!
//! A [`RulesOracle`] answers "what should happen" queries over snapshots and
//! execution data. It never mutates state: every answer is an immutable
//! decision object that the [`StateUpdater`](crate::StateUpdater) consumes.
//!
//! Leagues implement the four required methods and override the provided ones
//! only where their rules differ. [`NflRules`] and [`CflRules`] are the two
//! shipped rule sets.

mod adjudicate;
mod cfl;
mod decision;
mod error;
mod nfl;
mod validate;

pub use cfl::CflRules;
pub use nfl::NflRules;
pub use decision::{
    BoundaryKind, BoundaryRuling, Chooser, CoinToss, DriveEndReason, DriveVerdict,
    ExtraPointSetup, GameEndReason, GameStart, GameVerdict, KickType, KickoffSetup, OvertimeRule,
    PeriodStart, PlayRuling, PointAfterChoice, PointAfterOption, PossessionChange, RulesTransition,
    ScoreAward, ScoringKind, ScoringTable, TossChoice,
};
pub use error::RuleViolation;
pub use validate::{check_pending, check_play_ruling, check_transition};

use crate::engine::GameEvent;
use crate::execution::ExecutionData;
use crate::state::{GameFormat, Snapshot};
use crate::team::Side;

/// Decision surface every league implements.
///
/// Implementations must be `Send + Sync` and carry no mutable state: one
/// instance is shared by all concurrent replications.
pub trait RulesOracle: Send + Sync {
    /// Short league identifier recorded in every game record.
    fn league(&self) -> &'static str;

    fn format(&self) -> GameFormat;

    fn scoring_table(&self) -> &ScoringTable;

    fn overtime(&self) -> OvertimeRule;

    // ===== league spots =====

    fn kickoff_spot(&self) -> u8 {
        35
    }

    fn safety_kick_spot(&self) -> u8 {
        20
    }

    fn kickoff_touchback_spot(&self) -> u8 {
        35
    }

    /// Receiving spot after a touchback on anything but a kickoff.
    fn touchback_spot(&self) -> u8 {
        20
    }

    /// Points the kicking team earns when a kick dies in the end zone.
    fn touchback_award(&self) -> Option<ScoringKind> {
        None
    }

    fn point_after_options(&self) -> Vec<PointAfterOption> {
        let table = self.scoring_table();
        [(PointAfterChoice::Kick, 15), (PointAfterChoice::TwoPoint, 2)]
            .into_iter()
            .filter_map(|(choice, distance)| {
                table
                    .points(choice.scoring_kind())
                    .map(|points| PointAfterOption {
                        choice,
                        points,
                        distance,
                    })
            })
            .collect()
    }

    // ===== game start and setups =====

    fn game_start(&self, _snapshot: &Snapshot) -> GameStart {
        GameStart::CoinToss
    }

    fn opening_kickoff(&self, snapshot: &Snapshot, toss: &CoinToss) -> KickoffSetup {
        self.kickoff_setup(snapshot, toss.receiving().opponent())
    }

    fn kickoff_setup(&self, _snapshot: &Snapshot, kicking: Side) -> KickoffSetup {
        KickoffSetup {
            kicking,
            receiving: kicking.opponent(),
            kick_type: KickType::Kickoff,
            spot: self.kickoff_spot(),
            touchback_spot: self.kickoff_touchback_spot(),
        }
    }

    fn safety_kick_setup(&self, _snapshot: &Snapshot, kicking: Side) -> KickoffSetup {
        KickoffSetup {
            kicking,
            receiving: kicking.opponent(),
            kick_type: KickType::SafetyKick,
            spot: self.safety_kick_spot(),
            touchback_spot: self.touchback_spot(),
        }
    }

    /// Point-after owed by `scoring`, or `None` when the touchdown ends the game.
    fn extra_point_setup(&self, snapshot: &Snapshot, scoring: Side) -> Option<ExtraPointSetup> {
        let sudden_death = matches!(self.overtime(), OvertimeRule::SuddenDeath { .. });
        if sudden_death && snapshot.format.is_overtime(snapshot.clock.quarter) {
            return None;
        }
        Some(ExtraPointSetup {
            scoring,
            options: self.point_after_options(),
        })
    }

    // ===== period boundaries =====

    /// Quarter change inside a half, applied before the next snap.
    fn period_start(&self, snapshot: &Snapshot) -> Option<RulesTransition> {
        let format = snapshot.format;
        let quarter = snapshot.clock.quarter;
        if !snapshot.clock.expired()
            || snapshot.is_point_after_pending()
            || format.is_overtime(quarter)
            || format.ends_half(quarter)
        {
            return None;
        }
        Some(RulesTransition {
            period: Some(PeriodStart {
                quarter: quarter + 1,
                seconds: format.period_seconds(quarter + 1),
            }),
            ..RulesTransition::default()
        })
    }

    /// Halftime or overtime boundary owed before the next drive.
    fn boundary(&self, snapshot: &Snapshot) -> Option<BoundaryRuling> {
        let format = snapshot.format;
        let quarter = snapshot.clock.quarter;
        if !snapshot.clock.expired() || snapshot.is_point_after_pending() {
            return None;
        }

        if quarter < format.regulation_quarters && format.ends_half(quarter) {
            // Deferring at the toss earns the second-half choice.
            let (chooser, default_kicking) = match snapshot.toss {
                Some(toss) => {
                    let chooser = match toss.choice {
                        TossChoice::Defer => toss.winner,
                        TossChoice::Receive => toss.winner.opponent(),
                    };
                    (Chooser::Side(chooser), toss.receiving())
                }
                None => (Chooser::Nobody, snapshot.possession.offense),
            };
            return Some(BoundaryRuling {
                kind: BoundaryKind::Halftime,
                period: PeriodStart {
                    quarter: quarter + 1,
                    seconds: format.period_seconds(quarter + 1),
                },
                chooser,
                default_kicking,
            });
        }

        if quarter == format.regulation_quarters && snapshot.scoreboard.is_tied() {
            if let OvertimeRule::SuddenDeath { period_seconds } = self.overtime() {
                return Some(BoundaryRuling {
                    kind: BoundaryKind::Overtime,
                    period: PeriodStart {
                        quarter: quarter + 1,
                        seconds: period_seconds,
                    },
                    chooser: Chooser::CoinToss,
                    default_kicking: Side::Home,
                });
            }
        }

        None
    }

    /// Turns a boundary ruling plus the chooser's decision into a transition.
    fn resolve_boundary(
        &self,
        snapshot: &Snapshot,
        ruling: &BoundaryRuling,
        choice: Option<CoinToss>,
    ) -> RulesTransition {
        let kicking = choice.map_or(ruling.default_kicking, |c| c.receiving().opponent());
        RulesTransition {
            period: Some(ruling.period),
            kickoff: Some(self.kickoff_setup(snapshot, kicking)),
            reset_timeouts: true,
            toss: None,
        }
    }

    // ===== plays and verdicts =====

    fn adjudicate(&self, snapshot: &Snapshot, execution: &ExecutionData) -> PlayRuling {
        adjudicate::play(self, snapshot, execution)
    }

    /// Has the drive that `offense` started ended, and why.
    ///
    /// `events` are all events of the drive so far, oldest first.
    fn drive_verdict(&self, snapshot: &Snapshot, events: &[GameEvent], offense: Side) -> DriveVerdict {
        if snapshot.is_point_after_pending() {
            return DriveVerdict::Continue;
        }

        let mut reasons: Vec<DriveEndReason> = events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Score { .. } => Some(DriveEndReason::Score),
                GameEvent::Turnover { .. } => Some(DriveEndReason::Turnover),
                GameEvent::Punt { .. } => Some(DriveEndReason::Punt),
                GameEvent::MissedFieldGoal { .. } => Some(DriveEndReason::MissedFieldGoal),
                GameEvent::TurnoverOnDowns { .. } => Some(DriveEndReason::DownsExhausted),
                _ => None,
            })
            .collect();

        let format = snapshot.format;
        let quarter = snapshot.clock.quarter;
        if snapshot.clock.expired() && (format.ends_half(quarter) || format.is_overtime(quarter)) {
            reasons.push(DriveEndReason::ClockExpiry);
        }
        if reasons.is_empty() && snapshot.pending.is_none() && snapshot.possession.offense != offense
        {
            reasons.push(DriveEndReason::Turnover);
        }

        if reasons.is_empty() {
            return DriveVerdict::Continue;
        }
        reasons.sort();
        reasons.dedup();
        DriveVerdict::Ended { reasons }
    }

    fn game_verdict(&self, snapshot: &Snapshot) -> GameVerdict {
        let format = snapshot.format;
        let clock = snapshot.clock;
        let tied = snapshot.scoreboard.is_tied();

        if format.is_overtime(clock.quarter) {
            if !tied {
                return GameVerdict::Over(GameEndReason::OvertimeScore);
            }
            if clock.expired() && !snapshot.is_point_after_pending() {
                return GameVerdict::Over(GameEndReason::OvertimeExpired);
            }
            return GameVerdict::Continue;
        }

        if clock.quarter >= format.regulation_quarters
            && clock.expired()
            && !snapshot.is_point_after_pending()
        {
            if !tied {
                return GameVerdict::Over(GameEndReason::RegulationExpired);
            }
            if self.overtime() == OvertimeRule::None {
                return GameVerdict::Over(GameEndReason::Tie);
            }
        }

        GameVerdict::Continue
    }
}
