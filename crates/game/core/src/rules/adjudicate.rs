//! Default play adjudication shared by every league.
//!
//! Turns a snapshot and the play's execution data into a [`PlayRuling`]: who
//! scores, whether possession changes, where the ball is placed and which
//! untimed play is owed next. Leagues customise it through the hooks on
//! [`RulesOracle`] rather than by replacing it.

use crate::execution::{ExecutionData, KickoffExecution, PointAfterExecution, ScrimmageExecution};
use crate::state::{PendingPlay, Snapshot};
use crate::team::{PlayType, Side};

use super::{PlayRuling, PossessionChange, RulesOracle, ScoreAward, ScoringKind};

pub(super) fn play<R>(rules: &R, snapshot: &Snapshot, execution: &ExecutionData) -> PlayRuling
where
    R: RulesOracle + ?Sized,
{
    match execution {
        ExecutionData::Scrimmage(play) => scrimmage(rules, snapshot, play),
        ExecutionData::Kickoff(kick) => kickoff(rules, snapshot, kick),
        ExecutionData::PointAfter(attempt) => point_after(rules, snapshot, attempt),
    }
}

fn award<R>(rules: &R, side: Side, kind: ScoringKind) -> Option<ScoreAward>
where
    R: RulesOracle + ?Sized,
{
    rules
        .scoring_table()
        .points(kind)
        .map(|points| ScoreAward { side, kind, points })
}

fn after_touchdown<R>(rules: &R, snapshot: &Snapshot, scoring: Side) -> PendingPlay
where
    R: RulesOracle + ?Sized,
{
    match rules.extra_point_setup(snapshot, scoring) {
        Some(setup) => PendingPlay::PointAfter(setup),
        None => PendingPlay::Kickoff(rules.kickoff_setup(snapshot, scoring)),
    }
}

fn scrimmage<R>(rules: &R, snapshot: &Snapshot, play: &ScrimmageExecution) -> PlayRuling
where
    R: RulesOracle + ?Sized,
{
    let format = snapshot.format;
    let possession = snapshot.possession;
    let offense = possession.offense;
    let defense = offense.opponent();
    let length = i32::from(format.field_length);
    let end = i32::from(possession.ball_on) + i32::from(play.outcome.yards);

    match play.offense_call.play_type {
        PlayType::FieldGoal => {
            if play.outcome.field_goal_good == Some(true) {
                PlayRuling {
                    award: award(rules, offense, ScoringKind::FieldGoal),
                    follow_up: Some(PendingPlay::Kickoff(rules.kickoff_setup(snapshot, offense))),
                    ..PlayRuling::default()
                }
            } else {
                let from_kick = format.field_length.saturating_sub(possession.ball_on);
                // Misses are never returned, so the kick always dies in the end zone.
                PlayRuling {
                    award: rules
                        .touchback_award()
                        .and_then(|kind| award(rules, offense, kind)),
                    change: Some(PossessionChange::MissedFieldGoal),
                    placement: Some(from_kick.max(rules.touchback_spot())),
                    ..PlayRuling::default()
                }
            }
        }
        PlayType::Punt if end >= length => PlayRuling {
            award: rules
                .touchback_award()
                .and_then(|kind| award(rules, offense, kind)),
            change: Some(PossessionChange::Punt),
            placement: Some(rules.touchback_spot()),
            touchback: true,
            ..PlayRuling::default()
        },
        PlayType::Punt => PlayRuling {
            change: Some(PossessionChange::Punt),
            ..PlayRuling::default()
        },
        _ if play.outcome.turnover => {
            if end <= 0 {
                PlayRuling {
                    award: award(rules, defense, ScoringKind::Touchdown),
                    change: Some(PossessionChange::Turnover),
                    follow_up: Some(after_touchdown(rules, snapshot, defense)),
                    ..PlayRuling::default()
                }
            } else if end >= length {
                PlayRuling {
                    change: Some(PossessionChange::Turnover),
                    placement: Some(rules.touchback_spot()),
                    touchback: true,
                    ..PlayRuling::default()
                }
            } else {
                PlayRuling {
                    change: Some(PossessionChange::Turnover),
                    ..PlayRuling::default()
                }
            }
        }
        _ if end >= length => PlayRuling {
            award: award(rules, offense, ScoringKind::Touchdown),
            follow_up: Some(after_touchdown(rules, snapshot, offense)),
            ..PlayRuling::default()
        },
        _ if end <= 0 => PlayRuling {
            award: award(rules, defense, ScoringKind::Safety),
            follow_up: Some(PendingPlay::Kickoff(
                rules.safety_kick_setup(snapshot, offense),
            )),
            ..PlayRuling::default()
        },
        _ if possession.down >= format.max_downs
            && i32::from(play.outcome.yards) < i32::from(possession.distance) =>
        {
            PlayRuling {
                change: Some(PossessionChange::Downs),
                ..PlayRuling::default()
            }
        }
        _ => PlayRuling::default(),
    }
}

fn kickoff<R>(rules: &R, snapshot: &Snapshot, kick: &KickoffExecution) -> PlayRuling
where
    R: RulesOracle + ?Sized,
{
    let length = i32::from(snapshot.format.field_length);
    let setup = kick.setup;

    if kick.result.touchback {
        return PlayRuling {
            award: rules
                .touchback_award()
                .and_then(|kind| award(rules, setup.kicking, kind)),
            change: Some(PossessionChange::Kickoff),
            placement: Some(setup.touchback_spot),
            touchback: true,
            ..PlayRuling::default()
        };
    }

    // Receiving team's yard line where the ball was fielded, then returned.
    let landing = i32::from(setup.spot) + i32::from(kick.result.distance);
    let returned = length - landing + i32::from(kick.result.return_yards);

    if returned >= length {
        return PlayRuling {
            award: award(rules, setup.receiving, ScoringKind::Touchdown),
            change: Some(PossessionChange::Kickoff),
            follow_up: Some(after_touchdown(rules, snapshot, setup.receiving)),
            ..PlayRuling::default()
        };
    }

    PlayRuling {
        change: Some(PossessionChange::Kickoff),
        placement: u8::try_from(returned.clamp(1, length - 1)).ok(),
        ..PlayRuling::default()
    }
}

fn point_after<R>(rules: &R, snapshot: &Snapshot, attempt: &PointAfterExecution) -> PlayRuling
where
    R: RulesOracle + ?Sized,
{
    let scoring = attempt.setup.scoring;
    PlayRuling {
        award: if attempt.good {
            award(rules, scoring, attempt.choice.scoring_kind())
        } else {
            None
        },
        follow_up: Some(PendingPlay::Kickoff(rules.kickoff_setup(snapshot, scoring))),
        ..PlayRuling::default()
    }
}
