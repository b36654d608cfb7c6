//! Structural checks on oracle decisions before they reach the updater.

use crate::execution::ExecutionData;
use crate::state::{GameFormat, PendingPlay};

use super::{PlayRuling, RuleViolation, RulesTransition, ScoreAward, ScoringTable};

impl ScoringTable {
    /// Verifies an award against this table.
    pub fn check_award(&self, award: &ScoreAward) -> Result<(), RuleViolation> {
        let table = self
            .points(award.kind)
            .ok_or(RuleViolation::ScoreNotInTable { kind: award.kind })?;
        if table != award.points {
            return Err(RuleViolation::ScoreValueMismatch {
                kind: award.kind,
                awarded: award.points,
                table,
            });
        }
        Ok(())
    }
}

pub fn check_pending(
    pending: &PendingPlay,
    table: &ScoringTable,
    format: &GameFormat,
) -> Result<(), RuleViolation> {
    match pending {
        PendingPlay::Kickoff(setup) => {
            if setup.kicking == setup.receiving {
                return Err(RuleViolation::KickoffToSelf {
                    side: setup.kicking,
                });
            }
            check_placement(setup.spot, format)?;
            check_placement(setup.touchback_spot, format)
        }
        PendingPlay::PointAfter(setup) => {
            if setup.options.is_empty() {
                return Err(RuleViolation::EmptyPointAfterSetup);
            }
            for option in &setup.options {
                let kind = option.choice.scoring_kind();
                let table = table
                    .points(kind)
                    .ok_or(RuleViolation::ScoreNotInTable { kind })?;
                if table != option.points {
                    return Err(RuleViolation::PointAfterValueMismatch {
                        choice: option.choice,
                        offered: option.points,
                        table,
                    });
                }
                check_placement(option.distance, format)?;
            }
            Ok(())
        }
    }
}

pub fn check_play_ruling(
    ruling: &PlayRuling,
    execution: &ExecutionData,
    table: &ScoringTable,
    format: &GameFormat,
) -> Result<(), RuleViolation> {
    if let Some(award) = &ruling.award {
        table.check_award(award)?;

        if let ExecutionData::PointAfter(attempt) = execution {
            if award.kind != attempt.choice.scoring_kind()
                || attempt.setup.option(attempt.choice).is_none()
            {
                return Err(RuleViolation::PointAfterNotOffered {
                    choice: attempt.choice,
                });
            }
            if !attempt.good {
                return Err(RuleViolation::UnearnedPointAfter {
                    choice: attempt.choice,
                });
            }
        }
    }

    if let Some(placement) = ruling.placement {
        check_placement(placement, format)?;
    }
    if let Some(pending) = &ruling.follow_up {
        check_pending(pending, table, format)?;
    }
    Ok(())
}

pub fn check_transition(
    transition: &RulesTransition,
    table: &ScoringTable,
    format: &GameFormat,
) -> Result<(), RuleViolation> {
    if let Some(period) = transition.period {
        if period.quarter == 0
            || period.seconds == 0
            || period.seconds != format.period_seconds(period.quarter)
        {
            return Err(RuleViolation::InvalidPeriod {
                quarter: period.quarter,
                seconds: period.seconds,
            });
        }
    }
    if let Some(kickoff) = transition.kickoff {
        check_pending(&PendingPlay::Kickoff(kickoff), table, format)?;
    }
    Ok(())
}

fn check_placement(placement: u8, format: &GameFormat) -> Result<(), RuleViolation> {
    if placement == 0 || placement >= format.field_length {
        return Err(RuleViolation::PlacementOutOfBounds {
            placement,
            field_length: format.field_length,
        });
    }
    Ok(())
}
