use crate::state::GameFormat;

use super::{OvertimeRule, PointAfterChoice, PointAfterOption, RulesOracle, ScoringKind, ScoringTable};

/// Canadian rules: three downs, twelve players, a 110-yard field and the single.
///
/// Overtime is not modelled; a tied game stands.
#[derive(Clone, Debug)]
pub struct CflRules {
    scoring: ScoringTable,
}

impl CflRules {
    pub fn new() -> Self {
        Self {
            scoring: ScoringTable::new([
                (ScoringKind::Touchdown, 6),
                (ScoringKind::FieldGoal, 3),
                (ScoringKind::Safety, 2),
                (ScoringKind::Single, 1),
                (ScoringKind::ExtraPointKick, 1),
                (ScoringKind::TwoPointConversion, 2),
            ]),
        }
    }
}

impl Default for CflRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesOracle for CflRules {
    fn league(&self) -> &'static str {
        "cfl"
    }

    fn format(&self) -> GameFormat {
        GameFormat {
            quarter_seconds: 15 * 60,
            regulation_quarters: 4,
            quarters_per_half: 2,
            overtime_seconds: 0,
            field_length: 110,
            first_down_yards: 10,
            max_downs: 3,
            players_on_field: 12,
            play_clock_seconds: 20,
            max_play_seconds: 60,
            timeouts_per_half: 2,
        }
    }

    fn scoring_table(&self) -> &ScoringTable {
        &self.scoring
    }

    fn overtime(&self) -> OvertimeRule {
        OvertimeRule::None
    }

    fn kickoff_touchback_spot(&self) -> u8 {
        40
    }

    fn touchback_spot(&self) -> u8 {
        40
    }

    fn touchback_award(&self) -> Option<ScoringKind> {
        Some(ScoringKind::Single)
    }

    fn point_after_options(&self) -> Vec<PointAfterOption> {
        vec![
            PointAfterOption {
                choice: PointAfterChoice::Kick,
                points: 1,
                distance: 25,
            },
            PointAfterOption {
                choice: PointAfterChoice::TwoPoint,
                points: 2,
                distance: 3,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{ExecutionData, KickoffExecution, KickoffResult};
    use crate::rules::{GameEndReason, GameVerdict, PossessionChange};
    use crate::state::{GameState, Snapshot};
    use crate::team::Side;

    #[test]
    fn kickoff_single_goes_to_kicking_team() {
        let rules = CflRules::new();
        let snap = Snapshot::capture(&GameState::new(rules.format()));
        let setup = rules.kickoff_setup(&snap, Side::Away);
        let execution = ExecutionData::Kickoff(KickoffExecution {
            setup,
            result: KickoffResult {
                distance: 80,
                touchback: true,
                return_yards: 0,
            },
            elapsed: 0,
        });

        let ruling = rules.adjudicate(&snap, &execution);
        let award = ruling.award.unwrap();
        assert_eq!((award.side, award.kind, award.points), (Side::Away, ScoringKind::Single, 1));
        assert_eq!(ruling.change, Some(PossessionChange::Kickoff));
        assert_eq!(ruling.placement, Some(40));
    }

    #[test]
    fn tied_game_ends_in_tie() {
        let rules = CflRules::new();
        let mut state = GameState::new(rules.format());
        state.clock.quarter = 4;
        state.clock.seconds_remaining = 0;
        let snap = Snapshot::capture(&state);
        assert_eq!(rules.game_verdict(&snap), GameVerdict::Over(GameEndReason::Tie));
        assert!(rules.boundary(&snap).is_none());
    }
}
