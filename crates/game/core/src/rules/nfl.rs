use crate::state::GameFormat;

use super::{OvertimeRule, RulesOracle, ScoringKind, ScoringTable};

/// Professional American rules: four downs on a 100-yard field, sudden-death overtime.
#[derive(Clone, Debug)]
pub struct NflRules {
    scoring: ScoringTable,
}

impl NflRules {
    pub const QUARTER_SECONDS: u32 = 15 * 60;
    pub const OVERTIME_SECONDS: u32 = 10 * 60;

    pub fn new() -> Self {
        Self {
            scoring: ScoringTable::new([
                (ScoringKind::Touchdown, 6),
                (ScoringKind::FieldGoal, 3),
                (ScoringKind::Safety, 2),
                (ScoringKind::ExtraPointKick, 1),
                (ScoringKind::TwoPointConversion, 2),
            ]),
        }
    }
}

impl Default for NflRules {
    fn default() -> Self {
        Self::new()
    }
}

impl RulesOracle for NflRules {
    fn league(&self) -> &'static str {
        "nfl"
    }

    fn format(&self) -> GameFormat {
        GameFormat {
            quarter_seconds: Self::QUARTER_SECONDS,
            regulation_quarters: 4,
            quarters_per_half: 2,
            overtime_seconds: Self::OVERTIME_SECONDS,
            field_length: 100,
            first_down_yards: 10,
            max_downs: 4,
            players_on_field: 11,
            play_clock_seconds: 40,
            max_play_seconds: 60,
            timeouts_per_half: 3,
        }
    }

    fn scoring_table(&self) -> &ScoringTable {
        &self.scoring
    }

    fn overtime(&self) -> OvertimeRule {
        OvertimeRule::SuddenDeath {
            period_seconds: Self::OVERTIME_SECONDS,
        }
    }
}
