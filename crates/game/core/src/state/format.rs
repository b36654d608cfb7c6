/// League constants a game state is built with.
///
/// Supplied once by the rules oracle and carried inside the state so the
/// updater can do field and clock arithmetic without querying the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameFormat {
    pub quarter_seconds: u32,
    pub regulation_quarters: u8,
    pub quarters_per_half: u8,
    /// Length of an overtime period; zero when the league has no overtime.
    pub overtime_seconds: u32,
    pub field_length: u8,
    pub first_down_yards: u8,
    pub max_downs: u8,
    pub players_on_field: u8,
    pub play_clock_seconds: u32,
    pub max_play_seconds: u32,
    pub timeouts_per_half: u8,
}

impl GameFormat {
    pub const fn is_overtime(&self, quarter: u8) -> bool {
        quarter > self.regulation_quarters
    }

    pub const fn period_seconds(&self, quarter: u8) -> u32 {
        if self.is_overtime(quarter) {
            self.overtime_seconds
        } else {
            self.quarter_seconds
        }
    }

    /// True for the last quarter of either regulation half.
    pub const fn ends_half(&self, quarter: u8) -> bool {
        !self.is_overtime(quarter) && quarter % self.quarters_per_half == 0
    }

    pub const fn regulation_seconds(&self) -> u32 {
        self.quarter_seconds * self.regulation_quarters as u32
    }

    /// Distance to gain from `ball_on`: a full series or goal to go.
    pub fn series_distance(&self, ball_on: u8) -> u8 {
        self.first_down_yards
            .min(self.field_length.saturating_sub(ball_on))
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format() -> GameFormat {
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
    fn half_and_overtime_boundaries() {
        let f = format();
        assert!(!f.ends_half(1));
        assert!(f.ends_half(2));
        assert!(f.ends_half(4));
        assert!(!f.ends_half(5));
        assert!(f.is_overtime(5));
        assert_eq!(f.period_seconds(5), 600);
        assert_eq!(f.regulation_seconds(), 3_600);
    }

    #[test]
    fn goal_to_go_distance() {
        let f = format();
        assert_eq!(f.series_distance(25), 10);
        assert_eq!(f.series_distance(96), 4);
        assert_eq!(f.series_distance(100), 1);
    }
}
