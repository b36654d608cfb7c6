//! Play calls and personnel packages.

/// Roster position. Also used as the slot label in an [`Assignment`](super::Assignment).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    Ol,
    Dl,
    Lb,
    Cb,
    S,
    K,
    P,
}

/// Which unit a play call belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlaySide {
    Offense,
    Defense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PlayType {
    Run,
    Pass,
    Punt,
    FieldGoal,
    Defense,
}

impl PlayType {
    /// Kicking plays change possession (punt) or end the series (field goal).
    pub const fn is_kick(self) -> bool {
        matches!(self, Self::Punt | Self::FieldGoal)
    }

    pub const fn side(self) -> PlaySide {
        match self {
            Self::Defense => PlaySide::Defense,
            _ => PlaySide::Offense,
        }
    }
}

/// How many players of each position a play call puts on the field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersonnelPackage {
    slots: Vec<(Position, u8)>,
}

impl PersonnelPackage {
    /// Builds a package, merging repeated positions.
    pub fn new(slots: impl IntoIterator<Item = (Position, u8)>) -> Self {
        let mut merged: Vec<(Position, u8)> = Vec::new();
        for (position, count) in slots {
            match merged.iter_mut().find(|(p, _)| *p == position) {
                Some((_, existing)) => *existing += count,
                None => merged.push((position, count)),
            }
        }
        merged.retain(|(_, count)| *count > 0);
        Self { slots: merged }
    }

    pub fn slots(&self) -> &[(Position, u8)] {
        &self.slots
    }

    pub fn count(&self, position: Position) -> u8 {
        self.slots
            .iter()
            .find(|(p, _)| *p == position)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> u32 {
        self.slots.iter().map(|(_, count)| u32::from(*count)).sum()
    }
}

/// A named play from a team's playbook.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayCall {
    pub name: String,
    pub side: PlaySide,
    pub play_type: PlayType,
    pub personnel: PersonnelPackage,
}

impl PlayCall {
    pub fn new(name: impl Into<String>, play_type: PlayType, personnel: PersonnelPackage) -> Self {
        Self {
            name: name.into(),
            side: play_type.side(),
            play_type,
            personnel,
        }
    }
}

/// Ordered set of plays a team may call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Playbook {
    plays: Vec<PlayCall>,
}

impl Playbook {
    pub fn new(plays: Vec<PlayCall>) -> Self {
        Self { plays }
    }

    pub fn plays(&self) -> &[PlayCall] {
        &self.plays
    }

    pub fn contains(&self, call: &PlayCall) -> bool {
        self.plays.iter().any(|p| p == call)
    }

    pub fn by_type(&self, play_type: PlayType) -> Vec<&PlayCall> {
        self.plays.iter().filter(|p| p.play_type == play_type).collect()
    }

    pub fn find(&self, name: &str) -> Option<&PlayCall> {
        self.plays.iter().find(|p| p.name == name)
    }

    /// Standard playbook sized for `players_on_field` (11 or 12).
    ///
    /// Every package fills the field exactly; extra players beyond eleven go
    /// to receivers on offense and to corners on defense.
    pub fn standard(players_on_field: u8) -> Self {
        let extra = players_on_field.saturating_sub(11);
        let offense = |name: &str, play_type, rb: u8, wr: u8, te: u8| {
            PlayCall::new(
                name,
                play_type,
                PersonnelPackage::new([
                    (Position::Qb, 1),
                    (Position::Rb, rb),
                    (Position::Wr, wr + extra),
                    (Position::Te, te),
                    (Position::Ol, 5),
                ]),
            )
        };
        let defense = |name: &str, dl: u8, lb: u8, cb: u8, s: u8| {
            PlayCall::new(
                name,
                PlayType::Defense,
                PersonnelPackage::new([
                    (Position::Dl, dl),
                    (Position::Lb, lb),
                    (Position::Cb, cb + extra),
                    (Position::S, s),
                ]),
            )
        };
        let kick = |name: &str, play_type, specialist| {
            PlayCall::new(
                name,
                play_type,
                PersonnelPackage::new([
                    (specialist, 1),
                    (Position::Ol, 5),
                    (Position::Te, 2),
                    (Position::Wr, 2 + extra),
                    (Position::Rb, 1),
                ]),
            )
        };

        Self::new(vec![
            offense("inside zone", PlayType::Run, 1, 2, 2),
            offense("power", PlayType::Run, 2, 1, 2),
            offense("toss sweep", PlayType::Run, 1, 3, 1),
            offense("slant flat", PlayType::Pass, 1, 3, 1),
            offense("four verticals", PlayType::Pass, 0, 4, 1),
            offense("play action", PlayType::Pass, 1, 2, 2),
            kick("punt", PlayType::Punt, Position::P),
            kick("field goal", PlayType::FieldGoal, Position::K),
            defense("base 4-3", 4, 3, 2, 2),
            defense("nickel", 4, 2, 3, 2),
            defense("goal line", 6, 3, 2, 0),
        ])
    }
}
