//! Static football vocabulary: sides, rosters, playbooks, personnel.
//!
//! These are plain values. Nothing here has behaviour beyond lookups and
//! legality checks used by decision contracts.

mod personnel;
mod playbook;

pub use personnel::{Assignment, AssignmentError};
pub use playbook::{PersonnelPackage, PlayCall, PlaySide, PlayType, Playbook, Position};

use core::fmt;

/// One of the two teams in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    name: String,
    roster: Vec<Player>,
    playbook: Playbook,
}

impl Team {
    pub fn new(name: impl Into<String>, roster: Vec<Player>, playbook: Playbook) -> Self {
        Self {
            name: name.into(),
            roster,
            playbook,
        }
    }

    /// Roster and playbook deep enough for every standard package.
    ///
    /// Player ids start at `id_base`; give each team a distinct base.
    pub fn standard(name: impl Into<String>, id_base: u32, players_on_field: u8) -> Self {
        let extra = players_on_field.saturating_sub(11);
        let depth = [
            (Position::Qb, 3),
            (Position::Rb, 4),
            (Position::Wr, 6 + extra),
            (Position::Te, 4),
            (Position::Ol, 9),
            (Position::Dl, 8),
            (Position::Lb, 6),
            (Position::Cb, 5 + extra),
            (Position::S, 4),
            (Position::K, 1),
            (Position::P, 1),
        ];

        let mut next = id_base;
        let mut roster = Vec::new();
        for (position, count) in depth {
            for _ in 0..count {
                roster.push(Player {
                    id: PlayerId(next),
                    position,
                });
                next += 1;
            }
        }

        Self::new(name, roster, Playbook::standard(players_on_field))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roster(&self) -> &[Player] {
        &self.roster
    }

    pub fn playbook(&self) -> &Playbook {
        &self.playbook
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }
}

/// The two teams taking part in one game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matchup {
    pub home: Team,
    pub away: Team,
}

impl Matchup {
    pub fn new(home: Team, away: Team) -> Self {
        Self { home, away }
    }

    /// Two standard teams sized for `players_on_field`.
    pub fn standard(players_on_field: u8) -> Self {
        Self::new(
            Team::standard("Home", 1_000, players_on_field),
            Team::standard("Away", 2_000, players_on_field),
        )
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involutive() {
        assert_eq!(Side::Home.opponent(), Side::Away);
        assert_eq!(Side::Away.opponent().opponent(), Side::Away);
    }

    #[test]
    fn standard_matchup_has_disjoint_rosters() {
        let matchup = Matchup::standard(11);
        for player in matchup.home.roster() {
            assert!(matchup.away.player(player.id).is_none());
        }
        assert_eq!(matchup.team(Side::Away).name(), "Away");
    }
}
