use super::{PlayCall, PlayerId, Position, Team};

/// Players placed on the field for one snap, keyed by the slot they fill.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    slots: Vec<(Position, PlayerId)>,
}

impl Assignment {
    pub fn new(slots: Vec<(Position, PlayerId)>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[(Position, PlayerId)] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().map(|(_, id)| *id)
    }

    /// Fills `call`'s package from `team`'s roster in roster order.
    ///
    /// Returns `None` when the roster cannot cover the package.
    pub fn fill(team: &Team, call: &PlayCall) -> Option<Self> {
        let mut slots = Vec::with_capacity(call.personnel.total() as usize);
        for &(position, count) in call.personnel.slots() {
            let mut taken = 0u8;
            for player in team.roster().iter().filter(|p| p.position == position) {
                if taken == count {
                    break;
                }
                slots.push((position, player.id));
                taken += 1;
            }
            if taken < count {
                return None;
            }
        }
        Some(Self { slots })
    }

    /// Checks this assignment against the roster and the play call's package.
    pub fn validate(
        &self,
        team: &Team,
        call: &PlayCall,
        players_on_field: u8,
    ) -> Result<(), AssignmentError> {
        if self.slots.len() != usize::from(players_on_field) {
            return Err(AssignmentError::WrongHeadcount {
                expected: players_on_field,
                found: self.slots.len(),
            });
        }

        let mut seen: Vec<PlayerId> = Vec::with_capacity(self.slots.len());
        for &(_, id) in &self.slots {
            if team.player(id).is_none() {
                return Err(AssignmentError::NotOnRoster { player: id });
            }
            if seen.contains(&id) {
                return Err(AssignmentError::DuplicatePlayer { player: id });
            }
            seen.push(id);
        }

        for &(position, expected) in call.personnel.slots() {
            let found = self.slots.iter().filter(|(p, _)| *p == position).count();
            if found != usize::from(expected) {
                return Err(AssignmentError::PackageMismatch {
                    position,
                    expected,
                    found,
                });
            }
        }
        if let Some(&(position, _)) = self
            .slots
            .iter()
            .find(|(p, _)| call.personnel.count(*p) == 0)
        {
            return Err(AssignmentError::PackageMismatch {
                position,
                expected: 0,
                found: self.slots.iter().filter(|(p, _)| *p == position).count(),
            });
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("expected {expected} players on the field, found {found}")]
    WrongHeadcount { expected: u8, found: usize },

    #[error("player {player} is not on the roster")]
    NotOnRoster { player: PlayerId },

    #[error("player {player} is assigned twice")]
    DuplicatePlayer { player: PlayerId },

    #[error("package needs {expected} at {position}, found {found}")]
    PackageMismatch {
        position: Position,
        expected: u8,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Playbook;

    fn team() -> Team {
        Team::standard("Testers", 100, 11)
    }

    #[test]
    fn filled_assignment_is_legal() {
        let team = team();
        for call in team.playbook().plays() {
            let assignment = Assignment::fill(&team, call).unwrap();
            assert_eq!(assignment.validate(&team, call, 11), Ok(()), "{}", call.name);
        }
    }

    #[test]
    fn rejects_foreign_and_duplicate_players() {
        let team = team();
        let call = Playbook::standard(11).find("power").cloned().unwrap();
        let mut slots = Assignment::fill(&team, &call).unwrap().slots().to_vec();

        slots[0].1 = PlayerId(9_999);
        assert_eq!(
            Assignment::new(slots.clone()).validate(&team, &call, 11),
            Err(AssignmentError::NotOnRoster {
                player: PlayerId(9_999)
            })
        );

        slots[0].1 = slots[1].1;
        assert!(matches!(
            Assignment::new(slots).validate(&team, &call, 11),
            Err(AssignmentError::DuplicatePlayer { .. })
        ));
    }

    #[test]
    fn rejects_wrong_package() {
        let team = team();
        let run = Playbook::standard(11).find("power").cloned().unwrap();
        let pass = Playbook::standard(11).find("four verticals").cloned().unwrap();
        let assignment = Assignment::fill(&team, &pass).unwrap();
        assert!(matches!(
            assignment.validate(&team, &run, 11),
            Err(AssignmentError::PackageMismatch { .. })
        ));
    }

    #[test]
    fn rejects_short_field() {
        let team = team();
        let call = Playbook::standard(11).find("power").cloned().unwrap();
        let assignment = Assignment::fill(&team, &call).unwrap();
        assert_eq!(
            assignment.validate(&team, &call, 12),
            Err(AssignmentError::WrongHeadcount {
                expected: 12,
                found: 11
            })
        );
    }
}
