//! Decision points, their output types and their output contracts.
//!
//! Each point is a zero-sized marker implementing [`DecisionKind`]. The marker
//! fixes the output type at compile time and carries the contract the registry
//! enforces on every model output before the play step sees it.

use crate::execution;
use crate::rules::{self, TossChoice};
use crate::team::{self, Assignment, PlayCall, PlaySide, PlayType, Side};

use super::DecisionContext;

/// Every decision the simulation can ask a model for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DecisionPoint {
    CoinTossWinner,
    KickReceiveChoice,
    PreSnapRunoff,
    TimeoutCall,
    OffensivePlayCall,
    DefensivePlayCall,
    OffensivePersonnel,
    DefensivePersonnel,
    ScrimmageOutcome,
    PlayClock,
    KickoffResult,
    PointAfterChoice,
    PointAfterResult,
}

/// Compile-time description of one decision point.
pub trait DecisionKind: Send + Sync + 'static {
    const POINT: DecisionPoint;

    type Output: Clone + Send + 'static;

    /// Output contract. `Err` carries a human-readable reason.
    fn check(_output: &Self::Output, _ctx: &DecisionContext<'_>) -> Result<(), String> {
        Ok(())
    }
}

macro_rules! decision_kinds {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
            pub struct $name;
        )*
    };
}

decision_kinds!(
    /// Winner of a coin toss.
    CoinTossWinner,
    /// Toss winner's or boundary chooser's kick/receive choice.
    KickReceiveChoice,
    /// Seconds run off between the previous play and the snap.
    PreSnapRunoff,
    TimeoutCall,
    OffensivePlayCall,
    DefensivePlayCall,
    OffensivePersonnel,
    DefensivePersonnel,
    ScrimmageOutcome,
    /// Seconds the snap itself takes.
    PlayClock,
    KickoffResult,
    PointAfterChoice,
    /// Whether the point-after attempt succeeds.
    PointAfterResult,
);

impl DecisionKind for CoinTossWinner {
    const POINT: DecisionPoint = DecisionPoint::CoinTossWinner;
    type Output = Side;
}

impl DecisionKind for KickReceiveChoice {
    const POINT: DecisionPoint = DecisionPoint::KickReceiveChoice;
    type Output = TossChoice;
}

impl DecisionKind for PreSnapRunoff {
    const POINT: DecisionPoint = DecisionPoint::PreSnapRunoff;
    type Output = u32;

    fn check(output: &u32, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let limit = ctx.format().play_clock_seconds;
        if *output > limit {
            return Err(format!("runoff {output}s exceeds the {limit}s play clock"));
        }
        Ok(())
    }
}

impl DecisionKind for TimeoutCall {
    const POINT: DecisionPoint = DecisionPoint::TimeoutCall;
    type Output = Option<Side>;

    fn check(output: &Option<Side>, ctx: &DecisionContext<'_>) -> Result<(), String> {
        match output {
            Some(side) if ctx.snapshot.timeouts.remaining(*side) == 0 => {
                Err(format!("{side} has no timeouts left"))
            }
            _ => Ok(()),
        }
    }
}

fn check_call(call: &PlayCall, team: &team::Team, side: PlaySide) -> Result<(), String> {
    if call.side != side || call.play_type.side() != side {
        return Err(format!("`{}` is not a {side:?} call", call.name));
    }
    if !team.playbook().contains(call) {
        return Err(format!("`{}` is not in {}'s playbook", call.name, team.name()));
    }
    Ok(())
}

impl DecisionKind for OffensivePlayCall {
    const POINT: DecisionPoint = DecisionPoint::OffensivePlayCall;
    type Output = PlayCall;

    fn check(output: &PlayCall, ctx: &DecisionContext<'_>) -> Result<(), String> {
        check_call(output, ctx.offense(), PlaySide::Offense)
    }
}

impl DecisionKind for DefensivePlayCall {
    const POINT: DecisionPoint = DecisionPoint::DefensivePlayCall;
    type Output = PlayCall;

    fn check(output: &PlayCall, ctx: &DecisionContext<'_>) -> Result<(), String> {
        if output.play_type != PlayType::Defense {
            return Err(format!("`{}` is not a defensive call", output.name));
        }
        check_call(output, ctx.defense(), PlaySide::Defense)
    }
}

impl DecisionKind for OffensivePersonnel {
    const POINT: DecisionPoint = DecisionPoint::OffensivePersonnel;
    type Output = Assignment;

    fn check(output: &Assignment, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let call = ctx
            .draft
            .offense_call
            .as_ref()
            .ok_or("personnel requested before the offensive call")?;
        output
            .validate(ctx.offense(), call, ctx.format().players_on_field)
            .map_err(|e| e.to_string())
    }
}

impl DecisionKind for DefensivePersonnel {
    const POINT: DecisionPoint = DecisionPoint::DefensivePersonnel;
    type Output = Assignment;

    fn check(output: &Assignment, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let call = ctx
            .draft
            .defense_call
            .as_ref()
            .ok_or("personnel requested before the defensive call")?;
        output
            .validate(ctx.defense(), call, ctx.format().players_on_field)
            .map_err(|e| e.to_string())
    }
}

impl DecisionKind for ScrimmageOutcome {
    const POINT: DecisionPoint = DecisionPoint::ScrimmageOutcome;
    type Output = execution::PlayOutcome;

    fn check(output: &execution::PlayOutcome, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let call = ctx
            .draft
            .offense_call
            .as_ref()
            .ok_or("outcome requested before the offensive call")?;
        let length = i32::from(ctx.format().field_length);
        let end = i32::from(ctx.snapshot.possession.ball_on) + i32::from(output.yards);
        if !(0..=length).contains(&end) {
            return Err(format!("play ends at {end}, outside the field 0..={length}"));
        }

        let is_pass = call.play_type == PlayType::Pass;
        match output.completed {
            Some(_) if !is_pass => return Err("completion set on a non-pass".into()),
            None if is_pass => return Err("pass without a completion flag".into()),
            Some(false) if !output.turnover && output.yards != 0 => {
                return Err(format!("incomplete pass gained {} yards", output.yards));
            }
            _ => {}
        }

        let is_field_goal = call.play_type == PlayType::FieldGoal;
        if output.field_goal_good.is_some() != is_field_goal {
            return Err("field goal result must be set exactly for field goal attempts".into());
        }
        if is_field_goal && (output.yards != 0 || output.turnover) {
            return Err("field goal attempts neither gain yards nor turn the ball over".into());
        }

        if call.play_type == PlayType::Punt && (output.turnover || output.yards <= 0) {
            return Err("punts need positive net yards and cannot be turnovers".into());
        }
        Ok(())
    }
}

impl DecisionKind for PlayClock {
    const POINT: DecisionPoint = DecisionPoint::PlayClock;
    type Output = u32;

    fn check(output: &u32, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let limit = ctx.format().max_play_seconds;
        if *output > limit {
            return Err(format!("play took {output}s, limit is {limit}s"));
        }
        Ok(())
    }
}

impl DecisionKind for KickoffResult {
    const POINT: DecisionPoint = DecisionPoint::KickoffResult;
    type Output = execution::KickoffResult;

    fn check(output: &execution::KickoffResult, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let setup = ctx
            .draft
            .kickoff
            .ok_or("kickoff result requested without a pending kickoff")?;
        if output.distance == 0 {
            return Err("kick distance must be at least one yard".into());
        }

        let length = i32::from(ctx.format().field_length);
        let landing = i32::from(setup.spot) + i32::from(output.distance);
        if output.touchback {
            if landing < length {
                return Err(format!("touchback on a kick landing at {landing}"));
            }
            return Ok(());
        }

        let returned = length - landing + i32::from(output.return_yards);
        if returned < 1 {
            return Err(format!("return ends at {returned}, behind the goal line"));
        }
        Ok(())
    }
}

impl DecisionKind for PointAfterChoice {
    const POINT: DecisionPoint = DecisionPoint::PointAfterChoice;
    type Output = rules::PointAfterChoice;

    fn check(output: &rules::PointAfterChoice, ctx: &DecisionContext<'_>) -> Result<(), String> {
        let setup = ctx
            .draft
            .point_after
            .as_ref()
            .ok_or("point-after choice requested without a pending attempt")?;
        if setup.option(*output).is_none() {
            return Err(format!("{output} is not offered"));
        }
        Ok(())
    }
}

impl DecisionKind for PointAfterResult {
    const POINT: DecisionPoint = DecisionPoint::PointAfterResult;
    type Output = bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::{ExecutionDraft, PlayOutcome};
    use crate::rules::{NflRules, RulesOracle};
    use crate::state::{GameState, Snapshot};
    use crate::team::{Matchup, Playbook};
    use strum::IntoEnumIterator;

    fn fixture() -> (Snapshot, Matchup) {
        let mut state = GameState::new(NflRules::new().format());
        state.possession.ball_on = 30;
        (Snapshot::capture(&state), Matchup::standard(11))
    }

    #[test]
    fn every_point_has_a_marker() {
        let declared = [
            CoinTossWinner::POINT,
            KickReceiveChoice::POINT,
            PreSnapRunoff::POINT,
            TimeoutCall::POINT,
            OffensivePlayCall::POINT,
            DefensivePlayCall::POINT,
            OffensivePersonnel::POINT,
            DefensivePersonnel::POINT,
            ScrimmageOutcome::POINT,
            PlayClock::POINT,
            KickoffResult::POINT,
            PointAfterChoice::POINT,
            PointAfterResult::POINT,
        ];
        assert_eq!(declared.to_vec(), DecisionPoint::iter().collect::<Vec<_>>());
    }

    #[test]
    fn runoff_bounded_by_play_clock() {
        let (snap, matchup) = fixture();
        let draft = ExecutionDraft::default();
        let ctx = DecisionContext::new(&snap, &matchup, &draft);
        assert!(PreSnapRunoff::check(&40, &ctx).is_ok());
        assert!(PreSnapRunoff::check(&41, &ctx).is_err());
    }

    #[test]
    fn defense_cannot_call_offense_play() {
        let (snap, matchup) = fixture();
        let draft = ExecutionDraft::default();
        let ctx = DecisionContext::new(&snap, &matchup, &draft);
        let book = Playbook::standard(11);
        assert!(DefensivePlayCall::check(book.find("power").unwrap(), &ctx).is_err());
        assert!(DefensivePlayCall::check(book.find("nickel").unwrap(), &ctx).is_ok());
        assert!(OffensivePlayCall::check(book.find("nickel").unwrap(), &ctx).is_err());
    }

    #[test]
    fn incomplete_pass_cannot_gain_yards() {
        let (snap, matchup) = fixture();
        let draft = ExecutionDraft {
            offense_call: Playbook::standard(11).find("slant flat").cloned(),
            ..ExecutionDraft::default()
        };
        let ctx = DecisionContext::new(&snap, &matchup, &draft);

        let mut outcome = PlayOutcome::gain(7);
        outcome.completed = Some(false);
        assert!(ScrimmageOutcome::check(&outcome, &ctx).is_err());

        outcome.yards = 0;
        assert!(ScrimmageOutcome::check(&outcome, &ctx).is_ok());

        // Completion flag is mandatory on passes.
        assert!(ScrimmageOutcome::check(&PlayOutcome::gain(3), &ctx).is_err());
    }

    #[test]
    fn outcome_must_stay_on_field() {
        let (snap, matchup) = fixture();
        let draft = ExecutionDraft {
            offense_call: Playbook::standard(11).find("power").cloned(),
            ..ExecutionDraft::default()
        };
        let ctx = DecisionContext::new(&snap, &matchup, &draft);
        assert!(ScrimmageOutcome::check(&PlayOutcome::gain(70), &ctx).is_ok());
        assert!(ScrimmageOutcome::check(&PlayOutcome::gain(71), &ctx).is_err());
        assert!(ScrimmageOutcome::check(&PlayOutcome::gain(-31), &ctx).is_err());
    }

    #[test]
    fn timeout_needs_remaining_timeouts() {
        let mut state = GameState::new(NflRules::new().format());
        state.timeouts.away = 0;
        let snap = Snapshot::capture(&state);
        let matchup = Matchup::standard(11);
        let draft = ExecutionDraft::default();
        let ctx = DecisionContext::new(&snap, &matchup, &draft);
        assert!(TimeoutCall::check(&Some(Side::Away), &ctx).is_err());
        assert!(TimeoutCall::check(&Some(Side::Home), &ctx).is_ok());
        assert!(TimeoutCall::check(&None, &ctx).is_ok());
    }
}
