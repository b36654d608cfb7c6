//! Stock decision models declared as registry defaults.
//!
//! One zero-sized [`StockModel`] implements every decision point with simple
//! situation-aware heuristics. The numbers are tuned for plausible box scores,
//! not for realism of any single play.

use crate::execution::{KickoffResult, PlayOutcome};
use crate::rules::{PointAfterChoice, TossChoice};
use crate::rng::SimRng;
use crate::team::{Assignment, PlayCall, PlayType, Side, Team};

use super::kinds;
use super::registry::{DecisionRegistry, Model};
use super::DecisionContext;

/// Heuristic model used for any point without an explicit binding.
#[derive(Clone, Copy, Debug, Default)]
pub struct StockModel;

impl StockModel {
    /// Longest field goal (snap distance plus holder depth) the model attempts.
    pub const MAX_FIELD_GOAL: u8 = 55;
    /// Yards added to the snap spot distance for a field goal attempt.
    pub const HOLD_DEPTH: u8 = 17;

    /// Declares this model as the default for every decision point.
    pub fn declare_all(registry: &mut DecisionRegistry) {
        registry.declare_default::<kinds::CoinTossWinner>(Self);
        registry.declare_default::<kinds::KickReceiveChoice>(Self);
        registry.declare_default::<kinds::PreSnapRunoff>(Self);
        registry.declare_default::<kinds::TimeoutCall>(Self);
        registry.declare_default::<kinds::OffensivePlayCall>(Self);
        registry.declare_default::<kinds::DefensivePlayCall>(Self);
        registry.declare_default::<kinds::OffensivePersonnel>(Self);
        registry.declare_default::<kinds::DefensivePersonnel>(Self);
        registry.declare_default::<kinds::ScrimmageOutcome>(Self);
        registry.declare_default::<kinds::PlayClock>(Self);
        registry.declare_default::<kinds::KickoffResult>(Self);
        registry.declare_default::<kinds::PointAfterChoice>(Self);
        registry.declare_default::<kinds::PointAfterResult>(Self);
    }

    fn field_goal_distance(ctx: &DecisionContext<'_>) -> u8 {
        ctx.yards_to_goal().saturating_add(Self::HOLD_DEPTH)
    }

    fn pick_call(team: &Team, play_type: PlayType, rng: &mut SimRng) -> Option<PlayCall> {
        let calls = team.playbook().by_type(play_type);
        rng.pick(&calls).map(|call| (*call).clone())
    }
}

impl Model<kinds::CoinTossWinner> for StockModel {
    fn decide(&self, _ctx: &DecisionContext<'_>, rng: &mut SimRng) -> Side {
        if rng.percent(50) { Side::Home } else { Side::Away }
    }
}

impl Model<kinds::KickReceiveChoice> for StockModel {
    fn decide(&self, _ctx: &DecisionContext<'_>, rng: &mut SimRng) -> TossChoice {
        if rng.percent(70) {
            TossChoice::Receive
        } else {
            TossChoice::Defer
        }
    }
}

impl Model<kinds::PreSnapRunoff> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> u32 {
        let clock = ctx.format().play_clock_seconds;
        let high = clock.min(38);
        let low = high.min(20);
        rng.range(low as i32, high as i32).max(0) as u32
    }
}

impl Model<kinds::TimeoutCall> for StockModel {
    /// The trailing team stops a running clock late in the game.
    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut SimRng) -> Option<Side> {
        let snap = ctx.snapshot;
        let late = snap.clock.quarter >= snap.format.regulation_quarters
            && snap.clock.seconds_remaining <= 120;
        if !late || !snap.clock.running {
            return None;
        }
        let trailing = snap.scoreboard.leader()?.opponent();
        (snap.timeouts.remaining(trailing) > 0).then_some(trailing)
    }
}

impl Model<kinds::OffensivePlayCall> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> PlayCall {
        let snap = ctx.snapshot;
        let possession = snap.possession;
        let format = snap.format;
        let in_range = Self::field_goal_distance(ctx) <= Self::MAX_FIELD_GOAL;
        let half_ending = format.ends_half(snap.clock.quarter) && snap.clock.seconds_remaining <= 8;

        let play_type = if half_ending && in_range {
            PlayType::FieldGoal
        } else if possession.down >= format.max_downs {
            let short = possession.distance <= 2;
            let past_midfield = possession.ball_on > format.field_length / 2;
            if in_range {
                PlayType::FieldGoal
            } else if short && past_midfield && rng.percent(60) {
                PlayType::Run
            } else {
                PlayType::Punt
            }
        } else {
            let pass_rate = if possession.distance >= 7 { 65 } else { 45 };
            if rng.percent(pass_rate) {
                PlayType::Pass
            } else {
                PlayType::Run
            }
        };

        Self::pick_call(ctx.offense(), play_type, rng)
            .or_else(|| Self::pick_call(ctx.offense(), PlayType::Run, rng))
            .unwrap_or_else(|| PlayCall::new("kneel", PlayType::Run, Default::default()))
    }
}

impl Model<kinds::DefensivePlayCall> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> PlayCall {
        let team = ctx.defense();
        let situational = if ctx.yards_to_goal() <= 5 {
            team.playbook().find("goal line")
        } else if ctx.snapshot.possession.distance >= 7 {
            team.playbook().find("nickel")
        } else {
            None
        };
        situational
            .cloned()
            .or_else(|| Self::pick_call(team, PlayType::Defense, rng))
            .unwrap_or_else(|| PlayCall::new("prevent", PlayType::Defense, Default::default()))
    }
}

impl Model<kinds::OffensivePersonnel> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut SimRng) -> Assignment {
        ctx.draft
            .offense_call
            .as_ref()
            .and_then(|call| Assignment::fill(ctx.offense(), call))
            .unwrap_or_default()
    }
}

impl Model<kinds::DefensivePersonnel> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, _rng: &mut SimRng) -> Assignment {
        ctx.draft
            .defense_call
            .as_ref()
            .and_then(|call| Assignment::fill(ctx.defense(), call))
            .unwrap_or_default()
    }
}

impl Model<kinds::ScrimmageOutcome> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> PlayOutcome {
        let ball_on = i32::from(ctx.snapshot.possession.ball_on);
        let to_goal = i32::from(ctx.yards_to_goal());
        let on_field = |yards: i32| yards.clamp(-ball_on, to_goal) as i16;
        let play_type = ctx
            .draft
            .offense_call
            .as_ref()
            .map_or(PlayType::Run, |call| call.play_type);

        match play_type {
            PlayType::Run => {
                let mut outcome = PlayOutcome::gain(0);
                let yards = if rng.percent(8) {
                    rng.range(10, 45)
                } else {
                    rng.range(-3, 8)
                };
                if rng.percent(4) {
                    outcome.penalty = true;
                    // Half the distance to the goal when inside the 20.
                    outcome.yards = -(10.min(ball_on / 2)) as i16;
                    return outcome;
                }
                outcome.yards = on_field(yards);
                outcome.turnover = rng.percent(2);
                outcome
            }
            PlayType::Pass => {
                let mut outcome = PlayOutcome::gain(0);
                if rng.percent(3) {
                    outcome.completed = Some(false);
                    outcome.turnover = true;
                    outcome.yards = on_field(rng.range(5, 30));
                } else if rng.percent(63) {
                    let yards = if rng.percent(10) {
                        rng.range(20, 60)
                    } else {
                        rng.range(0, 18)
                    };
                    outcome.completed = Some(true);
                    outcome.yards = on_field(yards);
                } else {
                    outcome.completed = Some(false);
                }
                outcome
            }
            PlayType::Punt => {
                let net = rng.range(32, 50).min(to_goal).max(1);
                PlayOutcome::gain(net as i16)
            }
            PlayType::FieldGoal => {
                let distance = Self::field_goal_distance(ctx);
                let chance = match distance {
                    0..=30 => 96,
                    31..=40 => 88,
                    41..=50 => 74,
                    51..=55 => 58,
                    _ => 30,
                };
                PlayOutcome {
                    field_goal_good: Some(rng.percent(chance)),
                    ..PlayOutcome::gain(0)
                }
            }
            PlayType::Defense => PlayOutcome::gain(0),
        }
    }
}

impl Model<kinds::PlayClock> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> u32 {
        let limit = ctx.format().max_play_seconds as i32;
        rng.range(4, 9).min(limit).max(0) as u32
    }
}

impl Model<kinds::KickoffResult> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> KickoffResult {
        let length = i32::from(ctx.format().field_length);
        let spot = ctx.draft.kickoff.map_or(35, |setup| i32::from(setup.spot));
        let distance = rng.range(55, 75);
        let landing = spot + distance;

        if landing >= length && rng.percent(60) {
            return KickoffResult {
                distance: distance as u8,
                touchback: true,
                return_yards: 0,
            };
        }

        let fielded = length - landing;
        let return_yards = if rng.percent(1) {
            landing
        } else {
            rng.range(15, 35).max(1 - fielded)
        };
        KickoffResult {
            distance: distance as u8,
            touchback: false,
            return_yards: return_yards as i16,
        }
    }
}

impl Model<kinds::PointAfterChoice> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> PointAfterChoice {
        let offered = |choice: PointAfterChoice| {
            ctx.draft
                .point_after
                .as_ref()
                .is_some_and(|setup| setup.option(choice).is_some())
        };
        if offered(PointAfterChoice::TwoPoint) && (rng.percent(8) || !offered(PointAfterChoice::Kick))
        {
            PointAfterChoice::TwoPoint
        } else {
            PointAfterChoice::Kick
        }
    }
}

impl Model<kinds::PointAfterResult> for StockModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> bool {
        match ctx.draft.point_after_choice {
            Some(PointAfterChoice::TwoPoint) => rng.percent(48),
            _ => rng.percent(94),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::kinds::DecisionKind;
    use crate::execution::ExecutionDraft;
    use crate::rules::{NflRules, RulesOracle};
    use crate::state::{GameState, Snapshot};
    use crate::team::Matchup;

    #[test]
    fn stock_outputs_satisfy_contracts() {
        let rules = NflRules::new();
        let matchup = Matchup::standard(11);
        let mut rng = SimRng::from_seed(42);

        for ball_on in [1u8, 20, 50, 80, 99] {
            for down in 1..=4u8 {
                let mut state = GameState::new(rules.format());
                state.possession.ball_on = ball_on;
                state.possession.down = down;
                let snap = Snapshot::capture(&state);
                let mut draft = ExecutionDraft::default();

                let ctx = DecisionContext::new(&snap, &matchup, &draft);
                let call = Model::<kinds::OffensivePlayCall>::decide(&StockModel, &ctx, &mut rng);
                kinds::OffensivePlayCall::check(&call, &ctx).unwrap();
                let defense = Model::<kinds::DefensivePlayCall>::decide(&StockModel, &ctx, &mut rng);
                kinds::DefensivePlayCall::check(&defense, &ctx).unwrap();
                draft.offense_call = Some(call);
                draft.defense_call = Some(defense);

                let ctx = DecisionContext::new(&snap, &matchup, &draft);
                let personnel = Model::<kinds::OffensivePersonnel>::decide(&StockModel, &ctx, &mut rng);
                kinds::OffensivePersonnel::check(&personnel, &ctx).unwrap();
                let personnel = Model::<kinds::DefensivePersonnel>::decide(&StockModel, &ctx, &mut rng);
                kinds::DefensivePersonnel::check(&personnel, &ctx).unwrap();
                for _ in 0..20 {
                    let outcome = Model::<kinds::ScrimmageOutcome>::decide(&StockModel, &ctx, &mut rng);
                    kinds::ScrimmageOutcome::check(&outcome, &ctx).unwrap();
                }
            }
        }
    }

    #[test]
    fn stock_kickoffs_satisfy_contract() {
        let rules = NflRules::new();
        let matchup = Matchup::standard(11);
        let state = GameState::new(rules.format());
        let snap = Snapshot::capture(&state);
        let draft = ExecutionDraft {
            kickoff: Some(rules.kickoff_setup(&snap, Side::Home)),
            ..ExecutionDraft::default()
        };
        let ctx = DecisionContext::new(&snap, &matchup, &draft);
        let mut rng = SimRng::from_seed(7);
        for _ in 0..200 {
            let kick = Model::<kinds::KickoffResult>::decide(&StockModel, &ctx, &mut rng);
            kinds::KickoffResult::check(&kick, &ctx).unwrap();
        }
    }

    #[test]
    fn fourth_down_deep_in_own_territory_punts() {
        let rules = NflRules::new();
        let matchup = Matchup::standard(11);
        let mut state = GameState::new(rules.format());
        state.possession.ball_on = 20;
        state.possession.down = 4;
        state.possession.distance = 8;
        let snap = Snapshot::capture(&state);
        let draft = ExecutionDraft::default();
        let ctx = DecisionContext::new(&snap, &matchup, &draft);
        let call =
            Model::<kinds::OffensivePlayCall>::decide(&StockModel, &ctx, &mut SimRng::from_seed(1));
        assert_eq!(call.play_type, PlayType::Punt);
    }
}
