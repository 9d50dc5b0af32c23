//! Pass-play resolution
//!
//! Same composition order as runs, on the completion-rate axis. The discrete
//! result is rolled first; air yards, yards after catch and sack loss are then
//! sampled conditioned on it.

use super::attribution::{attribute_pass, PassAttribution};
use super::baseline::BaselineTable;
use super::config::{clamp_between, KernelConfig, PassConfig};
use super::modifiers::{compose_pass_parameters, pass_rating_modifiers, PassParameters};
use super::penalty::{PenaltyRequest, PenaltyService};
use super::PlayContext;
use crate::models::{
    PassDetail, PassResult, PlayOutcome, PlayResolution, PlayType, Position, Roster, RosterPlayer,
};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};
use tracing::trace;

/// Intended receiver, weighted toward better-rated receivers
pub fn pick_target<'a, R: Rng + ?Sized>(
    offense: &'a Roster,
    cfg: &PassConfig,
    rng: &mut R,
) -> Option<&'a RosterPlayer> {
    let receivers: Vec<&RosterPlayer> = offense.at(&Position::RECEIVERS).collect();
    receivers
        .choose_weighted(rng, |p| {
            (p.overall.max(1) as f32 / 100.0).powf(cfg.target_rating_exponent)
        })
        .ok()
        .copied()
}

/// Composed parameters for a pass to `target` under `ctx`
pub fn pass_parameters(
    ctx: &PlayContext<'_>,
    target: Option<&RosterPlayer>,
    config: &KernelConfig,
    baselines: &BaselineTable,
) -> PassParameters {
    let baseline = baselines.pass(ctx.offensive_formation, ctx.defensive_formation);
    let ratings = pass_rating_modifiers(ctx.offense, ctx.defense, target, &config.ratings);
    compose_pass_parameters(
        baseline,
        ratings,
        ctx.momentum_modifier,
        ctx.script,
        ctx.offensive_formation,
        ctx.coverage,
        &config.pass,
    )
}

/// Discrete result plus whether the passer was pressured.
///
/// Sack is rolled first. On a throw, pressure scales completion down and
/// interceptions up, then one uniform roll walks completion, interception,
/// deflection; anything left is an incompletion.
pub fn roll_pass_result<R: Rng + ?Sized>(
    params: &PassParameters,
    cfg: &PassConfig,
    rng: &mut R,
) -> (PassResult, bool) {
    if rng.gen::<f32>() < params.sack_rate {
        return (PassResult::Sack, true);
    }

    let pressured = rng.gen::<f32>() < params.pressure_rate;
    let (completion, interception) = if pressured {
        (
            clamp_between(
                params.completion_rate * cfg.pressure_completion_factor,
                cfg.min_completion_rate,
                cfg.max_completion_rate,
            ),
            params.interception_rate * cfg.pressure_interception_factor,
        )
    } else {
        (params.completion_rate, params.interception_rate)
    };

    let roll = rng.gen::<f32>();
    let result = if roll < completion {
        PassResult::Completion
    } else if roll < completion + interception {
        PassResult::Interception
    } else if roll < completion + interception + params.deflection_rate {
        PassResult::Deflection
    } else {
        PassResult::Incompletion
    };
    (result, pressured)
}

fn sample_normal<R: Rng + ?Sized>(mean: f32, std_dev: f32, rng: &mut R) -> f32 {
    match Normal::new(mean, std_dev) {
        Ok(dist) => dist.sample(rng),
        Err(_) => mean,
    }
}

pub fn resolve_pass<R, P>(
    ctx: &PlayContext<'_>,
    config: &KernelConfig,
    baselines: &BaselineTable,
    penalties: &P,
    rng: &mut R,
) -> PlayResolution
where
    R: Rng,
    P: PenaltyService + ?Sized,
{
    let cfg = &config.pass;
    let target = pick_target(ctx.offense, cfg, rng);
    let params = pass_parameters(ctx, target, config, baselines);

    let time_to_throw = clamp_between(
        sample_normal(params.mean_time_to_throw, cfg.time_to_throw_std_dev, rng),
        cfg.min_time_to_throw,
        cfg.max_time_to_throw,
    );
    let (result, pressured) = roll_pass_result(&params, cfg, rng);

    let (air_yards, yards_after_catch, yards) = match result {
        PassResult::Sack => {
            let loss = sample_normal(cfg.sack_yards_mean, cfg.sack_yards_std_dev, rng)
                .clamp(1.0, 15.0) as i32;
            (0, 0, -loss)
        }
        PassResult::Completion => {
            let air = clamp_between(
                sample_normal(params.mean_air_yards, cfg.air_yards_std_dev, rng),
                cfg.min_air_yards,
                cfg.max_air_yards,
            ) as i32;
            let yac = match Exp::new(1.0 / params.mean_yards_after_catch.max(0.1)) {
                Ok(dist) => dist.sample(rng) as i32,
                Err(_) => 0,
            };
            (air, yac, air + yac)
        }
        PassResult::Incompletion | PassResult::Interception | PassResult::Deflection => {
            let air = clamp_between(
                sample_normal(params.mean_air_yards, cfg.air_yards_std_dev, rng),
                cfg.min_air_yards,
                cfg.max_air_yards,
            ) as i32;
            (air, 0, 0)
        }
    };

    let elapsed_seconds = time_to_throw
        + match result {
            PassResult::Completion => cfg.seconds_per_yard * yards.max(0) as f32,
            PassResult::Sack => cfg.sack_seconds,
            PassResult::Incompletion | PassResult::Interception | PassResult::Deflection => {
                cfg.incompletion_seconds
            }
        };

    trace!(
        offense = %ctx.offensive_formation,
        defense = %ctx.defensive_formation,
        completion = params.completion_rate,
        sack = params.sack_rate,
        interception = params.interception_rate,
        prevent = params.prevent,
        ?result,
        yards,
        "pass play sampled"
    );

    let detail = PassDetail {
        result,
        target: if result.is_attempt() { target.map(|t| t.id) } else { None },
        air_yards,
        yards_after_catch,
        time_to_throw,
        pressured,
    };

    let request = PenaltyRequest {
        offense: ctx.offense,
        defense: ctx.defense,
        play_type: PlayType::Pass,
        offensive_formation: ctx.offensive_formation,
        defensive_formation: ctx.defensive_formation,
        yards,
    };
    let verdict = penalties.evaluate(&request, &mut *rng);
    let final_yards = verdict.modified_yards;
    let turnover = result == PassResult::Interception && !verdict.play_negated;

    let stats = attribute_pass(
        ctx.defense,
        PassAttribution {
            quarterback: ctx.offense.quarterback(),
            target: if result.is_attempt() { target } else { None },
            detail: &detail,
            final_yards,
        },
        cfg,
        &config.tackling,
        rng,
    );

    PlayResolution {
        outcome: PlayOutcome {
            play_type: PlayType::Pass,
            yards: final_yards,
            elapsed_seconds,
            turnover,
            penalty: verdict.annotate(yards),
            pass: Some(detail),
        },
        stats,
    }
}
