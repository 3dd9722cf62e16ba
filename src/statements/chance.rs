//=====================================================
// File: statements/chance.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Probability statements
// Objective: Uniform picks, coin flips and weighted draws, each consuming the
//            interpreter PRNG so seeded runs replay exactly
//=====================================================

use regex::Captures;

use super::{StatementPattern, expect_sequence, group};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::Value;

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new("Choose", r"Choose\s+(.+)\s+into\s+(\w+)", choose),
        StatementPattern::new("Flip", r"Flip\s+with\s+p\s+(.+)\s+into\s+(\w+)", flip),
        StatementPattern::new(
            "WeightedDraw",
            r"WeightedDraw\s+from\s+(.+)\s+weights\s+(.+)\s+into\s+(\w+)",
            weighted_draw,
        ),
    ]
}

fn choose(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let options = interp.evaluate_list(group(caps, 1))?;
    if options.is_empty() {
        return Err(ScriptError::range_error("Choose needs at least one option"));
    }
    let index = interp.rng_mut().next_index(options.len());
    interp.bind_group(caps, 2, options[index].clone())
}

fn flip(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let p = interp.number_group(caps, 1)?;
    if !(0.0..=1.0).contains(&p) {
        return Err(ScriptError::range_error(format!(
            "Flip probability must lie in [0, 1], got {}",
            p
        )));
    }
    let heads = interp.next_random() < p;
    interp.bind_group(caps, 2, Value::Boolean(heads))
}

/// Index whose cumulative weight first exceeds `roll * total`. Validates the
/// weights before touching the roll.
pub fn weighted_index(weights: &[f64], roll: impl FnOnce() -> f64) -> ScriptResult<usize> {
    let mut cumulative = Vec::with_capacity(weights.len());
    let mut total = 0.0;
    for &weight in weights {
        if !(weight >= 0.0) {
            return Err(ScriptError::range_error(format!(
                "weights must be non-negative, got {}",
                weight
            )));
        }
        total += weight;
        cumulative.push(total);
    }
    if total == 0.0 {
        return Err(ScriptError::range_error("weights sum to zero"));
    }
    let target = roll() * total;
    Ok(cumulative
        .iter()
        .position(|&c| target < c)
        .unwrap_or(weights.len() - 1))
}

fn weighted_draw(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.eval_group(caps, 1)?;
    let weights = interp.eval_group(caps, 2)?;
    let items = expect_sequence(&items, "WeightedDraw")?.borrow().clone();
    let weights: Vec<f64> = expect_sequence(&weights, "WeightedDraw")?
        .borrow()
        .iter()
        .map(Value::to_number)
        .collect();
    if items.len() != weights.len() {
        return Err(ScriptError::range_error(format!(
            "{} items but {} weights",
            items.len(),
            weights.len()
        )));
    }
    let index = weighted_index(&weights, || interp.next_random())?;
    interp.bind_group(caps, 3, items[index].clone())
}


//=====================================================
// End of file
//=====================================================
