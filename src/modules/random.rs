//=====================================================
// File: modules/random.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: std/random native table
// Objective: Seeded draws over the interpreter PRNG: reseeding, bounded
//            floats and integers, coin flips, picks, shuffles and samples
//=====================================================

use super::{Module, NativeArity, arg, sequence_arg};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::rng::seed_from_number;
use crate::interpreter::value::Value;

pub fn build() -> Module {
    Module::new("std/random")
        .with("seed", NativeArity::Exact(1), random_seed)
        .with("float", NativeArity::Exact(2), random_float)
        .with("int", NativeArity::Exact(2), random_int)
        .with("bernoulli", NativeArity::Exact(1), random_bernoulli)
        .with("choice", NativeArity::Range { min: 0, max: None }, random_choice)
        .with("shuffle", NativeArity::Exact(1), random_shuffle)
        .with("sample", NativeArity::Exact(2), random_sample)
}

fn bounds(args: &[Value]) -> (f64, f64) {
    let a = arg(args, 0).to_number();
    let b = arg(args, 1).to_number();
    (a.min(b), a.max(b))
}

/// Returns the wrapped 32-bit seed actually installed.
fn random_seed(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let seed = seed_from_number(arg(args, 0).to_number());
    interp.reseed(seed);
    Ok(Value::Number(f64::from(seed)))
}

fn random_float(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let (lo, hi) = bounds(args);
    Ok(Value::Number(interp.next_random() * (hi - lo) + lo))
}

/// Inclusive on both ends.
fn random_int(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let (lo, hi) = bounds(args);
    let drawn = (interp.next_random() * (hi - lo + 1.0)).floor() + lo;
    Ok(Value::Number(drawn))
}

fn random_bernoulli(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let p = arg(args, 0).to_number();
    if !(0.0..=1.0).contains(&p) {
        return Err(ScriptError::range_error(format!(
            "bernoulli probability must lie in [0, 1], got {}",
            p
        )));
    }
    Ok(Value::Boolean(interp.next_random() < p))
}

/// A single array argument is picked from; otherwise the arguments are.
fn random_choice(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let pool = match args {
        [Value::Sequence(items)] => items.borrow().clone(),
        _ => args.to_vec(),
    };
    if pool.is_empty() {
        return Err(ScriptError::range_error("choice from an empty pool"));
    }
    let index = interp.rng_mut().next_index(pool.len());
    Ok(pool[index].clone())
}

fn random_shuffle(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let mut items = sequence_arg(args, 0, "random.shuffle")?;
    interp.rng_mut().shuffle(&mut items);
    Ok(Value::sequence(items))
}

/// Shuffles a copy and keeps the first `k`, clamped to `0..=len`.
fn random_sample(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let mut items = sequence_arg(args, 0, "random.sample")?;
    interp.rng_mut().shuffle(&mut items);
    let k = arg(args, 1).to_int().clamp(0, items.len() as i64) as usize;
    items.truncate(k);
    Ok(Value::sequence(items))
}


//=====================================================
// End of file
//=====================================================
