//=====================================================
// File: statements/math.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Numeric statements
// Objective: Remainders, powers, clamping, rounding, range remapping and
//            uniform float draws from the interpreter PRNG
//=====================================================

use regex::Captures;

use super::StatementPattern;
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::time::round_half_up;
use crate::interpreter::value::Value;

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new(
            "Remainder",
            r"Remainder\s+(.+)\s+by\s+(.+)\s+into\s+(\w+)",
            remainder,
        ),
        StatementPattern::new("Raise", r"Raise\s+(.+)\s+by\s+(.+)\s+into\s+(\w+)", raise),
        StatementPattern::new(
            "Clamp",
            r"Clamp\s+(.+)\s+between\s+(.+)\s+and\s+(.+)\s+into\s+(\w+)",
            clamp,
        ),
        StatementPattern::new("Round", r"Round\s+(.+)\s+into\s+(\w+)", round),
        StatementPattern::new("Floor", r"Floor\s+(.+)\s+into\s+(\w+)", floor),
        StatementPattern::new("Ceil", r"Ceil\s+(.+)\s+into\s+(\w+)", ceil),
        StatementPattern::new("Abs", r"Abs\s+(.+)\s+into\s+(\w+)", abs),
        StatementPattern::new(
            "MapRange",
            r"MapRange\s+(.+)\s+from\s+(.+?)\.\.(.+?)\s+to\s+(.+?)\.\.(.+?)\s+into\s+(\w+)",
            map_range,
        ),
        StatementPattern::new(
            "DrawFloat",
            r"Draw\s+float\s+between\s+(.+)\s+and\s+(.+)\s+into\s+(\w+)",
            draw_float,
        ),
    ]
}

fn binary(
    interp: &mut Interpreter,
    caps: &Captures<'_>,
    op: fn(f64, f64) -> f64,
) -> ScriptResult<()> {
    let a = interp.number_group(caps, 1)?;
    let b = interp.number_group(caps, 2)?;
    interp.bind_group(caps, 3, Value::Number(op(a, b)))
}

fn unary(interp: &mut Interpreter, caps: &Captures<'_>, op: fn(f64) -> f64) -> ScriptResult<()> {
    let x = interp.number_group(caps, 1)?;
    interp.bind_group(caps, 2, Value::Number(op(x)))
}

fn remainder(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    binary(interp, caps, |a, b| a % b)
}

fn raise(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    binary(interp, caps, f64::powf)
}

/// `min(hi, max(lo, x))` where any NaN operand yields NaN.
pub fn clamp_value(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() || lo.is_nan() || hi.is_nan() {
        return f64::NAN;
    }
    hi.min(lo.max(x))
}

fn clamp(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let x = interp.number_group(caps, 1)?;
    let lo = interp.number_group(caps, 2)?;
    let hi = interp.number_group(caps, 3)?;
    interp.bind_group(caps, 4, Value::Number(clamp_value(x, lo, hi)))
}

fn round(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    unary(interp, caps, round_half_up)
}

fn floor(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    unary(interp, caps, f64::floor)
}

fn ceil(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    unary(interp, caps, f64::ceil)
}

fn abs(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    unary(interp, caps, f64::abs)
}

pub fn remap(x: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    to.0 + ((x - from.0) / (from.1 - from.0)) * (to.1 - to.0)
}

fn map_range(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let x = interp.number_group(caps, 1)?;
    let a1 = interp.number_group(caps, 2)?;
    let b1 = interp.number_group(caps, 3)?;
    let a2 = interp.number_group(caps, 4)?;
    let b2 = interp.number_group(caps, 5)?;
    interp.bind_group(caps, 6, Value::Number(remap(x, (a1, b1), (a2, b2))))
}

fn draw_float(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let a = interp.number_group(caps, 1)?;
    let b = interp.number_group(caps, 2)?;
    let (lo, hi) = (a.min(b), a.max(b));
    let drawn = interp.next_random() * (hi - lo) + lo;
    interp.bind_group(caps, 3, Value::Number(drawn))
}


//=====================================================
// End of file
//=====================================================
