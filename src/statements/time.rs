//=====================================================
// File: statements/time.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Timestamp statements
// Objective: Read the clock, decode and format patterned dates, snap to day
//            boundaries and measure gaps between instants
//=====================================================

use regex::Captures;

use super::{StatementPattern, group};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::time;
use crate::interpreter::value::Value;

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new("NowUTC", r"NowUTC\s+into\s+(\w+)", now_utc),
        StatementPattern::new(
            "DecodeTime",
            r#"DecodeTime\s+"([^"]+)"\s+as\s+"([^"]+)"\s+into\s+(\w+)"#,
            decode_time,
        ),
        StatementPattern::new("DawnOf", r"DawnOf\s+(.+)\s+into\s+(\w+)", dawn_of),
        StatementPattern::new("DuskOf", r"DuskOf\s+(.+)\s+into\s+(\w+)", dusk_of),
        StatementPattern::new(
            "GapDays",
            r"GapDays\s+between\s+(.+)\s+and\s+(.+)\s+into\s+(\w+)",
            gap_days,
        ),
        StatementPattern::new(
            "GapSeconds",
            r"GapSeconds\s+between\s+(.+)\s+and\s+(.+)\s+into\s+(\w+)",
            gap_seconds,
        ),
        StatementPattern::new(
            "Format",
            r#"Format\s+(.+)\s+as\s+"([^"]+)"\s+into\s+(\w+)"#,
            format,
        ),
    ]
}

fn now_utc(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.bind_group(caps, 1, Value::Timestamp(time::now_utc()))
}

fn decode_time(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let parsed = interp.parse_time(group(caps, 1), group(caps, 2))?;
    interp.bind_group(caps, 3, Value::Timestamp(parsed))
}

fn dawn_of(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let ts = time::to_timestamp(&interp.eval_group(caps, 1)?)?;
    interp.bind_group(caps, 2, Value::Timestamp(time::start_of_day(&ts)))
}

fn dusk_of(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let ts = time::to_timestamp(&interp.eval_group(caps, 1)?)?;
    interp.bind_group(caps, 2, Value::Timestamp(time::end_of_day(&ts)))
}

fn gap_days(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let a = time::to_timestamp(&interp.eval_group(caps, 1)?)?;
    let b = time::to_timestamp(&interp.eval_group(caps, 2)?)?;
    interp.bind_group(caps, 3, Value::Number(time::diff_days(&a, &b)))
}

fn gap_seconds(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let a = time::to_timestamp(&interp.eval_group(caps, 1)?)?;
    let b = time::to_timestamp(&interp.eval_group(caps, 2)?)?;
    interp.bind_group(caps, 3, Value::Number(time::diff_seconds(&a, &b)))
}

fn format(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let ts = time::to_timestamp(&interp.eval_group(caps, 1)?)?;
    let text = time::format_timestamp(&ts, group(caps, 2));
    interp.bind_group(caps, 3, Value::String(text))
}


//=====================================================
// End of file
//=====================================================
