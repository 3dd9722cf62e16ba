//=====================================================
// File: statements/sequence.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Sequence statements
// Objective: Shuffle, sample, grow, split, range, aggregate, order and search
//            sequences; in-place forms mutate the shared storage
//=====================================================

use std::cmp::Ordering;

use regex::Captures;

use super::{StatementPattern, expect_sequence, group, refuse_cycle};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::{SharedSequence, Value};

//=====================================================
// Section 1.0 - Catalogue
//=====================================================

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new("Stir", r"Stir\s+(.+)", stir),
        StatementPattern::new(
            "DrawFrom",
            r"DrawFrom\s+(.+)\s+count\s+(.+)\s+into\s+(\w+)",
            draw_from,
        ),
        StatementPattern::new("BindFront", r"BindFront\s+(.+)\s+to\s+(\w+)", bind_front),
        StatementPattern::new(
            "PluckFirst",
            r"PluckFirst\s+from\s+(\w+)\s+into\s+(\w+)",
            pluck_first,
        ),
        StatementPattern::new("Fuse", r"Fuse\s+(.+)\s+and\s+(.+)\s+into\s+(\w+)", fuse),
        StatementPattern::new("Unfold", r"Unfold\s+(.+)\s+one\s+level\s+into\s+(\w+)", unfold),
        StatementPattern::new("Bundle", r"Bundle\s+(.+)\s+by\s+(.+)\s+into\s+(\w+)", bundle),
        StatementPattern::new(
            "Span",
            r"Span\s+(.+?)\s+to\s+(.+?)(?:\s+by\s+(.+?))?\s+into\s+(\w+)",
            span,
        ),
        StatementPattern::new("Sum", r"Sum\s+(.+)\s+into\s+(\w+)", sum),
        StatementPattern::new("Average", r"Average\s+(.+)\s+into\s+(\w+)", average),
        StatementPattern::new("Min", r"Min\s+(.+)\s+into\s+(\w+)", min),
        StatementPattern::new("Max", r"Max\s+(.+)\s+into\s+(\w+)", max),
        StatementPattern::new("Flood", r"Flood\s+(\w+)\s+with\s+(.+)", flood),
        StatementPattern::new(
            "Sort",
            r"Sort\s+(.+?)(?:\s+(ascending|descending))?",
            sort,
        ),
        StatementPattern::new("Reverse", r"Reverse\s+(.+)", reverse),
        StatementPattern::new("Unique", r"Unique\s+(.+)\s+into\s+(\w+)", unique),
        StatementPattern::new("Seek", r"Seek\s+(.+)\s+in\s+(.+)\s+into\s+(\w+)", seek),
        StatementPattern::new(
            "TakeFirst",
            r"TakeFirst\s+(.+?)\s+from\s+(.+)\s+into\s+(\w+)",
            take_first,
        ),
        StatementPattern::new(
            "TakeLast",
            r"TakeLast\s+(.+?)\s+from\s+(.+)\s+into\s+(\w+)",
            take_last,
        ),
    ]
}

//=====================================================
// Section 2.0 - Randomised Order
//=====================================================

fn stir(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.guard_in_place(group(caps, 1))?;
    let items = interp.sequence_group(caps, 1, "Stir")?;
    interp.rng_mut().shuffle(items.borrow_mut().as_mut_slice());
    Ok(())
}

fn draw_from(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "DrawFrom")?;
    let count = interp.eval_group(caps, 2)?.to_int().max(0) as usize;
    let mut pool = items.borrow().clone();
    interp.rng_mut().shuffle(pool.as_mut_slice());
    pool.truncate(count);
    interp.bind_group(caps, 3, Value::sequence(pool))
}

//=====================================================
// Section 3.0 - Growing & Shrinking
//=====================================================

/// The named variable itself must hold a sequence; expressions are not
/// accepted as targets.
fn named_sequence(interp: &Interpreter, name: &str, statement: &str) -> ScriptResult<SharedSequence> {
    if interp.is_sealed(name) {
        return Err(ScriptError::SealedVariable(name.to_string()));
    }
    match interp.variable(name) {
        Some(Value::Sequence(items)) => Ok(items),
        _ => Err(ScriptError::type_error(format!(
            "{}: '{}' is not an array",
            statement, name
        ))),
    }
}

fn bind_front(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let value = interp.eval_group(caps, 1)?;
    let name = group(caps, 2);
    let items = named_sequence(interp, name, "BindFront")?;
    refuse_cycle(&value, &Value::Sequence(items.clone()), "BindFront")?;
    items.borrow_mut().insert(0, value);
    Ok(())
}

fn pluck_first(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let source = group(caps, 1);
    let items = named_sequence(interp, source, "PluckFirst")?;
    let head = {
        let mut items = items.borrow_mut();
        if items.is_empty() {
            Value::Undefined
        } else {
            items.remove(0)
        }
    };
    interp.bind_group(caps, 2, head)
}

fn fuse(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let first = interp.sequence_group(caps, 1, "Fuse")?;
    let second = interp.sequence_group(caps, 2, "Fuse")?;
    let mut joined = first.borrow().clone();
    joined.extend(second.borrow().iter().cloned());
    interp.bind_group(caps, 3, Value::sequence(joined))
}

/// Nested sequences are spliced in; other elements pass through.
pub fn flatten_once(items: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Sequence(inner) => out.extend(inner.borrow().iter().cloned()),
            other => out.push(other.clone()),
        }
    }
    out
}

fn unfold(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Unfold")?;
    let flat = flatten_once(&items.borrow());
    interp.bind_group(caps, 2, Value::sequence(flat))
}

pub fn chunk(items: &[Value], size: i64) -> Vec<Value> {
    let size = size.max(1) as usize;
    items
        .chunks(size)
        .map(|piece| Value::sequence(piece.to_vec()))
        .collect()
}

fn bundle(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Bundle")?;
    let size = interp.eval_group(caps, 2)?.to_int();
    let chunks = chunk(&items.borrow(), size);
    interp.bind_group(caps, 3, Value::sequence(chunks))
}

/// Longest sequence a single Span may produce.
pub const MAX_SPAN_LEN: usize = 1_000_000;

/// Inclusive arithmetic progression. The step defaults to +1 or -1 from the
/// direction of the bounds. The length is fixed up front, so steps too small
/// to move a large bound still terminate.
pub fn span_values(from: f64, to: f64, step: Option<f64>) -> ScriptResult<Vec<Value>> {
    let step = step.unwrap_or(if from <= to { 1.0 } else { -1.0 });
    if !from.is_finite() || !to.is_finite() || !step.is_finite() || step == 0.0 {
        return Err(ScriptError::range_error(format!(
            "cannot span {} to {} by {}",
            from, to, step
        )));
    }
    let last = ((to - from) / step).floor();
    if last < 0.0 {
        return Ok(Vec::new());
    }
    if last >= MAX_SPAN_LEN as f64 {
        return Err(ScriptError::range_error(format!(
            "span {} to {} by {} exceeds {} elements",
            from, to, step, MAX_SPAN_LEN
        )));
    }
    Ok((0..=last as usize)
        .map(|i| Value::Number(from + i as f64 * step))
        .collect())
}

fn span(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let from = interp.number_group(caps, 1)?;
    let to = interp.number_group(caps, 2)?;
    let step = match caps.get(3) {
        Some(expr) => Some(interp.evaluate(expr.as_str())?.to_number()),
        None => None,
    };
    let values = span_values(from, to, step)?;
    interp.bind_group(caps, 4, Value::sequence(values))
}

//=====================================================
// Section 4.0 - Aggregates
//=====================================================

pub fn total(items: &[Value]) -> f64 {
    items.iter().map(Value::to_number_or_zero).sum()
}

fn sum(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Sum")?;
    let sum = total(&items.borrow());
    interp.bind_group(caps, 2, Value::Number(sum))
}

fn average(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let value = interp.eval_group(caps, 1)?;
    let mean = match value.as_sequence() {
        Some(items) if !items.borrow().is_empty() => {
            let items = items.borrow();
            total(&items) / items.len() as f64
        }
        _ => 0.0,
    };
    interp.bind_group(caps, 2, Value::Number(mean))
}

/// Smallest or largest numeric view; a NaN anywhere poisons the result.
pub fn extreme(items: &[Value], largest: bool, statement: &str) -> ScriptResult<f64> {
    if items.is_empty() {
        return Err(ScriptError::range_error(format!("{} of an empty array", statement)));
    }
    let mut best = items[0].to_number();
    for item in &items[1..] {
        let n = item.to_number();
        if best.is_nan() || n.is_nan() {
            best = f64::NAN;
        } else if (largest && n > best) || (!largest && n < best) {
            best = n;
        }
    }
    Ok(best)
}

fn min(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Min")?;
    let low = extreme(&items.borrow(), false, "Min")?;
    interp.bind_group(caps, 2, Value::Number(low))
}

fn max(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Max")?;
    let high = extreme(&items.borrow(), true, "Max")?;
    interp.bind_group(caps, 2, Value::Number(high))
}

//=====================================================
// Section 5.0 - In-place Ordering
//=====================================================

fn flood(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let name = group(caps, 1);
    let value = interp.eval_group(caps, 2)?;
    let items = named_sequence(interp, name, "Flood")?;
    refuse_cycle(&value, &Value::Sequence(items.clone()), "Flood")?;
    items.borrow_mut().fill(value);
    Ok(())
}

/// Numbers before everything else, numbers by value, the rest by display.
pub fn ascending(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn sort(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.guard_in_place(group(caps, 1))?;
    let items = interp.sequence_group(caps, 1, "Sort")?;
    let descending = caps
        .get(2)
        .is_some_and(|dir| dir.as_str().eq_ignore_ascii_case("descending"));
    let mut items = items.borrow_mut();
    if descending {
        items.sort_by(|a, b| ascending(b, a));
    } else {
        items.sort_by(ascending);
    }
    Ok(())
}

fn reverse(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.guard_in_place(group(caps, 1))?;
    let items = interp.sequence_group(caps, 1, "Reverse")?;
    items.borrow_mut().reverse();
    Ok(())
}

pub fn dedupe(items: &[Value]) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

fn unique(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Unique")?;
    let distinct = dedupe(&items.borrow());
    interp.bind_group(caps, 2, Value::sequence(distinct))
}

fn seek(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let needle = interp.eval_group(caps, 1)?;
    let container = interp.eval_group(caps, 2)?;
    let position = match &container {
        Value::String(text) => {
            let needle = needle.to_string();
            match text.find(&needle) {
                Some(byte) => text[..byte].chars().count() as f64,
                None => -1.0,
            }
        }
        Value::Sequence(items) => items
            .borrow()
            .iter()
            .position(|item| *item == needle)
            .map_or(-1.0, |i| i as f64),
        other => {
            return Err(ScriptError::type_error(format!(
                "Seek searches strings or arrays, got {}",
                other.essence()
            )));
        }
    };
    interp.bind_group(caps, 3, Value::Number(position))
}

fn take(interp: &mut Interpreter, caps: &Captures<'_>, from_end: bool) -> ScriptResult<()> {
    let count = interp.eval_group(caps, 1)?.to_int().max(0) as usize;
    let value = interp.eval_group(caps, 2)?;
    let items = expect_sequence(&value, if from_end { "TakeLast" } else { "TakeFirst" })?;
    let taken = {
        let items = items.borrow();
        let count = count.min(items.len());
        if from_end {
            items[items.len() - count..].to_vec()
        } else {
            items[..count].to_vec()
        }
    };
    interp.bind_group(caps, 3, Value::sequence(taken))
}

fn take_first(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    take(interp, caps, false)
}

fn take_last(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    take(interp, caps, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Interpreter {
        let mut interp = Interpreter::new();
        interp.interpret(source).unwrap();
        interp
    }

    fn shown(interp: &Interpreter, name: &str) -> String {
        interp.variable(name).unwrap().to_string()
    }

    #[test]
    fn span_infers_direction_and_honours_step() {
        let interp = run("Span 1 to 5 into up ok\nSpan 5 to 1 into down ok\nSpan 0 to 10 by 4 into stepped ok");
        assert_eq!(shown(&interp, "up"), "[1, 2, 3, 4, 5]");
        assert_eq!(shown(&interp, "down"), "[5, 4, 3, 2, 1]");
        assert_eq!(shown(&interp, "stepped"), "[0, 4, 8]");
    }

    #[test]
    fn span_rejects_a_zero_step() {
        let mut interp = Interpreter::new();
        let err = interp.interpret("Span 1 to 3 by 0 into r ok").unwrap_err();
        assert!(matches!(err.root(), ScriptError::RangeError(_)));
    }

    #[test]
    fn span_length_is_bounded() {
        let interp = run("Span 9007199254740992 to 9007199254740993 into r ok\nSpan 1 to 5 by -1 into backwards ok");
        let r = interp.variable("r").unwrap();
        assert_eq!(r.as_sequence().unwrap().borrow().len(), 1);
        assert_eq!(shown(&interp, "backwards"), "[]");

        let mut interp = Interpreter::new();
        let err = interp.interpret("Span 0 to 1000000000000 into r ok").unwrap_err();
        assert!(matches!(err.root(), ScriptError::RangeError(_)));
        assert_eq!(span_values(0.0, 999_999.0, None).unwrap().len(), MAX_SPAN_LEN);
    }

    #[test]
    fn in_place_operations_share_storage() {
        let interp = run(
            "xs is [3, \"b\", 1, \"a\"] ok\n\
             alias is xs ok\n\
             Sort xs ok\n\
             BindFront 0 to xs ok\n\
             PluckFirst from xs into head ok",
        );
        assert_eq!(shown(&interp, "alias"), "[1, 3, a, b]");
        assert_eq!(shown(&interp, "head"), "0");
    }

    #[test]
    fn descending_and_reverse() {
        let interp = run("xs is [2, 9, 4] ok\nSort xs descending ok\nys is [1, 2, 3] ok\nReverse ys ok");
        assert_eq!(shown(&interp, "xs"), "[9, 4, 2]");
        assert_eq!(shown(&interp, "ys"), "[3, 2, 1]");
    }

    #[test]
    fn aggregates() {
        let interp = run(
            "Sum [1, 2, \"3\", lie] into s ok\n\
             Average [] into a ok\n\
             Min [4, 2, 8] into lo ok\n\
             Max [4, 2, 8] into hi ok",
        );
        assert_eq!(shown(&interp, "s"), "6");
        assert_eq!(shown(&interp, "a"), "0");
        assert_eq!(shown(&interp, "lo"), "2");
        assert_eq!(shown(&interp, "hi"), "8");
        assert!(extreme(&[Value::from("x"), Value::Number(1.0)], true, "Max").unwrap().is_nan());
    }

    #[test]
    fn empty_min_is_a_range_error() {
        let mut interp = Interpreter::new();
        let err = interp.interpret("Min [] into m ok").unwrap_err();
        assert!(matches!(err.root(), ScriptError::RangeError(_)));
    }

    #[test]
    fn reshaping() {
        let interp = run(
            "Fuse [1] and [2, 3] into f ok\n\
             Unfold [[1, 2], 3, [4]] one level into u ok\n\
             Bundle [1, 2, 3, 4, 5] by 2 into b ok\n\
             Unique [1, \"1\", 1, 2] into q ok\n\
             TakeFirst 2 from [1, 2, 3] into head ok\n\
             TakeLast 5 from [1, 2, 3] into tail ok",
        );
        assert_eq!(shown(&interp, "f"), "[1, 2, 3]");
        assert_eq!(shown(&interp, "u"), "[1, 2, 3, 4]");
        assert_eq!(shown(&interp, "b"), "[[1, 2], [3, 4], [5]]");
        assert_eq!(shown(&interp, "q"), "[1, 1, 2]");
        assert_eq!(interp.variable("q").unwrap().as_sequence().unwrap().borrow().len(), 3);
        assert_eq!(shown(&interp, "head"), "[1, 2]");
        assert_eq!(shown(&interp, "tail"), "[1, 2, 3]");
    }

    #[test]
    fn seek_reports_positions() {
        let interp = run(
            "Seek \"c\" in \"arcana\" into i ok\n\
             Seek 3 in [1, 2, 3] into j ok\n\
             Seek \"3\" in [1, 2, 3] into k ok",
        );
        assert_eq!(shown(&interp, "i"), "2");
        assert_eq!(shown(&interp, "j"), "2");
        assert_eq!(shown(&interp, "k"), "-1");
    }

    #[test]
    fn flood_and_seals() {
        let interp = run("xs is [1, 2, 3] ok\nFlood xs with 0 ok");
        assert_eq!(shown(&interp, "xs"), "[0, 0, 0]");

        let mut interp = Interpreter::new();
        let err = interp
            .interpret("Seal xs is [2, 1] ok\nSort xs ok")
            .unwrap_err();
        assert!(matches!(err.root(), ScriptError::SealedVariable(_)));
        let err = interp
            .interpret("Seal xs is [2, 1] ok\nBindFront 3 to xs ok")
            .unwrap_err();
        assert!(matches!(err.root(), ScriptError::SealedVariable(_)));
    }

    #[test]
    fn sequences_never_hold_themselves() {
        let mut interp = Interpreter::new();
        for source in [
            "xs is [1] ok\nBindFront xs to xs ok",
            "xs is [1, 2] ok\nFlood xs with xs ok",
            "xs is [1] ok\nys is [xs] ok\nBindFront ys to xs ok",
        ] {
            let err = interp.interpret(source).unwrap_err();
            assert!(matches!(err.root(), ScriptError::TypeError(_)), "{source}");
        }
        assert_eq!(shown(&interp, "xs"), "[1]");

        let interp = run("xs is [1] ok\nys is [2] ok\nBindFront ys to xs ok\nFlood ys with [0] ok");
        assert_eq!(shown(&interp, "xs"), "[[[0]], 1]");
    }

    #[test]
    fn draws_are_reproducible() {
        let source = "DrawFrom [1, 2, 3, 4, 5] count 3 into pick ok\nxs is [1, 2, 3, 4] ok\nStir xs ok";
        let a = run(source);
        let b = run(source);
        assert_eq!(shown(&a, "pick"), shown(&b, "pick"));
        assert_eq!(shown(&a, "xs"), shown(&b, "xs"));
        assert_eq!(a.variable("pick").unwrap().as_sequence().unwrap().borrow().len(), 3);
    }
}

//=====================================================
// End of file
//=====================================================
