//=====================================================
// File: statements/text.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: String statements
// Objective: Replace, trim, case, slice, count, split, join and pad text,
//            always binding the result to a fresh variable
//=====================================================

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{StatementPattern, expect_sequence, group, join_display};
use crate::interpreter::Interpreter;
use crate::interpreter::condition;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::Value;

/// Longest text, in characters, that Chant and the pad statements will build.
pub const MAX_TEXT_LEN: usize = 1 << 24;

static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\S*").expect("word pattern must compile"));

//=====================================================
// Section 1.0 - Catalogue
//=====================================================

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new(
            "Transmute",
            r"Transmute\s+(.+)\s+within\s+(.+)\s+to\s+(.+)\s+into\s+(\w+)",
            transmute,
        ),
        StatementPattern::new("Shear", r"Shear\s+(.+)\s+into\s+(\w+)", shear),
        StatementPattern::new("ShearLeft", r"ShearLeft\s+(.+)\s+into\s+(\w+)", shear_left),
        StatementPattern::new("ShearRight", r"ShearRight\s+(.+)\s+into\s+(\w+)", shear_right),
        StatementPattern::new("Ascend", r"Ascend\s+(.+)\s+into\s+(\w+)", ascend),
        StatementPattern::new("Descend", r"Descend\s+(.+)\s+into\s+(\w+)", descend),
        StatementPattern::new("CrownTitle", r"CrownTitle\s+(.+)\s+into\s+(\w+)", crown_title),
        StatementPattern::new(
            "BeginsInto",
            r#"Begins\s+(.+)\s+with\s+"([^"]*)"\s+into\s+(\w+)"#,
            begins_into,
        ),
        StatementPattern::new(
            "EndsInto",
            r#"Ends\s+(.+)\s+with\s+"([^"]*)"\s+into\s+(\w+)"#,
            ends_into,
        ),
        StatementPattern::new("Chant", r"Chant\s+(.+)\s+times\s+(.+)\s+into\s+(\w+)", chant),
        StatementPattern::new(
            "Carve",
            r"Carve\s+(.+)\s+from\s+(.+)\s+for\s+(.+)\s+into\s+(\w+)",
            carve,
        ),
        StatementPattern::new("CountOf", r"CountOf\s+(.+)\s+in\s+(.+)\s+into\s+(\w+)", count_of),
        StatementPattern::new("FractureLines", r"FractureLines\s+(.+)\s+into\s+(\w+)", fracture_lines),
        StatementPattern::new("BindLines", r"BindLines\s+(.+)\s+into\s+(\w+)", bind_lines),
        StatementPattern::new("Weave", r"Weave\s+(.+)\s+with\s+(.+)\s+into\s+(\w+)", weave),
        StatementPattern::new(
            "ContainsInto",
            r"Contains\s+(.+)\s+in\s+(.+)\s+into\s+(\w+)",
            contains_into,
        ),
        StatementPattern::new(
            "PadLeft",
            r"PadLeft\s+(.+)\s+to\s+(.+?)(?:\s+with\s+(.+?))?\s+into\s+(\w+)",
            pad_left,
        ),
        StatementPattern::new(
            "PadRight",
            r"PadRight\s+(.+)\s+to\s+(.+?)(?:\s+with\s+(.+?))?\s+into\s+(\w+)",
            pad_right,
        ),
        StatementPattern::new(
            "PadCenter",
            r"PadCenter\s+(.+)\s+to\s+(.+?)(?:\s+with\s+(.+?))?\s+into\s+(\w+)",
            pad_center,
        ),
    ]
}

//=====================================================
// Section 2.0 - Shaping Text
//=====================================================

fn transmute(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let old = interp.text_group(caps, 1)?;
    let source = interp.text_group(caps, 2)?;
    let new = interp.text_group(caps, 3)?;
    let replaced = if old.is_empty() {
        // An empty needle threads the replacement between characters.
        source
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(&new)
    } else {
        source.replace(&old, &new)
    };
    interp.bind_group(caps, 4, Value::String(replaced))
}

fn map_text(
    interp: &mut Interpreter,
    caps: &Captures<'_>,
    op: impl FnOnce(&str) -> String,
) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    interp.bind_group(caps, 2, Value::String(op(&text)))
}

fn shear(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    map_text(interp, caps, |s| s.trim().to_string())
}

fn shear_left(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    map_text(interp, caps, |s| s.trim_start().to_string())
}

fn shear_right(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    map_text(interp, caps, |s| s.trim_end().to_string())
}

fn ascend(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    map_text(interp, caps, str::to_uppercase)
}

fn descend(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    map_text(interp, caps, str::to_lowercase)
}

/// Capitalises each run that starts at a word character, lowering the rest
/// of the run.
pub fn title_case(text: &str) -> String {
    WORD_RUN
        .replace_all(text, |word: &Captures<'_>| {
            let mut chars = word[0].chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .into_owned()
}

fn crown_title(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    map_text(interp, caps, title_case)
}

fn begins_into(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let holds = text.starts_with(group(caps, 2));
    interp.bind_group(caps, 3, Value::Boolean(holds))
}

fn ends_into(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let holds = text.ends_with(group(caps, 2));
    interp.bind_group(caps, 3, Value::Boolean(holds))
}

fn chant(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let times = interp.eval_group(caps, 2)?.to_int().max(0) as usize;
    let within = text
        .chars()
        .count()
        .checked_mul(times)
        .is_some_and(|len| len <= MAX_TEXT_LEN);
    if !within {
        return Err(ScriptError::range_error(format!(
            "Chant of {} copies exceeds {} characters",
            times, MAX_TEXT_LEN
        )));
    }
    interp.bind_group(caps, 3, Value::String(text.repeat(times)))
}

/// Character-indexed substring. A negative start counts back from the end.
pub fn carve_text(text: &str, start: f64, length: i64) -> String {
    let total = text.chars().count() as i64;
    let start = if start.is_finite() { start.trunc() as i64 } else { 0 };
    let start = if start < 0 { (total + start).max(0) } else { start };
    text.chars()
        .skip(start as usize)
        .take(length.max(0) as usize)
        .collect()
}

fn carve(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let start = interp.number_group(caps, 2)?;
    let length = interp.eval_group(caps, 3)?.to_int();
    interp.bind_group(caps, 4, Value::String(carve_text(&text, start, length)))
}

fn count_of(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let needle = interp.text_group(caps, 1)?;
    let haystack = interp.text_group(caps, 2)?;
    let count = if needle.is_empty() {
        0
    } else {
        haystack.matches(needle.as_str()).count()
    };
    interp.bind_group(caps, 3, Value::Number(count as f64))
}

//=====================================================
// Section 3.0 - Lines & Joins
//=====================================================

fn fracture_lines(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let lines = text
        .split('\n')
        .map(|line| Value::string(line.strip_suffix('\r').unwrap_or(line)))
        .collect();
    interp.bind_group(caps, 2, Value::sequence(lines))
}

fn bind_lines(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "BindLines")?;
    let joined = join_display(&items.borrow(), "\n");
    interp.bind_group(caps, 2, Value::String(joined))
}

fn weave(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.eval_group(caps, 1)?;
    let separator = interp.text_group(caps, 2)?;
    let items = expect_sequence(&items, "Weave")?;
    let joined = join_display(&items.borrow(), &separator);
    interp.bind_group(caps, 3, Value::String(joined))
}

fn contains_into(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let needle = interp.eval_group(caps, 1)?;
    let haystack = interp.eval_group(caps, 2)?;
    interp.bind_group(caps, 3, Value::Boolean(condition::contains(&haystack, &needle)))
}

//=====================================================
// Section 4.0 - Padding
//=====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pad {
    Left,
    Right,
    Center,
}

/// Grows `text` with whole copies of `fill` until it reaches `width`
/// characters, then trims the overshoot. Text already at or past `width` is
/// returned untouched; widths past `MAX_TEXT_LEN` are refused.
pub fn pad(text: &str, width: i64, fill: &str, side: Pad) -> ScriptResult<String> {
    let fill = if fill.is_empty() { " " } else { fill };
    let width = width.max(0) as usize;
    if width > MAX_TEXT_LEN {
        return Err(ScriptError::range_error(format!(
            "pad width {} exceeds {} characters",
            width, MAX_TEXT_LEN
        )));
    }
    let mut len = text.chars().count();
    if len >= width {
        return Ok(text.to_string());
    }
    let step = fill.chars().count();
    let (mut before, mut after) = (0, 0);
    while len < width {
        let append = match side {
            Pad::Left => false,
            Pad::Right => true,
            Pad::Center => (width - len) % 2 == 1,
        };
        if append {
            after += 1;
        } else {
            before += 1;
        }
        len += step;
    }
    let out = format!("{}{}{}", fill.repeat(before), text, fill.repeat(after));
    Ok(match side {
        Pad::Left => out.chars().skip(len - width).collect(),
        Pad::Right | Pad::Center => out.chars().take(width).collect(),
    })
}

fn pad_with(interp: &mut Interpreter, caps: &Captures<'_>, side: Pad) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let width = interp.eval_group(caps, 2)?.to_int();
    let fill = match caps.get(3) {
        Some(expr) => interp.evaluate(expr.as_str())?.to_string(),
        None => " ".to_string(),
    };
    let padded = pad(&text, width, &fill, side)?;
    interp.bind_group(caps, 4, Value::String(padded))
}

fn pad_left(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    pad_with(interp, caps, Pad::Left)
}

fn pad_right(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    pad_with(interp, caps, Pad::Right)
}

fn pad_center(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    pad_with(interp, caps, Pad::Center)
}


//=====================================================
// End of file
//=====================================================
