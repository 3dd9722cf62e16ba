//=====================================================
// File: interpreter/time.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Calendar helpers behind Arcana's time statements and std/time
// Objective: Coerce values to timestamps, render and parse YYYY/MM/DD/HH/mm/ss
//            patterns, and perform day arithmetic at second resolution
//=====================================================

use std::rc::Rc;

use chrono::{
    Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta, Timelike, Utc,
};
use regex::Regex;

use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::Value;

//=====================================================
// Section 1.0 - Pattern Fields
//=====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

const TOKENS: [(&str, Field); 6] = [
    ("YYYY", Field::Year),
    ("MM", Field::Month),
    ("DD", Field::Day),
    ("HH", Field::Hour),
    ("mm", Field::Minute),
    ("ss", Field::Second),
];

/// Compiled parse pattern: an anchored regex plus the field each capture
/// group feeds, in order of appearance.
#[derive(Debug, Clone)]
pub struct TimePattern {
    regex: Regex,
    fields: Vec<Field>,
}

impl TimePattern {
    /// Each token is recognised once; everything else matches literally.
    pub fn compile(pattern: &str) -> ScriptResult<Self> {
        let mut source = String::from("^");
        let mut fields = Vec::new();
        let mut rest = pattern;
        'scan: while !rest.is_empty() {
            for (token, field) in TOKENS {
                if rest.starts_with(token) && !fields.contains(&field) {
                    let width = if field == Field::Year { 4 } else { 2 };
                    source.push_str(&format!(r"(\d{{{}}})", width));
                    fields.push(field);
                    rest = &rest[token.len()..];
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            }
            rest = chars.as_str();
        }
        source.push('$');
        let regex = Regex::new(&source)
            .map_err(|err| ScriptError::parse_error(format!("bad time pattern '{}': {}", pattern, err)))?;
        Ok(Self { regex, fields })
    }

    pub fn parse(&self, text: &str) -> ScriptResult<NaiveDateTime> {
        let captures = self.regex.captures(text).ok_or_else(|| {
            ScriptError::parse_error(format!("'{}' does not match the time pattern", text))
        })?;
        let (mut year, mut month, mut day) = (1970, 1, 1);
        let (mut hour, mut minute, mut second) = (0, 0, 0);
        for (index, field) in self.fields.iter().enumerate() {
            let raw = captures.get(index + 1).map(|m| m.as_str()).unwrap_or("0");
            let number: u32 = raw
                .parse()
                .map_err(|_| ScriptError::parse_error(format!("bad number '{}'", raw)))?;
            match field {
                Field::Year => year = number as i32,
                Field::Month => month = number,
                Field::Day => day = number,
                Field::Hour => hour = number,
                Field::Minute => minute = number,
                Field::Second => second = number,
            }
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| ScriptError::parse_error(format!("'{}' is not a real date", text)))
    }
}

//=====================================================
// Section 2.0 - Coercion & Formatting
//=====================================================

const ACCEPTED_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

pub fn to_timestamp(value: &Value) -> ScriptResult<NaiveDateTime> {
    match value {
        Value::Timestamp(ts) => Ok(*ts),
        Value::Number(n) => {
            if !n.is_finite() {
                return Err(ScriptError::range_error(format!("{} is not a valid instant", n)));
            }
            chrono::DateTime::from_timestamp(n.floor() as i64, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| ScriptError::range_error(format!("{} is out of range", n)))
        }
        Value::String(text) => parse_loose(text.trim()),
        other => Err(ScriptError::type_error(format!(
            "expected a date, got {}",
            other.essence()
        ))),
    }
}

fn parse_loose(text: &str) -> ScriptResult<NaiveDateTime> {
    for layout in ACCEPTED_LAYOUTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, layout) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| ScriptError::parse_error(format!("'{}' is not a recognised date", text)))
}

/// Replaces every token occurrence with its zero-padded field.
pub fn format_timestamp(ts: &NaiveDateTime, pattern: &str) -> String {
    pattern
        .replace("YYYY", &ts.year().to_string())
        .replace("MM", &format!("{:02}", ts.month()))
        .replace("DD", &format!("{:02}", ts.day()))
        .replace("HH", &format!("{:02}", ts.hour()))
        .replace("mm", &format!("{:02}", ts.minute()))
        .replace("ss", &format!("{:02}", ts.second()))
}

//=====================================================
// Section 3.0 - Calendar Arithmetic
//=====================================================

pub fn start_of_day(ts: &NaiveDateTime) -> NaiveDateTime {
    ts.date().and_time(NaiveTime::MIN)
}

pub fn end_of_day(ts: &NaiveDateTime) -> NaiveDateTime {
    let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    ts.date().and_time(last)
}

pub fn add_days(ts: &NaiveDateTime, days: f64) -> ScriptResult<NaiveDateTime> {
    shift(ts, days, TimeDelta::try_days)
}

pub fn add_hours(ts: &NaiveDateTime, hours: f64) -> ScriptResult<NaiveDateTime> {
    shift(ts, hours, TimeDelta::try_hours)
}

fn shift(
    ts: &NaiveDateTime,
    amount: f64,
    delta: fn(i64) -> Option<TimeDelta>,
) -> ScriptResult<NaiveDateTime> {
    if !amount.is_finite() {
        return Err(ScriptError::range_error(format!("cannot shift a date by {}", amount)));
    }
    delta(amount.trunc() as i64)
        .and_then(|delta| ts.checked_add_signed(delta))
        .ok_or_else(|| ScriptError::range_error(format!("shifting by {} leaves the calendar", amount)))
}

pub fn diff_seconds(a: &NaiveDateTime, b: &NaiveDateTime) -> f64 {
    (*b - *a).num_seconds() as f64
}

pub fn diff_days(a: &NaiveDateTime, b: &NaiveDateTime) -> f64 {
    round_half_up(diff_seconds(a, b) / 86_400.0)
}

pub fn round_half_up(n: f64) -> f64 {
    (n + 0.5).floor()
}

//=====================================================
// Section 4.0 - Interpreter Pattern Cache
//=====================================================

impl Interpreter {
    pub(crate) fn time_pattern(&mut self, pattern: &str) -> ScriptResult<Rc<TimePattern>> {
        if let Some(hit) = self.time_patterns.get(pattern) {
            return Ok(Rc::clone(hit));
        }
        let compiled = Rc::new(TimePattern::compile(pattern)?);
        self.time_patterns
            .insert(pattern.to_string(), Rc::clone(&compiled));
        Ok(compiled)
    }

    pub(crate) fn parse_time(&mut self, text: &str, pattern: &str) -> ScriptResult<NaiveDateTime> {
        self.time_pattern(pattern)?.parse(text)
    }
}


//=====================================================
// End of file
//=====================================================
