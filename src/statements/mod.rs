//=====================================================
// File: statements/mod.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana statement catalogue and dispatcher
// Objective: Hold the ordered (pattern, handler) table and run the first
//            entry whose pattern matches a line; order is part of the language
//=====================================================

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::{SharedSequence, SharedTome, Value};

mod binding;
pub mod chance;
mod data;
mod higher_order;
pub mod math;
pub mod sequence;
pub mod text;
mod time;
pub mod tome;

//=====================================================
// Section 1.0 - Catalogue Entries
//=====================================================

pub type Handler = fn(&mut Interpreter, &Captures<'_>) -> ScriptResult<()>;

/// Statement terminator shared by every entry except `Reveal`.
pub const TERMINATOR: &str = r"\s*(?:ok\??|okay\??)$";

pub struct StatementPattern {
    pub name: &'static str,
    pub regex: Regex,
    handler: Handler,
}

impl StatementPattern {
    /// `body` is anchored at the start, case-insensitive, and must be
    /// followed by the terminator.
    pub(crate) fn new(name: &'static str, body: &str, handler: Handler) -> Self {
        Self::raw(name, &format!("(?i)^{}{}", body, TERMINATOR), handler)
    }

    pub(crate) fn raw(name: &'static str, source: &str, handler: Handler) -> Self {
        Self {
            name,
            regex: Regex::new(source).expect("statement pattern must compile"),
            handler,
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

impl std::fmt::Debug for StatementPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementPattern")
            .field("name", &self.name)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

static CATALOGUE: Lazy<Vec<StatementPattern>> = Lazy::new(|| {
    let mut table = Vec::new();
    table.extend(binding::patterns());
    table.extend(text::patterns());
    table.extend(sequence::patterns());
    table.extend(tome::patterns());
    table.extend(higher_order::patterns());
    table.extend(math::patterns());
    table.extend(time::patterns());
    table.extend(data::patterns());
    table.extend(chance::patterns());
    table
});

/// The catalogue in match order.
pub fn patterns() -> &'static [StatementPattern] {
    &CATALOGUE
}

/// Name of the entry that would handle `line`, without running it.
pub fn classify(line: &str) -> Option<&'static str> {
    let line = line.trim();
    CATALOGUE
        .iter()
        .find(|pattern| pattern.matches(line))
        .map(|pattern| pattern.name)
}

pub(crate) fn dispatch(interp: &mut Interpreter, line: &str) -> ScriptResult<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") {
        return Ok(());
    }
    for pattern in CATALOGUE.iter() {
        if let Some(caps) = pattern.regex.captures(line) {
            debug!(statement = pattern.name, "dispatch");
            return (pattern.handler)(interp, &caps);
        }
    }
    Err(ScriptError::UnknownStatement {
        line: line.to_string(),
    })
}

//=====================================================
// Section 2.0 - Handler Helpers
//=====================================================

/// Capture text, empty when the group did not participate.
pub(crate) fn group<'c>(caps: &'c Captures<'_>, index: usize) -> &'c str {
    caps.get(index).map_or("", |m| m.as_str())
}

impl Interpreter {
    pub(crate) fn eval_group(&mut self, caps: &Captures<'_>, index: usize) -> ScriptResult<Value> {
        self.evaluate(group(caps, index))
    }

    pub(crate) fn number_group(&mut self, caps: &Captures<'_>, index: usize) -> ScriptResult<f64> {
        Ok(self.eval_group(caps, index)?.to_number())
    }

    pub(crate) fn text_group(&mut self, caps: &Captures<'_>, index: usize) -> ScriptResult<String> {
        Ok(self.eval_group(caps, index)?.to_string())
    }

    pub(crate) fn bind_group(&mut self, caps: &Captures<'_>, index: usize, value: Value) -> ScriptResult<()> {
        self.bind(group(caps, index), value)
    }

    pub(crate) fn sequence_group(
        &mut self,
        caps: &Captures<'_>,
        index: usize,
        statement: &str,
    ) -> ScriptResult<SharedSequence> {
        let value = self.eval_group(caps, index)?;
        expect_sequence(&value, statement)
    }

    pub(crate) fn tome_group(
        &mut self,
        caps: &Captures<'_>,
        index: usize,
        statement: &str,
    ) -> ScriptResult<SharedTome> {
        let value = self.eval_group(caps, index)?;
        expect_tome(&value, statement)
    }
}

pub(crate) fn expect_sequence(value: &Value, statement: &str) -> ScriptResult<SharedSequence> {
    value.as_sequence().cloned().ok_or_else(|| {
        ScriptError::type_error(format!(
            "{} expects an array, got {}",
            statement,
            value.essence()
        ))
    })
}

pub(crate) fn expect_tome(value: &Value, statement: &str) -> ScriptResult<SharedTome> {
    value.as_tome().cloned().ok_or_else(|| {
        ScriptError::type_error(format!(
            "{} expects a tome, got {}",
            statement,
            value.essence()
        ))
    })
}

/// Refuses to store `value` inside `destination` when the destination would
/// end up containing itself.
pub(crate) fn refuse_cycle(
    value: &Value,
    destination: &Value,
    statement: &str,
) -> ScriptResult<()> {
    if value.holds_storage(destination) {
        return Err(ScriptError::type_error(format!(
            "{} would place {} inside itself",
            statement,
            destination.essence()
        )));
    }
    Ok(())
}

/// Display forms joined by `separator`; absent values contribute nothing.
pub(crate) fn join_display(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Undefined => String::new(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}


//=====================================================
// End of file
//=====================================================
