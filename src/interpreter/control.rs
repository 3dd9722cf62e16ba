//=====================================================
// File: interpreter/control.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana control-flow executor
// Objective: Walk program lines, run `when`/`ward` conditionals and the
//            `repeat each`, `stride` and `until` loops, and hand every other
//            line to the statement dispatcher
//=====================================================

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::interpreter::Interpreter;
use crate::interpreter::blocks;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::Value;

//=====================================================
// Section 1.0 - Constructs
//=====================================================

fn compile(source: &str) -> Regex {
    Regex::new(source).expect("construct pattern must compile")
}

static WHEN: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^when\s+(.*?)\s*:?\s*$"));
static WARD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^(?:ward|guard)\s+(.*?)\s*:\s*$"));
static REPEAT_EACH: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^repeat\s+each\s+(\w+)\s+(?:in|among)\s+(.+?)\s*:\s*$"));
static STRIDE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^stride\s+(\w+)\s*,\s*(\w+)\s+over\s+(.+?)\s*:\s*$"));
static UNTIL: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^until\s+(.*?)\s*:\s*$"));

/// A block opener the executor knows how to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    When { condition: String },
    Ward { condition: String },
    RepeatEach { variable: String, container: String },
    Stride { index: String, value: String, container: String },
    Until { condition: String },
}

impl Construct {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if let Some(caps) = REPEAT_EACH.captures(line) {
            return Some(Construct::RepeatEach {
                variable: caps[1].to_string(),
                container: caps[2].to_string(),
            });
        }
        if let Some(caps) = STRIDE.captures(line) {
            return Some(Construct::Stride {
                index: caps[1].to_string(),
                value: caps[2].to_string(),
                container: caps[3].to_string(),
            });
        }
        if let Some(caps) = WARD.captures(line) {
            return Some(Construct::Ward {
                condition: caps[1].to_string(),
            });
        }
        if let Some(caps) = UNTIL.captures(line) {
            return Some(Construct::Until {
                condition: caps[1].to_string(),
            });
        }
        if let Some(caps) = WHEN.captures(line) {
            return Some(Construct::When {
                condition: caps[1].to_string(),
            });
        }
        None
    }
}

/// Characters of a string or a snapshot of a sequence's elements.
fn iteration_items(container: &Value, construct: &str) -> ScriptResult<Vec<Value>> {
    match container {
        Value::String(text) => Ok(text.chars().map(|c| Value::String(c.to_string())).collect()),
        Value::Sequence(items) => Ok(items.borrow().clone()),
        other => Err(ScriptError::type_error(format!(
            "'{}' iterates strings or arrays, got {}",
            construct,
            other.essence()
        ))),
    }
}

//=====================================================
// Section 2.0 - Line Walker
//=====================================================

impl Interpreter {
    /// Runs `lines[start..end]`. Block bodies recurse with `depth + 1`.
    pub(crate) fn run_lines(
        &mut self,
        lines: &[&str],
        start: usize,
        end: usize,
        depth: usize,
    ) -> ScriptResult<()> {
        let mut index = start;
        while index < end {
            let trimmed = lines[index].trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                index += 1;
                continue;
            }
            if blocks::is_block_opener(trimmed) {
                if let Some(construct) = Construct::parse(trimmed) {
                    let close = blocks::find_block_end(&lines[..end], index)?;
                    self.run_construct(&construct, lines, index, close, depth)
                        .map_err(|err| err.at_line(index + 1, trimmed))?;
                    index = close + 1;
                    continue;
                }
            }
            self.execute(trimmed)
                .map_err(|err| err.at_line(index + 1, trimmed))?;
            index += 1;
        }
        Ok(())
    }

    fn run_construct(
        &mut self,
        construct: &Construct,
        lines: &[&str],
        open: usize,
        close: usize,
        depth: usize,
    ) -> ScriptResult<()> {
        let inner = depth + 1;
        if inner > self.config().max_nesting {
            return Err(ScriptError::NestingTooDeep(self.config().max_nesting));
        }
        trace!(?construct, open, close, depth = inner, "entering block");
        match construct {
            Construct::When { condition } | Construct::Ward { condition } => {
                let otherwise = blocks::find_otherwise(lines, open, close);
                let holds = self.evaluate_condition(condition)?;
                match (holds, otherwise) {
                    (true, Some(split)) => self.run_lines(lines, open + 1, split, inner),
                    (true, None) => self.run_lines(lines, open + 1, close, inner),
                    (false, Some(split)) => self.run_lines(lines, split + 1, close, inner),
                    (false, None) => Ok(()),
                }
            }
            Construct::RepeatEach {
                variable,
                container,
            } => {
                let container = self.evaluate(container)?;
                for item in iteration_items(&container, "repeat each")? {
                    self.bind(variable, item)?;
                    self.run_lines(lines, open + 1, close, inner)?;
                }
                Ok(())
            }
            Construct::Stride {
                index,
                value,
                container,
            } => {
                let container = self.evaluate(container)?;
                for (position, item) in iteration_items(&container, "stride")?.into_iter().enumerate() {
                    self.bind(index, Value::Number(position as f64))?;
                    self.bind(value, item)?;
                    self.run_lines(lines, open + 1, close, inner)?;
                }
                Ok(())
            }
            Construct::Until { condition } => {
                let limit = self.config().until_limit;
                let mut iterations = 0usize;
                loop {
                    self.run_lines(lines, open + 1, close, inner)?;
                    iterations += 1;
                    if self.evaluate_condition(condition)? {
                        return Ok(());
                    }
                    if iterations >= limit {
                        return Err(ScriptError::LoopBoundExceeded { limit });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openers_parse_into_constructs() {
        assert_eq!(
            Construct::parse("Repeat each c among letters:"),
            Some(Construct::RepeatEach {
                variable: "c".into(),
                container: "letters".into()
            })
        );
        assert_eq!(
            Construct::parse("stride i, v over [1, 2]:"),
            Some(Construct::Stride {
                index: "i".into(),
                value: "v".into(),
                container: "[1, 2]".into()
            })
        );
        assert_eq!(
            Construct::parse("guard hp is at least 1:"),
            Some(Construct::Ward {
                condition: "hp is at least 1".into()
            })
        );
        assert_eq!(
            Construct::parse("when x is 3:"),
            Some(Construct::When {
                condition: "x is 3".into()
            })
        );
        assert_eq!(Construct::parse("for each x in y:"), None);
    }

    #[test]
    fn until_runs_its_body_at_least_once() {
        let mut interp = Interpreter::new();
        interp
            .interpret("x is 0 ok\nuntil x is greater than -1:\nx is 1 ok\nconclude")
            .unwrap();
        assert_eq!(interp.variable("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn runaway_until_hits_the_ceiling() {
        let mut interp = Interpreter::new();
        let err = interp
            .interpret("until lie:\nReveal: again\nconclude")
            .unwrap_err();
        assert!(matches!(
            err.root(),
            ScriptError::LoopBoundExceeded { limit: 10_000 }
        ));
    }

    #[test]
    fn iteration_rejects_tomes() {
        let mut interp = Interpreter::new();
        let err = interp
            .interpret("repeat each k in Tome { a: 1 }:\nconclude")
            .unwrap_err();
        assert!(matches!(err.root(), ScriptError::TypeError(_)));
    }
}

//=====================================================
// End of file
//=====================================================
