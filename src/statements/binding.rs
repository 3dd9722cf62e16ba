//=====================================================
// File: statements/binding.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Assignment, output and module statements
// Objective: Bind, seal and path-set variables, reveal interpolated text,
//            summon modules and store module call results
//=====================================================

use std::cell::RefCell;
use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{StatementPattern, group, refuse_cycle};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::{SharedTome, Tome, Value};

/// `{| expr |}` markers inside revealed text.
static MAGIC_INK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\|\s*([\s\S]+?)\s*\|\}").expect("interpolation pattern must compile"));

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new("Assign", r"(\w+)\s+is\s+([\s\S]+?)", assign),
        StatementPattern::new(
            "SetPath",
            r"Set\s+([A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*)\s+to\s+([\s\S]+?)",
            set_path,
        ),
        StatementPattern::new("Seal", r"Seal\s+(\w+)\s+is\s+([\s\S]+?)", seal),
        StatementPattern::raw(
            "Reveal",
            r"(?i)^Reveal:\s*([\s\S]+?)\s*(?:ok\??|okay\??)?$",
            reveal,
        ),
        StatementPattern::new(
            "Summon",
            r#"Summon\s+"([^"]+)"(?:\s+as\s+(\w+))?"#,
            summon,
        ),
        StatementPattern::new(
            "InvokeInto",
            r"invoke\s+(\w+)\.(\w+)(?:\s+with\s+([\s\S]+?))?\s+into\s+(\w+)",
            invoke_into,
        ),
    ]
}

fn assign(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let value = interp.eval_group(caps, 2)?;
    interp.bind_group(caps, 1, value)
}

/// Intermediate segments that are missing or not tomes are replaced with
/// fresh tomes.
fn set_path(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let path = group(caps, 1);
    let value = interp.eval_group(caps, 2)?;
    let segments: Vec<&str> = path.split('.').collect();
    let (root, rest) = match segments.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };
    let Some((leaf, middle)) = rest.split_last() else {
        return interp.bind(root, value);
    };

    if interp.is_sealed(root) {
        return Err(ScriptError::SealedVariable(root.to_string()));
    }
    let mut current = match interp.global(root) {
        Some(Value::Tome(tome)) => tome.clone(),
        _ => {
            let fresh: SharedTome = Rc::new(RefCell::new(Tome::new()));
            interp.bind(root, Value::Tome(Rc::clone(&fresh)))?;
            fresh
        }
    };
    for segment in middle {
        let existing = current.borrow().get(segment).and_then(|v| v.as_tome().cloned());
        let next = match existing {
            Some(tome) => tome,
            None => {
                let fresh: SharedTome = Rc::new(RefCell::new(Tome::new()));
                current
                    .borrow_mut()
                    .insert(*segment, Value::Tome(Rc::clone(&fresh)));
                fresh
            }
        };
        current = next;
    }
    refuse_cycle(&value, &Value::Tome(Rc::clone(&current)), "Set")?;
    current.borrow_mut().insert(*leaf, value);
    Ok(())
}

fn seal(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let value = interp.eval_group(caps, 2)?;
    interp.seal(group(caps, 1), value)
}

fn reveal(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = group(caps, 1);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for marker in MAGIC_INK.captures_iter(text) {
        let (Some(whole), Some(expr)) = (marker.get(0), marker.get(1)) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&interp.evaluate(expr.as_str())?.to_string());
        last = whole.end();
    }
    out.push_str(&text[last..]);
    interp.host_mut().append(&out)?;
    Ok(())
}

fn summon(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let alias = caps.get(2).map(|m| m.as_str());
    interp.summon(group(caps, 1), alias)
}

fn invoke_into(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let args = match caps.get(3) {
        Some(list) => interp.evaluate_list(list.as_str())?,
        None => Vec::new(),
    };
    let result = interp.call_module(group(caps, 1), group(caps, 2), &args)?;
    interp.bind_group(caps, 4, result)
}


//=====================================================
// End of file
//=====================================================
