//=====================================================
// File: statements/tome.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Tome statements
// Objective: Inspect, re-key, merge, copy, filter and count key/value tomes
//=====================================================

use regex::Captures;

use super::{StatementPattern, expect_sequence, group, refuse_cycle};
use crate::interpreter::Interpreter;
use crate::interpreter::condition;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::value::{Tome, Value};

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new(
            "HoldsKeyInto",
            r"Holds\s+key\s+(.+)\s+in\s+(.+)\s+into\s+(\w+)",
            holds_key_into,
        ),
        StatementPattern::new("Glyphs", r"Glyphs\s+(.+)\s+into\s+(\w+)", glyphs),
        StatementPattern::new("Essences", r"Essences\s+(.+)\s+into\s+(\w+)", essences),
        StatementPattern::new("Pairs", r"Pairs\s+(.+)\s+into\s+(\w+)", pairs),
        StatementPattern::new("PluckKey", r"Pluck\s+key\s+(.+)\s+from\s+(.+)", pluck_key),
        StatementPattern::new(
            "Rebrand",
            r"Rebrand\s+key\s+(.+)\s+as\s+(.+)\s+in\s+(.+)",
            rebrand,
        ),
        StatementPattern::new("Meld", r"Meld\s+(.+)\s+into\s+(.+)", meld),
        StatementPattern::new("Mirror", r"Mirror\s+(.+)\s+into\s+(\w+)", mirror),
        StatementPattern::new(
            "PickKeys",
            r"Pick\s+keys\s+(.+)\s+from\s+(.+)\s+into\s+(\w+)",
            pick_keys,
        ),
        StatementPattern::new(
            "OmitKeys",
            r"Omit\s+keys\s+(.+)\s+from\s+(.+)\s+into\s+(\w+)",
            omit_keys,
        ),
        StatementPattern::new("Tally", r"Tally\s+(.+)\s+into\s+(\w+)", tally),
    ]
}

fn holds_key_into(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let key = interp.eval_group(caps, 1)?;
    let container = interp.eval_group(caps, 2)?;
    interp.bind_group(caps, 3, Value::Boolean(condition::holds_key(&container, &key)))
}

fn glyphs(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let tome = interp.tome_group(caps, 1, "Glyphs")?;
    let keys = tome.borrow().keys().map(Value::string).collect();
    interp.bind_group(caps, 2, Value::sequence(keys))
}

fn essences(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let tome = interp.tome_group(caps, 1, "Essences")?;
    let values = tome.borrow().values().cloned().collect();
    interp.bind_group(caps, 2, Value::sequence(values))
}

/// `[key, value]` sequences in insertion order.
pub fn entry_pairs(tome: &Tome) -> Vec<Value> {
    tome.iter()
        .map(|(key, value)| Value::sequence(vec![Value::string(key), value.clone()]))
        .collect()
}

fn pairs(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let tome = interp.tome_group(caps, 1, "Pairs")?;
    let pairs = entry_pairs(&tome.borrow());
    interp.bind_group(caps, 2, Value::sequence(pairs))
}

fn pluck_key(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.guard_in_place(group(caps, 2))?;
    let key = interp.text_group(caps, 1)?;
    let tome = interp.tome_group(caps, 2, "Pluck key")?;
    tome.borrow_mut().remove(&key);
    Ok(())
}

/// The renamed entry moves to the end. Missing keys leave the tome alone.
fn rebrand(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.guard_in_place(group(caps, 3))?;
    let old = interp.text_group(caps, 1)?;
    let new = interp.text_group(caps, 2)?;
    let tome = interp.tome_group(caps, 3, "Rebrand")?;
    let mut tome = tome.borrow_mut();
    if let Some(value) = tome.remove(&old) {
        tome.remove(&new);
        tome.insert(new, value);
    }
    Ok(())
}

/// Copies every entry of the source over the destination.
pub fn meld_into(source: &Tome, destination: &mut Tome) {
    for (key, value) in source.iter() {
        destination.insert(key, value.clone());
    }
}

fn meld(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    interp.guard_in_place(group(caps, 2))?;
    let source = interp.tome_group(caps, 1, "Meld")?;
    let destination = interp.tome_group(caps, 2, "Meld")?;
    if std::rc::Rc::ptr_eq(&source, &destination) {
        return Ok(());
    }
    refuse_cycle(
        &Value::Tome(source.clone()),
        &Value::Tome(destination.clone()),
        "Meld",
    )?;
    let source = source.borrow();
    meld_into(&source, &mut destination.borrow_mut());
    Ok(())
}

fn mirror(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let copy = interp.eval_group(caps, 1)?.deep_clone();
    interp.bind_group(caps, 2, copy)
}

fn selected_keys(interp: &mut Interpreter, caps: &Captures<'_>, statement: &str) -> ScriptResult<Vec<String>> {
    let keys = interp.eval_group(caps, 1)?;
    let keys = expect_sequence(&keys, statement)?;
    let keys = keys.borrow().iter().map(Value::to_string).collect();
    Ok(keys)
}

fn pick_keys(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let keys = selected_keys(interp, caps, "Pick keys")?;
    let source = interp.eval_group(caps, 2)?;
    let mut out = Tome::new();
    if let Some(tome) = source.as_tome() {
        let tome = tome.borrow();
        for key in &keys {
            if let Some(value) = tome.get(key) {
                out.insert(key.as_str(), value.clone());
            }
        }
    }
    interp.bind_group(caps, 3, Value::tome(out))
}

fn omit_keys(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let keys = selected_keys(interp, caps, "Omit keys")?;
    let source = interp.eval_group(caps, 2)?;
    let out = match source.as_tome() {
        Some(tome) => tome
            .borrow()
            .iter()
            .filter(|(key, _)| !keys.iter().any(|k| k.as_str() == *key))
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
        None => Tome::new(),
    };
    interp.bind_group(caps, 3, Value::tome(out))
}

/// Occurrence counts keyed by display form, in first-seen order.
pub fn tally_of(items: &[Value]) -> Tome {
    let mut counts = Tome::new();
    for item in items {
        let key = item.to_string();
        let seen = counts.get(&key).map_or(0.0, Value::to_number);
        counts.insert(key, Value::Number(seen + 1.0));
    }
    counts
}

fn tally(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let items = interp.sequence_group(caps, 1, "Tally")?;
    let counts = tally_of(&items.borrow());
    interp.bind_group(caps, 2, Value::tome(counts))
}


//=====================================================
// End of file
//=====================================================
