//=====================================================
// File: statements/higher_order.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Shape-driven sequence statements
// Objective: Map, filter and fold sequences through a shape, passing the
//            index (and accumulator) only when the shape asks for it
//=====================================================

use std::rc::Rc;

use regex::Captures;

use super::StatementPattern;
use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::{Shape, Value};

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new("Morph", r"Morph\s+(.+?)\s+with\s+(.+)\s+into\s+(\w+)", morph),
        StatementPattern::new("Sift", r"Sift\s+(.+?)\s+with\s+(.+)\s+into\s+(\w+)", sift),
        StatementPattern::new(
            "Distill",
            r"Distill\s+(.+?)\s+with\s+(.+)\s+from\s+(.+)\s+into\s+(\w+)",
            distill,
        ),
    ]
}

/// Sequence snapshot plus the shape to run over it.
fn operands(
    interp: &mut Interpreter,
    caps: &Captures<'_>,
    statement: &str,
) -> ScriptResult<(Vec<Value>, Rc<Shape>)> {
    let items = interp.sequence_group(caps, 1, statement)?;
    let items = items.borrow().clone();
    let shape = interp.eval_group(caps, 2)?;
    let shape = shape.as_shape().cloned().ok_or_else(|| {
        ScriptError::type_error(format!("{} needs a shape, got {}", statement, shape.essence()))
    })?;
    Ok((items, shape))
}

fn element_args(shape: &Shape, value: Value, index: usize) -> Vec<Value> {
    if shape.arity() >= 2 {
        vec![value, Value::Number(index as f64)]
    } else {
        vec![value]
    }
}

fn morph(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let (items, shape) = operands(interp, caps, "Morph")?;
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        out.push(interp.call_shape(&shape, element_args(&shape, item, index))?);
    }
    interp.bind_group(caps, 3, Value::sequence(out))
}

fn sift(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let (items, shape) = operands(interp, caps, "Sift")?;
    let mut kept = Vec::new();
    for (index, item) in items.into_iter().enumerate() {
        if interp
            .call_shape(&shape, element_args(&shape, item.clone(), index))?
            .is_truthy()
        {
            kept.push(item);
        }
    }
    interp.bind_group(caps, 3, Value::sequence(kept))
}

fn distill(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let (items, shape) = operands(interp, caps, "Distill")?;
    let mut acc = interp.eval_group(caps, 3)?;
    for (index, item) in items.into_iter().enumerate() {
        let args = if shape.arity() >= 3 {
            vec![acc, item, Value::Number(index as f64)]
        } else {
            vec![acc, item]
        };
        acc = interp.call_shape(&shape, args)?;
    }
    interp.bind_group(caps, 4, acc)
}


//=====================================================
// End of file
//=====================================================
