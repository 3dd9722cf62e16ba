//=====================================================
// File: modules/tome.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: std/tome native table
// Objective: Key/value views, merging and tallying over tomes; anything that
//            is not a tome reads as an empty one
//=====================================================

use super::{Module, NativeArity, arg, sequence_arg};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::value::{Tome, Value};
use crate::statements::tome::{entry_pairs, meld_into, tally_of};

pub fn build() -> Module {
    Module::new("std/tome")
        .with("keys", NativeArity::Exact(1), tome_keys)
        .with("values", NativeArity::Exact(1), tome_values)
        .with("pairs", NativeArity::Exact(1), tome_pairs)
        .with("merge", NativeArity::Exact(2), tome_merge)
        .with("tally", NativeArity::Exact(1), tome_tally)
}

fn snapshot(value: &Value) -> Tome {
    value
        .as_tome()
        .map(|tome| tome.borrow().clone())
        .unwrap_or_default()
}

fn tome_keys(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let tome = snapshot(&arg(args, 0));
    Ok(Value::sequence(tome.keys().map(Value::string).collect()))
}

fn tome_values(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let tome = snapshot(&arg(args, 0));
    Ok(Value::sequence(tome.values().cloned().collect()))
}

fn tome_pairs(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    Ok(Value::sequence(entry_pairs(&snapshot(&arg(args, 0)))))
}

/// Fresh tome: the second argument's entries, then the first's on top.
fn tome_merge(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let mut merged = snapshot(&arg(args, 1));
    meld_into(&snapshot(&arg(args, 0)), &mut merged);
    Ok(Value::tome(merged))
}

fn tome_tally(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    if matches!(arg(args, 0), Value::Undefined) {
        return Ok(Value::tome(Tome::new()));
    }
    let items = sequence_arg(args, 0, "tome.tally")?;
    Ok(Value::tome(tally_of(&items)))
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
    fn views_keep_insertion_order() {
        let interp = run(
            "Summon \"std/tome\" ok\n\
             bag is Tome { zeta: 1, alpha: 2 } ok\n\
             invoke tome.keys with bag into ks ok\n\
             invoke tome.values with bag into vs ok\n\
             invoke tome.pairs with bag into ps ok\n\
             invoke tome.keys with 12 into none ok",
        );
        assert_eq!(shown(&interp, "ks"), "[zeta, alpha]");
        assert_eq!(shown(&interp, "vs"), "[1, 2]");
        assert_eq!(shown(&interp, "ps"), "[[zeta, 1], [alpha, 2]]");
        assert_eq!(shown(&interp, "none"), "[]");
    }

    #[test]
    fn merge_prefers_the_first_argument() {
        let interp = run(
            "Summon \"std/tome\" as t ok\n\
             base is Tome { hp: 10, mp: 5 } ok\n\
             patch is Tome { hp: 99, xp: 1 } ok\n\
             invoke t.merge with patch, base into merged ok",
        );
        assert_eq!(shown(&interp, "merged"), "{hp: 99, mp: 5, xp: 1}");
        assert_eq!(shown(&interp, "base"), "{hp: 10, mp: 5}");
    }

    #[test]
    fn tally_counts_by_display_form() {
        let interp = run(
            "Summon \"std/tome\" ok\n\
             invoke tome.tally with [\"a\", \"b\", \"a\", 1, \"1\"] into counts ok",
        );
        assert_eq!(shown(&interp, "counts"), "{a: 2, b: 1, 1: 2}");
    }
}

//=====================================================
// End of file
//=====================================================
