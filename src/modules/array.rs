//=====================================================
// File: modules/array.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: std/array native table
// Objective: Type-checked sequence utilities sharing their arithmetic with
//            the sequence statements
//=====================================================

use super::{Module, NativeArity, arg, sequence_arg};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::value::Value;
use crate::statements::sequence::{chunk, dedupe, extreme, flatten_once, total};

pub fn build() -> Module {
    Module::new("std/array")
        .with("chunk", NativeArity::Exact(2), array_chunk)
        .with("flatten", NativeArity::Exact(1), array_flatten)
        .with("sum", NativeArity::Exact(1), array_sum)
        .with("average", NativeArity::Exact(1), array_average)
        .with("min", NativeArity::Exact(1), array_min)
        .with("max", NativeArity::Exact(1), array_max)
        .with("unique", NativeArity::Exact(1), array_unique)
        .with("concat", NativeArity::Exact(2), array_concat)
}

fn array_chunk(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.chunk")?;
    Ok(Value::sequence(chunk(&items, arg(args, 1).to_int())))
}

fn array_flatten(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.flatten")?;
    Ok(Value::sequence(flatten_once(&items)))
}

fn array_sum(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.sum")?;
    Ok(Value::Number(total(&items)))
}

/// Zero for an empty sequence.
fn array_average(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.average")?;
    if items.is_empty() {
        return Ok(Value::Number(0.0));
    }
    Ok(Value::Number(total(&items) / items.len() as f64))
}

fn array_min(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.min")?;
    Ok(Value::Number(extreme(&items, false, "array.min")?))
}

fn array_max(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.max")?;
    Ok(Value::Number(extreme(&items, true, "array.max")?))
}

fn array_unique(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let items = sequence_arg(args, 0, "array.unique")?;
    Ok(Value::sequence(dedupe(&items)))
}

fn array_concat(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let mut joined = sequence_arg(args, 0, "array.concat")?;
    joined.extend(sequence_arg(args, 1, "array.concat")?);
    Ok(Value::sequence(joined))
}


//=====================================================
// End of file
//=====================================================
