//=====================================================
// File: modules/time.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: std/time native table
// Objective: Clock reads, patterned parsing and formatting, calendar shifts
//            and day-boundary helpers over naive timestamps
//=====================================================

use super::{Module, NativeArity, arg};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::time;
use crate::interpreter::value::Value;

pub fn build() -> Module {
    Module::new("std/time")
        .with("now", NativeArity::Exact(0), time_now)
        .with("format", NativeArity::Exact(2), time_format)
        .with("parse", NativeArity::Exact(2), time_parse)
        .with("addDays", NativeArity::Exact(2), time_add_days)
        .with("addHours", NativeArity::Exact(2), time_add_hours)
        .with("diffDays", NativeArity::Exact(2), time_diff_days)
        .with("diffSeconds", NativeArity::Exact(2), time_diff_seconds)
        .with("startOfDay", NativeArity::Exact(1), time_start_of_day)
        .with("endOfDay", NativeArity::Exact(1), time_end_of_day)
}

fn time_now(_interp: &mut Interpreter, _args: &[Value]) -> ScriptResult<Value> {
    Ok(Value::Timestamp(time::now_local()))
}

fn time_format(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let ts = time::to_timestamp(&arg(args, 0))?;
    let pattern = arg(args, 1).to_string();
    Ok(Value::String(time::format_timestamp(&ts, &pattern)))
}

fn time_parse(interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let text = arg(args, 0).to_string();
    let pattern = arg(args, 1).to_string();
    Ok(Value::Timestamp(interp.parse_time(&text, &pattern)?))
}

fn time_add_days(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let ts = time::to_timestamp(&arg(args, 0))?;
    Ok(Value::Timestamp(time::add_days(&ts, arg(args, 1).to_number())?))
}

fn time_add_hours(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let ts = time::to_timestamp(&arg(args, 0))?;
    Ok(Value::Timestamp(time::add_hours(&ts, arg(args, 1).to_number())?))
}

fn time_diff_days(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let a = time::to_timestamp(&arg(args, 0))?;
    let b = time::to_timestamp(&arg(args, 1))?;
    Ok(Value::Number(time::diff_days(&a, &b)))
}

fn time_diff_seconds(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let a = time::to_timestamp(&arg(args, 0))?;
    let b = time::to_timestamp(&arg(args, 1))?;
    Ok(Value::Number(time::diff_seconds(&a, &b)))
}

fn time_start_of_day(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let ts = time::to_timestamp(&arg(args, 0))?;
    Ok(Value::Timestamp(time::start_of_day(&ts)))
}

fn time_end_of_day(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    let ts = time::to_timestamp(&arg(args, 0))?;
    Ok(Value::Timestamp(time::end_of_day(&ts)))
}


//=====================================================
// End of file
//=====================================================
