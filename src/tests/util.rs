//=====================================================
// File: tests/util.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Shared helpers for ArcanaScript integration tests
// Objective: Run whole scripts and pull out bindings, revealed lines and
//            failures with readable panics
//=====================================================

#![allow(dead_code)]

use arcanascript::runtime::run_script;
use arcanascript::{Interpreter, ScriptError};

/// Interprets `source`, panicking with the error code on failure.
pub fn interpret(source: &str) -> Interpreter {
    let mut interp = Interpreter::new();
    if let Err(err) = interp.interpret(source) {
        panic!("script failed: [{}] {}", err.code(), err);
    }
    interp
}

/// Lines revealed by a script that must succeed.
pub fn revealed(source: &str) -> Vec<String> {
    let run = run_script(source);
    if let Err(err) = &run.outcome {
        panic!("script failed: [{}] {}", err.code(), err);
    }
    run.output
}

/// The error a script that must fail stops with.
pub fn failure(source: &str) -> ScriptError {
    match Interpreter::new().interpret(source) {
        Ok(()) => panic!("script unexpectedly succeeded:\n{}", source),
        Err(err) => err,
    }
}

/// Display form of a bound variable.
pub fn shown(interp: &Interpreter, name: &str) -> String {
    interp
        .variable(name)
        .unwrap_or_else(|| panic!("'{}' is not bound", name))
        .to_string()
}

pub fn script(lines: &[&str]) -> String {
    lines.join("\n")
}

//=====================================================
// End of file
//=====================================================
