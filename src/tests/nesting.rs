//=====================================================
// File: tests/nesting.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Block matching under deep nesting
// Objective: Generate when/repeat/ward towers of depth 1-5 and check every
//            conclude lands on its innermost open block
//=====================================================

use crate::config::InterpreterConfig;
use crate::host::MemoryHost;
use crate::interpreter::{Interpreter, ScriptError, Value};
use crate::runtime::run_script;

/// Cycles through a conditional, a two-element loop and a ward whose body
/// lives in its `otherwise:` branch.
fn tower(depth: usize, concludes: usize) -> String {
    let mut lines = vec!["hits is 0 ok".to_string()];
    for level in 0..depth {
        match level % 3 {
            0 => lines.push("when hits is at least 0:".to_string()),
            1 => lines.push(format!("repeat each c{} in [1, 2]:", level)),
            _ => {
                lines.push("ward lie:".to_string());
                lines.push("Reveal: skipped".to_string());
                lines.push("otherwise:".to_string());
            }
        }
    }
    lines.push("hits is hits + 1 ok".to_string());
    for _ in 0..concludes {
        lines.push("conclude".to_string());
    }
    lines.push("done is truth ok".to_string());
    lines.join("\n")
}

fn expected_hits(depth: usize) -> f64 {
    let loops = (0..depth).filter(|level| level % 3 == 1).count();
    2f64.powi(loops as i32)
}

#[test]
fn every_depth_resolves_to_the_innermost_block() {
    for depth in 1..=5 {
        let source = tower(depth, depth);
        let mut interp = Interpreter::new();
        interp
            .interpret(&source)
            .unwrap_or_else(|err| panic!("depth {depth}: {err}"));
        assert_eq!(
            interp.variable("hits"),
            Some(Value::Number(expected_hits(depth))),
            "depth {depth}"
        );
        assert_eq!(interp.variable("done"), Some(Value::Boolean(true)));
        assert!(run_script(&source).output.is_empty(), "depth {depth}");
    }
}

#[test]
fn a_missing_conclude_names_the_outer_opener() {
    let err = Interpreter::new().interpret(&tower(4, 3)).unwrap_err();
    assert!(matches!(
        err.root(),
        ScriptError::UnterminatedBlock { line: 2, .. }
    ));
}

#[test]
fn nesting_ceiling_comes_from_configuration() {
    let config = InterpreterConfig {
        max_nesting: 3,
        ..InterpreterConfig::default()
    };
    let mut interp = Interpreter::with_host(config, Box::new(MemoryHost::new()));
    assert!(interp.interpret(&tower(3, 3)).is_ok());
    let err = interp.interpret(&tower(5, 5)).unwrap_err();
    assert!(matches!(err.root(), ScriptError::NestingTooDeep(3)));
    assert_eq!(err.code(), "E005");
}

//=====================================================
// End of file
//=====================================================
