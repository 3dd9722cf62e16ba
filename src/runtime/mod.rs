//=====================================================
// File: runtime/mod.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Shared script runners for ArcanaScript tests and tools
// Objective: Run sources against an in-memory host and check .arc fixtures
//            against their recorded .expected output
//=====================================================

//=====================================================
// Import & Modules
//=====================================================

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::InterpreterConfig;
use crate::host::MemoryHost;
use crate::interpreter::{Interpreter, ScriptResult};

//=====================================================
// Section 1.0 - Script Runs
//=====================================================

/// Outcome of one interpretation pass plus everything it revealed, including
/// lines revealed before a failure.
#[derive(Debug)]
pub struct ScriptRun {
    pub outcome: ScriptResult<()>,
    pub output: Vec<String>,
}

pub fn run_script(source: &str) -> ScriptRun {
    run_script_with(InterpreterConfig::default(), source)
}

pub fn run_script_with(config: InterpreterConfig, source: &str) -> ScriptRun {
    let host = MemoryHost::new();
    let mut interpreter = Interpreter::with_host(config, Box::new(host.clone()));
    let outcome = interpreter.interpret(source);
    ScriptRun {
        outcome,
        output: host.output(),
    }
}

//=====================================================
// Section 2.0 - Fixture Harness
//=====================================================

/// Runs an .arc script relative to the crate root and asserts that its
/// revealed lines equal the sibling `.expected` file.
pub fn run_fixture(relative_path: &str) {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let script_path = manifest_dir.join(relative_path);
    let expected_path = script_path.with_extension("expected");
    let source = fs::read_to_string(&script_path)
        .unwrap_or_else(|err| panic!("read {} failed: {}", script_path.display(), err));
    let expected = fs::read_to_string(&expected_path)
        .unwrap_or_else(|err| panic!("read {} failed: {}", expected_path.display(), err));

    debug!(fixture = %script_path.display(), "running fixture");
    let start = Instant::now();
    let run = run_script(&source);
    let elapsed = start.elapsed();
    if elapsed > Duration::from_secs(5) {
        panic!("fixture {} timed out after {:?}", script_path.display(), elapsed);
    }
    if let Err(err) = run.outcome {
        panic!(
            "fixture {} failed with [{}] {}",
            script_path.display(),
            err.code(),
            err
        );
    }

    let expected: Vec<&str> = expected.lines().collect();
    assert_eq!(
        run.output,
        expected,
        "fixture {} revealed unexpected output",
        script_path.display()
    );
}


//=====================================================
// End of file
//=====================================================
