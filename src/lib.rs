//=====================================================
// File: lib.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: ArcanaScript library root
// Objective: Wire the interpreter, statement catalogue, native modules, host
//            capabilities, configuration and logging into one public surface
//=====================================================

pub mod config;
pub mod host;
pub mod interpreter;
pub mod logging;
pub mod modules;
pub mod runtime;
pub mod statements;

pub use config::InterpreterConfig;
pub use host::{ConsoleHost, Host, HostError, MemoryHost};
pub use interpreter::check::{CheckIssue, check};
pub use interpreter::{ErrorCode, Interpreter, ScriptError, ScriptResult, Value};

#[cfg(test)]
mod tests;

//=====================================================
// End of file
//=====================================================
