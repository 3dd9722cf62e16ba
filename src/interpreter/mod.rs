//=====================================================
// File: interpreter/mod.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana interpreter context
// Objective: Own the environment, sealed set, module namespace, lambda frames
//            and PRNG for one interpretation pass, and expose the entry points
//            that drive the evaluator, dispatcher and control-flow executor
//=====================================================

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use tracing::{debug, info};

use crate::config::InterpreterConfig;
use crate::host::{Host, MemoryHost};
use crate::modules::{self, Module, ModuleRegistry};
use crate::statements;

pub mod blocks;
pub mod check;
pub mod condition;
pub mod control;
pub mod errors;
pub mod eval;
pub mod json;
pub mod rng;
pub mod split;
pub mod time;
pub mod value;

pub use errors::{ErrorCode, ScriptError, ScriptResult};
pub use value::{Shape, Tome, Value};

use rng::Xorshift32;
use time::TimePattern;

//=====================================================
// Section 1.0 - Interpreter State
//=====================================================

/// One interpreter context. Everything mutable lives here and is passed by
/// `&mut self` into every component; nothing is shared across instances.
pub struct Interpreter {
    config: InterpreterConfig,
    host: Box<dyn Host>,
    globals: HashMap<String, Value>,
    /// Parameter bindings of the shape calls currently running.
    frames: Vec<HashMap<String, Value>>,
    sealed: HashSet<String>,
    aliases: HashMap<String, Rc<Module>>,
    registry: ModuleRegistry,
    rng: Xorshift32,
    pub(crate) time_patterns: HashMap<String, Rc<TimePattern>>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_host(InterpreterConfig::default(), Box::new(MemoryHost::new()))
    }

    pub fn with_host(config: InterpreterConfig, host: Box<dyn Host>) -> Self {
        let rng = Xorshift32::new(config.seed);
        Self {
            config,
            host,
            globals: HashMap::new(),
            frames: Vec::new(),
            sealed: HashSet::new(),
            aliases: HashMap::new(),
            registry: ModuleRegistry::with_defaults(),
            rng,
            time_patterns: HashMap::new(),
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut ModuleRegistry {
        &mut self.registry
    }

    /// Discards every trace of the previous run.
    pub fn reset(&mut self) {
        self.globals.clear();
        self.frames.clear();
        self.sealed.clear();
        self.aliases.clear();
        self.rng.reseed(self.config.seed);
        debug!(seed = self.config.seed, "interpreter reset");
    }

    /// Resets, then runs every line of `source` in order.
    pub fn interpret(&mut self, source: &str) -> ScriptResult<()> {
        self.reset();
        let lines: Vec<&str> = source.lines().collect();
        info!(lines = lines.len(), seed = self.config.seed, "interpretation started");
        let outcome = self.run_lines(&lines, 0, lines.len(), 0);
        match &outcome {
            Ok(()) => info!("interpretation finished"),
            Err(err) => info!(code = err.code(), "interpretation aborted"),
        }
        outcome
    }

    /// Runs a single non-block line through the statement catalogue.
    pub fn execute(&mut self, line: &str) -> ScriptResult<()> {
        statements::dispatch(self, line)
    }

    pub fn variable(&self, name: &str) -> Option<Value> {
        self.lookup(name).cloned()
    }

    pub fn is_sealed(&self, name: &str) -> bool {
        self.sealed.contains(name)
    }

    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    //=====================================================
    // Section 2.0 - Environment Access
    //=====================================================

    /// Innermost shape frame first, then the global environment.
    pub(crate) fn lookup(&self, name: &str) -> Option<&Value> {
        if let Some(frame) = self.frames.last() {
            if let Some(value) = frame.get(name) {
                return Some(value);
            }
        }
        self.globals.get(name)
    }

    /// Every assignment funnels through here so sealed names stay put.
    pub(crate) fn bind(&mut self, name: &str, value: Value) -> ScriptResult<()> {
        if self.sealed.contains(name) {
            return Err(ScriptError::SealedVariable(name.to_string()));
        }
        self.globals.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn seal(&mut self, name: &str, value: Value) -> ScriptResult<()> {
        let defined = self
            .globals
            .get(name)
            .is_some_and(|existing| !matches!(existing, Value::Undefined));
        if defined || self.sealed.contains(name) {
            return Err(ScriptError::AlreadyDefined(name.to_string()));
        }
        self.globals.insert(name.to_string(), value);
        self.sealed.insert(name.to_string());
        Ok(())
    }

    /// In-place operations on a sealed variable are rejected too, when the
    /// operand names it directly.
    pub(crate) fn guard_in_place(&self, operand: &str) -> ScriptResult<()> {
        let operand = operand.trim();
        if eval::is_bare_path(operand) {
            let root = operand.split('.').next().unwrap_or(operand);
            if self.sealed.contains(root) {
                return Err(ScriptError::SealedVariable(root.to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    //=====================================================
    // Section 3.0 - Modules
    //=====================================================

    pub(crate) fn summon(&mut self, path: &str, alias: Option<&str>) -> ScriptResult<()> {
        let module = self.registry.load(path)?;
        let alias = alias.unwrap_or_else(|| modules::default_alias(path));
        debug!(path, alias, "module summoned");
        self.aliases.insert(alias.to_string(), module);
        Ok(())
    }

    pub(crate) fn module(&self, alias: &str) -> Option<Rc<Module>> {
        self.aliases.get(alias).cloned()
    }

    pub(crate) fn call_module(
        &mut self,
        alias: &str,
        function: &str,
        args: &[Value],
    ) -> ScriptResult<Value> {
        let module = self
            .module(alias)
            .ok_or_else(|| ScriptError::UnknownModule(alias.to_string()))?;
        module.call(self, function, args)
    }

    //=====================================================
    // Section 4.0 - Shapes
    //=====================================================

    /// Binds `args` positionally in a fresh frame, evaluates the body, then
    /// drops the frame whatever the outcome.
    pub(crate) fn call_shape(&mut self, shape: &Shape, args: Vec<Value>) -> ScriptResult<Value> {
        let mut frame = HashMap::with_capacity(shape.arity());
        let mut args = args.into_iter();
        for param in &shape.params {
            frame.insert(param.clone(), args.next().unwrap_or(Value::Undefined));
        }
        self.frames.push(frame);
        let result = if condition::is_comparison(&shape.body) {
            self.evaluate_condition(&shape.body).map(Value::Boolean)
        } else {
            self.evaluate(&shape.body)
        };
        self.frames.pop();
        result
    }

    //=====================================================
    // Section 5.0 - Randomness & Host
    //=====================================================

    pub(crate) fn rng_mut(&mut self) -> &mut Xorshift32 {
        &mut self.rng
    }

    pub(crate) fn next_random(&mut self) -> f64 {
        self.rng.next_f64()
    }

    pub(crate) fn reseed(&mut self, seed: u32) {
        debug!(seed, "prng reseeded");
        self.rng.reseed(seed);
    }

    pub(crate) fn host_mut(&mut self) -> &mut dyn Host {
        self.host.as_mut()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}


//=====================================================
// End of file
//=====================================================
