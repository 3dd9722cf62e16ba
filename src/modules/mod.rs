//=====================================================
// File: modules/mod.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Built-in module registry for Arcana scripts
// Objective: Map logical `std/...` paths to lazily built native function
//            tables and validate call arity before dispatch
//=====================================================

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::Interpreter;
use crate::interpreter::value::Value;

pub mod array;
pub mod json;
pub mod random;
pub mod time;
pub mod tome;

//=====================================================
// Section 1.0 - Native Functions
//=====================================================

pub type NativeFunction = fn(&mut Interpreter, &[Value]) -> ScriptResult<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeArity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Inclusive minimum with an optional maximum; `None` means unbounded.
    Range { min: usize, max: Option<usize> },
}

impl NativeArity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            NativeArity::Exact(n) => *n == count,
            NativeArity::Range { min, max } => {
                if count < *min {
                    return false;
                }
                match max {
                    Some(max) => count <= *max,
                    None => true,
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            NativeArity::Exact(1) => "1 argument".to_string(),
            NativeArity::Exact(n) => format!("{} arguments", n),
            NativeArity::Range { min, max } => match max {
                Some(max) => format!("{}..={} arguments", min, max),
                None => format!("{} or more arguments", min),
            },
        }
    }
}

#[derive(Clone, Copy)]
pub struct NativeEntry {
    pub arity: NativeArity,
    pub function: NativeFunction,
}

//=====================================================
// Section 2.0 - Module Tables
//=====================================================

/// Immutable function table bound to a script alias by `Summon`.
pub struct Module {
    path: String,
    functions: HashMap<&'static str, NativeEntry>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            functions: HashMap::new(),
        }
    }

    pub fn with(mut self, name: &'static str, arity: NativeArity, function: NativeFunction) -> Self {
        self.functions.insert(name, NativeEntry { arity, function });
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn function(&self, name: &str) -> Option<NativeEntry> {
        self.functions.get(name).copied()
    }

    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Validates arity, then runs the native function.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        name: &str,
        args: &[Value],
    ) -> ScriptResult<Value> {
        let entry = self.function(name).ok_or_else(|| ScriptError::UnknownFunction {
            module: self.path.clone(),
            function: name.to_string(),
        })?;
        if !entry.arity.accepts(args.len()) {
            return Err(ScriptError::ArityMismatch {
                function: format!("{}.{}", self.path, name),
                expected: entry.arity.describe(),
                found: args.len(),
            });
        }
        (entry.function)(interpreter, args)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("path", &self.path)
            .field("functions", &self.function_names())
            .finish()
    }
}

//=====================================================
// Section 3.0 - Registry
//=====================================================

type ModuleBuilder = fn() -> Module;

/// Known library paths. Tables are built on first summon and shared after.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    builders: HashMap<String, ModuleBuilder>,
    loaded: HashMap<String, Rc<Module>>,
}

impl ModuleRegistry {
    pub fn with_defaults() -> Self {
        let mut registry = Self {
            builders: HashMap::new(),
            loaded: HashMap::new(),
        };
        registry.register("std/time", time::build);
        registry.register("std/json", json::build);
        registry.register("std/random", random::build);
        registry.register("std/array", array::build);
        registry.register("std/tome", tome::build);
        registry
    }

    pub fn register(&mut self, path: &str, builder: ModuleBuilder) {
        self.builders.insert(path.to_string(), builder);
        self.loaded.remove(path);
    }

    pub fn module_paths(&self) -> Vec<String> {
        let mut paths: Vec<_> = self.builders.keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn load(&mut self, path: &str) -> ScriptResult<Rc<Module>> {
        if let Some(module) = self.loaded.get(path) {
            return Ok(Rc::clone(module));
        }
        let builder = self
            .builders
            .get(path)
            .ok_or_else(|| ScriptError::UnknownModule(path.to_string()))?;
        debug!(path, "building module table");
        let module = Rc::new(builder());
        self.loaded.insert(path.to_string(), Rc::clone(&module));
        Ok(module)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Default alias for `Summon "a/b/c"` without `as`: the last path segment.
pub fn default_alias(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

//=====================================================
// Section 4.0 - Argument Helpers
//=====================================================

pub(crate) fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

pub(crate) fn sequence_arg(args: &[Value], index: usize, function: &str) -> ScriptResult<Vec<Value>> {
    match args.get(index) {
        Some(Value::Sequence(items)) => Ok(items.borrow().clone()),
        Some(other) => Err(ScriptError::type_error(format!(
            "{} expects an array, got {}",
            function,
            other.essence()
        ))),
        None => Err(ScriptError::type_error(format!("{} expects an array", function))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_ranges() {
        assert!(NativeArity::Exact(2).accepts(2));
        assert!(!NativeArity::Exact(2).accepts(1));
        let open = NativeArity::Range { min: 1, max: None };
        assert!(open.accepts(9));
        assert!(!open.accepts(0));
        assert_eq!(open.describe(), "1 or more arguments");
    }

    #[test]
    fn registry_knows_standard_paths() {
        let mut registry = ModuleRegistry::with_defaults();
        assert_eq!(
            registry.module_paths(),
            vec!["std/array", "std/json", "std/random", "std/time", "std/tome"]
        );
        let first = registry.load("std/time").unwrap();
        let second = registry.load("std/time").unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert!(matches!(
            registry.load("std/sorcery"),
            Err(ScriptError::UnknownModule(path)) if path == "std/sorcery"
        ));
    }

    #[test]
    fn alias_defaults_to_last_segment() {
        assert_eq!(default_alias("std/random"), "random");
        assert_eq!(default_alias("tome"), "tome");
    }
}

//=====================================================
// End of file
//=====================================================
