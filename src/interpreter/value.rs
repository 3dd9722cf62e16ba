//=====================================================
// File: interpreter/value.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana runtime value model
// Objective: Closed tagged union for every runtime kind, with the display,
//            coercion, truthiness and equality rules statements rely on
//=====================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::modules::Module;

//=====================================================
// Section 1.0 - Runtime Values
//=====================================================

pub type SharedSequence = Rc<RefCell<Vec<Value>>>;
pub type SharedTome = Rc<RefCell<Tome>>;

/// Arcana runtime value. Sequences and tomes are shared: every variable
/// bound to the same literal sees in-place mutations.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Sequence(SharedSequence),
    Tome(SharedTome),
    Timestamp(NaiveDateTime),
    Shape(Rc<Shape>),
    Module(Rc<Module>),
    Undefined,
}

/// Single-expression lambda. The body stays unevaluated text until called.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub params: Vec<String>,
    pub body: String,
}

impl Shape {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

//=====================================================
// Section 2.0 - Tome Storage
//=====================================================

/// Key-unique map that enumerates in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tome {
    entries: Vec<(String, Value)>,
}

impl Tome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == key)
    }

    /// Replaces in place when the key exists, appends otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Tome {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut tome = Tome::new();
        for (key, value) in iter {
            tome.insert(key, value);
        }
        tome
    }
}

//=====================================================
// Section 3.0 - Constructors & Inspection
//=====================================================

impl Value {
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Rc::new(RefCell::new(items)))
    }

    pub fn tome(tome: Tome) -> Self {
        Value::Tome(Rc::new(RefCell::new(tome)))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// Name reported by `EssenceOf`.
    pub fn essence(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Sequence(_) => "array",
            Value::Tome(_) => "tome",
            Value::Timestamp(_) => "date",
            Value::Shape(_) => "shape",
            Value::Module(_) => "module",
            Value::Undefined => "null",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Sequence(items) => !items.borrow().is_empty(),
            Value::Tome(tome) => !tome.borrow().is_empty(),
            Value::Timestamp(_) | Value::Shape(_) | Value::Module(_) => true,
            Value::Undefined => false,
        }
    }

    /// `IsVoid`: absent, or a container/string with nothing in it.
    pub fn is_void(&self) -> bool {
        match self {
            Value::Undefined => true,
            Value::String(s) => s.is_empty(),
            Value::Sequence(items) => items.borrow().is_empty(),
            Value::Tome(tome) => tome.borrow().is_empty(),
            Value::Number(_)
            | Value::Boolean(_)
            | Value::Timestamp(_)
            | Value::Shape(_)
            | Value::Module(_) => false,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => parse_number_text(s),
            Value::Sequence(items) => {
                let items = items.borrow();
                match items.len() {
                    0 => 0.0,
                    1 => items[0].to_number(),
                    _ => f64::NAN,
                }
            }
            Value::Timestamp(ts) => ts.and_utc().timestamp() as f64,
            Value::Tome(_) | Value::Shape(_) | Value::Module(_) | Value::Undefined => f64::NAN,
        }
    }

    /// Integer view used for counts and widths: truncates toward zero, NaN
    /// and infinities collapse to zero.
    pub fn to_int(&self) -> i64 {
        let n = self.to_number();
        if n.is_finite() { n.trunc() as i64 } else { 0 }
    }

    /// Like `to_number`, but falsy values count as zero. Used by summing
    /// operations.
    pub fn to_number_or_zero(&self) -> f64 {
        if self.is_truthy() { self.to_number() } else { 0.0 }
    }

    pub fn as_sequence(&self) -> Option<&SharedSequence> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_tome(&self) -> Option<&SharedTome> {
        match self {
            Value::Tome(tome) => Some(tome),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Rc<Shape>> {
        match self {
            Value::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    fn same_storage(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Sequence(a), Value::Sequence(b)) => Rc::ptr_eq(a, b),
            (Value::Tome(a), Value::Tome(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Whether `container`'s storage is this value or nested anywhere inside
    /// it. Storing such a value into `container` would make it hold itself.
    pub fn holds_storage(&self, container: &Value) -> bool {
        if self.same_storage(container) {
            return true;
        }
        match self {
            Value::Sequence(items) => items
                .borrow()
                .iter()
                .any(|item| item.holds_storage(container)),
            Value::Tome(tome) => tome
                .borrow()
                .iter()
                .any(|(_, value)| value.holds_storage(container)),
            _ => false,
        }
    }

    /// Structural copy: nested sequences and tomes get fresh storage.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Sequence(items) => {
                Value::sequence(items.borrow().iter().map(Value::deep_clone).collect())
            }
            Value::Tome(tome) => Value::tome(
                tome.borrow()
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.deep_clone()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

fn parse_number_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Reject the spellings Rust accepts but scripts never mean as numbers.
    if trimmed
        .chars()
        .any(|c| c.is_alphabetic() && c != 'e' && c != 'E')
    {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Shortest round-trip rendering with integral values printed bare.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

//=====================================================
// Section 4.0 - Equality & Display
//=====================================================

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;

        match (self, other) {
            (String(a), String(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (Boolean(a), Boolean(b)) => a == b,
            (Sequence(a), Sequence(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Tome(a), Tome(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Timestamp(a), Timestamp(b)) => a == b,
            (Shape(a), Shape(b)) => a == b,
            (Module(a), Module(b)) => Rc::ptr_eq(a, b),
            (Undefined, Undefined) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Tome(tome) => {
                write!(f, "{{")?;
                for (i, (key, value)) in tome.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            Value::Shape(shape) => write!(f, "<shape ({})>", shape.params.join(", ")),
            Value::Module(module) => write!(f, "<module {}>", module.path()),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

//=====================================================
// Section 5.0 - Tests
//=====================================================


//=====================================================
// End of file
//=====================================================
