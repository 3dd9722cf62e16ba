//=====================================================
// File: interpreter/eval.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana expression evaluator
// Objective: Turn a value-expression substring into a runtime value by trying
//            literal, container, module-call, path, shape and arithmetic forms
//            in a fixed order, first match wins
//=====================================================

use std::rc::Rc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::interpreter::Interpreter;
use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::split::{self, Operator};
use crate::interpreter::value::{Shape, Tome, Value};

//=====================================================
// Section 1.0 - Literal Recognisers
//=====================================================

fn compile(source: &str) -> Regex {
    Regex::new(source).expect("evaluator pattern must compile")
}

static TRUE_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^(?:truth|true)$"));
static FALSE_WORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^(?:lie|false)$"));
static NUMBER: Lazy<Regex> = Lazy::new(|| compile(r"^-?(?:\d+\.\d+|\d+)$"));
static TOME_OPEN: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^tome\s*\{"));
static INVOKE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^invoke\s+(\w+)\.(\w+)(?:\s+with\s+([\s\S]+))?$"));
static BARE_PATH: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z_]\w*(?:\.[A-Za-z_]\w*)*$"));
static SHAPE_LIST: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^Shape\s*\(\s*([^)]+?)\s*\)\s*=>\s*([\s\S]+)$"));
static SHAPE_SINGLE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^Shape\s+([A-Za-z_]\w*)\s*=>\s*([\s\S]+)$"));
static IDENTIFIER: Lazy<Regex> = Lazy::new(|| compile(r"^[A-Za-z_]\w*$"));

pub const MAX_SHAPE_PARAMS: usize = 3;

pub fn is_bare_path(text: &str) -> bool {
    BARE_PATH.is_match(text)
}

pub fn is_true_word(text: &str) -> bool {
    TRUE_WORD.is_match(text)
}

pub fn is_false_word(text: &str) -> bool {
    FALSE_WORD.is_match(text)
}

fn triple_quoted(text: &str) -> Option<&str> {
    if text.len() < 6 {
        return None;
    }
    for fence in ["\"\"\"", "'''"] {
        if text.starts_with(fence) && text.ends_with(fence) {
            return Some(&text[3..text.len() - 3]);
        }
    }
    None
}

/// Interior of a single double-quoted literal spanning the whole text.
fn quoted_body(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next()?;
            }
            '"' => return None,
            _ => {}
        }
    }
    Some(inner)
}

/// JSON-style escapes; unknown escapes are kept as written.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            out.push('\\');
            break;
        };
        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '"' | '\\' | '/' => out.push(escape),
            'u' => {
                let hex: String = chars.clone().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().filter(|_| hex.len() == 4) {
                    Some(code) => {
                        for _ in 0..4 {
                            chars.next();
                        }
                        out.push(char::from_u32(code).unwrap_or('\u{fffd}'));
                    }
                    None => {
                        out.push('\\');
                        out.push('u');
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn strip_key_quotes(key: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = key
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            if !inner.is_empty() {
                return inner;
            }
        }
    }
    key
}

//=====================================================
// Section 2.0 - Resolution Order
//=====================================================

impl Interpreter {
    /// Evaluates a value expression. Text matching no form comes back as an
    /// opaque string.
    pub fn evaluate(&mut self, text: &str) -> ScriptResult<Value> {
        let s = text.trim();

        if let Some(body) = triple_quoted(s) {
            return Ok(Value::string(body));
        }
        if let Some(body) = quoted_body(s) {
            return Ok(Value::String(unescape(body)));
        }
        if TRUE_WORD.is_match(s) {
            return Ok(Value::Boolean(true));
        }
        if FALSE_WORD.is_match(s) {
            return Ok(Value::Boolean(false));
        }
        if NUMBER.is_match(s) {
            return Ok(Value::Number(s.parse().unwrap_or(f64::NAN)));
        }
        if let Some(inner) = split::strip_enclosing(s, '[', ']') {
            return self.evaluate_sequence(inner);
        }
        if let Some(open) = TOME_OPEN.find(s) {
            let braced = &s[open.end() - 1..];
            if let Some(inner) = split::strip_enclosing(braced, '{', '}') {
                return self.evaluate_tome(inner);
            }
        }
        if let Some(caps) = INVOKE.captures(s) {
            let alias = &caps[1];
            let function = &caps[2];
            let args = match caps.get(3) {
                Some(list) => self.evaluate_list(list.as_str())?,
                None => Vec::new(),
            };
            return self.call_module(alias, function, &args);
        }
        if BARE_PATH.is_match(s) {
            return Ok(self.resolve_path(s));
        }
        if let Some(shape) = parse_shape(s)? {
            return Ok(Value::Shape(Rc::new(shape)));
        }
        if let Some(inner) = split::strip_enclosing(s, '(', ')') {
            return self.evaluate(inner);
        }
        if let Some((left, op, right)) = split::split_binary(s) {
            let left = self.evaluate(left)?;
            let right = self.evaluate(right)?;
            return Ok(apply_operator(&left, op, &right));
        }
        Ok(Value::string(s))
    }

    /// Evaluates each top-level comma-separated piece.
    pub(crate) fn evaluate_list(&mut self, text: &str) -> ScriptResult<Vec<Value>> {
        split::split_top_level(text)
            .iter()
            .map(|piece| self.evaluate(piece))
            .collect()
    }

    fn evaluate_sequence(&mut self, inner: &str) -> ScriptResult<Value> {
        if inner.trim().is_empty() {
            return Ok(Value::sequence(Vec::new()));
        }
        Ok(Value::sequence(self.evaluate_list(inner)?))
    }

    fn evaluate_tome(&mut self, inner: &str) -> ScriptResult<Value> {
        let mut tome = Tome::new();
        for pair in split::split_top_level(inner) {
            if pair.is_empty() {
                continue;
            }
            let (key, expr) = split::split_pair(&pair);
            let value = self.evaluate(expr)?;
            tome.insert(strip_key_quotes(key), value);
        }
        Ok(Value::tome(tome))
    }

    /// Walks variables, then tome keys. Missing segments give `Undefined`.
    pub(crate) fn resolve_path(&self, path: &str) -> Value {
        let mut segments = path.split('.');
        let Some(root) = segments.next() else {
            return Value::Undefined;
        };
        let mut current = match self.lookup(root) {
            Some(value) => value.clone(),
            None => match self.module(root) {
                Some(module) if !path.contains('.') => return Value::Module(module),
                _ => return Value::Undefined,
            },
        };
        for segment in segments {
            current = match &current {
                Value::Tome(tome) => tome.borrow().get(segment).cloned().unwrap_or(Value::Undefined),
                Value::Sequence(items) if segment == "length" => {
                    Value::Number(items.borrow().len() as f64)
                }
                Value::String(text) if segment == "length" => {
                    Value::Number(text.chars().count() as f64)
                }
                _ => Value::Undefined,
            };
        }
        current
    }
}

fn parse_shape(text: &str) -> ScriptResult<Option<Shape>> {
    let (params, body) = if let Some(caps) = SHAPE_LIST.captures(text) {
        let params: Vec<String> = caps[1]
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        (params, caps[2].trim().to_string())
    } else if let Some(caps) = SHAPE_SINGLE.captures(text) {
        (vec![caps[1].to_string()], caps[2].trim().to_string())
    } else {
        return Ok(None);
    };
    if params.len() > MAX_SHAPE_PARAMS {
        return Err(ScriptError::parse_error(format!(
            "a shape takes at most {} parameters, got {}",
            MAX_SHAPE_PARAMS,
            params.len()
        )));
    }
    if let Some(bad) = params.iter().find(|p| !IDENTIFIER.is_match(p)) {
        return Err(ScriptError::parse_error(format!(
            "'{}' is not a valid shape parameter",
            bad
        )));
    }
    Ok(Some(Shape { params, body }))
}

//=====================================================
// Section 3.0 - Arithmetic
//=====================================================

fn concatenates(value: &Value) -> bool {
    matches!(
        value,
        Value::String(_)
            | Value::Sequence(_)
            | Value::Tome(_)
            | Value::Timestamp(_)
            | Value::Shape(_)
            | Value::Module(_)
    )
}

pub fn apply_operator(left: &Value, op: Operator, right: &Value) -> Value {
    if op == Operator::Add && (concatenates(left) || concatenates(right)) {
        return Value::String(format!("{}{}", left, right));
    }
    let (a, b) = (left.to_number(), right.to_number());
    Value::Number(match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => a / b,
        Operator::Remainder => a % b,
    })
}


//=====================================================
// End of file
//=====================================================
