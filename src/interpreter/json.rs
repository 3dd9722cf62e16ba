//=====================================================
// File: interpreter/json.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: JSON bridge for Arcana values
// Objective: Convert the serialisable subset of the value model to and from
//            serde_json documents, keeping tome key order intact
//=====================================================

use serde_json::{Map, Number, Value as Json};

use crate::interpreter::errors::{ScriptError, ScriptResult};
use crate::interpreter::value::{Tome, Value};

/// Largest integer f64 represents exactly.
const SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub fn to_json(value: &Value) -> ScriptResult<Json> {
    Ok(match value {
        Value::Undefined => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::String(s) => Json::String(s.clone()),
        Value::Number(n) => number_to_json(*n),
        Value::Timestamp(ts) => Json::String(ts.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Value::Sequence(items) => Json::Array(
            items
                .borrow()
                .iter()
                .map(to_json)
                .collect::<ScriptResult<Vec<_>>>()?,
        ),
        Value::Tome(tome) => {
            let mut map = Map::new();
            for (key, entry) in tome.borrow().iter() {
                // Absent values drop out of objects.
                if matches!(entry, Value::Undefined) {
                    continue;
                }
                map.insert(key.to_string(), to_json(entry)?);
            }
            Json::Object(map)
        }
        Value::Shape(_) | Value::Module(_) => {
            return Err(ScriptError::type_error(format!(
                "a {} cannot be encoded as JSON",
                value.essence()
            )));
        }
    })
}

fn number_to_json(n: f64) -> Json {
    if !n.is_finite() {
        return Json::Null;
    }
    if n.fract() == 0.0 && n.abs() <= SAFE_INTEGER {
        return Json::Number(Number::from(n as i64));
    }
    Number::from_f64(n).map(Json::Number).unwrap_or(Json::Null)
}

pub fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Undefined,
        Json::Bool(b) => Value::Boolean(b),
        Json::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::sequence(items.into_iter().map(from_json).collect()),
        Json::Object(map) => Value::tome(
            map.into_iter()
                .map(|(key, entry)| (key, from_json(entry)))
                .collect::<Tome>(),
        ),
    }
}

pub fn encode(value: &Value) -> ScriptResult<String> {
    let json = to_json(value)?;
    serde_json::to_string(&json).map_err(|err| ScriptError::type_error(err.to_string()))
}

pub fn decode(text: &str) -> ScriptResult<Value> {
    serde_json::from_str::<Json>(text)
        .map(from_json)
        .map_err(|err| ScriptError::parse_error(format!("invalid JSON: {}", err)))
}


//=====================================================
// End of file
//=====================================================
