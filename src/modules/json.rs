//=====================================================
// File: modules/json.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: std/json native table
// Objective: Expose the value/JSON bridge to scripts
//=====================================================

use super::{Module, NativeArity, arg};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::json;
use crate::interpreter::value::Value;

pub fn build() -> Module {
    Module::new("std/json")
        .with("encode", NativeArity::Exact(1), json_encode)
        .with("decode", NativeArity::Exact(1), json_decode)
}

fn json_encode(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    Ok(Value::String(json::encode(&arg(args, 0))?))
}

fn json_decode(_interp: &mut Interpreter, args: &[Value]) -> ScriptResult<Value> {
    json::decode(&arg(args, 0).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::errors::ScriptError;

    #[test]
    fn encode_and_decode_through_invoke() {
        let mut interp = Interpreter::new();
        interp
            .interpret(
                "Summon \"std/json\" ok\n\
                 text is invoke json.encode with [1, \"two\", Tome { three: 3 }] ok\n\
                 back is invoke json.decode with text ok",
            )
            .unwrap();
        assert_eq!(
            interp.variable("text"),
            Some(Value::from(r#"[1,"two",{"three":3}]"#))
        );
        assert_eq!(interp.variable("back").unwrap().to_string(), "[1, two, {three: 3}]");
    }

    #[test]
    fn shapes_do_not_encode() {
        let mut interp = Interpreter::new();
        interp.execute("Summon \"std/json\" ok").unwrap();
        let err = interp
            .execute("invoke json.encode with Shape x => x into out ok")
            .unwrap_err();
        assert!(matches!(err, ScriptError::TypeError(_)));
    }
}

//=====================================================
// End of file
//=====================================================
