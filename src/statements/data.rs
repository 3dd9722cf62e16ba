//=====================================================
// File: statements/data.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Serialisation, inspection and host statements
// Objective: JSON encode/decode, type and emptiness inspection, and the
//            save/clipboard requests handed to the host
//=====================================================

use regex::Captures;
use tracing::debug;

use super::{StatementPattern, group};
use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::json;
use crate::interpreter::value::Value;

pub(super) fn patterns() -> Vec<StatementPattern> {
    vec![
        StatementPattern::new("EncodeJson", r"Encode\s+JSON\s+(.+)\s+into\s+(\w+)", encode_json),
        StatementPattern::new("DecodeJson", r"Decode\s+JSON\s+(.+)\s+into\s+(\w+)", decode_json),
        StatementPattern::new("EssenceOf", r"EssenceOf\s+(.+)\s+into\s+(\w+)", essence_of),
        StatementPattern::new("IsVoid", r"IsVoid\s+(.+)\s+into\s+(\w+)", is_void),
        StatementPattern::new("Scribe", r#"Scribe\s+(.+)\s+as\s+"([^"]+)""#, scribe),
        StatementPattern::new("Imprint", r"Imprint\s+(.+)\s+to\s+clipboard", imprint),
    ]
}

fn encode_json(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let value = interp.eval_group(caps, 1)?;
    interp.bind_group(caps, 2, Value::String(json::encode(&value)?))
}

fn decode_json(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    interp.bind_group(caps, 2, json::decode(&text)?)
}

fn essence_of(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let essence = interp.eval_group(caps, 1)?.essence();
    interp.bind_group(caps, 2, Value::string(essence))
}

fn is_void(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let void = interp.eval_group(caps, 1)?.is_void();
    interp.bind_group(caps, 2, Value::Boolean(void))
}

fn scribe(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    let filename = group(caps, 2);
    debug!(filename, bytes = text.len(), "scribe requested");
    interp.host_mut().save(&text, filename)?;
    Ok(())
}

fn imprint(interp: &mut Interpreter, caps: &Captures<'_>) -> ScriptResult<()> {
    let text = interp.text_group(caps, 1)?;
    interp.host_mut().copy_to_clipboard(&text)?;
    Ok(())
}


//=====================================================
// End of file
//=====================================================
