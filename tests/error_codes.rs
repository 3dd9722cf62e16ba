// ArcanaScript error code tests
// Covers: one failure per code E001-E005, host failures, partial output before an abort

#[path = "../src/tests/util.rs"]
mod util;

use arcanascript::runtime::run_script;
use arcanascript::{
    ErrorCode, Host, HostError, Interpreter, InterpreterConfig, MemoryHost, ScriptError,
};
use util::failure;

/// Accepts output but refuses every file and clipboard request.
struct ReadOnlyHost {
    inner: MemoryHost,
}

impl Host for ReadOnlyHost {
    fn append(&mut self, text: &str) -> Result<(), HostError> {
        self.inner.append(text)
    }

    fn save(&mut self, _text: &str, filename: &str) -> Result<(), HostError> {
        Err(HostError::NotSupported(format!("saving {}", filename)))
    }

    fn copy_to_clipboard(&mut self, _text: &str) -> Result<(), HostError> {
        Err(HostError::NotSupported("clipboard".into()))
    }
}

#[test]
fn test_every_code_is_reachable() {
    let cases = [
        ("Conjure a storm ok", ErrorCode::Syntax, "E001"),
        ("Summon \"std/astral\" ok", ErrorCode::ModuleResolution, "E002"),
        ("Average 3 into a ok\nSum \"abc\" into s ok", ErrorCode::TypeMismatch, "E003"),
        ("Flip with p 2 into f ok", ErrorCode::InvalidOperation, "E004"),
        ("until lie:\nconclude", ErrorCode::RuntimeAbort, "E005"),
    ];
    for (source, code, label) in cases {
        let err = failure(source);
        assert_eq!(err.error_code(), code, "{source}");
        assert_eq!(err.code(), label, "{source}");
        assert_eq!(code.as_str(), label);
    }
}

#[test]
fn test_host_refusals_abort_with_e005() {
    let shared = MemoryHost::new();
    let host = ReadOnlyHost {
        inner: shared.clone(),
    };
    let mut interp = Interpreter::with_host(InterpreterConfig::default(), Box::new(host));
    let err = interp
        .interpret("Reveal: saving\nScribe \"notes\" as \"notes.txt\" ok\nReveal: unreachable")
        .unwrap_err();
    assert!(matches!(err.root(), ScriptError::Host(message) if message.contains("notes.txt")));
    assert_eq!(err.code(), "E005");
    assert_eq!(shared.output(), vec!["saving"]);

    let err = interp.interpret("Imprint \"secret\" to clipboard ok").unwrap_err();
    assert!(matches!(err.root(), ScriptError::Host(_)));
}

#[test]
fn test_output_before_a_failure_is_kept() {
    let run = run_script("Reveal: one\nReveal: two\nMin [] into m ok\nReveal: three");
    assert_eq!(run.output, vec!["one", "two"]);
    let err = run.outcome.unwrap_err();
    assert_eq!(err.code(), "E004");
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_located_errors_render_line_and_text() {
    let err = failure("x is 1 ok\n\nBundle x by 2 into b ok");
    let message = err.to_string();
    assert!(message.starts_with("line 3:"), "{message}");
    assert!(message.contains("Bundle x by 2 into b ok"), "{message}");
}
