//=====================================================
// File: interpreter/errors.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana failure taxonomy
// Objective: Describe every way an interpretation pass can abort and map each
//            failure to a stable error code for hosts and tooling
//=====================================================

use thiserror::Error;

use crate::host::HostError;

//=====================================================
// Section 1.0 - Error Codes
//=====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Syntax,
    ModuleResolution,
    TypeMismatch,
    InvalidOperation,
    RuntimeAbort,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Syntax => "E001",
            ErrorCode::ModuleResolution => "E002",
            ErrorCode::TypeMismatch => "E003",
            ErrorCode::InvalidOperation => "E004",
            ErrorCode::RuntimeAbort => "E005",
        }
    }
}

//=====================================================
// Section 2.0 - Script Errors
//=====================================================

/// Every failure aborts the whole pass; nothing is recovered mid-run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    #[error("unknown statement: {line}")]
    UnknownStatement { line: String },
    #[error("unknown module '{0}'")]
    UnknownModule(String),
    #[error("unknown function '{function}' in module '{module}'")]
    UnknownFunction { module: String, function: String },
    #[error("'{0}' is sealed and cannot be reassigned")]
    SealedVariable(String),
    #[error("'{0}' already exists and cannot be sealed")]
    AlreadyDefined(String),
    #[error("type error: {0}")]
    TypeError(String),
    #[error("'{construct}' block opened at line {line} has no matching 'conclude'")]
    UnterminatedBlock { construct: String, line: usize },
    #[error("until loop exceeded {limit} iterations")]
    LoopBoundExceeded { limit: usize },
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("range error: {0}")]
    RangeError(String),
    #[error("{function} expects {expected}, got {found}")]
    ArityMismatch {
        function: String,
        expected: String,
        found: usize,
    },
    #[error("blocks nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("host error: {0}")]
    Host(String),
    #[error("line {number}: {source} (in `{text}`)")]
    AtLine {
        number: usize,
        text: String,
        #[source]
        source: Box<ScriptError>,
    },
}

impl ScriptError {
    pub fn type_error(message: impl Into<String>) -> Self {
        ScriptError::TypeError(message.into())
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        ScriptError::RangeError(message.into())
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        ScriptError::ParseError(message.into())
    }

    /// Attach the failing source line. Statement failures already carry their
    /// text, and an error is only ever located once.
    pub fn at_line(self, number: usize, text: &str) -> Self {
        match self {
            ScriptError::UnknownStatement { .. } | ScriptError::AtLine { .. } => self,
            other => ScriptError::AtLine {
                number,
                text: text.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying failure with any line location stripped.
    pub fn root(&self) -> &ScriptError {
        match self {
            ScriptError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self.root() {
            ScriptError::UnknownStatement { .. }
            | ScriptError::UnterminatedBlock { .. }
            | ScriptError::ParseError(_) => ErrorCode::Syntax,
            ScriptError::UnknownModule(_) | ScriptError::UnknownFunction { .. } => {
                ErrorCode::ModuleResolution
            }
            ScriptError::TypeError(_) => ErrorCode::TypeMismatch,
            ScriptError::SealedVariable(_)
            | ScriptError::AlreadyDefined(_)
            | ScriptError::RangeError(_)
            | ScriptError::ArityMismatch { .. } => ErrorCode::InvalidOperation,
            ScriptError::LoopBoundExceeded { .. }
            | ScriptError::NestingTooDeep(_)
            | ScriptError::Host(_) => ErrorCode::RuntimeAbort,
            ScriptError::AtLine { .. } => ErrorCode::RuntimeAbort,
        }
    }

    pub fn code(&self) -> &'static str {
        self.error_code().as_str()
    }
}

impl From<HostError> for ScriptError {
    fn from(value: HostError) -> Self {
        ScriptError::Host(value.to_string())
    }
}

pub type ScriptResult<T> = Result<T, ScriptError>;

//=====================================================
// Section 3.0 - Tests
//=====================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn located_errors_keep_their_root() {
        let err = ScriptError::SealedVariable("hp".into()).at_line(4, "hp is 3 ok");
        assert!(matches!(err.root(), ScriptError::SealedVariable(name) if name == "hp"));
        assert_eq!(err.code(), "E004");
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn unknown_statement_is_never_relocated() {
        let err = ScriptError::UnknownStatement {
            line: "Dance wildly ok".into(),
        }
        .at_line(2, "Dance wildly ok");
        assert!(matches!(err, ScriptError::UnknownStatement { .. }));
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn location_is_attached_once() {
        let err = ScriptError::type_error("expected sequence")
            .at_line(7, "Sum x into y ok")
            .at_line(3, "when truth:");
        match err {
            ScriptError::AtLine { number, .. } => assert_eq!(number, 7),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

//=====================================================
// End of file
//=====================================================
