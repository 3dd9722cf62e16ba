//=====================================================
// File: interpreter/check.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Static validation of Arcana sources
// Objective: Verify block balance and statement recognition without running
//            anything, reporting the first problem with its line number
//=====================================================

use std::fmt;

use crate::interpreter::blocks;
use crate::interpreter::control::Construct;
use crate::interpreter::errors::ScriptError;
use crate::statements;

/// First problem found by [`check`], with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckIssue {
    pub line: usize,
    pub error: ScriptError,
}

impl fmt::Display for CheckIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] {}", self.line, self.error.code(), self.error)
    }
}

impl std::error::Error for CheckIssue {}

pub fn check(source: &str) -> Result<(), CheckIssue> {
    let lines: Vec<&str> = source.lines().collect();
    let mut open_blocks = 0usize;
    for (index, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        let issue = |error| CheckIssue {
            line: index + 1,
            error,
        };
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        if blocks::is_conclude(line) || blocks::is_otherwise(line) {
            if open_blocks == 0 {
                return Err(issue(ScriptError::UnknownStatement {
                    line: line.to_string(),
                }));
            }
            if blocks::is_conclude(line) {
                open_blocks -= 1;
            }
            continue;
        }
        if blocks::is_block_opener(line) && Construct::parse(line).is_some() {
            blocks::find_block_end(&lines, index).map_err(issue)?;
            open_blocks += 1;
            continue;
        }
        if statements::classify(line).is_none() {
            return Err(issue(ScriptError::UnknownStatement {
                line: line.to_string(),
            }));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_known_script_passes() {
        let source = "x is 1 ok\nwhen x is 1:\nReveal: one\notherwise:\nReveal: other\nconclude\n";
        assert!(check(source).is_ok());
    }

    #[test]
    fn unknown_statement_is_located() {
        let issue = check("x is 1 ok\n\nDance wildly ok").unwrap_err();
        assert_eq!(issue.line, 3);
        assert_eq!(issue.error.code(), "E001");
    }

    #[test]
    fn stray_and_missing_conclude() {
        assert_eq!(check("conclude").unwrap_err().line, 1);
        let issue = check("Reveal: a\nuntil x:\nReveal: b").unwrap_err();
        assert_eq!(issue.line, 2);
        assert!(matches!(issue.error, ScriptError::UnterminatedBlock { .. }));
    }
}

//=====================================================
// End of file
//=====================================================
