//=====================================================
// File: interpreter/blocks.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Lexical block structuring for Arcana
// Objective: Recognise block openers by keyword, pair each with its
//            `conclude`, and locate depth-zero `otherwise:` boundaries
//=====================================================

use tracing::trace;

use crate::interpreter::errors::{ScriptError, ScriptResult};

/// Lowercase prefixes that open a block. Several are reserved for constructs
/// the executor does not run yet; they still count for nesting.
pub const OPENERS: [&str; 15] = [
    "when",
    "repeat ",
    "repeat each ",
    "for each ",
    "for each key",
    "enumerate ",
    "stride ",
    "until ",
    "ward ",
    "guard ",
    "as long as",
    "choose upon ",
    "inscribe ",
    "attempt",
    "count ",
];

/// Keyword prefixes must end at a word boundary, so `whence is 3 ok` is a
/// plain statement rather than a `when` block.
pub fn is_block_opener(line: &str) -> bool {
    let lower = line.trim().to_lowercase();
    OPENERS.iter().any(|prefix| {
        lower.starts_with(prefix)
            && (prefix.ends_with(' ')
                || lower[prefix.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| c.is_whitespace() || c == ':'))
    })
}

pub fn is_conclude(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("conclude")
}

pub fn is_otherwise(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed
        .strip_suffix(':')
        .is_some_and(|word| word.trim_end().eq_ignore_ascii_case("otherwise"))
}

/// Index of the `conclude` matching the opener at `open`.
pub fn find_block_end<S: AsRef<str>>(lines: &[S], open: usize) -> ScriptResult<usize> {
    let mut depth = 0usize;
    for (index, line) in lines.iter().enumerate().skip(open + 1) {
        let line = line.as_ref();
        if is_conclude(line) {
            if depth == 0 {
                trace!(open, close = index, "block resolved");
                return Ok(index);
            }
            depth -= 1;
            continue;
        }
        if is_block_opener(line) {
            depth += 1;
        }
    }
    let opener = lines.get(open).map(|l| l.as_ref()).unwrap_or("");
    Err(ScriptError::UnterminatedBlock {
        construct: construct_name(opener),
        line: open + 1,
    })
}

/// Depth-zero `otherwise:` strictly between `open` and `close`.
pub fn find_otherwise<S: AsRef<str>>(lines: &[S], open: usize, close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for index in open + 1..close.min(lines.len()) {
        let line = lines[index].as_ref();
        if is_block_opener(line) {
            depth += 1;
        } else if is_conclude(line) {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && is_otherwise(line) {
            return Some(index);
        }
    }
    None
}

fn construct_name(opener: &str) -> String {
    opener
        .trim()
        .split(|c: char| c.is_whitespace() || c == ':')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openers_require_a_word_boundary() {
        assert!(is_block_opener("when x is 1:"));
        assert!(is_block_opener("  Repeat each c in word:"));
        assert!(is_block_opener("ATTEMPT:"));
        assert!(is_block_opener("Ward hp is at least 1:"));
        assert!(!is_block_opener("whence is 3 ok"));
        assert!(!is_block_opener("CountOf a in b into c ok"));
        assert!(!is_block_opener("Choose 1, 2 into pick ok"));
    }

    #[test]
    fn nested_blocks_resolve_innermost_first() {
        let lines = [
            "when a:",             // 0
            "repeat each x in y:", // 1
            "when b:",             // 2
            "Reveal: hi",          // 3
            "conclude",            // 4
            "conclude",            // 5
            "otherwise:",          // 6
            "Reveal: no",          // 7
            "conclude",            // 8
        ];
        assert_eq!(find_block_end(&lines, 0).unwrap(), 8);
        assert_eq!(find_block_end(&lines, 1).unwrap(), 5);
        assert_eq!(find_block_end(&lines, 2).unwrap(), 4);
        assert_eq!(find_otherwise(&lines, 0, 8), Some(6));
        assert_eq!(find_otherwise(&lines, 1, 5), None);
    }

    #[test]
    fn otherwise_inside_a_nested_block_is_ignored() {
        let lines = [
            "when a:",
            "when b:",
            "otherwise:",
            "conclude",
            "conclude",
        ];
        assert_eq!(find_otherwise(&lines, 0, 4), None);
        assert_eq!(find_otherwise(&lines, 1, 3), Some(2));
    }

    #[test]
    fn missing_conclude_reports_the_opener() {
        let lines = ["Reveal: start", "until done:", "Reveal: loop"];
        match find_block_end(&lines, 1) {
            Err(ScriptError::UnterminatedBlock { construct, line }) => {
                assert_eq!(construct, "until");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn depth_one_through_five() {
        for depth in 1..=5 {
            let mut lines = Vec::new();
            for _ in 0..depth {
                lines.push("when truth:".to_string());
            }
            for _ in 0..depth {
                lines.push("conclude".to_string());
            }
            for open in 0..depth {
                assert_eq!(find_block_end(&lines, open).unwrap(), 2 * depth - 1 - open);
            }
        }
    }
}

//=====================================================
// End of file
//=====================================================
