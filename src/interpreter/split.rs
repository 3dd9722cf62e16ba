//=====================================================
// File: interpreter/split.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Nesting-aware text scanning for value expressions
// Objective: Split argument lists and key/value pairs without an AST by
//            tracking quote state and bracket depth character by character
//=====================================================

/// Character-level scanner state shared by every splitter.
#[derive(Debug, Default)]
struct Nesting {
    depth: i32,
    quote: Option<char>,
    escaped: bool,
}

impl Nesting {
    /// Feeds one character and reports whether it sits at the top level,
    /// outside any string or bracket.
    fn feed(&mut self, c: char) -> bool {
        if let Some(q) = self.quote {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == q {
                self.quote = None;
            }
            return false;
        }
        match c {
            '"' | '\'' => {
                self.quote = Some(c);
                false
            }
            '[' | '{' | '(' => {
                self.depth += 1;
                false
            }
            ']' | '}' | ')' => {
                self.depth -= 1;
                false
            }
            _ => self.depth == 0,
        }
    }
}

/// Splits on commas outside strings, brackets and braces. Pieces are trimmed
/// and a trailing empty piece is dropped.
pub fn split_top_level(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::default();
    for c in text.chars() {
        let top = nesting.feed(c);
        if top && c == ',' {
            pieces.push(current.trim().to_string());
            current.clear();
            continue;
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        pieces.push(current.trim().to_string());
    }
    pieces
}

/// Copy of `text` with everything inside strings and brackets replaced by
/// `_`. Delimiters stay, and byte offsets line up with the original.
pub fn mask_nested(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut nesting = Nesting::default();
    for c in text.chars() {
        let outside_before = nesting.quote.is_none() && nesting.depth == 0;
        nesting.feed(c);
        let outside_after = nesting.quote.is_none() && nesting.depth == 0;
        if outside_before || outside_after {
            masked.push(c);
        } else {
            masked.extend(std::iter::repeat('_').take(c.len_utf8()));
        }
    }
    masked
}

/// Byte offset of the first `needle` character outside any nested structure.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut nesting = Nesting::default();
    for (offset, c) in text.char_indices() {
        if nesting.feed(c) && c == needle {
            return Some(offset);
        }
    }
    None
}

/// Splits a `key: value` pair on its first top-level colon.
pub fn split_pair(pair: &str) -> (&str, &str) {
    match find_top_level(pair, ':') {
        Some(offset) => (pair[..offset].trim(), pair[offset + 1..].trim()),
        None => (pair.trim(), ""),
    }
}

/// Binary arithmetic operator found at the top level of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Remainder),
            _ => None,
        }
    }

    fn is_additive(self) -> bool {
        matches!(self, Operator::Add | Operator::Subtract)
    }
}

/// Locates the operator an expression splits on: the rightmost additive
/// operator, else the rightmost multiplicative one. Operators only count
/// when surrounded by whitespace, so dates, paths and signed literals stay
/// whole.
pub fn split_binary(text: &str) -> Option<(&str, Operator, &str)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut nesting = Nesting::default();
    let mut additive = None;
    let mut multiplicative = None;
    for (i, &(offset, c)) in chars.iter().enumerate() {
        if !nesting.feed(c) {
            continue;
        }
        let Some(op) = Operator::from_char(c) else {
            continue;
        };
        let spaced_before = i > 0 && chars[i - 1].1.is_whitespace();
        let spaced_after = chars.get(i + 1).is_some_and(|(_, next)| next.is_whitespace());
        if !(spaced_before && spaced_after) {
            continue;
        }
        if op.is_additive() {
            additive = Some((offset, op));
        } else {
            multiplicative = Some((offset, op));
        }
    }
    let (offset, op) = additive.or(multiplicative)?;
    let left = text[..offset].trim();
    let right = text[offset + 1..].trim();
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, op, right))
}

/// Interior of `text` when one `open`/`close` pair wraps all of it.
pub fn strip_enclosing(text: &str, open: char, close: char) -> Option<&str> {
    let inner = text.strip_prefix(open)?.strip_suffix(close)?;
    let mut nesting = Nesting::default();
    for c in inner.chars() {
        nesting.feed(c);
        if nesting.depth < 0 {
            return None;
        }
    }
    (nesting.depth == 0 && nesting.quote.is_none()).then_some(inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commas_inside_structures_are_kept() {
        let parts = split_top_level(r#"1, "a, b", [2, 3], Tome { x: 1, y: 2 }, 'c,d'"#);
        assert_eq!(
            parts,
            vec!["1", r#""a, b""#, "[2, 3]", "Tome { x: 1, y: 2 }", "'c,d'"]
        );
    }

    #[test]
    fn escaped_quotes_do_not_close_strings() {
        let parts = split_top_level(r#""say \"hi, there\"", 2"#);
        assert_eq!(parts, vec![r#""say \"hi, there\"""#, "2"]);
    }

    #[test]
    fn empty_tail_is_dropped() {
        assert_eq!(split_top_level("1, 2, "), vec!["1", "2"]);
        assert!(split_top_level("   ").is_empty());
    }

    #[test]
    fn masking_hides_nested_text_but_keeps_offsets() {
        let text = r#"n + " is é" is [1, "a is b"]"#;
        let masked = mask_nested(text);
        assert_eq!(masked.len(), text.len());
        assert_eq!(masked, r#"n + "______" is [___________]"#);
        assert_eq!(masked.matches(" is ").count(), 1);
    }

    #[test]
    fn pairs_split_on_first_top_level_colon() {
        assert_eq!(split_pair(r#""a:b": "c:d""#), (r#""a:b""#, r#""c:d""#));
        assert_eq!(split_pair("nested: Tome { k: 1 }"), ("nested", "Tome { k: 1 }"));
        assert_eq!(split_pair("lonely"), ("lonely", ""));
    }

    #[test]
    fn binary_split_respects_precedence_and_spacing() {
        assert_eq!(split_binary("x + i"), Some(("x", Operator::Add, "i")));
        assert_eq!(
            split_binary("a * b + c"),
            Some(("a * b", Operator::Add, "c"))
        );
        assert_eq!(
            split_binary("a - b - c"),
            Some(("a - b", Operator::Subtract, "c"))
        );
        assert_eq!(split_binary("a * b"), Some(("a", Operator::Multiply, "b")));
        assert_eq!(split_binary("2024-01-05"), None);
        assert_eq!(split_binary("-1"), None);
        assert_eq!(split_binary(r#""a + b""#), None);
        assert_eq!(split_binary("(a + b)"), None);
    }

    #[test]
    fn brackets_only_strip_when_they_wrap_everything() {
        assert_eq!(strip_enclosing("(a + b)", '(', ')'), Some("a + b"));
        assert_eq!(strip_enclosing("(a) + (b)", '(', ')'), None);
        assert_eq!(strip_enclosing("[1] + [2]", '[', ']'), None);
        assert_eq!(strip_enclosing(r#"["]"]"#, '[', ']'), Some(r#""]""#));
        assert_eq!(strip_enclosing("a + b", '(', ')'), None);
    }
}

//=====================================================
// End of file
//=====================================================
