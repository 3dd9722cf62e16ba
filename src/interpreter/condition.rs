//=====================================================
// File: interpreter/condition.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Arcana condition evaluator
// Objective: Reduce comparison, equality, membership and predicate phrases
//            to booleans, falling back to value truthiness
//=====================================================

use once_cell::sync::Lazy;
use regex::Regex;

use crate::interpreter::Interpreter;
use crate::interpreter::errors::ScriptResult;
use crate::interpreter::eval;
use crate::interpreter::split::mask_nested;
use crate::interpreter::value::Value;

fn compile(source: &str) -> Regex {
    Regex::new(source).expect("condition pattern must compile")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phrase {
    Greater,
    Less,
    AtLeast,
    AtMost,
    IsNot,
    Is,
    Begins,
    Ends,
    Contains,
    HoldsKey,
}

/// Tried top to bottom. Full keyword phrases come before the bare `is`, and
/// `is not` before `is`.
static PHRASES: Lazy<Vec<(Phrase, Regex)>> = Lazy::new(|| {
    vec![
        (Phrase::Greater, compile(r"(?i)^(.+)\s+is\s+greater\s+than\s+(.+)$")),
        (Phrase::Less, compile(r"(?i)^(.+)\s+is\s+less\s+than\s+(.+)$")),
        (Phrase::AtLeast, compile(r"(?i)^(.+)\s+is\s+at\s+least\s+(.+)$")),
        (Phrase::AtMost, compile(r"(?i)^(.+)\s+is\s+at\s+most\s+(.+)$")),
        (Phrase::IsNot, compile(r"(?i)^(.+?)\s+is\s+not\s+(.+)$")),
        (Phrase::Is, compile(r"(?i)^(.+)\s+is\s+(.+)$")),
        (Phrase::Begins, compile(r#"(?i)^Begins\s+(.+)\s+with\s+"([^"]*)"\s*$"#)),
        (Phrase::Ends, compile(r#"(?i)^Ends\s+(.+)\s+with\s+"([^"]*)"\s*$"#)),
        (Phrase::Contains, compile(r"(?i)^Contains\s+(.+)\s+in\s+(.+)\s*$")),
        (Phrase::HoldsKey, compile(r"(?i)^Holds\s+key\s+(.+)\s+in\s+(.+)\s*$")),
    ]
});

/// Whether `text` is one of the comparison or predicate phrases, as opposed
/// to a plain value.
pub fn is_comparison(text: &str) -> bool {
    match_phrase(text.trim()).is_some()
}

/// Finds the first phrase whose keywords sit outside strings and brackets,
/// returning its two operands sliced from the original text.
fn match_phrase(text: &str) -> Option<(Phrase, &str, &str)> {
    let masked = mask_nested(text);
    PHRASES.iter().find_map(|(phrase, regex)| {
        let caps = regex.captures(&masked)?;
        let left = caps.get(1)?.range();
        let right = caps.get(2)?.range();
        Some((*phrase, &text[left], &text[right]))
    })
}

/// Substring test for strings, strict membership for sequences.
pub fn contains(haystack: &Value, needle: &Value) -> bool {
    match haystack {
        Value::String(text) => text.contains(&needle.to_string()),
        Value::Sequence(items) => items.borrow().iter().any(|item| item == needle),
        _ => false,
    }
}

/// Own-key test; only tomes hold keys.
pub fn holds_key(container: &Value, key: &Value) -> bool {
    match container {
        Value::Tome(tome) => tome.borrow().contains_key(&key.to_string()),
        _ => false,
    }
}

impl Interpreter {
    pub fn evaluate_condition(&mut self, text: &str) -> ScriptResult<bool> {
        let s = text.trim();
        if let Some((phrase, left, right)) = match_phrase(s) {
            return self.decide(phrase, left, right);
        }
        if eval::is_true_word(s) {
            return Ok(true);
        }
        if eval::is_false_word(s) {
            return Ok(false);
        }
        Ok(self.evaluate(s)?.is_truthy())
    }

    fn decide(&mut self, phrase: Phrase, left: &str, right: &str) -> ScriptResult<bool> {
        match phrase {
            Phrase::Greater | Phrase::Less | Phrase::AtLeast | Phrase::AtMost => {
                let a = self.evaluate(left)?.to_number();
                let b = self.evaluate(right)?.to_number();
                Ok(match phrase {
                    Phrase::Greater => a > b,
                    Phrase::Less => a < b,
                    Phrase::AtLeast => a >= b,
                    _ => a <= b,
                })
            }
            // Loose: both sides compare by display form, so 5 is "5".
            Phrase::Is | Phrase::IsNot => {
                let a = self.evaluate(left)?.to_string();
                let b = self.evaluate(right)?.to_string();
                Ok((a == b) == (phrase == Phrase::Is))
            }
            Phrase::Begins => Ok(self.evaluate(left)?.to_string().starts_with(right)),
            Phrase::Ends => Ok(self.evaluate(left)?.to_string().ends_with(right)),
            Phrase::Contains => {
                let needle = self.evaluate(left)?;
                let haystack = self.evaluate(right)?;
                Ok(contains(&haystack, &needle))
            }
            Phrase::HoldsKey => {
                let key = self.evaluate(left)?;
                let container = self.evaluate(right)?;
                Ok(holds_key(&container, &key))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(interp: &mut Interpreter, text: &str) -> bool {
        interp.evaluate_condition(text).unwrap()
    }

    #[test]
    fn numeric_phrases_coerce_both_sides() {
        let mut interp = Interpreter::new();
        interp.bind("hp", Value::from("12")).unwrap();
        assert!(check(&mut interp, "hp is greater than 9"));
        assert!(!check(&mut interp, "hp is less than 12"));
        assert!(check(&mut interp, "hp is at least 12"));
        assert!(check(&mut interp, "hp is at most 12"));
        assert!(check(&mut interp, "0 is greater than -1"));
    }

    #[test]
    fn equality_is_loose_and_negation_reachable() {
        let mut interp = Interpreter::new();
        interp.bind("n", Value::Number(5.0)).unwrap();
        assert!(check(&mut interp, r#"n is "5""#));
        assert!(check(&mut interp, "n is not 6"));
        assert!(!check(&mut interp, "n is not 5"));
    }

    #[test]
    fn membership_and_predicates() {
        let mut interp = Interpreter::new();
        assert!(check(&mut interp, r#"Contains "b" in ["a", "b", "c"]"#));
        assert!(!check(&mut interp, r#"Contains 1 in ["1"]"#));
        assert!(check(&mut interp, r#"Contains "ell" in "hello""#));
        assert!(check(&mut interp, r#"Holds key "x" in Tome { x: 1 }"#));
        assert!(!check(&mut interp, r#"Holds key "y" in Tome { x: 1 }"#));
        assert!(!check(&mut interp, r#"Holds key "0" in ["zero"]"#));
        assert!(check(&mut interp, r#"Begins "wizard" with "wiz""#));
        assert!(check(&mut interp, r#"Ends "wizard" with "ard""#));
    }

    #[test]
    fn fallback_uses_truthiness() {
        let mut interp = Interpreter::new();
        assert!(check(&mut interp, "truth"));
        assert!(!check(&mut interp, "LIE"));
        assert!(!check(&mut interp, "missing"));
        assert!(check(&mut interp, "[0]"));
        assert!(!check(&mut interp, r#""""#));
    }

    #[test]
    fn comparison_detection() {
        assert!(is_comparison("x is greater than 2"));
        assert!(is_comparison("Contains x in xs"));
        assert!(!is_comparison("x + i"));
        assert!(!is_comparison(r#"n + " is here""#));
        assert!(!is_comparison(r#"["a is b", "c"]"#));
    }

    #[test]
    fn keywords_inside_strings_are_not_phrases() {
        let mut interp = Interpreter::new();
        interp.bind("n", Value::from("spell")).unwrap();
        assert!(check(&mut interp, r#"Contains "a is b" in ["a is b"]"#));
        assert!(!check(&mut interp, r#"Contains "a is c" in ["a is b"]"#));
        assert!(check(&mut interp, r#"n + " is ready" is "spell is ready""#));
        assert!(check(&mut interp, r#"Begins "is not" with "is""#));
    }
}

//=====================================================
// End of file
//=====================================================
