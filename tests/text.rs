// ArcanaScript text statement tests
// Covers: replacement, trimming, casing, slicing, counting, lines, padding, size limits, predicates

#[path = "../src/tests/util.rs"]
mod util;

use arcanascript::{ScriptError, Value};
use util::{failure, interpret, revealed, script, shown};

#[test]
fn test_replacement_and_repetition() {
    let interp = interpret(&script(&[
        "phrase is \"moon pool\" ok",
        "Transmute \"o\" within phrase to \"0\" into leet ok",
        "Transmute \"\" within \"abc\" to \"-\" into spaced ok",
        "Chant \"ha\" times 3 into laugh ok",
        "Chant \"ha\" times -1 into silence ok",
    ]));
    assert_eq!(shown(&interp, "leet"), "m00n p00l");
    assert_eq!(shown(&interp, "spaced"), "a-b-c");
    assert_eq!(shown(&interp, "laugh"), "hahaha");
    assert_eq!(shown(&interp, "silence"), "");
}

#[test]
fn test_trimming_and_casing() {
    let interp = interpret(&script(&[
        "raw is \"  the LONG road  \" ok",
        "Shear raw into both ok",
        "ShearLeft raw into left ok",
        "ShearRight raw into right ok",
        "Ascend both into loud ok",
        "Descend both into quiet ok",
        "CrownTitle both into title ok",
    ]));
    assert_eq!(shown(&interp, "both"), "the LONG road");
    assert_eq!(shown(&interp, "left"), "the LONG road  ");
    assert_eq!(shown(&interp, "right"), "  the LONG road");
    assert_eq!(shown(&interp, "loud"), "THE LONG ROAD");
    assert_eq!(shown(&interp, "quiet"), "the long road");
    assert_eq!(shown(&interp, "title"), "The Long Road");
}

#[test]
fn test_slicing_and_counting() {
    let interp = interpret(&script(&[
        "word is \"enchantment\" ok",
        "Carve word from 2 for 4 into middle ok",
        "Carve word from -4 for 3 into tail ok",
        "Carve word from 20 for 3 into beyond ok",
        "CountOf \"an\" in \"banana bandana\" into hits ok",
        "CountOf \"\" in word into blanks ok",
    ]));
    assert_eq!(shown(&interp, "middle"), "chan");
    assert_eq!(shown(&interp, "tail"), "men");
    assert_eq!(shown(&interp, "beyond"), "");
    assert_eq!(interp.variable("hits"), Some(Value::Number(4.0)));
    assert_eq!(interp.variable("blanks"), Some(Value::Number(0.0)));
}

#[test]
fn test_lines_and_joins() {
    let interp = interpret(&script(&[
        "BindLines [\"north\", \"south\"] into scroll ok",
        "FractureLines scroll into parts ok",
        "Weave parts with \" & \" into both ok",
        "Weave [1, hero, 3] with \"-\" into gap ok",
    ]));
    assert_eq!(shown(&interp, "scroll"), "north\nsouth");
    assert_eq!(shown(&interp, "parts"), "[north, south]");
    assert_eq!(shown(&interp, "both"), "north & south");
    assert_eq!(shown(&interp, "gap"), "1--3");
}

#[test]
fn test_padding() {
    let interp = interpret(&script(&[
        "PadLeft 7 to 3 with \"0\" into code ok",
        "PadRight \"ab\" to 5 with \"-.\" into trail ok",
        "PadCenter \"ab\" to 6 with \"*\" into framed ok",
        "PadRight \"ab\" to 4 into spaced ok",
        "PadLeft \"dragon\" to 3 into untouched ok",
    ]));
    assert_eq!(shown(&interp, "code"), "007");
    assert_eq!(shown(&interp, "trail"), "ab-.-");
    assert_eq!(shown(&interp, "framed"), "**ab**");
    assert_eq!(shown(&interp, "spaced"), "ab  ");
    assert_eq!(shown(&interp, "untouched"), "dragon");
}

#[test]
fn test_runaway_text_growth_is_a_range_error() {
    let err = failure("Chant \"abc\" times 10000000000000000000 into big ok");
    assert!(matches!(err.root(), ScriptError::RangeError(_)));
    assert_eq!(err.code(), "E004");

    let err = failure("PadLeft \"a\" to 10000000000 into wide ok");
    assert!(matches!(err.root(), ScriptError::RangeError(_)));

    let err = failure("PadCenter \"a\" to 100000000 with \"*\" into wide ok");
    assert!(matches!(err.root(), ScriptError::RangeError(_)));
}

#[test]
fn test_prefix_and_suffix_predicates() {
    let lines = revealed(&script(&[
        "spell is \"fireball\" ok",
        "Begins spell with \"fire\" into hot ok",
        "Ends spell with \"bolt\" into bolt ok",
        "Reveal: {| hot |} {| bolt |}",
        "when Begins spell with \"fi\":",
        "  Reveal: starts with fi",
        "conclude",
        "when Ends spell with \"ball\":",
        "  Reveal: ends with ball",
        "conclude",
    ]));
    assert_eq!(lines, vec!["true false", "starts with fi", "ends with ball"]);
}
