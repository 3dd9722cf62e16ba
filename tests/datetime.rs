// ArcanaScript date and time tests
// Covers: DecodeTime patterns, formatting, day boundaries, gaps, the std/time module

#[path = "../src/tests/util.rs"]
mod util;

use arcanascript::{ScriptError, Value};
use util::{failure, interpret, script, shown};

#[test]
fn test_decode_follows_field_positions() {
    let interp = interpret(&script(&[
        "DecodeTime \"02/29/2024 23:30\" as \"MM/DD/YYYY HH:mm\" into leap ok",
        "DecodeTime \"2024.07.04\" as \"YYYY.MM.DD\" into dotted ok",
        "Format leap as \"DD.MM.YYYY at HH:mm:ss\" into shown ok",
    ]));
    assert_eq!(shown(&interp, "leap"), "2024-02-29 23:30:00");
    assert_eq!(shown(&interp, "dotted"), "2024-07-04 00:00:00");
    assert_eq!(shown(&interp, "shown"), "29.02.2024 at 23:30:00");
}

#[test]
fn test_day_boundaries_and_gaps() {
    let interp = interpret(&script(&[
        "DawnOf \"2024-02-29 13:00:00\" into dawn ok",
        "DuskOf \"2024-02-29 13:00:00\" into dusk ok",
        "GapSeconds between dawn and dusk into span ok",
        "GapDays between \"2024-03-01 00:00:00\" and \"2024-03-02 12:00:00\" into half ok",
        "GapDays between \"2024-03-05\" and \"2024-03-01\" into back ok",
        "Format 0 as \"YYYY-MM-DD\" into epoch ok",
    ]));
    assert_eq!(shown(&interp, "dawn"), "2024-02-29 00:00:00");
    assert_eq!(shown(&interp, "dusk"), "2024-02-29 23:59:59");
    assert_eq!(interp.variable("span"), Some(Value::Number(86_399.0)));
    assert_eq!(interp.variable("half"), Some(Value::Number(2.0)));
    assert_eq!(interp.variable("back"), Some(Value::Number(-4.0)));
    assert_eq!(shown(&interp, "epoch"), "1970-01-01");
}

#[test]
fn test_time_module_arithmetic() {
    let interp = interpret(&script(&[
        "Summon \"std/time\" as clock ok",
        "start is invoke clock.parse with \"31/12/2024 22:00\", \"DD/MM/YYYY HH:mm\" ok",
        "later is invoke clock.addHours with start, 3 ok",
        "invoke clock.diffSeconds with start, later into gap ok",
        "invoke clock.startOfDay with later into morning ok",
        "invoke clock.format with later, \"YYYY/MM/DD\" into label ok",
    ]));
    assert_eq!(shown(&interp, "later"), "2025-01-01 01:00:00");
    assert_eq!(interp.variable("gap"), Some(Value::Number(10_800.0)));
    assert_eq!(shown(&interp, "morning"), "2025-01-01 00:00:00");
    assert_eq!(shown(&interp, "label"), "2025/01/01");
}

#[test]
fn test_now_is_a_date() {
    let interp = interpret("NowUTC into now ok\nSummon \"std/time\" ok\nlocal is invoke time.now ok");
    assert_eq!(interp.variable("now").map(|v| v.essence()), Some("date"));
    assert_eq!(interp.variable("local").map(|v| v.essence()), Some("date"));
}

#[test]
fn test_bad_dates() {
    let err = failure("DecodeTime \"2023-02-29\" as \"YYYY-MM-DD\" into d ok");
    assert!(matches!(err.root(), ScriptError::ParseError(_)));
    assert_eq!(err.code(), "E001");

    let err = failure("DawnOf \"someday\" into d ok");
    assert!(matches!(err.root(), ScriptError::ParseError(_)));

    let err = failure("Format [1] as \"YYYY\" into d ok");
    assert!(matches!(err.root(), ScriptError::TypeError(_)));
}
