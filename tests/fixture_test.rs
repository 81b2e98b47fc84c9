// Fixture-driven tests: ugly inputs with their expected fixed form, and
// good inputs the checker must leave alone

use ccheck::checker::Module;

fn fix(src: &str) -> String {
    let mut module = Module::from_source("fixture", src).expect("parse failed");
    module.fix();
    module.source()
}

fn check_count(src: &str) -> usize {
    let mut module = Module::from_source("fixture", src).expect("parse failed");
    module.check().len()
}

const UGLY_PAIRS: &[(&str, &str, &str)] = &[
    (
        "decl",
        include_str!("fixtures/ugly/decl-in.c"),
        include_str!("fixtures/ugly/decl-fixed.c"),
    ),
    (
        "stmt",
        include_str!("fixtures/ugly/stmt-in.c"),
        include_str!("fixtures/ugly/stmt-fixed.c"),
    ),
];

const GOOD: &[(&str, &str)] = &[
    ("expr", include_str!("fixtures/good/expr.c")),
    ("str", include_str!("fixtures/good/str.c")),
];

#[test]
fn test_ugly_fixtures_fix_to_expected() {
    for (name, input, expected) in UGLY_PAIRS {
        assert_eq!(&fix(input), expected, "fixture {}", name);
    }
}

#[test]
fn test_ugly_fixtures_report_violations() {
    for (name, input, _) in UGLY_PAIRS {
        assert!(check_count(input) > 0, "fixture {} reported nothing", name);
    }
}

#[test]
fn test_fixed_fixtures_are_clean() {
    for (name, _, expected) in UGLY_PAIRS {
        assert_eq!(check_count(expected), 0, "fixture {} not clean", name);
        assert_eq!(&fix(expected), expected, "fixture {} not stable", name);
    }
}

#[test]
fn test_good_fixtures_pass_unchanged() {
    for (name, src) in GOOD {
        assert_eq!(check_count(src), 0, "fixture {} not clean", name);
        assert_eq!(&fix(src), src, "fixture {} modified", name);
    }
}
