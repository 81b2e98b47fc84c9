// Integration tests for the C style checker

use ccheck::checker::Module;

fn check(src: &str) -> Vec<String> {
    let mut module = Module::from_source("file", src).expect("parse failed");
    module.check().iter().map(|d| d.format("file")).collect()
}

fn fix(src: &str) -> String {
    let mut module = Module::from_source("file", src).expect("parse failed");
    module.fix();
    module.source()
}

const UGLY_SOURCES: &[&str] = &[
    "int x = 1;  \n",
    "int f(void)\n{\n  return 0;\n}\n",
    "void f(void)\n{\n\tif (x){\n\t\treturn;\n\t}\n}\n",
    "void g(void)\n{\n\tf( x);\n}\n",
    "int f(void)\n{\n  int y  = 1;   \n\treturn  y ;\n}\n",
    "struct foo {\nint x;\n};\n",
    "void f(void)\n{\n\tx(); y();\n}\n",
    "int x =\n1;\n",
];

const CLEAN_SOURCES: &[&str] = &[
    "int main(void)\n{\n\treturn 0;\n}\n",
    "int max(int a, int b)\n{\n\tif (a > b)\n\t\treturn a;\n\treturn b;\n}\n",
    "typedef struct foo {\n\tint x;\n\tchar *name;\n} foo_t;\n",
    "enum color {\n\tred = 1,\n\tgreen,\n\tblue\n};\n",
    "#include <stdio.h>\n\nstatic int counter;\n",
    "void f(void)\n{\n\tswitch (x) {\n\t\tcase 1:\n\t\t\tbreak;\n\t\tdefault:\n\t\t\tbreak;\n\t}\n}\n",
    "void f(void)\n{\n\tfor (i = 0; i < n; i++)\n\t\tg(i);\n}\n",
    "int x =\n    1;\n",
];

#[test]
fn test_lexer_round_trip() {
    // Regenerating an unfixed module reproduces the input byte-for-byte
    for src in UGLY_SOURCES.iter().chain(CLEAN_SOURCES) {
        let module = Module::from_source("file", src).expect("parse failed");
        assert_eq!(&module.source(), src);
    }
}

#[test]
fn test_fixer_idempotence() {
    for src in UGLY_SOURCES {
        let once = fix(src);
        let twice = fix(&once);
        assert_eq!(once, twice, "fix not idempotent for {:?}", src);
    }
}

#[test]
fn test_parse_stability_across_fix() {
    // Fixing only edits whitespace, so the fixed source parses to a
    // structurally identical tree
    for src in UGLY_SOURCES {
        let before = Module::from_source("file", src).expect("parse failed");
        let fixed = fix(src);
        let after = Module::from_source("file", &fixed).expect("reparse failed");
        assert_eq!(
            before.dump_ast(),
            after.dump_ast(),
            "AST changed across fix for {:?}",
            src
        );
    }
}

#[test]
fn test_no_op_on_clean_input() {
    for src in CLEAN_SOURCES {
        assert_eq!(check(src), Vec::<String>::new(), "violations in {:?}", src);
        assert_eq!(&fix(src), src, "clean input modified: {:?}", src);
    }
}

#[test]
fn test_diag_positions_locate_real_bytes() {
    for src in UGLY_SOURCES {
        let mut module = Module::from_source("file", src).expect("parse failed");
        let lines: Vec<&str> = src.split('\n').collect();
        for diag in module.check() {
            let line = diag.bpos.line;
            let col = diag.bpos.col;
            assert!(line >= 1 && line <= lines.len(), "line {} out of range", line);
            // Column 81 may point just past a long line's limit; every
            // other diagnostic names an existing byte
            assert!(
                col >= 1 && col <= lines[line - 1].len() + 1,
                "column {} out of range on line {}",
                col,
                line
            );
        }
    }
}

#[test]
fn test_trailing_whitespace_scenario() {
    let src = "int x = 1;  \n";
    assert_eq!(check(src), vec!["file:1:12: Whitespace at end of line"]);
    assert_eq!(fix(src), "int x = 1;\n");
}

#[test]
fn test_wrong_indentation_scenario() {
    let src = "int f(void)\n{\n  return 0;\n}\n";
    assert_eq!(
        check(src),
        vec![
            "file:3:3: Wrong indentation: found 0 tabs, should be 1 tabs",
            "file:3:3: Non-continuation line should not have any spaces for \
             indentation (found 2)",
        ]
    );
    assert_eq!(fix(src), "int f(void)\n{\n\treturn 0;\n}\n");
}

#[test]
fn test_member_indentation() {
    let src = "struct foo {\nint x;\n};\n";
    assert_eq!(
        check(src),
        vec!["file:2:1: Wrong indentation: found 0 tabs, should be 1 tabs"]
    );
    assert_eq!(fix(src), "struct foo {\n\tint x;\n};\n");
}

#[test]
fn test_statement_split_onto_new_line() {
    let src = "void f(void)\n{\n\tx(); y();\n}\n";
    assert_eq!(fix(src), "void f(void)\n{\n\tx();\n\ty();\n}\n");
}

#[test]
fn test_continuation_line_indent() {
    let src = "int x =\n1;\n";
    assert_eq!(
        check(src),
        vec!["file:2:1: Continuation line should be indented by 4 spaces (found 0)"]
    );
    assert_eq!(fix(src), "int x =\n    1;\n");
}

#[test]
fn test_comment_lines_exempt_from_indentation() {
    let src = "int f(void)\n{\n/* free-floating comment */\n\treturn 0;\n}\n";
    assert_eq!(check(src), Vec::<String>::new());
}

#[test]
fn test_mixing_tabs_and_spaces() {
    let src = "int f(void)\n{\n\t  \treturn 0;\n}\n";
    assert_eq!(
        check(src),
        vec!["file:3:5: Mixing tabs and spaces for indentation"]
    );
    assert_eq!(fix(src), "int f(void)\n{\n\treturn 0;\n}\n");
}

#[test]
fn test_parse_error_reports_position() {
    let err = Module::from_source("file", "int f(void)\n{\n\treturn 0\n}\n").unwrap_err();
    match err {
        ccheck::checker::Error::Parse(parse) => {
            assert_eq!(parse.pos.line, 4);
            assert_eq!(parse.pos.col, 1);
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_invalid_token_fails_parse() {
    assert!(Module::from_source("file", "int $x;\n").is_err());
}

#[test]
fn test_fix_then_check_is_clean() {
    for src in UGLY_SOURCES {
        let fixed = fix(src);
        assert_eq!(
            check(&fixed),
            Vec::<String>::new(),
            "fixed output of {:?} still has violations",
            src
        );
    }
}
