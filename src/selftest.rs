//! Internal test harness
//!
//! `ccheck --test` runs a set of embedded end-to-end checks without any
//! input files: lexer round-trips, parser acceptance, the checker's
//! diagnostics and the fixer's rewrites.  Each suite reports pass/fail;
//! any failure makes the harness (and the process) fail.

use crate::checker::Module;
use crate::input::StringInput;
use crate::parser::lexer::{Lexer, TokKind};
use std::io::Write;

/// Run every suite, writing a result line per suite.  Returns whether all
/// suites passed.
pub fn run(out: &mut dyn Write) -> bool {
    let suites: &[(&str, fn() -> Result<(), String>)] = &[
        ("lexer", test_lexer),
        ("parser", test_parser),
        ("checker", test_checker),
        ("fixer", test_fixer),
    ];

    let mut ok = true;
    for (name, suite) in suites {
        match suite() {
            Ok(()) => {
                let _ = writeln!(out, "test_{} ... ok", name);
            }
            Err(msg) => {
                ok = false;
                let _ = writeln!(out, "test_{} ... FAILED: {}", name, msg);
            }
        }
    }
    ok
}

fn fail(msg: String) -> Result<(), String> {
    Err(msg)
}

/// Every input must reproduce byte-for-byte from its token texts.
fn test_lexer() -> Result<(), String> {
    let cases = [
        "int main(void)\n{\n\treturn 0;\n}\n",
        "#define FOO(x) \\\n\t((x) + 1)\nchar *s = \"a\\\"b\";\n",
        "/* block\ncomment */ // line comment\n\tx <<= y->z;\n",
        "  \t mixed whitespace \t\n\n",
        "",
    ];

    for src in cases {
        let mut input = StringInput::new(src);
        let mut lexer = Lexer::new(&mut input);
        let mut text = String::new();
        loop {
            let tok = lexer.get_tok().map_err(|e| e.to_string())?;
            let eof = tok.kind == TokKind::Eof;
            text.push_str(&tok.text);
            if eof {
                break;
            }
        }
        if text != src {
            return fail(format!("round-trip mismatch for {:?}", src));
        }
    }
    Ok(())
}

/// Representative inputs the grammar must accept, plus one it must not.
fn test_parser() -> Result<(), String> {
    let accepted = [
        "int a = sizeof(int) * 2;\n",
        "int b = sizeof(array) / sizeof(array[0]);\n",
        "int c = sizeof(a * b);\n",
        "typedef struct foo {\n\tint x;\n} foo_t;\nint d = sizeof(foo_t *);\n",
        "enum color {\n\tred = 1,\n\tgreen\n};\n",
        "static const char *names[4];\n",
        "void f(void)\n{\n\tfor (int i = 0; i < 8; i++)\n\t\tg(i, \"x\" \"y\");\n}\n",
        "int (*handler)(int, char *);\n",
    ];

    for src in accepted {
        if let Err(err) = Module::from_source("test", src) {
            return fail(format!("rejected {:?}: {}", src, err));
        }
    }

    if Module::from_source("test", "int x\n").is_ok() {
        return fail("accepted declaration without ';'".to_string());
    }
    Ok(())
}

/// Diagnostics for the canonical violation scenarios.
fn test_checker() -> Result<(), String> {
    let cases: &[(&str, &[&str])] = &[
        ("int x = 1;  \n", &["test:1:12: Whitespace at end of line"]),
        (
            "int f(void)\n{\n  return 0;\n}\n",
            &[
                "test:3:3: Wrong indentation: found 0 tabs, should be 1 tabs",
                "test:3:3: Non-continuation line should not have any spaces \
                 for indentation (found 2)",
            ],
        ),
        (
            "void f(void)\n{\n\tif (x){\n\t\treturn;\n\t}\n}\n",
            &["test:3:8: Expected single space before block opening brace."],
        ),
        (
            "void g(void)\n{\n\tf( x);\n}\n",
            &["test:3:4: Unexpected whitespace after '('."],
        ),
        (
            "void f(void)\n{\n\tif (x)\n\t\ty();\n\telse\n\t\tz();\n}\n",
            &[],
        ),
        (
            "void f(void)\n{\n\tswitch (x) {\n\t\tcase 1:\n\t\t\tbreak;\n\t}\n}\n",
            &[],
        ),
    ];

    for (src, expected) in cases {
        let mut module =
            Module::from_source("test", src).map_err(|e| format!("parse failed: {}", e))?;
        let diags: Vec<String> = module.check().iter().map(|d| d.format("test")).collect();
        if diags != *expected {
            return fail(format!(
                "diagnostics for {:?}: expected {:?}, got {:?}",
                src, expected, diags
            ));
        }
    }
    Ok(())
}

/// Fix output, idempotence, and no-op on clean input.
fn test_fixer() -> Result<(), String> {
    let cases = [
        ("int x = 1;  \n", "int x = 1;\n"),
        (
            "int f(void)\n{\n  return 0;\n}\n",
            "int f(void)\n{\n\treturn 0;\n}\n",
        ),
        (
            "void f(void)\n{\n\tif (x){\n\t\treturn;\n\t}\n}\n",
            "void f(void)\n{\n\tif (x) {\n\t\treturn;\n\t}\n}\n",
        ),
        (
            "void g(void)\n{\n\tf( x);\n}\n",
            "void g(void)\n{\n\tf(x);\n}\n",
        ),
    ];

    for (src, expected) in cases {
        let mut module =
            Module::from_source("test", src).map_err(|e| format!("parse failed: {}", e))?;
        module.fix();
        let fixed = module.source();
        if fixed != expected {
            return fail(format!(
                "fix of {:?}: expected {:?}, got {:?}",
                src, expected, fixed
            ));
        }

        // Fixing the fixed output must change nothing
        let mut again = Module::from_source("test", &fixed)
            .map_err(|e| format!("reparse failed: {}", e))?;
        again.fix();
        if again.source() != fixed {
            return fail(format!("fix not idempotent for {:?}", src));
        }
    }

    let clean = "int max(int a, int b)\n{\n\tif (a > b)\n\t\treturn a;\n\treturn b;\n}\n";
    let mut module =
        Module::from_source("test", clean).map_err(|e| format!("parse failed: {}", e))?;
    if !module.check().is_empty() {
        return fail("clean input reported violations".to_string());
    }
    module.fix();
    if module.source() != clean {
        return fail("clean input was modified".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selftest_passes() {
        let mut out = Vec::new();
        assert!(run(&mut out), "{}", String::from_utf8_lossy(&out));
    }
}
