//! End-to-end tests of the compilation pipeline.

use zlang::{CompileContext, PipelineError, compile_flat, compile_project, compile_project_with};
use zlang_bundler::BundleError;
use zlang_compiler::{CompileError, Config, UnrecognizedPolicy};
use zlang_shared::{AsZlangError, FileSet, UnitName};

const GREETER: &str = "\
<command^crt>
greet(name, msg)
<print^set.incode=\"name + msg\">
<cmd^add>
";

const COUNTDOWN: &str = "\
# counts down from a number the user enters
<prompt^set.index=\"start\"&title=\"Start from?\">
<set^n = Number(start)>
<while^set.incode=\"n > 0\">
  <if^set.incode=\"n % 2 === 0\">
    <print^set.incode=\"n + ' is even'\">
  <else^if^set.incode=\"n === 1\">
    <print^set.index=\"last one\">
  <else^set>
    <print^set.incode=\"n\">
  <end^if>
  <set^n = n - 1>
<end^loop>
";

const STYLED: &str = "\
<import^z=\"greeter.z\">
<ui.e^selector=\"#title\"&css=\"font-size:32px\">
<for^set.incode=\"let i = 0; i < 3; i++\">
  greet(\"Hello, \", i)
<end^loop>
<addon^index/set^js>
document.title = 'done';
<addon^js>
<alert^class=\"finished\">
";

fn brackets_balance(code: &str) -> bool {
    let mut depth: i64 = 0;
    for c in code.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

#[test]
fn print_literal_program() {
    let files = FileSet::from_iter([("main.z", "<print^set.index=\"hi\">")]);

    assert_eq!(
        compile_project("main.z", &files).expect("should compile"),
        "console.log(\"hi\");\n"
    );
}

#[test]
fn assign_program() {
    let files = FileSet::from_iter([("main.z", "<set^x = 1 + 2>")]);

    assert_eq!(
        compile_project("main.z", &files).expect("should compile"),
        "let x = 1 + 2;\n"
    );
}

#[test]
fn mutual_import_fails_with_cycle() {
    let files = FileSet::from_iter([("A", "<import^z=\"B.z\">"), ("B", "<import^z=\"A.z\">")]);

    let error = compile_project("A", &files).expect_err("cycle should fail");

    assert!(matches!(
        error,
        PipelineError::Bundle(BundleError::ImportCycle(_))
    ));
    assert_eq!(error.message(), "unit 'A' imports itself");
}

#[test]
fn diamond_import_compiles_shared_unit_twice() {
    let files = FileSet::from_iter([
        ("A", "<import^z=\"B.z\">\n<import^z=\"C.z\">"),
        ("B", "<import^z=\"D.z\">"),
        ("C", "<import^z=\"D.z\">"),
        ("D", "<print^set.index=\"from d\">"),
    ]);

    assert_eq!(
        compile_project("A", &files).expect("diamond should compile"),
        "console.log(\"from d\");\nconsole.log(\"from d\");\n"
    );
}

#[test]
fn missing_entry_fails() {
    let files = FileSet::from_iter([("lib.z", "<end^if>")]);

    let error = compile_project("main.z", &files).expect_err("missing entry should fail");

    assert!(matches!(
        error,
        PipelineError::Bundle(BundleError::UnitNotFound(_))
    ));
}

#[test]
fn quoted_comma_argument_stays_together() {
    let files = FileSet::from_iter([(
        "main.z",
        format!("{GREETER}greet(\"a,b\", \"c\")"),
    )]);

    assert_eq!(
        compile_project("main.z", &files).expect("should compile"),
        "console.log(\"a,b\" + \"c\");\n"
    );
}

#[test]
fn macro_defined_in_imported_unit() {
    let files = FileSet::from_iter([
        ("greeter.z", GREETER.to_string()),
        (
            "main.z",
            "<import^z=\"greeter.z\">\ngreet(\"Hi \", who)".to_string(),
        ),
    ]);

    assert_eq!(
        compile_project("main.z", &files).expect("should compile"),
        "console.log(\"Hi \" + who);\n"
    );
}

#[test]
fn macro_calling_macro_expands_fully() {
    let files = FileSet::from_iter([(
        "main.z",
        "<command^crt>\n\
         shout(text)\n\
         say(text + '!')\n\
         <cmd^add>\n\
         <command^crt>\n\
         say(words)\n\
         <print^set.incode=\"words\">\n\
         <cmd^add>\n\
         shout('hey')",
    )]);

    assert_eq!(
        compile_project("main.z", &files).expect("should compile"),
        "console.log('hey' + '!');\n"
    );
}

#[test]
fn self_referential_macro_overflows() {
    let files = FileSet::from_iter([(
        "main.z",
        "<command^crt>\nforever(x)\nforever(x)\n<cmd^add>\nforever(1)",
    )]);
    let config = Config::default().with_max_expansion_passes(8);

    let error = compile_project_with("main.z", &files, &config).expect_err("should overflow");

    let PipelineError::MacroExpansion(error) = error else {
        panic!("expected an expansion overflow, got {error:?}");
    };
    assert_eq!(error.macro_name(), "forever");
    assert_eq!(error.passes(), 8);
}

#[test]
fn fan_out_recursive_macro_overflows_with_default_config() {
    let files = FileSet::from_iter([(
        "main.z",
        "<command^crt>\ndup()\ndup()\ndup()\ndup()\n<cmd^add>\ndup()",
    )]);

    let error = compile_project("main.z", &files).expect_err("should overflow");

    let PipelineError::MacroExpansion(error) = error else {
        panic!("expected an expansion overflow, got {error:?}");
    };
    assert_eq!(error.macro_name(), "dup");
    assert!(error.line_limit().is_some());
    assert_eq!(error.call_site().origin().line, 7);
}

#[test]
fn comments_inside_addon_block_survive_pipeline() {
    let text = "<addon^index/set^js>\n// keep me\nlet a = 1;\n<addon^js>\n// dropped";
    let files = FileSet::from_iter([("main.z", text)]);

    let code = compile_project("main.z", &files).expect("should compile");

    assert_eq!(code, "// keep me\nlet a = 1;\n");
    assert_eq!(
        compile_flat(
            "<addon^index/set^js>\n// keep me\nlet a = 1;\n<addon^js>",
            &Config::default()
        )
        .expect("should compile"),
        code
    );
}

#[test]
fn unknown_syntax_is_rejected_by_default() {
    let files = FileSet::from_iter([("main.z", "<set^a = 1>\n<dance^now>")]);

    let error = compile_project("main.z", &files).expect_err("should fail");

    let PipelineError::Compile(CompileError::UnrecognizedDirective(error)) = error else {
        panic!("expected an unrecognized directive, got {error:?}");
    };
    assert_eq!(error.text(), "<dance^now>");
    assert_eq!(error.position(), 2);
    assert_eq!(error.line().origin().unit, UnitName::new("main.z"));
}

#[test]
fn unknown_syntax_becomes_comment_in_lenient_mode() {
    let files = FileSet::from_iter([("main.z", "<set^a = 1>\n<dance^now>")]);
    let config = Config::default().with_policy(UnrecognizedPolicy::Lenient);

    assert_eq!(
        compile_project_with("main.z", &files, &config).expect("lenient mode should compile"),
        "let a = 1;\n// error: <dance^now>\n"
    );
}

#[test]
fn undefined_macro_call_is_rejected() {
    let files = FileSet::from_iter([("main.z", "greet(\"x\", \"y\")")]);

    let error = compile_project("main.z", &files).expect_err("should fail");

    assert_eq!(error.message(), "call to an undefined macro");
}

#[test]
fn flat_compilation_of_expanded_lines_matches_pipeline() {
    let files = FileSet::from_iter([
        ("greeter.z", GREETER),
        ("countdown.z", COUNTDOWN),
        ("main.z", STYLED),
    ]);

    for entry in ["countdown.z", "main.z"] {
        let compilation = CompileContext::new(&files, Config::default())
            .run(entry)
            .expect("sample should compile");

        let flat = compile_flat(&compilation.expanded_text(), &Config::default())
            .expect("expanded lines should compile");

        assert_eq!(flat, compilation.code(), "mismatch for {entry}");
    }
}

#[test]
fn sample_programs_have_balanced_brackets() {
    let files = FileSet::from_iter([
        ("greeter.z", GREETER),
        ("countdown.z", COUNTDOWN),
        ("main.z", STYLED),
    ]);
    let config = Config::default().with_wrap_in_closure(true);

    for entry in ["countdown.z", "main.z"] {
        let code = compile_project_with(entry, &files, &config).expect("sample should compile");
        assert!(brackets_balance(&code), "unbalanced output for {entry}:\n{code}");
    }
}

#[test]
fn styled_sample_output() {
    let files = FileSet::from_iter([("greeter.z", GREETER), ("main.z", STYLED)]);

    assert_eq!(
        compile_project("main.z", &files).expect("sample should compile"),
        "document.querySelector('#title').style.fontSize = '32px';\n\
         for (let i = 0; i < 3; i++) {\n\
         console.log(\"Hello, \" + i);\n\
         }\n\
         document.title = 'done';\n\
         alert(\"finished\");\n"
    );
}

#[test]
fn wrapped_output_is_labelled_with_entry() {
    let files = FileSet::from_iter([("app.z", "<print^set.index=\"hi\">")]);
    let config = Config::default().with_wrap_in_closure(true);

    assert_eq!(
        compile_project_with("app.z", &files, &config).expect("should compile"),
        "(function() { // app.z\nconsole.log(\"hi\");\n})(); // app.z\n"
    );
}

#[test]
fn compilation_is_deterministic() {
    let files = FileSet::from_iter([
        ("greeter.z", GREETER),
        ("countdown.z", COUNTDOWN),
        ("main.z", STYLED),
    ]);

    let first = compile_project("main.z", &files).expect("sample should compile");
    let second = compile_project("main.z", &files).expect("sample should compile");

    assert_eq!(first, second);
}
