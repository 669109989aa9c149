//! Printers for the intermediate products of the pipeline.

use anstream::{print, println};
use owo_colors::OwoColorize;
use zlang::CompileContext;
use zlang_compiler::Config;
use zlang_macro::MacroTable;
use zlang_shared::{AsZlangError, ZlangError, source};

use crate::{build, command::ProjectArgs, print_error, stylesheet};

/// Prints the bundled entry unit. Returns `true` on success.
pub fn print_bundle(project: &ProjectArgs) -> bool {
    let Some(files) = build::load_project(project) else {
        return false;
    };

    let mut context = CompileContext::new(&files, Config::default());
    match context.bundle(&project.entry) {
        Ok(bundle) => {
            print!("{}", bundle.to_text());
            true
        }
        Err(error) => report(&error, project),
    }
}

/// Prints every macro the project defines. Returns `true` on success.
pub fn print_macros(project: &ProjectArgs) -> bool {
    let Some(files) = build::load_project(project) else {
        return false;
    };

    let mut context = CompileContext::new(&files, Config::default());
    let bundle = match context.bundle(&project.entry) {
        Ok(bundle) => bundle,
        Err(error) => return report(&error, project),
    };

    // expansion errors don't matter here, the table is complete before
    // expansion starts
    if let Err(error) = context.expand(&bundle) {
        tracing::debug!(%error, "ignoring expansion error");
    }

    print_macro_table(context.macros());
    true
}

/// Prints the lines of the project after macro expansion. Returns `true` on
/// success.
pub fn print_expanded(project: &ProjectArgs, max_passes: usize) -> bool {
    let Some(files) = build::load_project(project) else {
        return false;
    };

    let config = Config::default().with_max_expansion_passes(max_passes);
    let mut context = CompileContext::new(&files, config);
    let bundle = match context.bundle(&project.entry) {
        Ok(bundle) => bundle,
        Err(error) => return report(&error, project),
    };

    match context.expand(&bundle) {
        Ok(lines) => {
            print!("{}", source::join_lines(&lines));
            true
        }
        Err(error) => report(&error, project),
    }
}

fn print_macro_table(table: &MacroTable) {
    if table.is_empty() {
        println!("no macros defined");
        return;
    }

    for definition in table.iter() {
        let signature = stylesheet::MACRO_NAME.style(definition.to_string());
        let origin = stylesheet::SOURCE_ANNOTATION.style(definition.origin().to_string());
        println!("{signature} {} {origin}", "@".dimmed());

        for line in definition.body() {
            println!("    {line}");
        }
    }
}

fn report(error: &impl AsZlangError, project: &ProjectArgs) -> bool {
    print_error::print(&ZlangError::from_error(error), project.print_debug);
    false
}
