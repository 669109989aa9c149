//! The `build` command and the helpers shared with `watch` and `dev`.

use std::{fs, io, path::Path};

use anstream::print;
use zlang::{CompileContext, Compilation};
use zlang_compiler::Config;
use zlang_shared::{FileSet, ZlangError};

use crate::{command::ProjectArgs, print_error, project};

/// Loads the project, printing the error if that fails.
pub fn load_project(project: &ProjectArgs) -> Option<FileSet> {
    match project::load(&project.dir) {
        Ok(files) => Some(files),
        Err(error) => {
            print_error::print(&ZlangError::from_error(&error), project.print_debug);
            None
        }
    }
}

/// Compiles the project, printing the error if that fails.
pub fn compile(project: &ProjectArgs, config: Config) -> Option<Compilation> {
    let files = load_project(project)?;

    match CompileContext::new(&files, config).run(&project.entry) {
        Ok(compilation) => Some(compilation),
        Err(error) => {
            print_error::print(&ZlangError::from_error(&error), project.print_debug);
            None
        }
    }
}

/// Writes compiled code to `output`, or to stdout if no file is given.
pub fn write_output(code: &str, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, code),
        None => {
            print!("{code}");
            Ok(())
        }
    }
}

/// Runs one build. Returns `true` if the build succeeded.
pub fn build(project: &ProjectArgs, config: Config, output: Option<&Path>) -> io::Result<bool> {
    let Some(compilation) = compile(project, config) else {
        return Ok(false);
    };

    write_output(compilation.code(), output)?;

    if let Some(path) = output {
        tracing::info!(
            entry = %compilation.bundle().entry(),
            output = %path.display(),
            "wrote compiled output"
        );
    }

    Ok(true)
}
