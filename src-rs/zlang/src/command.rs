use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use zlang_compiler::{
    Config, DEFAULT_MAX_EXPANDED_LINES, DEFAULT_MAX_EXPANSION_PASSES, UnrecognizedPolicy,
};

/// Z language CLI
#[derive(Parser)]
#[command(name = "zlang")]
#[command(version, about = "Z language compiler", long_about = None)]
pub struct CliCommand {
    #[command(subcommand)]
    pub command: Commands,

    /// Log pipeline events at debug level (`RUST_LOG` takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a project to JavaScript
    Build {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        compile: CompileArgs,

        /// Write the output to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Compile a project, then recompile whenever one of its files changes
    Watch {
        #[command(flatten)]
        project: ProjectArgs,

        #[command(flatten)]
        compile: CompileArgs,

        /// Write the output to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Development tools for debugging and testing
    Dev {
        #[command(subcommand)]
        command: DevCommands,
    },
}

#[derive(Subcommand)]
pub enum DevCommands {
    /// Print the entry unit with all imports inlined
    PrintBundle {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the macros defined by a project
    PrintMacros {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the lines of a project after macro expansion
    PrintExpanded {
        #[command(flatten)]
        project: ProjectArgs,

        /// Maximum number of macro expansion passes
        #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_EXPANSION_PASSES)]
        max_passes: usize,
    },
}

/// Where to find a project and how to report its errors.
#[derive(Args)]
pub struct ProjectArgs {
    /// Directory holding the project's `.z` files
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// The unit compilation starts from
    #[arg(long, value_name = "UNIT", default_value = "main.z")]
    pub entry: String,

    /// Print errors in debug format
    #[arg(long)]
    pub print_debug: bool,
}

/// Options that shape the compiled output.
#[derive(Args)]
pub struct CompileArgs {
    /// Emit unrecognized lines as `// error:` comments instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Do not wrap the output in an immediately invoked function
    #[arg(long)]
    pub no_wrap: bool,

    /// Maximum number of macro expansion passes
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_EXPANSION_PASSES)]
    pub max_passes: usize,

    /// Maximum number of lines macro expansion may grow the program to
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_EXPANDED_LINES)]
    pub max_lines: usize,
}

impl CompileArgs {
    /// Builds the compiler configuration for these options.
    pub const fn config(&self) -> Config {
        let policy = if self.lenient {
            UnrecognizedPolicy::Lenient
        } else {
            UnrecognizedPolicy::Strict
        };

        Config::new()
            .with_policy(policy)
            .with_wrap_in_closure(!self.no_wrap)
            .with_max_expansion_passes(self.max_passes)
            .with_max_expanded_lines(self.max_lines)
    }
}
