//! Loading a project directory into a file set.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use zlang_shared::{AsZlangError, Context, FileSet, UnitName, source::UNIT_EXTENSION};

/// An error reading a project directory.
#[derive(Debug)]
pub enum ProjectError {
    /// The directory could not be listed.
    ReadDir { path: PathBuf, error: io::Error },
    /// A unit file could not be read.
    ReadFile { path: PathBuf, error: io::Error },
    /// The directory holds no `.z` files.
    NoUnits { path: PathBuf },
}

impl fmt::Display for ProjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ProjectError {}

impl AsZlangError for ProjectError {
    fn message(&self) -> String {
        match self {
            Self::ReadDir { path, error } => {
                format!("couldn't read directory `{}`: {error}", path.display())
            }
            Self::ReadFile { path, error } => {
                format!("couldn't read `{}`: {error}", path.display())
            }
            Self::NoUnits { path } => {
                format!("no `{UNIT_EXTENSION}` files in `{}`", path.display())
            }
        }
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::NoUnits { .. } => vec![Context::Help(
                "pass the project directory as the first argument".to_string(),
            )],
            Self::ReadDir { .. } | Self::ReadFile { .. } => vec![],
        }
    }
}

/// Reads every `.z` file directly inside `dir`, keyed by file name.
///
/// Subdirectories are not searched. Units are inserted in file name order.
pub fn load(dir: &Path) -> Result<FileSet, ProjectError> {
    let read_dir_error = |error| ProjectError::ReadDir {
        path: dir.to_path_buf(),
        error,
    };

    let mut paths = fs::read_dir(dir)
        .map_err(read_dir_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_error)?;

    paths.retain(|path| path.is_file() && is_unit_path(path));
    paths.sort();

    if paths.is_empty() {
        return Err(ProjectError::NoUnits {
            path: dir.to_path_buf(),
        });
    }

    let mut files = FileSet::new();
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|error| ProjectError::ReadFile {
            path: path.clone(),
            error,
        })?;

        let Some(name) = path.file_name() else {
            continue;
        };

        files.insert(UnitName::new(name.to_string_lossy()), text);
    }

    tracing::debug!(dir = %dir.display(), units = files.len(), "loaded project");

    Ok(files)
}

/// Returns `true` if `path` has the `.z` extension.
pub fn is_unit_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == UNIT_EXTENSION.trim_start_matches('.'))
}
