//! The `watch` command.

use std::{
    io,
    path::Path,
    sync::mpsc::{self, Receiver},
};

use anstream::eprintln;
use notify::{Event, EventKind, RecursiveMode, Watcher as _};
use zlang_compiler::Config;

use crate::{build, command::ProjectArgs, project, stylesheet};

/// Builds the project, then rebuilds it whenever a unit in its directory
/// changes. Build errors are printed and watching continues.
///
/// Only returns if the watcher fails.
pub fn watch(project: &ProjectArgs, config: Config, output: Option<&Path>) -> io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(io::Error::other)?;
    watcher
        .watch(&project.dir, RecursiveMode::NonRecursive)
        .map_err(io::Error::other)?;

    tracing::info!(dir = %project.dir.display(), "watching for changes");

    rebuild(project, config, output)?;

    while wait_for_change(&rx)? {
        rebuild(project, config, output)?;
    }

    Ok(())
}

fn rebuild(project: &ProjectArgs, config: Config, output: Option<&Path>) -> io::Result<()> {
    if !build::build(project, config, output)? {
        let status = stylesheet::WARNING_COLOR.style("build failed");
        eprintln!("{status}, waiting for changes");
    }

    Ok(())
}

/// Blocks until a unit file changes.
///
/// Events that arrive in the same burst are drained so that one save
/// triggers one rebuild. Returns `false` once the watcher has shut down.
fn wait_for_change(rx: &Receiver<notify::Result<Event>>) -> io::Result<bool> {
    loop {
        let Ok(event) = rx.recv() else {
            return Ok(false);
        };

        let mut changed = touches_unit(&event.map_err(io::Error::other)?);
        while let Ok(event) = rx.try_recv() {
            changed |= touches_unit(&event.map_err(io::Error::other)?);
        }

        if changed {
            return Ok(true);
        }
    }
}

fn touches_unit(event: &Event) -> bool {
    let is_change = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );

    is_change && event.paths.iter().any(|path| project::is_unit_path(path))
}
