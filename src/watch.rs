//! File watcher: re-runs a transform pass when watched inputs change.

use std::path::PathBuf;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::error::Error;

/// Debounce delay between filesystem events and re-transform.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that sends events on the given channel.
///
/// # Errors
///
/// Returns `Error::WatchSetup` if the watcher cannot be created.
fn create_watcher(
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, Error> {
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
        {
            let _ = tx.send(());
        }
    })
    .map_err(|e| {
        return Error::WatchSetup {
            reason: e.to_string(),
        };
    });
}

/// Watch the given paths and invoke `rerun` after each debounced burst of
/// create/modify/remove events. Blocks until the event channel closes.
///
/// The initial pass is the caller's responsibility; this only handles
/// changes after startup.
///
/// # Errors
///
/// Returns `Error::WatchSetup` if the watcher cannot be created.
pub fn run_on_change(
    paths: &[PathBuf],
    mut rerun: impl FnMut(),
) -> Result<(), Error> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(tx)?;

    let mut watched = 0_usize;
    for path in paths {
        if path.exists() {
            let _ = watcher.watch(path, RecursiveMode::Recursive);
            watched += 1;
        }
    }
    eprintln!("watch: monitoring {watched} paths, press Ctrl+C to stop");

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-transforming...");
        rerun();
    }

    return Ok(());
}
