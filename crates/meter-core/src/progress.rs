//! Progress reporting during dataset assembly.

use std::path::Path;

use tracing::{debug, info};

/// Receives progress signals while locations are assembled.
///
/// `index` in [`source_loaded`](Self::source_loaded) counts the sources
/// handled so far in the current location, starting at 1. `total` is the
/// number of matched sources in that location: only files with the
/// configured extension, not every directory entry. Skipped sources count
/// as handled.
pub trait ProgressObserver {
    fn location_started(&mut self, _location: &Path, _total: usize) {}

    fn source_loaded(&mut self, index: usize, total: usize);

    fn location_finished(&mut self, _location: &Path) {}
}

/// Reports progress through `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn location_started(&mut self, location: &Path, total: usize) {
        info!(location = %location.display(), sources = total, "assembling location");
    }

    fn source_loaded(&mut self, index: usize, total: usize) {
        debug!(index, total, "record source done");
    }
}

/// Discards all progress signals.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn source_loaded(&mut self, _index: usize, _total: usize) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(usize, usize),
{
    fn source_loaded(&mut self, index: usize, total: usize) {
        self(index, total);
    }
}
