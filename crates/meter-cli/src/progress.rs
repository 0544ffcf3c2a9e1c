//! Terminal progress bar for dataset assembly.

use std::path::Path;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use meter_core::ProgressObserver;

const BAR_TEMPLATE: &str = "{prefix:.cyan} [{bar:30}] {pos}/{len} sources ({elapsed})";

/// One bar per location, drawn on stderr.
pub struct BarProgress {
    bar: Option<ProgressBar>,
    hidden: bool,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: None,
            hidden: false,
        }
    }

    /// Tracks progress without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            hidden: true,
        }
    }

    /// Current position and length of the active bar.
    pub fn position(&self) -> Option<(u64, u64)> {
        self.bar
            .as_ref()
            .map(|bar| (bar.position(), bar.length().unwrap_or_default()))
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("=> "))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarProgress {
    fn location_started(&mut self, location: &Path, total: usize) {
        let bar = if self.hidden {
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(total as u64)
        };
        bar.set_style(Self::style());
        let name = location
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.display().to_string());
        bar.set_prefix(name);
        self.bar = Some(bar);
    }

    fn source_loaded(&mut self, index: usize, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(index as u64);
        }
    }

    fn location_finished(&mut self, _location: &Path) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}
