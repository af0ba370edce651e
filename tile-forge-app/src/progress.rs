use std::sync::Mutex;
use std::time::{Duration, Instant};
use wfc_core::{ProgressCallback, ProgressInfo};

/// Trait for reporting the progress of a generation run.
pub trait ProgressReporter: Send {
    /// Called after every iteration with the latest snapshot.
    fn report(&mut self, info: &ProgressInfo);
}

/// Logs a progress line at `info` level at most once per `interval`.
#[derive(Debug)]
pub struct ThrottledLogReporter {
    interval: Duration,
    last_report: Instant,
}

impl ThrottledLogReporter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_report: Instant::now(),
        }
    }
}

pub fn format_progress(info: &ProgressInfo) -> String {
    let elapsed_secs = info.elapsed_time.as_secs_f32();
    let collapse_rate = if elapsed_secs > 0.0 {
        info.collapsed_cells as f32 / elapsed_secs
    } else {
        0.0
    };
    let percentage = if info.total_cells > 0 {
        (info.collapsed_cells as f32 / info.total_cells as f32) * 100.0
    } else {
        100.0
    };
    format!(
        "Progress: Iter {}, Collapsed {}/{} ({:.1}%), Contradictions {}, Elapsed: {:.2?}, Rate: {:.1} cells/s",
        info.iterations,
        info.collapsed_cells,
        info.total_cells,
        percentage,
        info.contradicted_cells,
        info.elapsed_time,
        collapse_rate
    )
}

impl ProgressReporter for ThrottledLogReporter {
    fn report(&mut self, info: &ProgressInfo) {
        let now = Instant::now();
        if now.duration_since(self.last_report) < self.interval {
            return;
        }
        self.last_report = now;
        log::info!("{}", format_progress(info));
    }
}

/// Adapts a reporter to the engine's callback type.
pub fn into_callback<P: ProgressReporter + 'static>(reporter: P) -> ProgressCallback {
    let reporter = Mutex::new(reporter);
    Box::new(move |info: &ProgressInfo| {
        if let Ok(mut reporter) = reporter.lock() {
            reporter.report(info);
        } else {
            log::error!("Progress reporter mutex poisoned");
        }
    })
}
