//! Pixel scheduling across threads.
//!
//! A render is a list of pixel indices in row-major order. Work is handed out
//! sequentially, through rayon, or to a fixed set of scoped worker threads
//! that claim the next index from a shared cursor. Results always land in
//! index order, so the finished frame does not depend on the schedule.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use lumen_core::Color;
use rayon::prelude::*;

use crate::error::{ConfigError, RenderError, RenderResult};

/// How pixels are distributed over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threading {
    /// Everything on the calling thread.
    Sequential,
    /// A fixed number of scoped worker threads.
    Pool(usize),
    /// Rayon's global thread pool.
    Parallel,
}

impl Threading {
    /// Decode a thread count setting.
    ///
    /// `0` is sequential, `n > 0` is a pool of `n` workers, `-1` uses rayon
    /// and `-2` picks a pool size from the machine (all cores but two, at
    /// least one).
    pub fn from_code(code: i32) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Threading::Sequential),
            n if n > 0 => Ok(Threading::Pool(n as usize)),
            -1 => Ok(Threading::Parallel),
            -2 => Ok(Threading::Pool(auto_threads())),
            other => Err(ConfigError::invalid(format!(
                "thread count must be -2, -1, 0 or positive, got {other}"
            ))),
        }
    }
}

fn auto_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .saturating_sub(2)
        .max(1)
}

/// Shared "next pixel" counter for pool workers.
pub struct PixelCursor {
    next: AtomicUsize,
    total: usize,
    aborted: AtomicBool,
}

impl PixelCursor {
    pub fn new(total: usize) -> Self {
        Self {
            next: AtomicUsize::new(0),
            total,
            aborted: AtomicBool::new(false),
        }
    }

    /// Claim the next unrendered pixel, or `None` when done or aborted.
    pub fn claim(&self) -> Option<usize> {
        if self.aborted.load(Ordering::Relaxed) {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed);
        (index < self.total).then_some(index)
    }

    /// Stop handing out pixels.
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }
}

struct ProgressState {
    done: usize,
    last_reported: usize,
}

/// Completed-pixel counter that logs every `interval` percent.
pub struct Progress {
    total: usize,
    interval: usize,
    state: Mutex<ProgressState>,
}

impl Progress {
    /// Track `total` pixels; an `interval` of 0 disables reporting.
    pub fn new(total: usize, interval: usize) -> Self {
        Self {
            total,
            interval,
            state: Mutex::new(ProgressState {
                done: 0,
                last_reported: 0,
            }),
        }
    }

    /// Record one finished pixel.
    pub fn pixel_done(&self) {
        if self.interval == 0 || self.total == 0 {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.done += 1;
        let percent = state.done * 100 / self.total;
        if percent >= state.last_reported + self.interval {
            state.last_reported = percent - percent % self.interval;
            log::info!("Rendered {percent}% ({}/{} pixels)", state.done, self.total);
        }
    }

    /// Number of pixels finished so far.
    pub fn done(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).done
    }
}

/// Render every pixel of a `width × height` frame with `render_pixel`.
///
/// Returns the colors in row-major order. A panic inside `render_pixel`
/// stops the render and is reported as [`RenderError::PixelFailed`].
pub fn render_frame<F>(
    threading: Threading,
    width: u32,
    height: u32,
    progress_interval: usize,
    render_pixel: F,
) -> RenderResult<Vec<Color>>
where
    F: Fn(usize) -> Color + Sync,
{
    let total = width as usize * height as usize;
    let progress = Progress::new(total, progress_interval);

    let run = |index: usize| -> RenderResult<Color> {
        let color = panic::catch_unwind(AssertUnwindSafe(|| render_pixel(index))).map_err(|payload| {
            RenderError::PixelFailed {
                row: (index / width as usize) as u32,
                col: (index % width as usize) as u32,
                message: panic_message(payload.as_ref()),
            }
        })?;
        progress.pixel_done();
        Ok(color)
    };

    log::debug!("Rendering {total} pixels with {threading:?}");
    match threading {
        Threading::Sequential => (0..total).map(run).collect(),
        Threading::Parallel => (0..total).into_par_iter().map(run).collect(),
        Threading::Pool(workers) => render_pool(workers, total, &run),
    }
}

fn render_pool<F>(workers: usize, total: usize, run: &F) -> RenderResult<Vec<Color>>
where
    F: Fn(usize) -> RenderResult<Color> + Sync,
{
    let cursor = PixelCursor::new(total);
    let failure: Mutex<Option<RenderError>> = Mutex::new(None);

    let finished: Vec<Vec<(usize, Color)>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers.max(1))
            .map(|_| {
                scope.spawn(|| {
                    let mut done = Vec::new();
                    while let Some(index) = cursor.claim() {
                        match run(index) {
                            Ok(color) => done.push((index, color)),
                            Err(err) => {
                                cursor.abort();
                                failure
                                    .lock()
                                    .unwrap_or_else(|e| e.into_inner())
                                    .get_or_insert(err);
                                break;
                            }
                        }
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    });

    if let Some(err) = failure.into_inner().unwrap_or_else(|e| e.into_inner()) {
        return Err(err);
    }

    let mut pixels = vec![Color::ZERO; total];
    for (index, color) in finished.into_iter().flatten() {
        pixels[index] = color;
    }
    Ok(pixels)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(index: usize) -> Color {
        Color::new(index as f64, (index * 2) as f64, 0.0)
    }

    #[test]
    fn test_thread_codes() {
        assert_eq!(Threading::from_code(0), Ok(Threading::Sequential));
        assert_eq!(Threading::from_code(3), Ok(Threading::Pool(3)));
        assert_eq!(Threading::from_code(-1), Ok(Threading::Parallel));
        assert!(matches!(Threading::from_code(-2), Ok(Threading::Pool(n)) if n >= 1));
        assert!(matches!(
            Threading::from_code(-3),
            Err(ConfigError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_cursor_hands_out_each_pixel_once() {
        let cursor = PixelCursor::new(3);
        assert_eq!(cursor.claim(), Some(0));
        assert_eq!(cursor.claim(), Some(1));
        assert_eq!(cursor.claim(), Some(2));
        assert_eq!(cursor.claim(), None);
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn test_aborted_cursor_stops() {
        let cursor = PixelCursor::new(10);
        assert_eq!(cursor.claim(), Some(0));
        cursor.abort();
        assert_eq!(cursor.claim(), None);
    }

    #[test]
    fn test_progress_counts_pixels() {
        let progress = Progress::new(10, 25);
        for _ in 0..10 {
            progress.pixel_done();
        }
        assert_eq!(progress.done(), 10);

        // Disabled progress does no bookkeeping
        let silent = Progress::new(10, 0);
        silent.pixel_done();
        assert_eq!(silent.done(), 0);
    }

    #[test]
    fn test_all_modes_produce_the_same_frame() {
        let expected: Vec<Color> = (0..35).map(gradient).collect();
        for threading in [
            Threading::Sequential,
            Threading::Parallel,
            Threading::Pool(1),
            Threading::Pool(4),
            Threading::Pool(64),
        ] {
            let frame = render_frame(threading, 7, 5, 10, gradient).unwrap();
            assert_eq!(frame, expected, "{threading:?}");
        }
    }

    #[test]
    fn test_panicking_pixel_is_reported() {
        for threading in [Threading::Sequential, Threading::Parallel, Threading::Pool(3)] {
            let result = render_frame(threading, 4, 4, 0, |index| {
                if index == 9 {
                    panic!("bad pixel");
                }
                gradient(index)
            });
            match result {
                Err(RenderError::PixelFailed { row, col, message }) => {
                    assert_eq!((row, col), (2, 1));
                    assert_eq!(message, "bad pixel");
                }
                other => panic!("expected a pixel failure, got {other:?}"),
            }
        }
    }
}
