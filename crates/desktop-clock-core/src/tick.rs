//! Background ticker that asks the window to repaint once per interval.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval between redraw requests for a seconds display.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Something that can be asked, from any thread, to repaint later.
///
/// Implementations must not draw directly; they only queue a request
/// that the UI thread services (e.g. `InvalidateRect`).
pub trait RedrawTarget: Send + 'static {
    fn request_redraw(&self);
}

impl<F> RedrawTarget for F
where
    F: Fn() + Send + 'static,
{
    fn request_redraw(&self) {
        self()
    }
}

/// Owned tick worker.
///
/// The worker waits on a stop channel with the interval as timeout, so
/// [`Ticker::stop`] wakes it immediately instead of waiting out a sleep.
/// Dropping the handle also stops and joins the thread.
pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawns the worker. The first redraw is requested one interval
    /// after this call.
    pub fn spawn(interval: Duration, target: impl RedrawTarget) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => target.request_redraw(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Signals the worker to stop and waits for the thread to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    fn counter() -> (Arc<AtomicUsize>, impl RedrawTarget) {
        let count = Arc::new(AtomicUsize::new(0));
        let writer = count.clone();
        (count, move || {
            writer.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn requests_redraw_every_interval() {
        // Arrange
        let (count, target) = counter();

        // Act
        let ticker = Ticker::spawn(Duration::from_millis(10), target);
        thread::sleep(Duration::from_millis(200));
        ticker.stop();

        // Assert
        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn no_redraw_after_stop() {
        let (count, target) = counter();
        let ticker = Ticker::spawn(Duration::from_millis(5), target);
        thread::sleep(Duration::from_millis(30));

        ticker.stop();
        let after_stop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));

        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn stop_does_not_wait_for_the_interval() {
        // Arrange
        let (count, target) = counter();
        let ticker = Ticker::spawn(Duration::from_secs(30), target);

        // Act
        let started = Instant::now();
        ticker.stop();

        // Assert
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn drop_stops_the_worker() {
        let (count, target) = counter();

        {
            let _ticker = Ticker::spawn(Duration::from_millis(5), target);
            thread::sleep(Duration::from_millis(20));
        }
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));

        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
