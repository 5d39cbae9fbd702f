//! Periodic redraw requests

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Background thread calling a callback at a fixed interval
///
/// The ticker knows nothing about the game. It stops when [`Ticker::stop()`] is called or
/// when it is dropped.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts calling `callback` every `interval`
    ///
    /// Fails with [`io::ErrorKind::InvalidInput`] if `interval` is zero.
    pub fn spawn<F>(interval: Duration, mut callback: F) -> io::Result<Ticker>
    where
        F: FnMut() + Send + 'static,
    {
        if interval.is_zero() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "redraw interval must be positive",
            ));
        }
        let stop = Arc::new(AtomicBool::new(false));
        let handle = thread::Builder::new().name("redraw-ticker".into()).spawn({
            let stop = Arc::clone(&stop);
            move || {
                let mut next = Instant::now() + interval;
                while !stop.load(Ordering::Acquire) {
                    let now = Instant::now();
                    if now < next {
                        // Unparked early on stop, so the flag is checked again
                        thread::park_timeout(next - now);
                        continue;
                    }
                    callback();
                    next += interval;
                }
            }
        })?;
        debug!("redraw ticker started with interval {:?}", interval);
        Ok(Ticker {
            stop,
            handle: Some(handle),
        })
    }

    /// Stops the thread and waits until it exits
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.stop.store(true, Ordering::Release);
            handle.thread().unpark();
            if handle.join().is_err() {
                warn!("redraw callback panicked");
            }
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
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_ticks() {
        let count = Arc::new(AtomicUsize::new(0));
        let ticker = Ticker::spawn(Duration::from_millis(5), {
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::Relaxed);
            }
        })
        .unwrap();
        let deadline = Instant::now() + Duration::from_secs(10);
        while count.load(Ordering::Relaxed) < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        ticker.stop();
        let stopped_at = count.load(Ordering::Relaxed);
        assert!(stopped_at >= 3);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(count.load(Ordering::Relaxed), stopped_at);
    }

    #[test]
    fn test_zero_interval() {
        let err = Ticker::spawn(Duration::ZERO, || {}).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_drop_stops() {
        let ticker = Ticker::spawn(Duration::from_secs(3600), || {}).unwrap();
        let start = Instant::now();
        drop(ticker);
        assert!(start.elapsed() < Duration::from_secs(60));
    }
}
