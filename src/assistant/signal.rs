//! Listening indicator shared between the dispatcher and the GUI
//!
//! `start` raises the flag and spawns a ticker thread that advances the
//! animation phase; `stop` lowers the flag and joins the ticker.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

type Waker = Arc<dyn Fn() + Send + Sync>;

struct Ticker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    active: AtomicBool,
    ticks: AtomicU64,
    ticker: Mutex<Option<Ticker>>,
    waker: Mutex<Option<Waker>>,
}

#[derive(Clone, Default)]
pub struct ListeningSignal {
    inner: Arc<Inner>,
}

impl ListeningSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every tick and on start/stop (the GUI installs a repaint request)
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *lock(&self.inner.waker) = Some(Arc::new(waker));
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Animation phase; advances once per tick while active
    pub fn ticks(&self) -> u64 {
        self.inner.ticks.load(Ordering::Acquire)
    }

    pub fn start(&self, interval: Duration) {
        let mut slot = lock(&self.inner.ticker);
        if slot.is_some() {
            return;
        }
        self.inner.active.store(true, Ordering::Release);

        let stop = Arc::new(AtomicBool::new(false));
        let inner = Arc::clone(&self.inner);
        let thread_stop = Arc::clone(&stop);
        let spawned = std::thread::Builder::new()
            .name("listening-ticker".to_string())
            .spawn(move || {
                while !thread_stop.load(Ordering::Acquire) {
                    inner.ticks.fetch_add(1, Ordering::AcqRel);
                    wake(&inner);
                    std::thread::sleep(interval);
                }
            });

        match spawned {
            Ok(handle) => *slot = Some(Ticker { stop, handle }),
            Err(e) => warn!("Failed to start listening ticker: {}", e),
        }
        debug!("Listening signal on");
    }

    pub fn stop(&self) {
        let ticker = lock(&self.inner.ticker).take();
        self.inner.active.store(false, Ordering::Release);
        if let Some(ticker) = ticker {
            ticker.stop.store(true, Ordering::Release);
            if ticker.handle.join().is_err() {
                warn!("Listening ticker panicked");
            }
        }
        wake(&self.inner);
        debug!("Listening signal off");
    }
}

fn wake(inner: &Inner) {
    let waker = lock(&inner.waker).clone();
    if let Some(waker) = waker {
        waker();
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}
