//! Periodic recently-used refresh on a local tokio interval

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Screen state refreshed on every tick, including the immediate one at start
pub trait RefreshHost: 'static {
    fn on_refresh(&mut self);
}

/// Recurring refresh task, active while the consuming screen is visible.
///
/// The task is spawned with `spawn_local`, so `start` must run inside a
/// [`tokio::task::LocalSet`]. Stopping (or dropping) the loop aborts it.
#[derive(Debug)]
pub struct RefreshLoop {
    interval: Duration,
    task: Option<JoinHandle<()>>,
    ticks: Rc<Cell<usize>>,
}

impl RefreshLoop {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms.max(1)),
            task: None,
            ticks: Rc::new(Cell::new(0)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn ticks(&self) -> usize {
        self.ticks.get()
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }

    /// Refresh now and every interval after. No-op if already running.
    pub fn start<H: RefreshHost>(&mut self, host: &Rc<RefCell<H>>) -> bool {
        if self.is_active() {
            return false;
        }
        let host = Rc::clone(host);
        let ticks = Rc::clone(&self.ticks);
        let period = self.interval;
        self.task = Some(tokio::task::spawn_local(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                host.borrow_mut().on_refresh();
                ticks.set(ticks.get() + 1);
            }
        }));
        true
    }

    /// Abort the pending tick. Returns false if the loop was not running.
    pub fn stop(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return false;
        };
        let was_running = !task.is_finished();
        task.abort();
        tracing::debug!(ticks = self.ticks.get(), "refresh loop stopped");
        was_running
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
