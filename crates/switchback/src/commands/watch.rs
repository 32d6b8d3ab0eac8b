use crate::app::{now_ms, App, CliEngine};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use switchback_core::{RefreshHost, RefreshLoop};
use tokio::sync::Notify;
use tokio::task::LocalSet;

/// Stand-in for the recent-apps screen: refreshes on a timer while active
struct WatchScreen {
    engine: CliEngine,
    clock: Box<dyn Fn() -> i64>,
    /// Refreshes before finishing; 0 is unbounded
    limit: usize,
    refreshes: usize,
    changes: usize,
    failed: Option<anyhow::Error>,
    done: Rc<Notify>,
}

impl WatchScreen {
    fn new(engine: CliEngine, clock: Box<dyn Fn() -> i64>, limit: usize) -> Self {
        Self {
            engine,
            clock,
            limit,
            refreshes: 0,
            changes: 0,
            failed: None,
            done: Rc::new(Notify::new()),
        }
    }
}

impl RefreshHost for WatchScreen {
    fn on_refresh(&mut self) {
        if self.failed.is_some() {
            return;
        }
        if let Err(e) = self.engine.provider_mut().reload() {
            tracing::warn!(error = %e, "failed to reload event log");
        }

        match self.engine.refresh((self.clock)()) {
            Ok(true) => {
                self.changes += 1;
                println!("{}", self.engine.recent().join("  "));
            }
            Ok(false) => {}
            Err(e) => self.failed = Some(e.into()),
        }

        self.refreshes += 1;
        if self.failed.is_some() || (self.limit > 0 && self.refreshes >= self.limit) {
            self.done.notify_one();
        }
    }
}

/// Refresh until the screen reaches its limit, fails, or `shutdown` resolves.
/// Must run inside a [`LocalSet`].
async fn drive(
    screen: &Rc<RefCell<WatchScreen>>,
    refresh: &mut RefreshLoop,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<usize> {
    let done = Rc::clone(&screen.borrow().done);

    refresh.start(screen);
    tokio::select! {
        _ = done.notified() => {}
        _ = shutdown => {}
    }
    refresh.stop();

    let mut screen = screen.borrow_mut();
    match screen.failed.take() {
        Some(e) => Err(e),
        None => Ok(screen.changes),
    }
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("interrupted"),
        Err(e) => {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}

pub fn run(ticks: usize) -> anyhow::Result<()> {
    let app = App::open()?;
    let interval = app.engine.config().refresh_interval_ms;

    let screen = Rc::new(RefCell::new(WatchScreen::new(
        app.engine,
        Box::new(now_ms),
        ticks,
    )));
    let mut refresh = RefreshLoop::new(interval);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let changes = LocalSet::new().block_on(&runtime, drive(&screen, &mut refresh, ctrl_c()))?;

    tracing::debug!(changes, ticks = refresh.ticks(), "watch finished");
    Ok(())
}
