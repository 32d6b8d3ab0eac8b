//! Timer-driven force-stop sequence
//!
//! A run walks `AwaitForceStopButton -> AwaitConfirmDialog -> AwaitBack ->
//! Done`, sleeping a fixed delay before each step for the settings UI to
//! render rather than listening for UI changes. A step whose label is not on
//! screen is skipped, never retried, and the run moves on: closing apps is
//! best effort and must never block or fail the caller.
//!
//! Runs are local tasks (`spawn_local`), so callers drive them from inside a
//! [`tokio::task::LocalSet`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep, sleep_until, Instant};

use crate::host::{AutomationHandle, AutomationHost};
use crate::labels::LabelSet;
use switchback_core::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutomationAction {
    /// Click the first clickable, enabled element whose text equals one of
    /// the candidates, tried in order
    ClickByText(Vec<String>),
    GoBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationStep {
    pub action: AutomationAction,
    /// Wait before this step runs
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseState {
    AwaitForceStopButton,
    AwaitConfirmDialog,
    AwaitBack,
    Done,
}

impl CloseState {
    /// State that executes step `index` of a close run
    pub fn for_step(index: usize) -> Self {
        match index {
            0 => CloseState::AwaitForceStopButton,
            1 => CloseState::AwaitConfirmDialog,
            2 => CloseState::AwaitBack,
            _ => CloseState::Done,
        }
    }
}

/// Screen state that can reach the automation host
pub trait AutomationContext: 'static {
    fn automation(&mut self) -> &mut AutomationHandle;

    /// Called once a batch close has had time to finish
    fn refresh_history(&mut self) {}
}

#[derive(Debug)]
pub enum CloseRequest {
    Scheduled(CloseBatch),
    /// No automation host is bound; nothing was scheduled
    Unavailable,
}

impl CloseRequest {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CloseRequest::Unavailable)
    }
}

/// Handle to the task driving one or more close runs
#[derive(Debug)]
pub struct CloseBatch {
    runs: usize,
    total_delay_ms: u64,
    task: JoinHandle<usize>,
}

impl CloseBatch {
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Time from the request until the last step (or the batch refresh)
    pub fn total_delay_ms(&self) -> u64 {
        self.total_delay_ms
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abort remaining steps. Steps already performed are not undone.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Wait for the batch and return how many clicks the host accepted.
    /// A cancelled batch reports zero.
    pub async fn finished(self) -> usize {
        match self.task.await {
            Ok(clicks) => clicks,
            Err(err) => {
                tracing::debug!(cancelled = err.is_cancelled(), "close batch did not complete");
                0
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct CloseSequencer {
    labels: LabelSet,
    step_delay_ms: u64,
    run_interval_ms: u64,
}

impl CloseSequencer {
    pub fn new(labels: LabelSet, step_delay_ms: u64, run_interval_ms: u64) -> Self {
        Self {
            labels,
            step_delay_ms,
            run_interval_ms,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LabelSet::default(),
            config.automation_step_delay_ms,
            config.batch_run_interval_ms,
        )
    }

    /// Fresh step list for one run
    pub fn steps(&self) -> Vec<AutomationStep> {
        vec![
            AutomationStep {
                action: AutomationAction::ClickByText(self.labels.force_stop.clone()),
                delay_ms: self.step_delay_ms,
            },
            AutomationStep {
                action: AutomationAction::ClickByText(self.labels.confirm.clone()),
                delay_ms: self.step_delay_ms,
            },
            AutomationStep {
                action: AutomationAction::GoBack,
                delay_ms: self.step_delay_ms,
            },
        ]
    }

    /// Gap between run starts in a batch. Never shorter than one run, so
    /// runs cannot overlap on the shared settings screen.
    pub fn run_spacing_ms(&self) -> u64 {
        self.run_interval_ms.max(run_length_ms(&self.steps()))
    }

    /// Open the app's settings screen and spawn the force-stop run
    pub fn close_app<C: AutomationContext>(
        &self,
        ctx: &Rc<RefCell<C>>,
        package_id: &str,
    ) -> CloseRequest {
        if !open_details(ctx, package_id) {
            tracing::warn!(package = package_id, "automation host unavailable, not closing");
            return CloseRequest::Unavailable;
        }

        let steps = self.steps();
        let total_delay_ms = run_length_ms(&steps);
        let ctx = Rc::clone(ctx);
        let package = package_id.to_string();
        let task =
            tokio::task::spawn_local(async move { run_steps(&ctx, &package, &steps).await });

        tracing::info!(package = package_id, "close sequence scheduled");
        CloseRequest::Scheduled(CloseBatch {
            runs: 1,
            total_delay_ms,
            task,
        })
    }

    /// Run one close per package, each starting `run_spacing_ms` after the
    /// previous one, then ask the context to refresh history once the whole
    /// batch has elapsed
    pub fn close_many<C: AutomationContext>(
        &self,
        ctx: &Rc<RefCell<C>>,
        packages: &[String],
    ) -> CloseRequest {
        if !ctx.borrow_mut().automation().is_available() {
            tracing::warn!(count = packages.len(), "automation host unavailable, not closing");
            return CloseRequest::Unavailable;
        }

        let spacing = Duration::from_millis(self.run_spacing_ms());
        let total = spacing * packages.len() as u32;
        let start = Instant::now();
        let steps = self.steps();
        let ctx = Rc::clone(ctx);
        let packages = packages.to_vec();
        let runs = packages.len();

        let task = tokio::task::spawn_local(async move {
            if packages.is_empty() {
                return 0;
            }
            let mut clicks = 0;
            let mut run_start = start;
            for package in &packages {
                sleep_until(run_start).await;
                run_start += spacing;
                if !open_details(&ctx, package) {
                    tracing::debug!(package = %package, "automation host gone, skipping run");
                    continue;
                }
                clicks += run_steps(&ctx, package, &steps).await;
            }
            sleep_until(start + total).await;
            ctx.borrow_mut().refresh_history();
            tracing::info!(runs = packages.len(), clicks, "close batch finished");
            clicks
        });

        CloseRequest::Scheduled(CloseBatch {
            runs,
            total_delay_ms: total.as_millis() as u64,
            task,
        })
    }
}

fn run_length_ms(steps: &[AutomationStep]) -> u64 {
    steps.iter().map(|s| s.delay_ms).sum()
}

fn open_details<C: AutomationContext>(ctx: &Rc<RefCell<C>>, package_id: &str) -> bool {
    let mut screen = ctx.borrow_mut();
    match screen.automation().host() {
        Some(host) => {
            host.open_app_details(package_id);
            true
        }
        None => false,
    }
}

/// Execute the steps of one run. The context is borrowed per step and
/// released before every sleep. Returns the clicks the host accepted.
async fn run_steps<C: AutomationContext>(
    ctx: &Rc<RefCell<C>>,
    package: &str,
    steps: &[AutomationStep],
) -> usize {
    let mut clicks = 0;
    for (index, step) in steps.iter().enumerate() {
        sleep(Duration::from_millis(step.delay_ms)).await;

        let state = CloseState::for_step(index);
        let mut screen = ctx.borrow_mut();
        let Some(host) = screen.automation().host() else {
            tracing::debug!(package, ?state, "automation host gone, abandoning run");
            return clicks;
        };

        match &step.action {
            AutomationAction::ClickByText(labels) => match click_first_match(host, labels) {
                Some(label) => {
                    clicks += 1;
                    tracing::debug!(package, ?state, label = %label, "clicked");
                }
                None => {
                    tracing::debug!(package, ?state, "no clickable match, skipping");
                }
            },
            AutomationAction::GoBack => host.navigate_back(),
        }
    }
    tracing::info!(package, clicks, "close sequence finished");
    clicks
}

/// Click the first actionable element whose text equals a candidate.
/// Returns the label only if the host accepted the click.
fn click_first_match(host: &mut dyn AutomationHost, labels: &[String]) -> Option<String> {
    let root = host.active_window_root()?;

    for label in labels {
        let found = host
            .find_by_text(&root, label)
            .into_iter()
            .find(|e| e.text == *label && e.is_actionable());

        if let Some(element) = found {
            if host.click(&element) {
                return Some(label.clone());
            }
            tracing::debug!(label = %label, "host rejected click");
            return None;
        }
    }

    None
}
