use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Duration;
use switchback_automation::{
    AutomationContext, AutomationHandle, AutomationHost, CloseBatch, CloseRequest, CloseSequencer,
    LabelSet, UiElement, WindowRoot,
};
use switchback_core::Config;
use tokio::task::LocalSet;
use tokio::time::sleep;

type Log = Rc<RefCell<Vec<String>>>;

/// Settings UI that shows one screen at a time and advances to the next
/// screen on every accepted click
struct ScriptedHost {
    screens: Vec<Vec<UiElement>>,
    current: usize,
    accept_clicks: bool,
    log: Log,
}

impl ScriptedHost {
    fn new(screens: Vec<Vec<UiElement>>, log: Log) -> Self {
        Self {
            screens,
            current: 0,
            accept_clicks: true,
            log,
        }
    }
}

impl AutomationHost for ScriptedHost {
    fn active_window_root(&mut self) -> Option<WindowRoot> {
        self.screens.get(self.current).map(|_| WindowRoot {
            id: self.current as u64,
            package: Some("com.android.tv.settings".to_string()),
        })
    }

    fn find_by_text(&mut self, root: &WindowRoot, text: &str) -> Vec<UiElement> {
        self.screens
            .get(root.id as usize)
            .map(|els| {
                els.iter()
                    .filter(|e| e.text.contains(text))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn click(&mut self, element: &UiElement) -> bool {
        if !self.accept_clicks {
            self.log.borrow_mut().push(format!("rejected:{}", element.text));
            return false;
        }
        self.log.borrow_mut().push(format!("click:{}", element.text));
        self.current += 1;
        true
    }

    fn navigate_back(&mut self) {
        self.log.borrow_mut().push("back".to_string());
    }

    fn trigger_system_overview(&mut self) {
        self.log.borrow_mut().push("overview".to_string());
    }

    fn open_app_details(&mut self, package_id: &str) {
        self.log.borrow_mut().push(format!("open:{}", package_id));
        self.current = 0;
    }
}

struct TestContext {
    handle: AutomationHandle,
    refreshes: usize,
    log: Log,
}

impl AutomationContext for TestContext {
    fn automation(&mut self) -> &mut AutomationHandle {
        &mut self.handle
    }

    fn refresh_history(&mut self) {
        self.refreshes += 1;
        self.log.borrow_mut().push("refresh".to_string());
    }
}

fn button(id: u64, text: &str) -> UiElement {
    UiElement {
        id,
        text: text.to_string(),
        clickable: true,
        enabled: true,
    }
}

fn settings_screens() -> Vec<Vec<UiElement>> {
    vec![
        vec![button(1, "Open"), button(2, "Force stop")],
        vec![button(3, "Cancel"), button(4, "OK")],
        vec![button(5, "Force stop")],
    ]
}

type Ctx = Rc<RefCell<TestContext>>;

fn with_host(host: ScriptedHost) -> (Ctx, Log) {
    let log = host.log.clone();
    let ctx = TestContext {
        handle: AutomationHandle::new(Box::new(host)),
        refreshes: 0,
        log: log.clone(),
    };
    (Rc::new(RefCell::new(ctx)), log)
}

fn context(screens: Vec<Vec<UiElement>>) -> (Ctx, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    with_host(ScriptedHost::new(screens, log))
}

fn scheduled(request: CloseRequest) -> CloseBatch {
    match request {
        CloseRequest::Scheduled(batch) => batch,
        CloseRequest::Unavailable => panic!("expected a scheduled close"),
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Runs need `spawn_local`, so every test body executes on a LocalSet
async fn local<F: Future>(body: F) -> F::Output {
    LocalSet::new().run_until(body).await
}

fn sequencer() -> CloseSequencer {
    CloseSequencer::from_config(&Config::new())
}

#[tokio::test(start_paused = true)]
async fn test_close_app_clicks_force_stop_then_ok_then_goes_back() {
    local(async {
        let (ctx, log) = context(settings_screens());

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.video"));
        assert_eq!(batch.runs(), 1);
        assert_eq!(batch.total_delay_ms(), 1_500);
        assert_eq!(*log.borrow(), vec!["open:com.example.video"]);

        sleep(ms(1_501)).await;

        assert_eq!(
            *log.borrow(),
            vec!["open:com.example.video", "click:Force stop", "click:OK", "back"]
        );
        assert!(batch.is_finished());
        assert_eq!(batch.finished().await, 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_steps_wait_for_their_delay() {
    local(async {
        let (ctx, log) = context(settings_screens());

        sequencer().close_app(&ctx, "com.example.video");

        sleep(ms(499)).await;
        assert_eq!(log.borrow().len(), 1, "nothing fires before the first delay");

        sleep(ms(2)).await;
        assert_eq!(log.borrow().last().map(String::as_str), Some("click:Force stop"));

        sleep(ms(500)).await;
        assert_eq!(log.borrow().last().map(String::as_str), Some("click:OK"));

        sleep(ms(500)).await;
        assert_eq!(log.borrow().last().map(String::as_str), Some("back"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_missing_buttons_still_end_with_back() {
    local(async {
        let (ctx, log) = context(vec![vec![button(1, "Open"), button(2, "Uninstall")]]);

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.stopped"));
        assert_eq!(batch.finished().await, 0);

        assert_eq!(*log.borrow(), vec!["open:com.example.stopped", "back"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_disabled_force_stop_is_not_clicked() {
    local(async {
        let mut disabled = button(2, "Force stop");
        disabled.enabled = false;
        let (ctx, log) = context(vec![vec![disabled]]);

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.stopped"));
        batch.finished().await;

        assert!(!log.borrow().iter().any(|entry| entry.starts_with("click:")));
        assert_eq!(log.borrow().last().map(String::as_str), Some("back"));
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_non_clickable_label_is_not_clicked() {
    local(async {
        let mut label = button(2, "Force stop");
        label.clickable = false;
        let (ctx, log) = context(vec![vec![label]]);

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.video"));
        batch.finished().await;

        assert_eq!(*log.borrow(), vec!["open:com.example.video", "back"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_rejected_click_is_not_counted() {
    local(async {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut host = ScriptedHost::new(settings_screens(), log);
        host.accept_clicks = false;
        let (ctx, log) = with_host(host);

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.video"));
        assert_eq!(batch.finished().await, 0);

        assert_eq!(
            *log.borrow(),
            vec!["open:com.example.video", "rejected:Force stop", "back"]
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_text_must_match_exactly() {
    local(async {
        let (ctx, log) = context(vec![vec![button(1, "Force stop now")]]);

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.video"));
        batch.finished().await;

        assert_eq!(*log.borrow(), vec!["open:com.example.video", "back"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_localized_labels_match() {
    local(async {
        let (ctx, log) = context(vec![
            vec![button(1, "Beenden erzwingen")],
            vec![button(2, "Okay")],
        ]);

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.video"));
        assert_eq!(batch.finished().await, 2);

        assert_eq!(
            *log.borrow(),
            vec![
                "open:com.example.video",
                "click:Beenden erzwingen",
                "click:Okay",
                "back"
            ]
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_custom_label_set() {
    local(async {
        let mut labels = LabelSet::default();
        labels.extend(&["Forcer l'arrêt"], &["D'accord"]);
        let sequencer = CloseSequencer::new(labels, 100, 1_000);

        let (ctx, log) = context(vec![
            vec![button(1, "Forcer l'arrêt")],
            vec![button(2, "D'accord")],
        ]);

        sequencer.close_app(&ctx, "com.example.video");
        sleep(ms(301)).await;

        assert_eq!(log.borrow().len(), 4);
        assert_eq!(log.borrow()[1], "click:Forcer l'arrêt");
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_host_schedules_nothing() {
    local(async {
        let ctx = Rc::new(RefCell::new(TestContext {
            handle: AutomationHandle::Unavailable,
            refreshes: 0,
            log: Rc::new(RefCell::new(Vec::new())),
        }));

        assert!(sequencer().close_app(&ctx, "com.example.video").is_unavailable());

        let packages = vec!["a".to_string(), "b".to_string()];
        assert!(sequencer().close_many(&ctx, &packages).is_unavailable());

        sleep(ms(10_000)).await;
        assert_eq!(ctx.borrow().refreshes, 0);
        assert!(ctx.borrow().log.borrow().is_empty());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_mid_run_abandons_remaining_steps() {
    local(async {
        let (ctx, log) = context(settings_screens());

        let batch = scheduled(sequencer().close_app(&ctx, "com.example.video"));
        sleep(ms(501)).await;
        ctx.borrow_mut().handle.disconnect();

        assert_eq!(batch.finished().await, 1);
        assert_eq!(
            *log.borrow(),
            vec!["open:com.example.video", "click:Force stop"]
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_close_many_runs_sequentially_then_refreshes() {
    local(async {
        let (ctx, log) = context(settings_screens());
        let packages = vec!["com.a".to_string(), "com.b".to_string()];

        let batch = scheduled(sequencer().close_many(&ctx, &packages));
        assert_eq!(batch.runs(), 2);
        assert_eq!(batch.total_delay_ms(), 5_000);

        sleep(ms(2_499)).await;
        assert_eq!(
            *log.borrow(),
            vec!["open:com.a", "click:Force stop", "click:OK", "back"]
        );

        sleep(ms(2_500)).await;
        assert_eq!(log.borrow().len(), 8);
        assert_eq!(log.borrow()[4], "open:com.b");
        assert_eq!(ctx.borrow().refreshes, 0, "refresh waits for the whole batch");

        sleep(ms(2)).await;
        assert_eq!(ctx.borrow().refreshes, 1);
        assert_eq!(batch.finished().await, 4);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_close_many_short_interval_does_not_interleave_runs() {
    local(async {
        let (ctx, log) = context(settings_screens());
        let packages = vec!["com.a".to_string(), "com.b".to_string()];
        let sequencer = CloseSequencer::new(LabelSet::default(), 500, 1_000);

        let batch = scheduled(sequencer.close_many(&ctx, &packages));
        assert_eq!(batch.total_delay_ms(), 3_000);

        sleep(ms(1_499)).await;
        assert!(!log.borrow().contains(&"open:com.b".to_string()));

        assert_eq!(batch.finished().await, 4);
        assert_eq!(
            *log.borrow(),
            vec![
                "open:com.a",
                "click:Force stop",
                "click:OK",
                "back",
                "open:com.b",
                "click:Force stop",
                "click:OK",
                "back",
                "refresh",
            ]
        );
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_batch_stops_and_skips_refresh() {
    local(async {
        let (ctx, log) = context(settings_screens());
        let packages = vec!["com.a".to_string(), "com.b".to_string()];

        let batch = scheduled(sequencer().close_many(&ctx, &packages));
        sleep(ms(501)).await;
        batch.cancel();
        sleep(ms(10_000)).await;

        assert_eq!(*log.borrow(), vec!["open:com.a", "click:Force stop"]);
        assert_eq!(ctx.borrow().refreshes, 0);
        assert_eq!(batch.finished().await, 0);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_close_many_empty_batch() {
    local(async {
        let (ctx, log) = context(settings_screens());

        let batch = scheduled(sequencer().close_many(&ctx, &[]));
        assert_eq!(batch.runs(), 0);
        assert_eq!(batch.total_delay_ms(), 0);
        assert_eq!(batch.finished().await, 0);

        assert_eq!(ctx.borrow().refreshes, 0);
        assert!(log.borrow().is_empty());
    })
    .await;
}

#[test]
fn test_show_recents() {
    let (ctx, log) = context(settings_screens());
    let mut ctx = ctx.borrow_mut();
    assert!(ctx.handle.show_recents());
    assert_eq!(*log.borrow(), vec!["overview"]);

    ctx.handle.disconnect();
    assert!(!ctx.handle.show_recents());
}
