//! Automation host contract

/// Snapshot handle of the active window's element tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRoot {
    pub id: u64,
    pub package: Option<String>,
}

/// An element found by text search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiElement {
    pub id: u64,
    pub text: String,
    pub clickable: bool,
    pub enabled: bool,
}

impl UiElement {
    pub fn is_actionable(&self) -> bool {
        self.clickable && self.enabled
    }
}

/// Platform accessibility service
pub trait AutomationHost {
    fn active_window_root(&mut self) -> Option<WindowRoot>;

    /// Elements whose text contains `text`; matching may be loose, callers
    /// compare exactly
    fn find_by_text(&mut self, root: &WindowRoot, text: &str) -> Vec<UiElement>;

    fn click(&mut self, element: &UiElement) -> bool;

    fn navigate_back(&mut self);

    /// Host-level "show recents" action
    fn trigger_system_overview(&mut self);

    /// Open the per-app settings screen for `package_id`
    fn open_app_details(&mut self, package_id: &str);
}

/// Binding to the automation host. The service may not be connected, and
/// that is an ordinary state rather than an error.
#[derive(Default)]
pub enum AutomationHandle {
    Available(Box<dyn AutomationHost>),
    #[default]
    Unavailable,
}

impl AutomationHandle {
    pub fn new(host: Box<dyn AutomationHost>) -> Self {
        AutomationHandle::Available(host)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, AutomationHandle::Available(_))
    }

    pub fn host(&mut self) -> Option<&mut (dyn AutomationHost + 'static)> {
        match self {
            AutomationHandle::Available(host) => Some(host.as_mut()),
            AutomationHandle::Unavailable => None,
        }
    }

    /// Drop the binding, e.g. when the service disconnects
    pub fn disconnect(&mut self) {
        *self = AutomationHandle::Unavailable;
    }

    /// Show the system recents overview. Returns false when unavailable.
    pub fn show_recents(&mut self) -> bool {
        match self.host() {
            Some(host) => {
                host.trigger_system_overview();
                true
            }
            None => {
                tracing::warn!("automation host unavailable, cannot show recents");
                false
            }
        }
    }
}

impl std::fmt::Debug for AutomationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomationHandle::Available(_) => f.write_str("AutomationHandle::Available"),
            AutomationHandle::Unavailable => f.write_str("AutomationHandle::Unavailable"),
        }
    }
}
