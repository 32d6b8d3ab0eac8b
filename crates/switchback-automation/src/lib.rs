//! UI automation that force-stops apps by driving the settings screen

pub mod host;
pub mod labels;
pub mod sequencer;

pub use host::{AutomationHandle, AutomationHost, UiElement, WindowRoot};
pub use labels::LabelSet;
pub use sequencer::{
    AutomationAction, AutomationContext, AutomationStep, CloseBatch, CloseRequest, CloseSequencer,
    CloseState,
};
