use std::rc::Rc;
use yew::functional::Reducible;

/// Delay between the pointer entering a card and the preview starting.
pub const HOVER_DELAY_MS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Enter,
    Leave,
    TimerFired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverPreview {
    #[default]
    Idle,
    /// Pointer is over the card, hover timer running.
    Pending,
    Showing,
}

impl HoverPreview {
    pub fn next(self, event: HoverEvent) -> Self {
        match (self, event) {
            (HoverPreview::Showing, HoverEvent::Enter) => HoverPreview::Showing,
            (_, HoverEvent::Enter) => HoverPreview::Pending,
            (_, HoverEvent::Leave) => HoverPreview::Idle,
            (HoverPreview::Pending, HoverEvent::TimerFired) => HoverPreview::Showing,
            // A late timer after Leave changes nothing.
            (state, HoverEvent::TimerFired) => state,
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self, HoverPreview::Showing)
    }
}

impl Reducible for HoverPreview {
    type Action = HoverEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = (*self).next(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
