//! Infinite-scroll sentinel
//!
//! The grid watches its last presented row. When that row becomes visible the
//! controller may request the next page. Registration is driven by
//! `Cmd::WatchSentinel` effects, issued whenever the last row changes.

use serde::Serialize;

/// The row being watched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentinelTarget {
    /// Position within the presented rows
    pub position: usize,
    /// Index into the loaded rows
    pub row_index: usize,
}

/// Visibility-observation collaborator
pub trait VisibilityObserver {
    /// Watch `target`, replacing any previous registration
    fn observe(&mut self, target: SentinelTarget);
    /// Stop watching
    fn disconnect(&mut self);
}

/// Simulated scroll viewport for headless hosts
///
/// Shows `window_rows` presented rows starting at `scroll_top`. Fires the
/// callback when the watched row transitions from hidden to visible, including
/// right after `observe` if it is already on screen.
pub struct ViewportObserver {
    window_rows: usize,
    scroll_top: usize,
    target: Option<SentinelTarget>,
    visible: bool,
    on_visible: Box<dyn FnMut(SentinelTarget)>,
}

impl std::fmt::Debug for ViewportObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportObserver")
            .field("window_rows", &self.window_rows)
            .field("scroll_top", &self.scroll_top)
            .field("target", &self.target)
            .field("visible", &self.visible)
            .finish()
    }
}

impl ViewportObserver {
    pub fn new(window_rows: usize, on_visible: impl FnMut(SentinelTarget) + 'static) -> Self {
        Self {
            window_rows: window_rows.max(1),
            scroll_top: 0,
            target: None,
            visible: false,
            on_visible: Box::new(on_visible),
        }
    }

    pub fn target(&self) -> Option<SentinelTarget> {
        self.target
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn window_rows(&self) -> usize {
        self.window_rows
    }

    /// Scroll so that presented row `top` is the first one on screen
    pub fn scroll_to(&mut self, top: usize) {
        self.scroll_top = top;
        self.evaluate();
    }

    /// Scroll so the last of `presented_rows` sits at the bottom of the window
    pub fn scroll_to_end(&mut self, presented_rows: usize) {
        self.scroll_to(presented_rows.saturating_sub(self.window_rows));
    }

    fn is_on_screen(&self, target: SentinelTarget) -> bool {
        target.position >= self.scroll_top && target.position < self.scroll_top + self.window_rows
    }

    fn evaluate(&mut self) {
        let Some(target) = self.target else {
            self.visible = false;
            return;
        };

        let now_visible = self.is_on_screen(target);
        if now_visible && !self.visible {
            tracing::trace!("Sentinel row {} became visible", target.position);
            (self.on_visible)(target);
        }
        self.visible = now_visible;
    }
}

impl VisibilityObserver for ViewportObserver {
    fn observe(&mut self, target: SentinelTarget) {
        self.target = Some(target);
        self.visible = false;
        self.evaluate();
    }

    fn disconnect(&mut self) {
        self.target = None;
        self.visible = false;
    }
}
