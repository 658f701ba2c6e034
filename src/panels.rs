//! Panel cursor and widget visibility.
//!
//! The overlay has up to 16 panels (pages). Each widget carries a `u16` panel
//! mask; bit `n - 1` set means the widget is drawn while panel `n` is active.
//! The cursor is 1-based and is pulled back to panel 1 whenever it points past
//! the configured panel count.
//!
//! Changing panels shows a transient "P n" indicator, tracked by
//! [`PanelChangeIndicator`].

use crate::config::WidgetConfig;
use crate::thresholds::PANEL_INDICATOR_MS;

/// 1-based cursor selecting the active panel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelCursor {
    current: u8,
}

impl PanelCursor {
    pub const fn new() -> Self { Self { current: 1 } }

    #[inline]
    pub const fn current(&self) -> u8 { self.current }

    /// Jump to `panel`. Out-of-range values are fixed by the next
    /// [`clamp`](Self::clamp).
    pub fn set(&mut self, panel: u8) { self.current = panel; }

    /// Cycle to the next panel, wrapping after `max_panels`.
    pub fn advance(&mut self, max_panels: u8) {
        self.current = if self.current >= max_panels.max(1) { 1 } else { self.current + 1 };
    }

    /// Pull the cursor back to panel 1 when it lies outside `1..=max_panels`.
    /// A panel count of zero behaves like one.
    pub fn clamp(&mut self, max_panels: u8) {
        if self.current == 0 || self.current > max_panels.max(1) {
            log::debug!("panel {} outside 1..={}, back to panel 1", self.current, max_panels.max(1));
            self.current = 1;
        }
    }

    /// True when `mask` includes the current panel.
    #[inline]
    pub fn shown(&self, mask: u16) -> bool {
        let bit = u32::from(self.current.saturating_sub(1));
        mask.checked_shr(bit).is_some_and(|m| m & 1 != 0)
    }

    /// True when the widget is enabled and shown on the current panel.
    #[inline]
    pub fn visible(&self, widget: &WidgetConfig) -> bool { widget.enabled && self.shown(widget.panel_mask) }
}

impl Default for PanelCursor {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Panel Change Indicator
// =============================================================================

/// Timer behind the transient "P n" indicator.
///
/// Nothing is shown at start-up; the indicator appears only after the cursor
/// actually moves.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PanelChangeIndicator {
    last_panel: u8,
    changed_at: Option<u64>,
}

impl PanelChangeIndicator {
    pub const fn new() -> Self {
        Self {
            last_panel: 1,
            changed_at: None,
        }
    }

    /// Record the panel of this frame and return the number to show, if any.
    pub fn update(&mut self, panel: u8, now_ms: u64) -> Option<u8> {
        if panel != self.last_panel {
            log::info!("panel {} -> {}", self.last_panel, panel);
            self.last_panel = panel;
            self.changed_at = Some(now_ms);
        }
        let at = self.changed_at?;
        (now_ms.saturating_sub(at) < PANEL_INDICATOR_MS).then_some(panel)
    }
}

impl Default for PanelChangeIndicator {
    fn default() -> Self { Self::new() }
}
