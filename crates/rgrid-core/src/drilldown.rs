//! Date label clicks turned into navigation notifications.

use std::fmt;

use chrono::NaiveDateTime;

use crate::view::View;

/// The user interaction that triggered a drilldown.
pub trait Interaction {
    /// Suppresses the interaction's default behaviour (e.g. link navigation).
    fn prevent_default(&mut self);
}

/// A click on a date label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderClick {
    default_prevented: bool,
}

impl HeaderClick {
    /// Whether the default behaviour was suppressed.
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl Interaction for HeaderClick {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

type DrillDownCallback<'a> = Box<dyn FnMut(NaiveDateTime, View) + 'a>;

/// Forwards header clicks to the host's `on_drill_down` callback.
#[derive(Default)]
pub struct DrilldownDispatcher<'a> {
    on_drill_down: Option<DrillDownCallback<'a>>,
}

impl fmt::Debug for DrilldownDispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrilldownDispatcher")
            .field("on_drill_down", &self.on_drill_down.is_some())
            .finish()
    }
}

impl<'a> DrilldownDispatcher<'a> {
    /// Creates a dispatcher with no callback registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the navigation callback.
    #[must_use]
    pub fn on_drill_down(mut self, callback: impl FnMut(NaiveDateTime, View) + 'a) -> Self {
        self.on_drill_down = Some(Box::new(callback));
        self
    }

    /// Whether a callback is registered.
    pub const fn has_callback(&self) -> bool {
        self.on_drill_down.is_some()
    }

    /// Suppresses the click's default behaviour, then notifies the callback.
    ///
    /// Without a callback only the suppression happens.
    pub fn handle_header_click(
        &mut self,
        date: NaiveDateTime,
        view: View,
        interaction: &mut dyn Interaction,
    ) {
        interaction.prevent_default();

        match self.on_drill_down.as_mut() {
            Some(callback) => {
                tracing::debug!(%date, %view, "drilldown");
                callback(date, view);
            }
            None => tracing::trace!(%date, %view, "drilldown ignored, no callback"),
        }
    }
}
