use super::*;

/// Resolved references into the booking dialog's markup. Inner elements
/// are optional; a missing one disables only the behavior that needs it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ModalWidget {
    pub(crate) container: NodeId,
    pub(crate) title: Option<NodeId>,
    pub(crate) meta: Option<NodeId>,
    pub(crate) trip_id: Option<NodeId>,
}

impl Page {
    pub(crate) fn mount_booking_modal(&mut self) -> Result<()> {
        let Some(container) = self.dom.query_selector("#booking-modal")? else {
            self.trace_widget_line("[modal] no container, not mounted".into());
            return Ok(());
        };

        let widget = ModalWidget {
            container,
            title: self.dom.query_selector("#modal-trip-title")?,
            meta: self.dom.query_selector("#modal-trip-meta")?,
            trip_id: self.dom.query_selector("#modal-trip-id")?,
        };

        for opener in self.dom.query_selector_all(".open-book-modal")? {
            self.listeners
                .add(opener, "click", WidgetAction::OpenBookingModal);
        }
        if let Some(close) = self.dom.query_selector("#booking-modal-close")? {
            self.listeners
                .add(close, "click", WidgetAction::DismissBookingModal);
        }
        self.listeners
            .add(self.dom.root, "click", WidgetAction::BackdropDismiss);

        self.modal = Some(widget);
        Ok(())
    }

    /// Opens the dialog for the trip associated with a clicked activation
    /// element. Each field resolves through an ordered chain; activation
    /// without a resolvable trip identifier leaves the dialog untouched.
    pub(crate) fn modal_open_for_trigger(&mut self, trigger: NodeId) -> Result<()> {
        let Some(widget) = self.modal else {
            return Ok(());
        };

        let card = self.dom.closest(trigger, ".card")?;
        let sources = [Some(trigger), card];

        let Some(trip_id) = first_present_attr(&self.dom, &sources, "data-trip-id") else {
            self.trace_widget_line("[modal] open skipped: no trip id resolvable".into());
            return Ok(());
        };

        let title = match first_present_attr(&self.dom, &sources, "data-trip-title") {
            Some(value) => value,
            None => match card {
                Some(card) => match self.dom.query_selector_from(card, ".title")? {
                    Some(node) => self.dom.text_content(node).trim().to_string(),
                    None => String::new(),
                },
                None => String::new(),
            },
        };
        let destination =
            first_present_attr(&self.dom, &sources, "data-trip-destination").unwrap_or_default();
        let date = first_present_attr(&self.dom, &sources, "data-trip-date").unwrap_or_default();

        if let Some(node) = widget.title {
            self.dom.set_text_content(node, &format!("Book: {title}"))?;
        }
        if let Some(node) = widget.meta {
            let meta_text = if destination.is_empty() {
                date.clone()
            } else {
                format!("{destination} • {date}")
            };
            self.dom.set_text_content(node, &meta_text)?;
        }
        if let Some(node) = widget.trip_id {
            self.dom.set_value(node, &trip_id)?;
        }

        self.dom.style_set(widget.container, "display", "block")?;
        self.dom.set_attr(widget.container, "aria-hidden", "false")?;
        self.trace_widget_line(format!("[modal] open trip_id={trip_id}"));
        Ok(())
    }

    pub(crate) fn modal_dismiss(&mut self) -> Result<()> {
        let Some(widget) = self.modal else {
            return Ok(());
        };
        self.dom.style_set(widget.container, "display", "none")?;
        self.dom.set_attr(widget.container, "aria-hidden", "true")?;
        self.trace_widget_line("[modal] dismiss".into());
        Ok(())
    }
}

/// First present value among the named sources, in order. An attribute
/// that is missing or empty does not count as present, matching the
/// falsy-fallback behavior booking pages rely on.
pub(crate) fn first_present_attr(
    dom: &Dom,
    sources: &[Option<NodeId>],
    name: &str,
) -> Option<String> {
    sources
        .iter()
        .flatten()
        .find_map(|node| dom.attr(*node, name).filter(|value| !value.is_empty()))
}
