use super::*;

/// What a listener does when its event fires. The page executes these
/// against the mounted widget controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WidgetAction {
    OpenBookingModal,
    DismissBookingModal,
    /// Document-level click guard: dismisses only when the event target
    /// is the dialog container itself.
    BackdropDismiss,
    CarouselNext(usize),
    CarouselPrevious(usize),
    CarouselSelect { carousel: usize, slide: usize },
    CarouselKeys(usize),
    CarouselPause(usize),
    CarouselResume(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) key: Option<String>,
    pub(crate) time_stamp_ms: i64,
}

impl EventState {
    pub(crate) fn new(
        event_type: &str,
        target: NodeId,
        time_stamp_ms: i64,
        key: Option<&str>,
    ) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            key: key.map(str::to_string),
            time_stamp_ms,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Listener {
    pub(crate) action: WidgetAction,
}

#[derive(Debug, Default)]
pub(crate) struct ListenerStore {
    entries: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: &str, action: WidgetAction) {
        self.entries
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(Listener { action });
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.entries
            .get(&node_id)
            .and_then(|by_event| by_event.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

/// Pointer enter/leave events fire on their target only, as in the DOM.
pub(crate) fn event_bubbles(event_type: &str) -> bool {
    !matches!(event_type, "mouseenter" | "mouseleave" | "focus" | "blur")
}

impl Page {
    pub(crate) fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
        key: Option<&str>,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, target, self.now_ms, key);

        let mut path = vec![target];
        if event_bubbles(event_type) {
            let mut cursor = self.dom.parent(target);
            while let Some(node) = cursor {
                path.push(node);
                cursor = self.dom.parent(node);
            }
        }

        for node in path {
            event.current_target = node;
            self.invoke_listeners(node, &mut event)?;
        }

        self.trace_event_line(format!(
            "[event] type={} target={} at={}",
            event.event_type, event.target.0, event.time_stamp_ms
        ));
        Ok(event)
    }

    fn invoke_listeners(&mut self, node: NodeId, event: &mut EventState) -> Result<()> {
        let listeners = self.listeners.get(node, &event.event_type);
        for listener in listeners {
            self.run_widget_action(listener.action, event)?;
        }
        Ok(())
    }

    pub(crate) fn run_widget_action(
        &mut self,
        action: WidgetAction,
        event: &EventState,
    ) -> Result<()> {
        match action {
            WidgetAction::OpenBookingModal => self.modal_open_for_trigger(event.current_target),
            WidgetAction::DismissBookingModal => self.modal_dismiss(),
            WidgetAction::BackdropDismiss => {
                let on_backdrop = self
                    .modal
                    .as_ref()
                    .is_some_and(|widget| widget.container == event.target);
                if on_backdrop {
                    self.modal_dismiss()
                } else {
                    Ok(())
                }
            }
            WidgetAction::CarouselNext(carousel) => self.carousel_step(carousel, 1),
            WidgetAction::CarouselPrevious(carousel) => self.carousel_step(carousel, -1),
            WidgetAction::CarouselSelect { carousel, slide } => {
                self.carousel_select(carousel, slide)
            }
            WidgetAction::CarouselKeys(carousel) => match event.key.as_deref() {
                Some("ArrowRight") => self.carousel_step(carousel, 1),
                Some("ArrowLeft") => self.carousel_step(carousel, -1),
                _ => Ok(()),
            },
            WidgetAction::CarouselPause(carousel) => self.carousel_pause(carousel),
            WidgetAction::CarouselResume(carousel) => self.carousel_resume(carousel),
        }
    }
}
