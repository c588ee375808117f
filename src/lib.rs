//! Deterministic headless runtime for a travel site's booking UI
//! widgets: the booking modal and the slide carousel.
//!
//! A [`Page`] is built from an HTML string; the widget controllers mount
//! against the parsed tree and are driven with synthetic input events
//! and a virtual clock. There is no real browser and no wall time, so
//! every run is reproducible:
//!
//! ```
//! use trip_widgets::Page;
//!
//! let html = r#"
//!     <div class='carousel'>
//!       <div class='slide' id='first'>A</div>
//!       <div class='slide' id='second'>B</div>
//!       <button class='carousel-next'>&gt;</button>
//!     </div>
//! "#;
//! let mut page = Page::from_html(html).unwrap();
//! page.assert_visible("#first").unwrap();
//! page.click(".carousel-next").unwrap();
//! page.assert_visible("#second").unwrap();
//! page.advance_time(6000).unwrap();
//! page.assert_visible("#first").unwrap();
//! ```

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;

mod carousel;
mod dom;
mod events;
mod html;
mod modal;
mod scheduler;
mod selector;

pub(crate) use carousel::*;
pub(crate) use dom::*;
pub(crate) use events::*;
pub(crate) use html::parse_html;
pub(crate) use modal::*;
pub use scheduler::PendingTimer;
pub(crate) use scheduler::{ScheduledTask, TimerAction};
pub(crate) use selector::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    Runtime(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl StdError for Error {}

#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) modal: Option<ModalWidget>,
    pub(crate) carousels: Vec<CarouselWidget>,
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: u64,
    pub(crate) timer_step_limit: usize,
    trace: bool,
    trace_events: bool,
    trace_timers: bool,
    trace_widgets: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
    trace_to_stderr: bool,
}

impl Page {
    /// Parses the markup and mounts every widget whose structural
    /// contract is present. Parse completion is the "structure ready"
    /// signal; widgets never observe a half-built tree.
    pub fn from_html(html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            modal: None,
            carousels: Vec::new(),
            task_queue: Vec::new(),
            now_ms: 0,
            next_timer_id: 1,
            next_task_order: 0,
            timer_step_limit: 10_000,
            trace: false,
            trace_events: true,
            trace_timers: true,
            trace_widgets: true,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
            trace_to_stderr: true,
        };
        page.mount_booking_modal()?;
        page.mount_carousels()?;
        Ok(page)
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_timers = enabled;
    }

    pub fn set_trace_widgets(&mut self, enabled: bool) {
        self.trace_widgets = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        self.dispatch_event(target, "click", None)?;
        Ok(())
    }

    /// Dispatches a keydown at the document root, where the carousel's
    /// arrow-key listeners live.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let root = self.dom.root;
        self.dispatch_event(root, "keydown", Some(key))?;
        Ok(())
    }

    pub fn pointer_enter(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseenter", None)?;
        Ok(())
    }

    pub fn pointer_leave(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseleave", None)?;
        Ok(())
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input", None)?;
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event, None)?;
        Ok(())
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target).ok_or_else(|| Error::TypeMismatch {
            selector: selector.to_string(),
            expected: "form control".into(),
            actual: "non-element".into(),
        })
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn is_visible(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        Ok(self.dom.is_visible(target))
    }

    pub fn exists(&self, selector: &str) -> bool {
        matches!(self.dom.query_selector(selector), Ok(Some(_)))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let actual = self.value(selector)?;
        if actual != expected {
            let target = self.select_one(selector)?;
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.dom.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.attr(target, name);
        if actual.as_deref() != Some(expected) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.unwrap_or_else(|| "<absent>".into()),
                dom_snippet: self.dom.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_visible(&self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.dom.is_visible(target) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "visible".into(),
                actual: "hidden".into(),
                dom_snippet: self.dom.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_hidden(&self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.is_visible(target) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "hidden".into(),
                actual: "visible".into(),
                dom_snippet: self.dom.node_snippet(target),
            });
        }
        Ok(())
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace_events {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_timer_line(&mut self, line: String) {
        if self.trace_timers {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_widget_line(&mut self, line: String) {
        if self.trace_widgets {
            self.trace_line(line);
        }
    }

    fn trace_line(&mut self, line: String) {
        if !self.trace {
            return;
        }
        if self.trace_to_stderr {
            eprintln!("{line}");
        }
        self.trace_logs.push(line);
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
    }
}
