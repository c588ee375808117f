use super::*;

pub(crate) const CAROUSEL_ADVANCE_INTERVAL_MS: i64 = 6_000;

/// Per-instance carousel state; every `.carousel` container on the page
/// mounts independently.
#[derive(Debug, Clone)]
pub(crate) struct CarouselWidget {
    pub(crate) slides: Vec<NodeId>,
    pub(crate) dots: Vec<NodeId>,
    pub(crate) index: usize,
    pub(crate) timer: Option<i64>,
}

impl Page {
    pub(crate) fn mount_carousels(&mut self) -> Result<()> {
        for root in self.dom.query_selector_all(".carousel")? {
            self.mount_carousel(root)?;
        }
        Ok(())
    }

    fn mount_carousel(&mut self, root: NodeId) -> Result<()> {
        let slides = self.dom.query_selector_all_from(root, ".slide")?;
        if slides.is_empty() {
            self.trace_widget_line("[carousel] no slides, not mounted".into());
            return Ok(());
        }

        let carousel = self.carousels.len();

        let mut dots = Vec::new();
        if let Some(container) = self.dom.query_selector_from(root, ".carousel-dots")? {
            for slide in 0..slides.len() {
                let mut attrs = HashMap::new();
                attrs.insert("class".to_string(), "dot".to_string());
                attrs.insert("aria-label".to_string(), format!("Slide {}", slide + 1));
                let dot = self.dom.create_element(container, "button".to_string(), attrs);
                self.listeners
                    .add(dot, "click", WidgetAction::CarouselSelect { carousel, slide });
                dots.push(dot);
            }
        }

        if let Some(next) = self.dom.query_selector_from(root, ".carousel-next")? {
            self.listeners
                .add(next, "click", WidgetAction::CarouselNext(carousel));
        }
        if let Some(prev) = self.dom.query_selector_from(root, ".carousel-prev")? {
            self.listeners
                .add(prev, "click", WidgetAction::CarouselPrevious(carousel));
        }
        self.listeners
            .add(self.dom.root, "keydown", WidgetAction::CarouselKeys(carousel));
        self.listeners
            .add(root, "mouseenter", WidgetAction::CarouselPause(carousel));
        self.listeners
            .add(root, "mouseleave", WidgetAction::CarouselResume(carousel));

        self.carousels.push(CarouselWidget {
            slides,
            dots,
            index: 0,
            timer: None,
        });

        self.carousel_show(carousel, 0)?;
        let timer = self.schedule_interval(
            CAROUSEL_ADVANCE_INTERVAL_MS,
            TimerAction::CarouselAdvance(carousel),
        );
        self.carousels[carousel].timer = Some(timer);
        Ok(())
    }

    /// Makes exactly one slide visible and, when indicators exist, marks
    /// exactly the matching one active.
    fn carousel_show(&mut self, carousel: usize, index: usize) -> Result<()> {
        let slides = self.carousels[carousel].slides.clone();
        for (at, slide) in slides.iter().enumerate() {
            let display = if at == index { "block" } else { "none" };
            self.dom.style_set(*slide, "display", display)?;
        }
        let dots = self.carousels[carousel].dots.clone();
        for (at, dot) in dots.iter().enumerate() {
            self.dom.class_toggle(*dot, "active", at == index)?;
        }
        self.carousels[carousel].index = index;
        self.trace_widget_line(format!("[carousel] show carousel={carousel} index={index}"));
        Ok(())
    }

    pub(crate) fn carousel_step(&mut self, carousel: usize, delta: i64) -> Result<()> {
        let Some(widget) = self.carousels.get(carousel) else {
            return Ok(());
        };
        let count = widget.slides.len() as i64;
        let next = (widget.index as i64 + delta).rem_euclid(count) as usize;
        self.carousel_show(carousel, next)
    }

    pub(crate) fn carousel_select(&mut self, carousel: usize, slide: usize) -> Result<()> {
        let Some(widget) = self.carousels.get(carousel) else {
            return Ok(());
        };
        if slide >= widget.slides.len() {
            return Ok(());
        }
        self.carousel_show(carousel, slide)
    }

    pub(crate) fn carousel_pause(&mut self, carousel: usize) -> Result<()> {
        let Some(widget) = self.carousels.get_mut(carousel) else {
            return Ok(());
        };
        if let Some(timer) = widget.timer.take() {
            self.clear_timer(timer);
            self.trace_widget_line(format!("[carousel] pause carousel={carousel}"));
        }
        Ok(())
    }

    /// Cancel-then-restart: never leaves two live timers for one
    /// instance, so hover cycling cannot double the advance rate.
    pub(crate) fn carousel_resume(&mut self, carousel: usize) -> Result<()> {
        let Some(widget) = self.carousels.get_mut(carousel) else {
            return Ok(());
        };
        if let Some(timer) = widget.timer.take() {
            self.clear_timer(timer);
        }
        let timer = self.schedule_interval(
            CAROUSEL_ADVANCE_INTERVAL_MS,
            TimerAction::CarouselAdvance(carousel),
        );
        self.carousels[carousel].timer = Some(timer);
        self.trace_widget_line(format!("[carousel] resume carousel={carousel}"));
        Ok(())
    }
}
