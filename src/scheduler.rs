use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerAction {
    CarouselAdvance(usize),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: u64,
    pub(crate) interval_ms: Option<i64>,
    pub(crate) action: TimerAction,
}

/// Snapshot of a queued timer, for inspection from tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: u64,
    pub interval_ms: Option<i64>,
}

impl Page {
    /// Virtual clock reading; nothing in the crate touches wall time.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub(crate) fn schedule_interval(&mut self, interval_ms: i64, action: TimerAction) -> i64 {
        let delay_ms = interval_ms.max(0);
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        let due_at = self.now_ms.saturating_add(delay_ms);
        self.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            interval_ms: Some(delay_ms),
            action,
        });
        self.trace_timer_line(format!(
            "[timer] schedule id={id} due_at={due_at} interval_ms={delay_ms}"
        ));
        id
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != timer_id);
        let existed = self.task_queue.len() != before;
        if existed {
            self.trace_timer_line(format!("[timer] clear id={timer_id}"));
        }
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.task_queue.len();
        self.task_queue.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                interval_ms: task.interval_ms,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.now_ms;
        self.now_ms = self.now_ms.saturating_add(delta_ms);
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran_due={}",
            delta_ms, from, self.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.now_ms
            )));
        }
        let from = self.now_ms;
        self.now_ms = target_ms;
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran_due={}",
            from, self.now_ms, ran
        ));
        Ok(())
    }

    /// Runs the earliest queued timer, jumping the clock to its due time.
    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };

        let task = self.task_queue.remove(next_idx);
        if task.due_at > self.now_ms {
            self.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_due_timers_internal()?;
        self.trace_timer_line(format!("[timer] run_due now_ms={} ran={}", self.now_ms, ran));
        Ok(ran)
    }

    fn run_due_timers_internal(&mut self) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.next_task_index(Some(self.now_ms)) {
            steps += 1;
            if steps > self.timer_step_limit {
                return Err(self.timer_step_limit_error(self.timer_step_limit, steps));
            }
            let task = self.task_queue.remove(next_idx);
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    fn timer_step_limit_error(&self, max_steps: usize, steps: usize) -> Error {
        let next_task_desc = self
            .next_task_index(Some(self.now_ms))
            .and_then(|idx| self.task_queue.get(idx))
            .map(|task| {
                let interval_desc = task
                    .interval_ms
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "none".into());
                format!(
                    "id={},due_at={},order={},interval_ms={}",
                    task.id, task.due_at, task.order, interval_desc
                )
            })
            .unwrap_or_else(|| "none".into());

        Error::Runtime(format!(
            "timer run exceeded max steps (possible uncleared interval): limit={max_steps}, steps={steps}, now_ms={}, pending_tasks={}, next_task={}",
            self.now_ms,
            self.task_queue.len(),
            next_task_desc
        ))
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| {
                if let Some(limit) = due_limit {
                    task.due_at <= limit
                } else {
                    true
                }
            })
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        let interval_desc = task
            .interval_ms
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} interval_ms={} now_ms={}",
            task.id, task.due_at, interval_desc, self.now_ms
        ));

        self.run_timer_action(task.action)?;

        if let Some(interval_ms) = task.interval_ms {
            let due_at = task.due_at.saturating_add(interval_ms);
            let order = self.next_task_order;
            self.next_task_order += 1;
            self.task_queue.push(ScheduledTask {
                id: task.id,
                due_at,
                order,
                interval_ms: Some(interval_ms),
                action: task.action,
            });
            self.trace_timer_line(format!(
                "[timer] requeue id={} due_at={} interval_ms={}",
                task.id, due_at, interval_ms
            ));
        }

        Ok(())
    }

    fn run_timer_action(&mut self, action: TimerAction) -> Result<()> {
        match action {
            TimerAction::CarouselAdvance(carousel) => self.carousel_step(carousel, 1),
        }
    }
}
