//! One-shot deferred tasks on the main loop.
//!
//! Two kinds of deadline exist: a wall-clock delay (the navigation
//! cooldown) and "the next frame" (the recompute after closing a card).
//! Nothing runs off-thread; the host calls [`Scheduler::advance`] once per
//! frame and executes whatever it returns.

/// Work the controller defers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// End the navigation cooldown.
    SettleTransition,
    /// Re-derive every card transform.
    RecomputeLayout,
}

/// Cancel handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
enum Deadline {
    /// Due once the clock reaches this many milliseconds.
    At(u64),
    /// Due on the first frame after the one it was scheduled in.
    AfterFrame(u64),
}

#[derive(Debug)]
struct Pending {
    id: u64,
    task: Deferred,
    deadline: Deadline,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    frame: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay_ms` has passed since `now_ms`.
    pub fn after(&mut self, now_ms: u64, delay_ms: u64, task: Deferred) -> TaskHandle {
        self.push(task, Deadline::At(now_ms.saturating_add(delay_ms)))
    }

    /// Run `task` on the next frame.
    pub fn next_frame(&mut self, task: Deferred) -> TaskHandle {
        self.push(task, Deadline::AfterFrame(self.frame))
    }

    /// Drop a task that has not fired yet.  Returns `false` if it already
    /// fired or was cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != handle.0);
        self.pending.len() != before
    }

    /// Start a new frame at `now_ms` and hand back every task now due, in
    /// the order they were scheduled.  Tasks scheduled while the caller
    /// handles these belong to the new frame and wait for the next one.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Deferred> {
        self.frame += 1;
        let frame = self.frame;

        let mut due = Vec::new();
        self.pending.retain(|p| {
            let ready = match p.deadline {
                Deadline::At(at) => now_ms >= at,
                Deadline::AfterFrame(scheduled) => scheduled < frame,
            };
            if ready {
                due.push((p.id, p.task));
            }
            !ready
        });
        due.sort_by_key(|&(id, _)| id);
        due.into_iter().map(|(_, task)| task).collect()
    }

    fn push(&mut self, task: Deferred, deadline: Deadline) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push(Pending { id, task, deadline });
        TaskHandle(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_task_waits_for_its_deadline() {
        let mut s = Scheduler::new();
        s.after(100, 1000, Deferred::SettleTransition);

        assert!(s.advance(500).is_empty());
        assert!(s.advance(1099).is_empty());
        assert_eq!(s.advance(1100), vec![Deferred::SettleTransition]);
        assert!(s.advance(5000).is_empty());
    }

    #[test]
    fn frame_task_fires_on_the_following_frame_only() {
        let mut s = Scheduler::new();
        s.next_frame(Deferred::RecomputeLayout);

        assert_eq!(s.advance(0), vec![Deferred::RecomputeLayout]);
        assert!(s.advance(0).is_empty());
    }

    #[test]
    fn frame_task_scheduled_after_advance_waits_one_more_frame() {
        let mut s = Scheduler::new();
        s.advance(0);
        s.next_frame(Deferred::RecomputeLayout);
        assert_eq!(s.advance(16), vec![Deferred::RecomputeLayout]);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let handle = s.after(0, 10, Deferred::SettleTransition);
        assert!(s.cancel(handle));
        assert!(!s.cancel(handle));
        assert!(s.advance(1000).is_empty());
    }

    #[test]
    fn fired_task_can_no_longer_be_cancelled() {
        let mut s = Scheduler::new();
        let handle = s.next_frame(Deferred::RecomputeLayout);
        assert_eq!(s.advance(0), vec![Deferred::RecomputeLayout]);
        assert!(!s.cancel(handle));
    }

    #[test]
    fn due_tasks_come_back_in_schedule_order() {
        let mut s = Scheduler::new();
        s.after(0, 5, Deferred::SettleTransition);
        s.next_frame(Deferred::RecomputeLayout);
        assert_eq!(
            s.advance(10),
            vec![Deferred::SettleTransition, Deferred::RecomputeLayout]
        );
    }
}
