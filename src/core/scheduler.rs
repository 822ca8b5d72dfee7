//! Cooperative timer queue driven by the tick loop.
//!
//! A task is a delay plus a continuation value. The owner advances the clock
//! once per tick and drains due continuations with `pop_due`, interpreting
//! each one itself. Cancelling removes the continuation from the pending set.

/// Identifies a scheduled continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TaskId,
    due: f64,
    task: T,
}

/// A continuation whose due time has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct DueTask<T> {
    pub id: TaskId,
    pub due: f64,
    pub task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: f64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Schedules `task` to run `delay` seconds from now.
    pub fn schedule(&mut self, delay: f64, task: T) -> TaskId {
        self.schedule_at(self.now + delay.max(0.0), task)
    }

    /// Schedules `task` at an absolute time. Past times fire on the next drain.
    pub fn schedule_at(&mut self, due: f64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due, task });
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.swap_remove(index).task)
    }

    pub fn cancel_all(&mut self) -> Vec<T> {
        self.pending.drain(..).map(|p| p.task).collect()
    }

    pub fn advance(&mut self, dt: f64) {
        self.now += dt.max(0.0);
    }

    /// Removes and returns the earliest due task (ties in scheduling order).
    pub fn pop_due(&mut self) -> Option<DueTask<T>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= self.now)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let p = self.pending.swap_remove(index);
        Some(DueTask {
            id: p.id,
            due: p.due,
            task: p.task,
        })
    }

    /// Advances the clock and drains every task that became due.
    pub fn tick(&mut self, dt: f64) -> Vec<DueTask<T>> {
        self.advance(dt);
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due() {
            fired.push(task);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.5, "despawn");

        assert!(scheduler.tick(1.0).is_empty());
        let fired = scheduler.tick(0.5);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].task, "despawn");
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_tasks_drain_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(3.0, 3);
        scheduler.schedule(1.0, 1);
        scheduler.schedule(2.0, 2);

        let fired: Vec<i32> = scheduler.tick(5.0).into_iter().map(|d| d.task).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, 'a');
        scheduler.schedule(1.0, 'b');
        let fired: Vec<char> = scheduler.tick(1.0).into_iter().map(|d| d.task).collect();
        assert_eq!(fired, vec!['a', 'b']);
    }

    #[test]
    fn test_cancel_removes_continuation() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(1.0, "effect");
        assert_eq!(scheduler.cancel(id), Some("effect"));
        assert_eq!(scheduler.cancel(id), None);
        assert!(scheduler.tick(2.0).is_empty());
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1.0, 1);
        scheduler.schedule(2.0, 2);
        assert_eq!(scheduler.cancel_all().len(), 2);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_schedule_at_past_time_fires_on_next_drain() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(5.0);
        scheduler.schedule_at(4.0, "late");
        let due = scheduler.pop_due().unwrap();
        assert_eq!(due.due, 4.0);
    }

    #[test]
    fn test_negative_dt_does_not_rewind() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.advance(1.0);
        scheduler.advance(-3.0);
        assert_eq!(scheduler.now(), 1.0);
    }
}
