use std::{cmp::Reverse, collections::BinaryHeap};

use super::time::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScheduledTask {
    SampleTick { generation: u64 },
    CalibrationTimeout { cycle: u64 },
    OverlayRestore { banner: u64 },
    TelemetryReport,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct QueueEntry {
    due: Millis,
    sequence: u64,
    task: ScheduledTask,
}

/// Single threaded timer queue. Everything the controller does runs from
/// here, one task at a time, in due order and then in scheduling order.
#[derive(Debug, Default)]
pub struct TaskQueue {
    now: Millis,
    next_sequence: u64,
    pending: BinaryHeap<Reverse<QueueEntry>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn schedule_after(&mut self, delay: Millis, task: ScheduledTask) {
        let entry = QueueEntry {
            due: self.now.saturating_add(delay),
            sequence: self.next_sequence,
            task,
        };
        self.next_sequence += 1;
        self.pending.push(Reverse(entry));
    }

    pub fn pop_due(&mut self, until: Millis) -> Option<ScheduledTask> {
        let due = self.pending.peek()?.0.due;
        if due > until {
            return None;
        }
        let Reverse(entry) = self.pending.pop()?;
        self.now = self.now.max(entry.due);
        Some(entry.task)
    }

    pub fn advance_clock(&mut self, to: Millis) {
        self.now = self.now.max(to);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_then_schedule_order() {
        let mut queue = TaskQueue::new();
        queue.schedule_after(20, ScheduledTask::SampleTick { generation: 1 });
        queue.schedule_after(10, ScheduledTask::TelemetryReport);
        queue.schedule_after(20, ScheduledTask::CalibrationTimeout { cycle: 1 });

        assert_eq!(queue.pop_due(100), Some(ScheduledTask::TelemetryReport));
        assert_eq!(queue.now(), 10);
        assert_eq!(
            queue.pop_due(100),
            Some(ScheduledTask::SampleTick { generation: 1 })
        );
        assert_eq!(
            queue.pop_due(100),
            Some(ScheduledTask::CalibrationTimeout { cycle: 1 })
        );
        assert_eq!(queue.now(), 20);
        assert!(queue.is_empty());
    }

    #[test]
    fn leaves_future_tasks_alone() {
        let mut queue = TaskQueue::new();
        queue.schedule_after(1000, ScheduledTask::CalibrationTimeout { cycle: 3 });

        assert_eq!(queue.pop_due(999), None);
        queue.advance_clock(999);
        assert_eq!(queue.now(), 999);
        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.pop_due(1000),
            Some(ScheduledTask::CalibrationTimeout { cycle: 3 })
        );
    }

    #[test]
    fn delays_are_relative_to_the_task_being_run() {
        let mut queue = TaskQueue::new();
        queue.schedule_after(20, ScheduledTask::SampleTick { generation: 0 });
        queue.pop_due(500);
        queue.schedule_after(20, ScheduledTask::SampleTick { generation: 0 });

        assert_eq!(queue.pop_due(39), None);
        assert_eq!(
            queue.pop_due(40),
            Some(ScheduledTask::SampleTick { generation: 0 })
        );
    }
}
