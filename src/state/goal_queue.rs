use rink_api::GoalEvent;
use std::collections::VecDeque;

/// How many goals can pile up while a banner is already showing.
pub const GOAL_QUEUE_CAPACITY: usize = 4;

/// Bounded FIFO of goal facts awaiting display. Ids deduplicate across the
/// whole queue; at capacity the oldest undisplayed goal is dropped.
#[derive(Debug, Default)]
pub struct GoalQueue {
    events: VecDeque<GoalEvent>,
}

impl GoalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, event: GoalEvent) -> bool {
        if event.event_id == 0 {
            return false;
        }
        if self.events.iter().any(|e| e.event_id == event.event_id) {
            return false;
        }
        if self.events.len() >= GOAL_QUEUE_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
        true
    }

    pub fn dequeue(&mut self) -> Option<GoalEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: u64) -> GoalEvent {
        GoalEvent {
            event_id: id,
            scorer: format!("player {id}"),
            ..GoalEvent::default()
        }
    }

    #[test]
    fn dequeues_in_fifo_order() {
        let mut q = GoalQueue::new();
        assert!(q.enqueue(goal(1)));
        assert!(q.enqueue(goal(2)));
        assert_eq!(q.dequeue().map(|g| g.event_id), Some(1));
        assert_eq!(q.dequeue().map(|g| g.event_id), Some(2));
        assert!(q.dequeue().is_none());
    }

    #[test]
    fn rejects_zero_and_duplicate_ids() {
        let mut q = GoalQueue::new();
        assert!(!q.enqueue(goal(0)));
        assert!(q.enqueue(goal(7)));
        assert!(!q.enqueue(goal(7)));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn full_queue_evicts_the_oldest() {
        let mut q = GoalQueue::new();
        for id in 1..=GOAL_QUEUE_CAPACITY as u64 + 1 {
            assert!(q.enqueue(goal(id)));
        }
        assert_eq!(q.len(), GOAL_QUEUE_CAPACITY);
        assert_eq!(q.dequeue().map(|g| g.event_id), Some(2));
    }

    #[test]
    fn dedup_spans_the_whole_queue_not_just_the_tail() {
        let mut q = GoalQueue::new();
        q.enqueue(goal(1));
        q.enqueue(goal(2));
        q.enqueue(goal(3));
        assert!(!q.enqueue(goal(1)));
        assert_eq!(q.len(), 3);
    }
}
