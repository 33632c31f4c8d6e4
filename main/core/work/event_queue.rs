use std::cmp::Reverse;
use std::collections::binary_heap::BinaryHeap;
use std::sync::Mutex;

use sim_time::emulated_time::EmulatedTime;

use super::event::Event;

/// A queue of [`Event`]s ordered by their times. Events with equal times are
/// returned in the order they were pushed.
#[derive(Debug)]
pub struct EventQueue {
    queue: BinaryHeap<Reverse<OrderedEvent>>,
    /// Push sequence number of the next event, used to break ties.
    next_push_order: u64,
    last_popped_event_time: EmulatedTime,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            next_push_order: 0,
            last_popped_event_time: EmulatedTime::SIMULATION_START,
        }
    }

    /// Push a new [`Event`] on to the queue.
    ///
    /// Will panic if the event time is earlier than the last popped event time
    /// (time moves backward).
    pub fn push(&mut self, event: Event) {
        // make sure time never moves backward
        assert!(event.time() >= self.last_popped_event_time);

        let order = self.next_push_order;
        self.next_push_order += 1;

        self.queue.push(Reverse(OrderedEvent { event, order }));
    }

    /// Pop the earliest [`Event`] from the queue.
    pub fn pop(&mut self) -> Option<Event> {
        let event = self.queue.pop().map(|x| x.0.event);

        // make sure time never moves backward
        if let Some(ref event) = event {
            assert!(event.time() >= self.last_popped_event_time);
            self.last_popped_event_time = event.time();
        }

        event
    }

    /// The time of the next [`Event`] (the time of the earliest event in the
    /// queue), or `None` if the queue is empty.
    pub fn next_event_time(&self) -> Option<EmulatedTime> {
        self.queue.peek().map(|x| x.0.event.time())
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Pairs an event with its push sequence number so the heap order is total:
/// by time, then by insertion order among equal times.
#[derive(Debug)]
struct OrderedEvent {
    event: Event,
    order: u64,
}

impl PartialEq for OrderedEvent {
    fn eq(&self, other: &Self) -> bool {
        // the sequence number is unique per queue
        self.event.time() == other.event.time() && self.order == other.order
    }
}

impl Eq for OrderedEvent {}

impl PartialOrd for OrderedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.event
            .time()
            .cmp(&other.event.time())
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// An [`EventQueue`] that any thread may push to while the owning thread
/// pops: multi-producer, single logical consumer, with concurrent peeks
/// allowed from other threads.
#[derive(Debug)]
pub struct ThreadSafeEventQueue {
    queue: Mutex<EventQueue>,
}

impl crate::utility::IsSend for ThreadSafeEventQueue {}
impl crate::utility::IsSync for ThreadSafeEventQueue {}

impl ThreadSafeEventQueue {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(EventQueue::new()),
        }
    }

    /// See [`EventQueue::push`].
    pub fn push(&self, event: Event) {
        self.queue.lock().unwrap().push(event)
    }

    /// See [`EventQueue::pop`].
    pub fn pop(&self) -> Option<Event> {
        self.queue.lock().unwrap().pop()
    }

    /// Pop the earliest event only if its time is strictly before `barrier`.
    ///
    /// The peek and the pop happen under one lock acquisition, so a
    /// concurrent push cannot slip an earlier event in between them.
    pub fn pop_if_before(&self, barrier: EmulatedTime) -> Option<Event> {
        let mut queue = self.queue.lock().unwrap();
        match queue.next_event_time() {
            Some(time) if time < barrier => queue.pop(),
            _ => None,
        }
    }

    /// See [`EventQueue::next_event_time`].
    pub fn next_event_time(&self) -> Option<EmulatedTime> {
        self.queue.lock().unwrap().next_event_time()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().unwrap().is_empty()
    }
}

impl Default for ThreadSafeEventQueue {
    fn default() -> Self {
        Self::new()
    }
}
