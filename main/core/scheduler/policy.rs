//! The host-pinned scheduling policy.
//!
//! Each simulated host is assigned to exactly one worker thread for the
//! simulation's lifetime. Within a scheduling round a worker drains one host
//! completely (all events strictly before the round's barrier) before moving
//! on to the next host it owns, and visits each of its hosts at most once per
//! round. Any thread may deliver events to any host's queue; delivery applies
//! a causality adjustment so an event never lands in the past of a host whose
//! worker has already advanced.

use std::collections::{HashMap, VecDeque};

use atomic_refcell::AtomicRefCell;
use log::debug;

use sim_time::emulated_time::EmulatedTime;
use sim_time::simulation_time::SimulationTime;
use sim_time::HostId;

use crate::core::work::event::Event;
use crate::core::work::event_queue::ThreadSafeEventQueue;
use crate::utility::Magic;

/// The identifier of a worker thread. Assigned by the embedder when hosts are
/// distributed over workers; stable for the thread's lifetime.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ThreadId(u32);

impl From<u32> for ThreadId {
    fn from(i: u32) -> Self {
        ThreadId(i)
    }
}

impl From<ThreadId> for u32 {
    fn from(i: ThreadId) -> Self {
        i.0
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A worker thread's run state.
#[derive(Debug)]
struct ThreadState {
    /// Hosts assigned to this worker that may still yield an event this round.
    unprocessed: VecDeque<HostId>,
    /// Hosts already drained below the barrier this round.
    processed: VecDeque<HostId>,
    /// The barrier of the round this worker is currently in.
    current_barrier: SimulationTime,
}

impl ThreadState {
    fn new() -> Self {
        Self {
            unprocessed: VecDeque::new(),
            processed: VecDeque::new(),
            current_barrier: SimulationTime::ZERO,
        }
    }

    /// Start a new round at `barrier`: every host processed in the previous
    /// round becomes eligible again, in the order it finished.
    fn begin_round(&mut self, barrier: SimulationTime) {
        self.current_barrier = barrier;

        if self.unprocessed.is_empty() {
            // the common case between rounds
            std::mem::swap(&mut self.unprocessed, &mut self.processed);
        } else {
            self.unprocessed.append(&mut self.processed);
        }
    }
}

/// Decides which host a worker thread services next.
///
/// The policy owns one [`ThreadSafeEventQueue`] per host and one run state per
/// worker. [`add_host`](Self::add_host) is setup-only and takes `&mut self`;
/// during the running phase every operation takes `&self`: the host and
/// thread registries are read-only, queues are internally synchronized, and a
/// worker's run state is only ever borrowed by the worker that owns it
/// (enforced at runtime by [`AtomicRefCell`]).
#[derive(Debug)]
pub struct SchedulerPolicy {
    magic: Magic<0x5cd19e40>,
    hosts: HashMap<HostId, ThreadSafeEventQueue>,
    threads: HashMap<ThreadId, AtomicRefCell<ThreadState>>,
}

impl crate::utility::IsSend for SchedulerPolicy {}
impl crate::utility::IsSync for SchedulerPolicy {}

impl SchedulerPolicy {
    pub fn new() -> Self {
        Self {
            magic: Magic::new(),
            hosts: HashMap::new(),
            threads: HashMap::new(),
        }
    }

    /// Assign `host` to `thread`.
    ///
    /// Must be called during simulation setup, before any worker starts
    /// running; `&mut self` enforces the required serialization. Each host
    /// must be added exactly once.
    pub fn add_host(&mut self, host: HostId, thread: ThreadId) {
        self.magic.debug_check();

        // each host has its own queue
        self.hosts.entry(host).or_default();

        // each thread keeps track of the hosts it needs to run
        let tstate = self
            .threads
            .entry(thread)
            .or_insert_with(|| AtomicRefCell::new(ThreadState::new()));
        tstate.get_mut().unprocessed.push_back(host);
    }

    /// Deliver `event` into `dst_host`'s queue and return the time the event
    /// was finally scheduled at.
    ///
    /// Inter-host events must be properly delayed so the event won't show up
    /// at another host before the next scheduling interval. If the policy
    /// guaranteed to always run the minimum-time event across all of a
    /// thread's assigned hosts, the adjustment would only be needed when the
    /// source and destination threads differ. But this policy lets a thread
    /// run all events from a given host before moving on to the next host, so
    /// the time must be adjusted whenever the source and destination hosts
    /// are not the same.
    ///
    /// Panics if `dst_host` was never registered.
    pub fn push(
        &self,
        mut event: Event,
        src_host: HostId,
        dst_host: HostId,
        barrier: SimulationTime,
    ) -> SimulationTime {
        self.magic.debug_check();

        let barrier = EmulatedTime::from_abs_simtime(barrier);

        if src_host != dst_host && event.time() < barrier {
            debug!(
                "Inter-host event time {:?} changed to {:?} to ensure event causality",
                event.time(),
                barrier,
            );
            event.set_time(barrier);
        }

        let time = event.time();

        // 'deliver' the event to the destination queue
        self.host_queue(dst_host).push(event);

        time.to_abs_simtime()
    }

    /// Dequeue the next event the calling worker should run: the earliest
    /// event strictly before `barrier` from the host at the head of the
    /// worker's unprocessed list. The host stays at the head until it is
    /// drained below the barrier, so repeated calls keep returning events
    /// from the same host before the next host is attempted.
    ///
    /// A `barrier` larger than any seen before starts a new round, making
    /// every host eligible again. Returns `None` once all hosts assigned to
    /// `thread` are drained below `barrier`, or if `thread` was never
    /// assigned any hosts.
    pub fn pop(&self, thread: ThreadId, barrier: SimulationTime) -> Option<Event> {
        self.magic.debug_check();

        // if there is no state, this thread didn't get any hosts assigned to it
        let Some(tstate) = self.threads.get(&thread) else {
            // this thread will remain idle
            return None;
        };
        let mut tstate = tstate.borrow_mut();

        if barrier > tstate.current_barrier {
            tstate.begin_round(barrier);
        }

        let barrier = EmulatedTime::from_abs_simtime(barrier);

        while let Some(host) = tstate.unprocessed.front().copied() {
            if let Some(event) = self.host_queue(host).pop_if_before(barrier) {
                return Some(event);
            }

            // this host is done; store it in the processed list and then try
            // the next host if we still have more
            tstate.unprocessed.pop_front();
            tstate.processed.push_back(host);
        }

        // all hosts for this thread have no more events before the barrier
        None
    }

    /// The hosts assigned to `thread`: hosts already processed this round
    /// first, then unprocessed hosts, each part in FIFO order. The returned
    /// vector is freshly allocated and safe to hold across further scheduler
    /// operations. Empty if `thread` was never assigned any hosts.
    pub fn assigned_hosts(&self, thread: ThreadId) -> Vec<HostId> {
        self.magic.debug_check();

        let Some(tstate) = self.threads.get(&thread) else {
            return Vec::new();
        };
        let tstate = tstate.borrow();

        tstate
            .processed
            .iter()
            .chain(tstate.unprocessed.iter())
            .copied()
            .collect()
    }

    /// The time of the next event in `host`'s queue, or `None` if the queue
    /// is empty. Read-only. Panics if `host` was never registered.
    pub fn next_host_event_time(&self, host: HostId) -> Option<EmulatedTime> {
        self.magic.debug_check();

        self.host_queue(host).next_event_time()
    }

    /// The earliest pending event time across every host assigned to
    /// `thread`, as a duration since the simulation start, or
    /// [`SimulationTime::MAX`] if no event is pending anywhere. The upper
    /// layer computes the next global barrier as the minimum of this value
    /// over all threads.
    pub fn next_time(&self, thread: ThreadId) -> SimulationTime {
        self.magic.debug_check();

        let mut next_event_time = SimulationTime::MAX;

        if let Some(tstate) = self.threads.get(&thread) {
            let tstate = tstate.borrow();

            // all hosts are usually in the processed list between rounds, but
            // check both lists so mid-round calls see every host
            for host in tstate.unprocessed.iter().chain(tstate.processed.iter()) {
                if let Some(time) = self.host_queue(*host).next_event_time() {
                    next_event_time = std::cmp::min(next_event_time, time.to_abs_simtime());
                }
            }
        }

        debug!("next event at time {next_event_time:?}");

        next_event_time
    }

    fn host_queue(&self, host: HostId) -> &ThreadSafeEventQueue {
        match self.hosts.get(&host) {
            Some(queue) => queue,
            None => panic!("host {host} was never added to the scheduler"),
        }
    }
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self::new()
    }
}
