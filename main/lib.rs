//! The scheduler core of the umbra discrete-event network simulator.
//!
//! Simulated hosts exchange [events](crate::core::work::event::Event) in
//! virtual time. Each host owns a thread-safe
//! [event queue](crate::core::work::event_queue::ThreadSafeEventQueue), each
//! worker thread owns a set of hosts, and the
//! [scheduler policy](crate::core::scheduler::policy::SchedulerPolicy)
//! decides which host a worker services next without violating causality
//! between rounds separated by time barriers.

// https://github.com/rust-lang/rfcs/blob/master/text/2585-unsafe-block-in-unsafe-fn.md
#![deny(unsafe_op_in_unsafe_fn)]

pub mod core;
pub mod host;
pub mod utility;
