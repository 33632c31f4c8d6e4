//! Time and identity types shared across the simulator.
//!
//! Use [`EmulatedTime`](emulated_time::EmulatedTime) to represent an instant
//! in emulated time, or [`SimulationTime`](simulation_time::SimulationTime)
//! to represent a duration since the simulation began.

pub mod emulated_time;
pub mod simulation_time;

/// The unique identifier of a simulated host.
///
/// Hosts are registered once at simulation setup; the id is stable for the
/// simulation's lifetime and is used as a map key throughout the scheduler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HostId(u32);

impl From<u32> for HostId {
    fn from(i: u32) -> Self {
        HostId(i)
    }
}

impl From<HostId> for u32 {
    fn from(i: HostId) -> Self {
        i.0
    }
}

impl std::fmt::Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
