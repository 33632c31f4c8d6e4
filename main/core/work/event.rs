use sim_time::emulated_time::EmulatedTime;
use sim_time::HostId;

use crate::host::host::Host;
use crate::utility::Magic;

use super::task::TaskRef;

/// A scheduled unit of work: a task to run against a destination host at a
/// point in emulated time.
#[derive(Debug)]
pub struct Event {
    magic: Magic<0x47c2a9b1>,
    task: TaskRef,
    time: EmulatedTime,
    src_host_id: HostId,
    dst_host_id: HostId,
    src_host_event_id: u64,
}

impl Event {
    pub fn new(task: TaskRef, time: EmulatedTime, src_host: &mut Host, dst_host_id: HostId) -> Self {
        Self {
            magic: Magic::new(),
            task,
            time,
            src_host_id: src_host.id(),
            dst_host_id,
            src_host_event_id: src_host.get_new_event_id(),
        }
    }

    /// Run the event's task. Consumes the event; its lifetime ends here.
    pub fn execute(self, host: &mut Host) {
        self.magic.debug_check();

        // make sure we're executing on the correct host
        assert_eq!(self.host_id(), host.id());

        self.task.execute(host);
    }

    pub fn time(&self) -> EmulatedTime {
        self.magic.debug_check();
        self.time
    }

    pub fn set_time(&mut self, time: EmulatedTime) {
        self.magic.debug_check();
        self.time = time;
    }

    /// The destination host; the host the event must execute on.
    pub fn host_id(&self) -> HostId {
        self.magic.debug_check();
        self.dst_host_id
    }

    /// The host that created the event.
    pub fn src_host_id(&self) -> HostId {
        self.magic.debug_check();
        self.src_host_id
    }

    /// The source host's creation-order id for this event.
    pub fn src_host_event_id(&self) -> u64 {
        self.magic.debug_check();
        self.src_host_event_id
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.magic.debug_check();
        other.magic.debug_check();

        self.task == other.task
            && self.time == other.time
            && self.src_host_id == other.src_host_id
            && self.dst_host_id == other.dst_host_id
            && self.src_host_event_id == other.src_host_event_id
    }
}

impl Eq for Event {}
