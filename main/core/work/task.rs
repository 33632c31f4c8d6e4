use std::sync::Arc;

use crate::host::host::Host;

/// A cloneable reference to the work an event performs when it executes
/// against its destination host.
#[derive(Clone)]
pub struct TaskRef {
    inner: Arc<dyn Fn(&mut Host) + Send + Sync>,
}

impl TaskRef {
    pub fn new<T: Fn(&mut Host) + Send + Sync + 'static>(f: T) -> Self {
        Self { inner: Arc::new(f) }
    }

    /// Executes the task.
    pub fn execute(&self, host: &mut Host) {
        (self.inner)(host)
    }
}

impl std::fmt::Debug for TaskRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRef")
            .field("inner", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

impl PartialEq for TaskRef {
    /// Two `TaskRef`s are equal if they point to the same task.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TaskRef {}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_time::HostId;

    #[test]
    fn test_equality() {
        let task_a = TaskRef::new(|_host| {});
        let task_b = TaskRef::new(|_host| {});

        assert_eq!(task_a, task_a.clone());
        assert_ne!(task_a, task_b);
    }

    #[test]
    fn test_execute() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let counter = Arc::new(AtomicU32::new(0));

        let task = {
            let counter = Arc::clone(&counter);
            TaskRef::new(move |_host| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
        };

        let mut host = Host::new(HostId::from(0), "testhost");
        task.execute(&mut host);
        task.execute(&mut host);

        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }
}
