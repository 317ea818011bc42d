//! Deferred execution on the UI thread.
//!
//! Some view mutations must not happen in the middle of a layout pass,
//! for example scrolling a carousel to its selected page right after it
//! was created. Those are posted here and run on the next UI cycle,
//! the equivalent of posting a zero-delay task to the main queue.
//!
//! ## Learning: Channels Without Threads
//!
//! `tokio::sync::mpsc` does not require its payload to be `Send`; the
//! channel itself just becomes `!Send`. That makes an unbounded channel a
//! convenient FIFO for boxed `FnOnce` tasks that capture `Rc` handles.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

type Task = Box<dyn FnOnce()>;

/// A FIFO of tasks to run on the next UI cycle.
#[derive(Clone)]
pub struct UiScheduler {
    inner: Rc<SchedulerInner>,
}

struct SchedulerInner {
    sender: UnboundedSender<Task>,
    receiver: RefCell<UnboundedReceiver<Task>>,
    pending: Cell<usize>,
}

impl UiScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            inner: Rc::new(SchedulerInner {
                sender,
                receiver: RefCell::new(receiver),
                pending: Cell::new(0),
            }),
        }
    }

    /// Schedules `task` for the next cycle.
    pub fn post(&self, task: impl FnOnce() + 'static) {
        // The receiver lives as long as the sender, so sending cannot fail
        if self.inner.sender.send(Box::new(task)).is_ok() {
            self.inner.pending.set(self.inner.pending.get() + 1);
        }
    }

    /// Runs every task that was posted before this call.
    ///
    /// Tasks posted while the cycle runs are left for the next cycle.
    /// Returns the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let due = self.inner.pending.get();
        let mut ran = 0;

        while ran < due {
            let task = match self.inner.receiver.borrow_mut().try_recv() {
                Ok(task) => task,
                Err(_) => break,
            };
            self.inner.pending.set(self.inner.pending.get() - 1);
            task();
            ran += 1;
        }

        if ran > 0 {
            tracing::trace!(ran, "Ran deferred UI tasks");
        }
        ran
    }

    /// Runs cycles until nothing is pending or `max_cycles` is reached.
    pub fn run_until_idle(&self, max_cycles: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_cycles {
            if self.pending() == 0 {
                break;
            }
            total += self.run_pending();
        }
        total
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.pending.get()
    }
}

impl Default for UiScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UiScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_run_in_post_order() {
        let scheduler = UiScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let log = Rc::clone(&log);
            scheduler.post(move || log.borrow_mut().push(n));
        }

        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.run_pending(), 3);
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_task_posted_during_cycle_waits() {
        let scheduler = UiScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = scheduler.clone();
        let outer_log = Rc::clone(&log);
        scheduler.post(move || {
            outer_log.borrow_mut().push("first");
            let inner_log = Rc::clone(&outer_log);
            handle.post(move || inner_log.borrow_mut().push("second"));
        });

        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(*log.borrow(), vec!["first"]);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.run_until_idle(10), 1);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }
}
