//! Simulated time and task handlers for testing

use super::{SpawnEffects, TimeEffects};
use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type SleepHook = Rc<dyn Fn(u64)>;

/// Simulated clock: sleeps complete immediately and advance virtual time.
#[derive(Clone, Default)]
pub struct SimulatedTime {
    /// Current simulated time in milliseconds
    elapsed_ms: Rc<Cell<u64>>,
    /// Every sleep requested, in order
    sleeps: Rc<RefCell<Vec<u64>>>,
    /// Called at the start of each sleep (for probing in-flight state)
    on_sleep: Rc<RefCell<Option<SleepHook>>>,
}

impl SimulatedTime {
    /// Create a simulated clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current simulated time
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.get()
    }

    /// Every sleep duration requested so far
    pub fn sleeps(&self) -> Vec<u64> {
        self.sleeps.borrow().clone()
    }

    /// Install a hook run at the start of every sleep.
    pub fn set_sleep_hook(&self, hook: impl Fn(u64) + 'static) {
        *self.on_sleep.borrow_mut() = Some(Rc::new(hook));
    }
}

impl fmt::Debug for SimulatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedTime")
            .field("elapsed_ms", &self.elapsed_ms.get())
            .field("sleeps", &self.sleeps.borrow())
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl TimeEffects for SimulatedTime {
    async fn sleep_ms(&self, ms: u64) {
        let hook = self.on_sleep.borrow().clone();
        if let Some(hook) = hook {
            hook(ms);
        }
        self.sleeps.borrow_mut().push(ms);
        self.elapsed_ms.set(self.elapsed_ms.get() + ms);
    }
}

/// Queue of spawned local tasks, drained explicitly by tests.
#[derive(Clone, Default)]
pub struct LocalTaskQueue {
    tasks: Rc<RefCell<VecDeque<LocalBoxFuture<'static, ()>>>>,
}

impl LocalTaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks, including any they spawn, until none remain.
    pub async fn run_until_idle(&self) {
        loop {
            let next = self.tasks.borrow_mut().pop_front();
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}

impl fmt::Debug for LocalTaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTaskQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

impl SpawnEffects for LocalTaskQueue {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push_back(task);
    }
}
