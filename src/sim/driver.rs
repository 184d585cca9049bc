use std::collections::BTreeMap;

use log::info;

use super::metrics::Report;
use crate::core::Observer;
use crate::core::state::{Process, Ticks};
use crate::scheduler::Policy;

/// Multilevel queue dispatcher. Partitions processes by their declared
/// 1-based level and runs the levels in ascending order, each to completion,
/// threading one simulation clock through every engine run.
pub struct MlqSim {
    queues: BTreeMap<u32, Vec<Process>>,
    observer: Observer,
}

impl MlqSim {
    pub fn new(procs: Vec<Process>) -> Self {
        let mut queues: BTreeMap<u32, Vec<Process>> = BTreeMap::new();
        for proc in procs {
            queues.entry(proc.queue).or_default().push(proc);
        }
        Self {
            queues,
            observer: Observer::new(),
        }
    }

    pub fn run(mut self) -> Report {
        let mut clock: Ticks = 0;
        for (&level, queue) in self.queues.iter_mut() {
            let policy = Policy::for_level(level);
            info!(
                "queue {level}: {} processes under {policy} from t={clock}",
                queue.len()
            );
            // The engine owns the queue for the whole run; the returned end
            // time becomes the next level's start time.
            let end = policy.engine().run(queue, clock);
            debug_assert!(end >= clock, "an engine run must not rewind the clock");
            clock = end;
            self.observer.observe(queue);
        }
        Report::from_processes(self.queues.values().flatten())
    }
}
