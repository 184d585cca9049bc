use std::num::NonZeroU64;

use log::trace;

use super::{Engine, order_queue};
use crate::core::state::{Process, Ticks};

pub struct RoundRobin {
    quantum: NonZeroU64,
}

// Outcome of one time slice, consumed by the dispatch loop.
enum SliceOutcome {
    Done,
    Preempted,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }

    // Runs one slice: the clock advances one tick at a time, up to a full
    // quantum, stopping early the moment the remaining burst hits zero.
    fn execute_slice(&self, proc: &mut Process, clock: &mut Ticks) -> SliceOutcome {
        proc.pcb.dispatch(*clock);
        let mut remaining = proc.pcb.remaining();
        let mut ran = 0;
        for _ in 0..self.quantum.get() {
            *clock += 1;
            ran += 1;
            remaining -= 1;
            if remaining == 0 {
                proc.pcb.complete(ran, *clock);
                return SliceOutcome::Done;
            }
        }
        proc.pcb.preempt(ran);
        SliceOutcome::Preempted
    }
}

impl Engine for RoundRobin {
    fn run(&self, queue: &mut [Process], start: Ticks) -> Ticks {
        if queue.is_empty() {
            return start;
        }
        order_queue(queue);

        let mut clock = start;
        // The sorted head runs unconditionally on the first dispatch; every
        // later pick is a circular scan for the next not-done process.
        let mut slot = 0;
        loop {
            match self.execute_slice(&mut queue[slot], &mut clock) {
                SliceOutcome::Done => trace!("{} completed at t={clock}", queue[slot].tag),
                SliceOutcome::Preempted => trace!(
                    "{} preempted at t={clock} ({} of {} executed)",
                    queue[slot].tag,
                    queue[slot].pcb.executed,
                    queue[slot].pcb.burst
                ),
            }
            match next_not_done(queue, slot) {
                Some(next) => slot = next,
                None => break,
            }
        }
        clock
    }
}

// Scans forward from the slot after `current`, wrapping modulo the queue
// length; the process just run is the last candidate considered.
fn next_not_done(queue: &[Process], current: usize) -> Option<usize> {
    let len = queue.len();
    (1..=len)
        .map(|step| (current + step) % len)
        .find(|&slot| !queue[slot].pcb.is_done())
}
