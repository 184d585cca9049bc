use log::trace;

use super::{Engine, order_queue};
use crate::core::state::{Process, Ticks};

/// Non-preemptive: each process runs its full burst before the next starts.
pub struct Fcfs;

impl Engine for Fcfs {
    fn run(&self, queue: &mut [Process], start: Ticks) -> Ticks {
        order_queue(queue);

        let mut clock = start;
        for proc in queue.iter_mut() {
            // Dispatch happens immediately in sorted order, even when the
            // clock has not yet reached the arrival time. The clock is never
            // idled forward.
            proc.pcb.dispatch(clock);
            let burst = proc.pcb.burst;
            clock += burst;
            proc.pcb.complete(burst, clock);
            trace!("{} completed at t={clock}", proc.tag);
        }
        clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ProcState;

    #[test]
    fn single_process_from_time_zero() {
        let mut queue = vec![Process::new("p1", 0, 5)];
        let end = Fcfs.run(&mut queue, 0);
        assert_eq!(end, 5);
        let pcb = &queue[0].pcb;
        assert_eq!(pcb.response, Some(0));
        assert_eq!(pcb.waiting, Some(0));
        assert_eq!(pcb.completion, Some(5));
        assert_eq!(pcb.turnaround, Some(5));
        assert_eq!(pcb.state, ProcState::Done);
    }

    #[test]
    fn runs_in_arrival_order_with_exact_formulas() {
        let mut queue = vec![
            Process::new("p2", 2, 3),
            Process::new("p1", 0, 4),
            Process::new("p3", 3, 2),
        ];
        let end = Fcfs.run(&mut queue, 0);
        assert_eq!(end, 9);

        // p1 [0,4), p2 [4,7), p3 [7,9)
        assert_eq!(queue[0].pcb.completion, Some(4));
        assert_eq!(queue[1].pcb.completion, Some(7));
        assert_eq!(queue[2].pcb.completion, Some(9));

        for proc in &queue {
            let pcb = &proc.pcb;
            let ct = pcb.completion.unwrap() as i64;
            let at = pcb.arrival as i64;
            let bt = pcb.burst as i64;
            assert_eq!(pcb.waiting, Some(ct - at - bt));
            assert_eq!(pcb.turnaround, Some(ct - at));
        }
    }

    #[test]
    fn dispatches_late_arrival_without_idling() {
        // A process whose arrival lies beyond the current clock still runs
        // immediately, so its waiting time goes negative. This pins the
        // literal no-idle behavior.
        let mut queue = vec![Process::new("p1", 10, 3)];
        let end = Fcfs.run(&mut queue, 0);
        assert_eq!(end, 3);
        assert_eq!(queue[0].pcb.response, Some(0));
        assert_eq!(queue[0].pcb.waiting, Some(-10));
        assert_eq!(queue[0].pcb.turnaround, Some(-7));
    }

    #[test]
    fn starts_from_the_handed_off_clock() {
        let mut queue = vec![Process::new("p1", 0, 2)];
        let end = Fcfs.run(&mut queue, 100);
        assert_eq!(end, 102);
        assert_eq!(queue[0].pcb.response, Some(100));
        assert_eq!(queue[0].pcb.waiting, Some(100));
    }

    #[test]
    fn empty_queue_returns_start_unchanged() {
        let mut queue: Vec<Process> = Vec::new();
        assert_eq!(Fcfs.run(&mut queue, 42), 42);
    }
}
