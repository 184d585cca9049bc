use log::trace;

use super::state::{ProcState, Process};

/// Post-run audit over a queue's PCBs. Every check is a debug assertion, so
/// release builds pay nothing.
#[derive(Debug)]
pub struct Observer {
    runs: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { runs: 0 }
    }

    pub fn observe(&mut self, queue: &[Process]) {
        self.runs += 1;
        trace!("pcb audit pass {} over {} processes", self.runs, queue.len());

        for proc in queue {
            let pcb = &proc.pcb;
            debug_assert!(
                pcb.executed <= pcb.burst,
                "process {} ran past its burst",
                proc.tag
            );
            debug_assert_eq!(
                pcb.state,
                ProcState::Done,
                "process {} left unfinished by its engine",
                proc.tag
            );
            debug_assert_eq!(
                pcb.executed, pcb.burst,
                "done process {} must have consumed its full burst",
                proc.tag
            );

            if let (Some(ct), Some(rt), Some(wt), Some(tat)) =
                (pcb.completion, pcb.response, pcb.waiting, pcb.turnaround)
            {
                let ct = ct as i64;
                let at = pcb.arrival as i64;
                let bt = pcb.burst as i64;
                debug_assert_eq!(wt, ct - at - bt, "process {} waiting time mismatch", proc.tag);
                debug_assert_eq!(tat, ct - at, "process {} turnaround mismatch", proc.tag);
                debug_assert!(
                    rt as i64 <= ct - bt,
                    "process {} responded after it must already have finished",
                    proc.tag
                );
            } else {
                debug_assert!(
                    false,
                    "done process {} is missing completion metrics",
                    proc.tag
                );
            }
        }
    }
}
