pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcState {
    Unstarted,
    Running,
    Preempted,
    Done,
}

/// Per-process timing record. Engines drive it through dispatch/preempt/
/// complete; completion metrics are written exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcb {
    pub arrival: Ticks,
    pub burst: Ticks,
    pub executed: Ticks,
    pub state: ProcState,
    pub response: Option<Ticks>,
    pub completion: Option<Ticks>,
    // Waiting and turnaround are signed: a process dispatched before its
    // arrival time (see the FCFS no-idle rule) waits a negative amount.
    pub waiting: Option<i64>,
    pub turnaround: Option<i64>,
}

impl Pcb {
    pub fn new(arrival: Ticks, burst: Ticks) -> Self {
        debug_assert!(burst > 0, "a process with no burst would never terminate");
        Self {
            arrival,
            burst,
            executed: 0,
            state: ProcState::Unstarted,
            response: None,
            completion: None,
            waiting: None,
            turnaround: None,
        }
    }

    pub fn remaining(&self) -> Ticks {
        self.burst - self.executed
    }

    pub fn is_done(&self) -> bool {
        self.state == ProcState::Done
    }

    // Response time is recorded once, at the first dispatch.
    pub fn dispatch(&mut self, now: Ticks) {
        debug_assert!(!self.is_done(), "cannot dispatch a finished process");
        if self.response.is_none() {
            self.response = Some(now);
        }
        self.state = ProcState::Running;
    }

    pub fn preempt(&mut self, ran: Ticks) {
        debug_assert_eq!(
            self.state,
            ProcState::Running,
            "only a running process can be preempted"
        );
        self.executed += ran;
        debug_assert!(
            self.executed < self.burst,
            "a preempted process must have burst left"
        );
        self.state = ProcState::Preempted;
    }

    pub fn complete(&mut self, ran: Ticks, now: Ticks) {
        debug_assert_eq!(
            self.state,
            ProcState::Running,
            "only a running process can complete"
        );
        debug_assert!(
            self.completion.is_none(),
            "completion metrics are written exactly once"
        );
        self.executed += ran;
        debug_assert_eq!(
            self.executed, self.burst,
            "completion requires the full burst to have run"
        );
        self.state = ProcState::Done;
        self.completion = Some(now);
        self.waiting = Some(now as i64 - self.arrival as i64 - self.burst as i64);
        self.turnaround = Some(now as i64 - self.arrival as i64);
    }
}

/// Identity wrapper: an immutable tag plus the one PCB it owns. The queue
/// level is 1-based; priority is carried through to the report but never
/// read by any scheduling policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub tag: String,
    pub queue: u32,
    pub priority: u32,
    pub pcb: Pcb,
}

impl Process {
    pub fn new(tag: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self::in_queue(tag, arrival, burst, 1, 0)
    }

    pub fn in_queue(
        tag: impl Into<String>,
        arrival: Ticks,
        burst: Ticks,
        queue: u32,
        priority: u32,
    ) -> Self {
        debug_assert!(queue >= 1, "queue levels are 1-based");
        Self {
            tag: tag.into(),
            queue,
            priority,
            pcb: Pcb::new(arrival, burst),
        }
    }
}
