use std::fmt;

use average::{Estimate, Mean};

use crate::core::state::{Process, Ticks};

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetrics {
    pub tag: String,
    pub burst: Ticks,
    pub arrival: Ticks,
    pub queue: u32,
    pub priority: u32,
    pub waiting: i64,
    pub completion: Ticks,
    pub response: Ticks,
    pub turnaround: i64,
}

impl ProcessMetrics {
    fn from_process(proc: &Process) -> Self {
        let pcb = &proc.pcb;
        Self {
            tag: proc.tag.clone(),
            burst: pcb.burst,
            arrival: pcb.arrival,
            queue: proc.queue,
            priority: proc.priority,
            waiting: pcb.waiting.expect("process has no waiting time recorded"),
            completion: pcb
                .completion
                .expect("process has no completion time recorded"),
            response: pcb.response.expect("process has no response time recorded"),
            turnaround: pcb
                .turnaround
                .expect("process has no turnaround time recorded"),
        }
    }
}

/// Per-process rows plus the four aggregate means. Rows keep the order the
/// engines left their queues in (levels ascending).
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub rows: Vec<ProcessMetrics>,
    pub avg_waiting: f64,
    pub avg_completion: f64,
    pub avg_response: f64,
    pub avg_turnaround: f64,
}

impl Report {
    pub fn from_processes<'a>(procs: impl IntoIterator<Item = &'a Process>) -> Self {
        let rows: Vec<ProcessMetrics> = procs
            .into_iter()
            .map(ProcessMetrics::from_process)
            .collect();

        let mean = |extract: fn(&ProcessMetrics) -> f64| -> f64 {
            if rows.is_empty() {
                0.0
            } else {
                rows.iter().map(extract).collect::<Mean>().estimate()
            }
        };
        let avg_waiting = mean(|row| row.waiting as f64);
        let avg_completion = mean(|row| row.completion as f64);
        let avg_response = mean(|row| row.response as f64);
        let avg_turnaround = mean(|row| row.turnaround as f64);

        Self {
            rows,
            avg_waiting,
            avg_completion,
            avg_response,
            avg_turnaround,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# tag; BT; AT; Q; Pr; WT; CT; RT; TAT")?;
        for row in &self.rows {
            writeln!(
                f,
                "{}; {}; {}; {}; {}; {}; {}; {}; {}",
                row.tag,
                row.burst,
                row.arrival,
                row.queue,
                row.priority,
                row.waiting,
                row.completion,
                row.response,
                row.turnaround
            )?;
        }
        writeln!(
            f,
            "WT={:.2}; CT={:.2}; RT={:.2}; TAT={:.2};",
            self.avg_waiting, self.avg_completion, self.avg_response, self.avg_turnaround
        )
    }
}
