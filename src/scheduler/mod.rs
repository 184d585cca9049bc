pub mod fcfs;
pub mod round_robin;

use std::fmt;
use std::num::NonZeroU64;

use crate::core::state::{Process, Ticks};
pub use fcfs::Fcfs;
pub use round_robin::RoundRobin;

pub const LEVEL1_QUANTUM: NonZeroU64 = NonZeroU64::new(3).unwrap();
pub const LEVEL2_QUANTUM: NonZeroU64 = NonZeroU64::new(5).unwrap();

/// A scheduling engine owns its queue exclusively for the duration of one
/// run. It receives the shared clock and returns it advanced.
pub trait Engine {
    fn run(&self, queue: &mut [Process], start: Ticks) -> Ticks;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    RoundRobin { quantum: NonZeroU64 },
    Fcfs,
}

impl Policy {
    // Fixed dispatch table: level 1 and 2 are sliced, everything deeper runs
    // to completion in arrival order.
    pub fn for_level(level: u32) -> Policy {
        debug_assert!(level >= 1, "queue levels are 1-based");
        match level {
            1 => Policy::RoundRobin {
                quantum: LEVEL1_QUANTUM,
            },
            2 => Policy::RoundRobin {
                quantum: LEVEL2_QUANTUM,
            },
            _ => Policy::Fcfs,
        }
    }

    pub fn engine(self) -> Box<dyn Engine> {
        match self {
            Policy::RoundRobin { quantum } => Box::new(RoundRobin::new(quantum)),
            Policy::Fcfs => Box::new(Fcfs),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "RR(q={quantum})"),
            Policy::Fcfs => write!(f, "FCFS"),
        }
    }
}

/// Shared ordering rule: ascending arrival time; ties break on the numeric
/// tag suffix when every tag in the queue is a letters+digits label, and on
/// plain lexicographic tag order otherwise.
pub fn order_queue(queue: &mut [Process]) {
    if queue.iter().all(|p| tag_ordinal(&p.tag).is_some()) {
        queue.sort_by_key(|p| {
            (
                p.pcb.arrival,
                tag_ordinal(&p.tag).expect("every tag was checked to carry an ordinal"),
            )
        });
    } else {
        queue.sort_by(|a, b| {
            a.pcb
                .arrival
                .cmp(&b.pcb.arrival)
                .then_with(|| a.tag.cmp(&b.tag))
        });
    }
}

fn tag_ordinal(tag: &str) -> Option<u64> {
    let split = tag.find(|c: char| c.is_ascii_digit())?;
    if split == 0 || !tag[..split].chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    tag[split..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(queue: &[Process]) -> Vec<&str> {
        queue.iter().map(|p| p.tag.as_str()).collect()
    }

    #[test]
    fn orders_by_arrival_first() {
        let mut queue = vec![Process::new("p2", 5, 1), Process::new("p1", 0, 1)];
        order_queue(&mut queue);
        assert_eq!(tags(&queue), ["p1", "p2"]);
    }

    #[test]
    fn arrival_ties_break_on_tag_ordinal() {
        // Lexicographic order would put p10 before p2.
        let mut queue = vec![Process::new("p10", 0, 1), Process::new("p2", 0, 1)];
        order_queue(&mut queue);
        assert_eq!(tags(&queue), ["p2", "p10"]);
    }

    #[test]
    fn mixed_tags_fall_back_to_lexicographic_order() {
        let mut queue = vec![
            Process::new("p10", 0, 1),
            Process::new("p2", 0, 1),
            Process::new("init", 0, 1),
        ];
        order_queue(&mut queue);
        assert_eq!(tags(&queue), ["init", "p10", "p2"]);
    }

    #[test]
    fn tag_ordinal_requires_letters_then_digits() {
        assert_eq!(tag_ordinal("p12"), Some(12));
        assert_eq!(tag_ordinal("proc7"), Some(7));
        assert_eq!(tag_ordinal("p"), None);
        assert_eq!(tag_ordinal("12"), None);
        assert_eq!(tag_ordinal("p1x"), None);
    }

    #[test]
    fn policy_table_matches_queue_levels() {
        assert_eq!(
            Policy::for_level(1),
            Policy::RoundRobin {
                quantum: LEVEL1_QUANTUM
            }
        );
        assert_eq!(
            Policy::for_level(2),
            Policy::RoundRobin {
                quantum: LEVEL2_QUANTUM
            }
        );
        assert_eq!(Policy::for_level(3), Policy::Fcfs);
        assert_eq!(Policy::for_level(9), Policy::Fcfs);
    }
}
