use std::fmt;
use std::io;
use std::str::FromStr;

use rustc_hash::FxHashSet;

use crate::core::state::{Process, Ticks};

/// One workload record as read from a descriptor file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub tag: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub queue: u32,
    pub priority: u32,
}

#[derive(Debug)]
pub enum SimError {
    MalformedDescriptor { line: usize, reason: String },
    NonTerminatingProcess { tag: String },
    DuplicateTag { tag: String },
    Io(io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::MalformedDescriptor { line, reason } => {
                write!(f, "malformed descriptor on line {line}: {reason}")
            }
            SimError::NonTerminatingProcess { tag } => {
                write!(f, "process {tag} has a zero burst time and would never terminate")
            }
            SimError::DuplicateTag { tag } => write!(f, "duplicate process tag {tag}"),
            SimError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err)
    }
}

/// Parses the multilevel format: `tag;BT;AT;queue;priority` per line.
/// Blank lines and `#`-prefixed header lines are skipped.
pub fn parse_mlq(input: &str) -> Result<Vec<Descriptor>, SimError> {
    let mut descriptors = Vec::new();
    for (line, raw) in numbered_lines(input) {
        let mut fields = raw.split(';').map(str::trim);
        let tag = required(fields.next(), line, "tag")?;
        let burst = numeric(required(fields.next(), line, "burst time")?, line, "burst time")?;
        let arrival = numeric(
            required(fields.next(), line, "arrival time")?,
            line,
            "arrival time",
        )?;
        let queue: u32 = numeric(required(fields.next(), line, "queue")?, line, "queue")?;
        let priority = numeric(required(fields.next(), line, "priority")?, line, "priority")?;
        reject_extra(fields.next(), line)?;
        if queue == 0 {
            return Err(SimError::MalformedDescriptor {
                line,
                reason: "queue number must be positive".into(),
            });
        }
        descriptors.push(Descriptor {
            tag: tag.to_owned(),
            arrival,
            burst,
            queue,
            priority,
        });
    }
    Ok(descriptors)
}

/// Parses the single-queue format used for standalone FCFS and RR runs:
/// `tag;AT;BT` per line. Queue defaults to 1, priority to 0.
pub fn parse_simple(input: &str) -> Result<Vec<Descriptor>, SimError> {
    let mut descriptors = Vec::new();
    for (line, raw) in numbered_lines(input) {
        let mut fields = raw.split(';').map(str::trim);
        let tag = required(fields.next(), line, "tag")?;
        let arrival = numeric(
            required(fields.next(), line, "arrival time")?,
            line,
            "arrival time",
        )?;
        let burst = numeric(required(fields.next(), line, "burst time")?, line, "burst time")?;
        reject_extra(fields.next(), line)?;
        descriptors.push(Descriptor {
            tag: tag.to_owned(),
            arrival,
            burst,
            queue: 1,
            priority: 0,
        });
    }
    Ok(descriptors)
}

/// Validation gate: runs before any engine does. Rejects zero bursts (which
/// would preempt forever) and repeated tags (tags are identities). All or
/// nothing; the first failure aborts with no processes built.
pub fn build_processes(descriptors: &[Descriptor]) -> Result<Vec<Process>, SimError> {
    let mut seen = FxHashSet::default();
    let mut procs = Vec::with_capacity(descriptors.len());
    for desc in descriptors {
        if !seen.insert(desc.tag.as_str()) {
            return Err(SimError::DuplicateTag {
                tag: desc.tag.clone(),
            });
        }
        if desc.burst == 0 {
            return Err(SimError::NonTerminatingProcess {
                tag: desc.tag.clone(),
            });
        }
        procs.push(Process::in_queue(
            desc.tag.clone(),
            desc.arrival,
            desc.burst,
            desc.queue,
            desc.priority,
        ));
    }
    Ok(procs)
}

fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn required<'a>(field: Option<&'a str>, line: usize, name: &str) -> Result<&'a str, SimError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SimError::MalformedDescriptor {
            line,
            reason: format!("missing {name}"),
        }),
    }
}

fn numeric<T: FromStr>(raw: &str, line: usize, name: &str) -> Result<T, SimError> {
    raw.parse().map_err(|_| SimError::MalformedDescriptor {
        line,
        reason: format!("{name} must be a non-negative integer, got {raw:?}"),
    })
}

fn reject_extra(field: Option<&str>, line: usize) -> Result<(), SimError> {
    match field {
        Some(_) => Err(SimError::MalformedDescriptor {
            line,
            reason: "too many fields".into(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mlq_lines_and_skips_headers() {
        let text = "# tag; BT; AT; Q; Pr\n\np1; 5; 0; 1; 2\np2; 3; 1; 2; 1\n";
        let descs = parse_mlq(text).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(
            descs[0],
            Descriptor {
                tag: "p1".into(),
                arrival: 0,
                burst: 5,
                queue: 1,
                priority: 2,
            }
        );
        assert_eq!(descs[1].queue, 2);
    }

    #[test]
    fn rejects_non_numeric_field() {
        let err = parse_mlq("p1; five; 0; 1; 2").unwrap_err();
        assert!(matches!(
            err,
            SimError::MalformedDescriptor { line: 1, .. }
        ));
    }

    #[test]
    fn rejects_missing_field() {
        let err = parse_mlq("p1; 5; 0; 1").unwrap_err();
        assert!(matches!(
            err,
            SimError::MalformedDescriptor { line: 1, .. }
        ));
    }

    #[test]
    fn rejects_queue_zero() {
        let err = parse_mlq("p1; 5; 0; 0; 1").unwrap_err();
        assert!(matches!(
            err,
            SimError::MalformedDescriptor { line: 1, .. }
        ));
    }

    #[test]
    fn rejects_extra_fields() {
        let err = parse_mlq("p1; 5; 0; 1; 2; 9").unwrap_err();
        assert!(matches!(
            err,
            SimError::MalformedDescriptor { line: 1, .. }
        ));
    }

    #[test]
    fn reports_the_failing_line_number() {
        let err = parse_mlq("# header\np1; 5; 0; 1; 2\np2; x; 0; 1; 2").unwrap_err();
        assert!(matches!(
            err,
            SimError::MalformedDescriptor { line: 3, .. }
        ));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn zero_burst_is_non_terminating() {
        let descs = parse_mlq("p1; 0; 0; 1; 1").unwrap();
        let err = build_processes(&descs).unwrap_err();
        assert!(matches!(err, SimError::NonTerminatingProcess { ref tag } if tag == "p1"));
    }

    #[test]
    fn duplicate_tags_are_rejected() {
        let descs = parse_mlq("p1; 2; 0; 1; 1\np1; 3; 1; 2; 1").unwrap();
        let err = build_processes(&descs).unwrap_err();
        assert!(matches!(err, SimError::DuplicateTag { ref tag } if tag == "p1"));
    }

    #[test]
    fn simple_format_defaults_queue_and_priority() {
        let descs = parse_simple("p1; 0; 5\np2; 1; 3").unwrap();
        assert_eq!(descs[0].arrival, 0);
        assert_eq!(descs[0].burst, 5);
        assert_eq!(descs[0].queue, 1);
        assert_eq!(descs[0].priority, 0);
    }
}
