//! Discrete-event CPU scheduling simulator: FCFS, Round Robin, and a
//! multilevel queue dispatcher sharing one simulation clock.

pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Pcb, ProcState, Process, Ticks};
pub use crate::scheduler::{Engine, Fcfs, Policy, RoundRobin};
pub use crate::sim::{
    Descriptor, MlqSim, ProcessMetrics, Report, SimError, build_processes, parse_mlq, parse_simple,
};
