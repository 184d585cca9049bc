pub mod observer;
pub mod state;

pub use observer::Observer;
pub use state::{Pcb, ProcState, Process, Ticks};
