pub mod descriptor;
pub mod driver;
pub mod metrics;

pub use descriptor::{Descriptor, SimError, build_processes, parse_mlq, parse_simple};
pub use driver::MlqSim;
pub use metrics::{ProcessMetrics, Report};
