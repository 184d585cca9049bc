use std::fs;
use std::num::NonZeroU64;
use std::process::ExitCode;

use clap::{Arg, ArgMatches, Command, value_parser};
use log::debug;
use rand::prelude::*;

use mlq_sim::{
    Descriptor, Engine, Fcfs, MlqSim, Process, Report, RoundRobin, SimError, build_processes,
    parse_mlq, parse_simple,
};

fn main() -> ExitCode {
    env_logger::init();
    match run(&cli().get_matches()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mlq_sim: {err}");
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("mlq_sim")
        .about("Discrete-event CPU scheduling simulator (FCFS, Round Robin, MLQ)")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .required_unless_present("random")
                .help("Descriptor file: `tag;BT;AT;queue;priority` for mlq, `tag;AT;BT` otherwise"),
        )
        .arg(
            Arg::new("algo")
                .long("algo")
                .value_parser(["mlq", "fcfs", "rr"])
                .default_value("mlq"),
        )
        .arg(
            Arg::new("quantum")
                .long("quantum")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("4")
                .help("Time slice for --algo rr"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write the report here instead of stdout"),
        )
        .arg(
            Arg::new("random")
                .long("random")
                .value_name("TICKS")
                .value_parser(value_parser!(u64))
                .help("Generate a seeded synthetic workload over this many ticks instead of reading FILE"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .default_value("0"),
        )
}

fn run(matches: &ArgMatches) -> Result<(), SimError> {
    let algo = matches.get_one::<String>("algo").expect("defaulted");

    let descriptors = match matches.get_one::<u64>("random") {
        Some(&ticks) => {
            let seed = *matches.get_one::<u64>("seed").expect("defaulted");
            random_workload(ticks, seed)
        }
        None => {
            let path = matches
                .get_one::<String>("input")
                .expect("required by clap when --random is absent");
            let text = fs::read_to_string(path)?;
            match algo.as_str() {
                "mlq" => parse_mlq(&text)?,
                _ => parse_simple(&text)?,
            }
        }
    };

    let procs = build_processes(&descriptors)?;
    let report = match algo.as_str() {
        "mlq" => MlqSim::new(procs).run(),
        "fcfs" => run_single(&Fcfs, procs),
        _ => {
            let quantum = *matches.get_one::<u64>("quantum").expect("defaulted");
            let quantum = NonZeroU64::new(quantum).expect("range-checked by clap");
            run_single(&RoundRobin::new(quantum), procs)
        }
    };

    match matches.get_one::<String>("output") {
        Some(path) => fs::write(path, report.to_string())?,
        None => print!("{report}"),
    }
    Ok(())
}

fn run_single(engine: &dyn Engine, mut queue: Vec<Process>) -> Report {
    let end = engine.run(&mut queue, 0);
    debug!("run complete at t={end}");
    Report::from_processes(&queue)
}

// Seeded Bernoulli workload: each tick may spawn a short or a long process,
// assigned a random level and priority. Deterministic for a given seed.
fn random_workload(ticks: u64, seed: u64) -> Vec<Descriptor> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut descriptors = Vec::new();
    for t in 0..ticks {
        if rng.random::<f64>() < 0.3 {
            let burst = if rng.random::<f64>() < 0.3 { 2 } else { 6 };
            descriptors.push(Descriptor {
                tag: format!("p{}", descriptors.len() + 1),
                arrival: t,
                burst,
                queue: rng.random_range(1..=3),
                priority: rng.random_range(1..=5),
            });
        }
    }
    descriptors
}
