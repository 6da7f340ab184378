use std::error;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use clap::{Arg, App};
use regex::Regex;

use indset_solver::{graph::Graph, parse::parse_graph, indset_instance::IndSetInstance, interrupter::Interrupter, branch_reduce::find_independent_set_by_copy};

pub fn main() -> Result<(), Box<dyn error::Error>> {
    let digits = Regex::new(r"^\d+$")?;
    let integer = Regex::new(r"^-?\d+$")?;
    let m = App::new("indset")
        .about("Searches an independent set of size k with a bounded search tree.")
        .arg(Arg::new("k")
             .help("size of the independent set")
             .takes_value(true)
             .required(true)
             .allow_hyphen_values(true)
             .validator_regex(&integer, "only integers are allowed")
             .short('k'))
        .arg(Arg::new("graph")
             .help("graph like `a:b; b:a;;`, read from stdin if missing")
             .takes_value(true)
             .short('g'))
        .arg(Arg::new("time_out")
             .help("time limit in milliseconds, ignored with --copy")
             .takes_value(true)
             .validator_regex(&digits, "only numbers are allowed")
             .short('t'))
        .arg(Arg::new("copy")
             .help("copy the graph for every branch instead of rebuilding it")
             .long("copy")
             .short('c'))
        .get_matches();
    let k: isize = m.value_of("k").expect("`k` is required").parse()?;
    let time_out: Option<u128> = m.value_of("time_out").map(|val| val.parse::<u128>()).transpose()?;

    let graph = match m.value_of("graph") {
        Some(graphstr) => parse_graph(graphstr)?,
        None => {
            let stdin = io::stdin();
            let stdin = stdin.lock();
            Graph::read_graph(stdin)?
        },
    };
    let (n, e, max, min) = graph.n_m_max_min_stats();
    eprintln!("Input graph:\t{} vertices, {} edges, max degree {}, min degree {}", n, e, max, min);

    let start = Instant::now();
    let solution = if m.is_present("copy") {
        find_independent_set_by_copy(&graph, k)?
    } else {
        let mut instance = IndSetInstance::try_new(&graph, k)?;
        let sigint = Arc::new(AtomicBool::new(false));
        let handler_flag = sigint.clone();
        ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst))?;
        instance.set_interrupter(Interrupter::new(time_out).with_sigint(sigint));
        let solution = instance.solve()?;
        eprintln!("Explored {} branches.", instance.branches());
        solution
    };
    eprintln!("Search took {} ms.", start.elapsed().as_millis());

    if solution.is_empty() && k > 0 {
        eprintln!("There is no independent set of size {}.", k);
    }
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    IndSetInstance::write_solution(&solution, &mut stdout)?;
    Ok(())
}
