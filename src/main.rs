//! banker-sim - interactive deadlock-avoidance simulator.
//!
//! Loads an initial system state (or the built-in textbook scenario), reports
//! whether it is safe, then accepts resource requests on stdin and shows the
//! arbiter's decision after each one.

use std::io::{self, BufRead, Write};

use clap::Parser;

use banker_core::banker::Snapshot;
use banker_core::{Config, Decision, RequestArbiter, Safety};

#[derive(Debug, Parser)]
#[command(name = "banker-sim", about = "Banker's Algorithm simulator")]
struct Args {
    /// Path to a JSON config file (observability + initial state).
    #[arg(long, env = "BANKER_CONFIG")]
    config: Option<std::path::PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    banker_core::observability::init_tracing(&config.observability.log_level);

    let state = config.initial.into_state()?;
    let mut arbiter = RequestArbiter::new(state);

    println!("System initialized. Checking initial state...");
    render_snapshot(&arbiter.snapshot());
    report_safety(&arbiter.check_current_safety());

    println!();
    println!("Commands: request <p> <units...> | state | safety | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("request") => match parse_request(parts) {
                Ok((p, amounts)) => run_request(&mut arbiter, p, &amounts),
                Err(msg) => println!("{msg}"),
            },
            Some("state") => render_snapshot(&arbiter.snapshot()),
            Some("safety") => report_safety(&arbiter.check_current_safety()),
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command: {other}"),
            None => {}
        }
    }

    Ok(())
}

fn parse_request<'a>(
    mut parts: impl Iterator<Item = &'a str>,
) -> Result<(usize, Vec<u32>), String> {
    let p = parts
        .next()
        .ok_or("usage: request <p> <units...>")?
        .parse::<usize>()
        .map_err(|e| format!("bad process index: {e}"))?;
    let amounts = parts
        .map(|s| s.parse::<u32>().map_err(|e| format!("bad unit count: {e}")))
        .collect::<Result<Vec<u32>, String>>()?;
    Ok((p, amounts))
}

fn run_request(arbiter: &mut RequestArbiter, p: usize, amounts: &[u32]) {
    println!("--- New request from P{p} for {amounts:?} ---");
    match arbiter.request(p, amounts) {
        Ok(Decision::Granted(sequence)) => {
            println!("Request GRANTED. New state is safe.");
            println!("Safe sequence: {}", format_sequence(&sequence));
            render_snapshot(&arbiter.snapshot());
        }
        Ok(Decision::DeniedExceedsMaxClaim { resource }) => {
            println!(
                "Request DENIED. P{p} exceeded its max claim on resource {}.",
                resource_label(resource)
            );
        }
        Ok(Decision::DeniedInsufficientResources { resource }) => {
            println!(
                "Request DENIED. P{p} must wait: not enough of resource {}.",
                resource_label(resource)
            );
        }
        Ok(Decision::DeniedUnsafe) => {
            println!("Request DENIED. Granting would lead to an unsafe state. Rolled back.");
        }
        Err(err) => println!("Request rejected: {err}"),
    }
}

fn report_safety(safety: &Safety) {
    match safety.sequence() {
        Some(seq) => {
            println!("State is SAFE.");
            println!("Safe sequence: {}", format_sequence(seq));
        }
        None => println!("State is UNSAFE."),
    }
}

fn format_sequence(sequence: &[usize]) -> String {
    sequence
        .iter()
        .map(|p| format!("P{p}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn resource_label(r: usize) -> String {
    // A, B, C... for small systems, plain index past the alphabet.
    if r < 26 {
        char::from(b'A' + r as u8).to_string()
    } else {
        format!("#{r}")
    }
}

fn render_snapshot(snap: &Snapshot) {
    print!("Available: ");
    for (r, units) in snap.available.iter().enumerate() {
        print!("{}={units} ", resource_label(r));
    }
    println!();
    render_matrix("Allocation", &snap.allocation);
    render_matrix("Max", &snap.max);
    render_matrix("Need", &snap.need);
}

fn render_matrix(title: &str, rows: &[Vec<u32>]) {
    println!("{title}:");
    for (p, row) in rows.iter().enumerate() {
        print!("  P{p} |");
        for units in row {
            print!(" {units:>3}");
        }
        println!();
    }
}
