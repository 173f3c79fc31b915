//! ohmnet - Resistor Network Reducer
//!
//! Computes the equivalent resistance between two nodes of a resistor
//! network by series/parallel reduction.
//!
//! # Usage
//!
//! ```bash
//! ohmnet divider.net --pretty
//! ohmnet -e "a b 4" -e "b c 6" -e "a c 15" -s a -t c --steps
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::filter::LevelFilter;

use ohmnet::{
    dsl::{self, NetlistAst, ResistorDef},
    error::{ReduceError, Result},
    format::format_ohms,
    nodal,
    reduce::{CandidateOrder, ReduceConfig, Reducer},
    Network,
};

/// Equivalent resistance of a resistor network
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file (.net)
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: Option<PathBuf>,

    /// Extra resistor as "A B VALUE"; may be repeated
    #[arg(short, long = "edge", value_name = "A B VALUE")]
    edges: Vec<String>,

    /// Source terminal (overrides `.source`)
    #[arg(short, long)]
    source: Option<String>,

    /// Target terminal (overrides `.target`)
    #[arg(short, long)]
    target: Option<String>,

    /// Candidate processing order
    #[arg(long, value_enum, default_value_t = OrderArg::Ascending)]
    order: OrderArg,

    /// Print every rewrite before the result
    #[arg(long)]
    steps: bool,

    /// Solve bridges by nodal analysis instead of failing
    #[arg(long)]
    nodal_fallback: bool,

    /// Print the result with an SI prefix
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Ascending,
    Descending,
}

impl From<OrderArg> for CandidateOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Ascending => CandidateOrder::Ascending,
            OrderArg::Descending => CandidateOrder::Descending,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(resistance) => {
            if args.pretty {
                println!("{}", format_ohms(resistance));
            } else {
                println!("{resistance}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the netlist, reduce it and return the equivalent resistance.
///
/// Recorded steps are printed as they are explained.
fn run(args: &Args) -> Result<f64> {
    let mut ast = match &args.netlist_file {
        Some(path) => dsl::parse_file(path)?,
        None => NetlistAst::new(),
    };

    for (idx, text) in args.edges.iter().enumerate() {
        let def = parse_edge(text, idx + 1)?;
        for node in &def.nodes {
            ast.declare_node(node);
        }
        ast.resistors.push(def);
    }
    if let Some(source) = &args.source {
        ast.source = Some(source.clone());
    }
    if let Some(target) = &args.target {
        ast.target = Some(target.clone());
    }

    let network = Network::from_ast(&ast)?;
    let terminals = ast.terminals(&network)?;
    debug!(
        nodes = network.node_count(),
        resistors = network.edge_count(),
        "netlist loaded"
    );

    let config = ReduceConfig::new()
        .with_order(args.order.into())
        .with_steps(args.steps);
    let resistance = match Reducer::with_config(config).reduce(&network, terminals) {
        Ok(reduction) => {
            for line in reduction.explain() {
                println!("{line}");
            }
            reduction.resistance
        }
        Err(e) if args.nodal_fallback && e.needs_nodal_analysis() => {
            warn!("{e}; falling back to nodal analysis");
            nodal::equivalent_resistance(&network, terminals)?
        }
        Err(e) => return Err(e),
    };
    Ok(resistance)
}

/// Parse an `--edge` argument of the form `A B VALUE` into resistor `E<n>`.
fn parse_edge(text: &str, n: usize) -> Result<ResistorDef> {
    let name = format!("E{n}");
    let fields: Vec<&str> = text.split_whitespace().collect();
    let invalid = |name: &str, message: String| ReduceError::InvalidEdge {
        name: name.to_string(),
        text: text.to_string(),
        message,
    };

    let &[a, b, value] = fields.as_slice() else {
        return Err(invalid(&name, "expected \"A B VALUE\"".to_string()));
    };
    let value = dsl::parse_value(value)
        .ok_or_else(|| invalid(&name, format!("invalid value '{value}'")))?;

    Ok(ResistorDef {
        name,
        nodes: vec![a.to_string(), b.to_string()],
        value,
        line: 0,
    })
}
