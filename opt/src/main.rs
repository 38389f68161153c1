use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use aignite::GateGraph;
use clap::{ArgAction, Parser};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use log::info;
use simplelog::LevelFilter;

/// Read an ASCII AIGER netlist, simplify it, and write or report on the result.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Input netlist in ASCII AIGER format
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Write the resulting netlist here; `-` means standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Remove AND gates that no output depends on
    #[arg(long)]
    sweep: bool,

    /// Fold constant and redundant AND gates
    #[arg(long)]
    rewrite: bool,

    /// Write the resulting graph in Graphviz dot format
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Print circuit statistics
    #[arg(long)]
    summary: bool,

    /// Print the netlist reachable from the outputs
    #[arg(long)]
    netlist: bool,

    /// Print the primary inputs
    #[arg(long)]
    pi: bool,

    /// Print the primary outputs
    #[arg(long)]
    po: bool,

    /// Print gates with floating fan-ins and gates that are never used
    #[arg(long)]
    floating: bool,

    /// Print a report on this gate
    #[arg(long, value_name = "ID")]
    gate: Option<usize>,

    /// With --gate, print its fan-in tree this many levels deep
    #[arg(long, value_name = "LEVEL", requires = "gate")]
    fanin: Option<usize>,

    /// With --gate, print its fan-out tree this many levels deep
    #[arg(long, value_name = "LEVEL", requires = "gate")]
    fanout: Option<usize>,

    /// Verify edge symmetry and fan-in arity of the result
    #[arg(long)]
    check: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        match i16::from(self.verbose) - i16::from(self.quiet) {
            i16::MIN..=-3 => LevelFilter::Off,
            -2 => LevelFilter::Error,
            -1 => LevelFilter::Warn,
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn report(aig: &GateGraph, cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.summary {
        write!(out, "{}", aig.summary())?;
    }
    if cli.netlist {
        aig.write_netlist(&mut out)?;
    }
    if cli.pi {
        aig.write_inputs(&mut out)?;
    }
    if cli.po {
        aig.write_outputs(&mut out)?;
    }
    if cli.floating {
        aig.write_floating(&mut out)?;
    }

    if let Some(index) = cli.gate {
        if aig.gate(index).map_or(true, |gate| gate.is_undefined()) {
            return Err(eyre!("gate {} is not defined", index));
        }

        match (cli.fanin, cli.fanout) {
            (None, None) => aig.write_gate(index, &mut out)?,
            (fanin, fanout) => {
                if let Some(level) = fanin {
                    aig.write_fanin(index, level, &mut out)?;
                }
                if let Some(level) = fanout {
                    aig.write_fanout(index, level, &mut out)?;
                }
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let mut aig = GateGraph::from_aag_path(&cli.input).wrap_err_with(|| format!("reading {}", cli.input.display()))?;
    info!("read {}: {:?}", cli.input.display(), aig.header());

    if cli.sweep {
        let removed = aig.sweep();
        info!("sweep removed {} gates", removed);
    }
    if cli.rewrite {
        let folded = aig.rewrite();
        info!("rewrite folded {} gates", folded);
    }

    if cli.check {
        aig.check().wrap_err("graph invariant violated")?;
        info!("graph check passed");
    }

    report(&aig, &cli)?;

    if let Some(path) = &cli.dot {
        let mut f = BufWriter::new(File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?);
        aig.to_graphviz(&mut f)?;
        f.flush()?;
    }

    match cli.output.as_deref() {
        Some(path) if path == Path::new("-") => {
            let stdout = io::stdout();
            aig.to_aag(stdout.lock())?;
        }
        Some(path) => {
            let mut f = BufWriter::new(File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?);
            aig.to_aag(&mut f)?;
            f.flush()?;
        }
        None => {}
    }

    Ok(())
}
