//! Command-line front end: reads reflection files, refines their lattices and reports
//! the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use serde::Serialize;

use crate::io::reflection_file::{load_reflection_path, ReflectionFile};
use crate::lattice::lattice_constants::LatticeConstants;
use crate::refinement::least_squares::refine_lattice_detailed;

#[derive(Parser, Debug)]
#[command(name = "crystalsystems")]
#[command(about = "Refine unit-cell parameters from indexed reflections and their d-spacings")]
#[command(version)]
pub struct Cli {
    /// Reflection files (`h k l multiplicity d_spacing` rows, optional header)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// The log level
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info)]
    pub log: LogLevel,

    /// Number of threads to use (default: all available cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Result of refining one input file.
#[derive(Debug, Clone, Serialize)]
pub struct RefinementReport {
    pub input: PathBuf,
    pub reflections: usize,
    pub constants: LatticeConstants,
    pub volume: f64,
    pub residual: f64,
    pub rank: usize,
    pub reference: Option<LatticeConstants>,
    pub space_group: Option<String>,
}

impl RefinementReport {
    fn print(&self) {
        println!("{}", self.input.display());
        if let Some(space_group) = &self.space_group {
            println!("  space group  {}", space_group);
        }
        let constants = self.constants.labeled();
        for (index, (label, value)) in constants.iter().enumerate() {
            match &self.reference {
                Some(reference) => println!(
                    "  {:<6} {:>12.6}  (reference {:.6}, delta {:+.2e})",
                    label,
                    value,
                    reference.labeled()[index].1,
                    self.constants.deviation_from(reference)[index].1
                ),
                None => println!("  {:<6} {:>12.6}", label, value),
            }
        }
        println!("  volume {:>12.6}", self.volume);
        println!(
            "  {} reflections, residual {:.3e}",
            self.reflections, self.residual
        );
    }
}

/// Refine the lattice described by one parsed reflection file.
pub fn refine_file(input: PathBuf, file: &ReflectionFile) -> Result<RefinementReport> {
    let refinement = refine_lattice_detailed(&file.reflections)
        .with_context(|| format!("Failed to refine lattice for {}", input.display()))?;

    let constants = refinement.lattice.scalar_constants();
    let reference = file
        .crystal_info
        .as_ref()
        .map(|info| info.lattice.scalar_constants());

    if let Some(reference) = &reference {
        for (label, delta) in constants.deviation_from(reference) {
            info!("{}: deviation from reference {:+e}", label, delta);
        }
    }

    Ok(RefinementReport {
        input,
        reflections: file.reflections.len(),
        constants,
        volume: refinement.lattice.volume().abs(),
        residual: refinement.solution.residual,
        rank: refinement.solution.rank,
        reference,
        space_group: file
            .crystal_info
            .as_ref()
            .and_then(|info| info.space_group.clone()),
    })
}

fn process(input: &Path) -> Result<RefinementReport> {
    info!("Reading reflections from {}", input.display());
    let file = load_reflection_path(input)
        .with_context(|| format!("Failed to read reflections from {}", input.display()))?;
    refine_file(input.to_path_buf(), &file)
}

/// Run the command line once arguments are parsed and logging is set up.
pub fn run(cli: &Cli) -> Result<()> {
    if let Some(threads) = cli.threads {
        #[cfg(feature = "parallel")]
        {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global()
                .map_err(|e| anyhow::anyhow!("Failed to set thread pool size: {}", e))?;
            info!("Using {} threads", threads);
        }
        #[cfg(not(feature = "parallel"))]
        {
            warn!(
                "Thread count {} specified but parallel feature not enabled. Ignoring.",
                threads
            );
        }
    }

    #[cfg(feature = "parallel")]
    let reports: Vec<Result<RefinementReport>> = {
        use rayon::prelude::*;
        cli.inputs.par_iter().map(|input| process(input)).collect()
    };
    #[cfg(not(feature = "parallel"))]
    let reports: Vec<Result<RefinementReport>> =
        cli.inputs.iter().map(|input| process(input)).collect();

    let mut succeeded = Vec::new();
    let mut failures = 0;
    for report in reports {
        match report {
            Ok(report) => succeeded.push(report),
            Err(e) => {
                warn!("{:#}", e);
                failures += 1;
            }
        }
    }

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&succeeded).context("Failed to serialize results")?
        );
    } else {
        for report in &succeeded {
            report.print();
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} inputs failed", failures, cli.inputs.len());
    }
    Ok(())
}
