//! Command-line driver for the contour-integration solution counter.
//!
//! Loads one instance (a JSON record or an entry of a Pisinger benchmark
//! file), runs the selected integration method and prints the integral
//! value, the solution count and timing.

use std::f64::consts::FRAC_PI_2;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use knapcount_core::stopwatch::Stopwatch;
use knapcount_core::{
    count_solutions_circle, count_solutions_ellipse, count_solutions_shortest_path,
    optimal_radius, parse_pisinger, Instance, QuadratureSettings, ShortestPathSettings,
};

#[derive(Parser)]
#[command(name = "knapcount")]
#[command(version)]
#[command(about = "Counts solutions of knapsack-type constraints by adaptive contour integration")]
struct Cli {
    /// Integration method
    #[arg(long, value_enum)]
    method: Method,

    /// Path to a JSON instance or a Pisinger benchmark file
    #[arg(long)]
    file: PathBuf,

    /// Number of angular nodes for the shortest-path grid
    #[arg(long, default_value_t = 36)]
    angular_nodes: usize,

    /// Radial spacing of the shortest-path grid
    #[arg(long, default_value_t = 0.001)]
    radial_step: f64,

    /// Which instance to take from a benchmark file (0-based)
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    Circle,
    Ellipse,
    ShortestPath,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let instance = load_instance(&cli.file, cli.index)?;
    println!("Instance loaded: {}", instance.name);
    info!(n = instance.a.len(), b = instance.b, "instance ready");

    let quadrature = QuadratureSettings::default();
    match cli.method {
        Method::Circle => {
            let watch = Stopwatch::start();
            let r = optimal_radius(0.0, &instance)?;
            let result = count_solutions_circle(&instance, r, &quadrature)?;
            let elapsed = watch.elapsed();

            println!("Integration value: {}", result.integral);
            println!("Solution count: {}", result.count());
            println!("Computation time: {:.3} s", elapsed.as_secs_f64());
        }
        Method::Ellipse => {
            let watch = Stopwatch::start();
            let r1 = optimal_radius(0.0, &instance)?;
            let r2 = optimal_radius(FRAC_PI_2, &instance)
                .context("no stationary radius at angle pi/2; the ellipse method needs one")?;
            let result = count_solutions_ellipse(&instance, r1, r2, &quadrature)?;
            let elapsed = watch.elapsed();

            println!("Integration value: {}", result.integral);
            println!("Solution count: {}", result.count());
            println!("Computation time: {:.3} s", elapsed.as_secs_f64());
        }
        Method::ShortestPath => {
            let settings = ShortestPathSettings {
                angular_nodes: cli.angular_nodes,
                radial_step: cli.radial_step,
                quadrature,
            };
            let watch = Stopwatch::start();
            let r = optimal_radius(0.0, &instance)?;
            let result = count_solutions_shortest_path(&instance, r, &settings)?;
            let elapsed = watch.elapsed();

            println!("Integration value: {}", result.integral);
            println!("Solution count: {}", result.count());
            println!(
                "Integration time: {:.3} s",
                result.integration_time.as_secs_f64()
            );
            println!("Computation time: {:.3} s", elapsed.as_secs_f64());
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reads a JSON instance (`.json`) or picks one entry of a Pisinger
/// benchmark file (anything else).
fn load_instance(path: &Path, index: usize) -> Result<Instance> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        let instance: Instance = serde_json::from_str(&text)
            .with_context(|| format!("parsing JSON instance {}", path.display()))?;
        instance.validate()?;
        Ok(instance)
    } else {
        let mut instances = parse_pisinger(&text)?;
        if index >= instances.len() {
            bail!(
                "benchmark file {} has {} instances, index {} requested",
                path.display(),
                instances.len(),
                index
            );
        }
        Ok(instances.swap_remove(index))
    }
}
