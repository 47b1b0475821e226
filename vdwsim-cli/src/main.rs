use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use vdwsim_core::{build_simulation, drive, run_scenario, EnergyReport, ScenarioConfig, TextReporter};

mod view_app;

#[derive(Parser)]
#[command(name = "vdwsim")]
#[command(about = "vdwsim - 2D soft van der Waals particle simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and write the trajectory as text
    Run {
        /// Scenario YAML file (defaults to the built-in 10x10 lattice)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the trajectory here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print kinetic, potential and total energy at every report
    Energy {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Animate a scenario in a window, reloading when the file changes
    View {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { config, output } => run_file(config.as_deref(), output.as_deref()),
        Commands::Energy { config } => energy_file(config.as_deref()),
        Commands::View { config } => view_app::run_viewer(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    Ok(config)
}

fn run_file(config: Option<&Path>, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;

    let out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut reporter = TextReporter::new(out);
    let summary = run_scenario(&config, &mut reporter)?;

    if let Some(err) = summary.max_energy_error {
        log::info!(
            "{} particles, {} steps, t = {:.4}, max energy error {:.3e}",
            summary.particles,
            summary.steps,
            summary.final_time,
            err
        );
    }

    Ok(())
}

fn energy_file(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config)?;
    let sim = build_simulation(&config)?.initialize();

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(
        out,
        "{:>8}{:>16}{:>16}{:>16}{:>14}",
        "time", "kinetic", "potential", "total", "|momentum|"
    )?;

    let print = |out: &mut BufWriter<_>, report: &EnergyReport| -> io::Result<()> {
        writeln!(
            out,
            "{:8.4}{:16.8}{:16.8}{:16.8}{:14.3e}",
            report.time,
            report.kinetic,
            report.potential,
            report.total,
            report.momentum.length()
        )
    };

    print(&mut out, &EnergyReport::measure(&sim))?;
    drive(sim, |sim| {
        print(&mut out, &EnergyReport::measure(sim))?;
        Ok(())
    })?;
    out.flush()?;

    Ok(())
}
