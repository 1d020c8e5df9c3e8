use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use ct_analytic::{FixedStepIntegrator, LinearLeakage, ThermalSystem, VariableStepIntegrator};
use ct_network::ThermalNetwork;
use ct_project::Config;
use ct_sim::{IntegratorType, integrate_profile};
use tracing::info;

mod csv;
mod error;

use error::{AppError, AppResult};

#[derive(Parser)]
#[command(name = "ct-cli")]
#[command(about = "chiptherm CLI - Transient temperature analysis of multiprocessor chips", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration and decompose its thermal network
    Validate {
        /// Path to the configuration file (YAML, or JSON by extension)
        config_path: PathBuf,
    },
    /// Compute a temperature profile
    #[command(subcommand)]
    Run(RunCommands),
}

#[derive(Subcommand)]
enum RunCommands {
    /// Uniform sampling at the configured time step
    Fixed {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Power profile: one row per sample, one column per core
        power_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Add the configured temperature-dependent leakage
        #[arg(long)]
        leakage: bool,
    },
    /// Irregular sampling; the first column of each row is its interval (s)
    Variable {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Schedule: interval, then one power column per core
        power_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Add the configured temperature-dependent leakage
        #[arg(long)]
        leakage: bool,
    },
    /// Explicit numeric integration at the configured time step
    Numeric {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Power profile: one row per sample, one column per core
        power_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = IntegratorArg::Rk4)]
        integrator: IntegratorArg,
        /// Integrator steps per sample
        #[arg(long, default_value_t = 10)]
        substeps: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum IntegratorArg {
    Rk4,
    Euler,
}

impl From<IntegratorArg> for IntegratorType {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Rk4 => IntegratorType::RK4,
            IntegratorArg::Euler => IntegratorType::ForwardEuler,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run(run_cmd) => match run_cmd {
            RunCommands::Fixed {
                config_path,
                power_path,
                output,
                leakage,
            } => cmd_run_fixed(&config_path, &power_path, output.as_deref(), leakage),
            RunCommands::Variable {
                config_path,
                power_path,
                output,
                leakage,
            } => cmd_run_variable(&config_path, &power_path, output.as_deref(), leakage),
            RunCommands::Numeric {
                config_path,
                power_path,
                output,
                integrator,
                substeps,
            } => cmd_run_numeric(
                &config_path,
                &power_path,
                output.as_deref(),
                integrator.into(),
                substeps,
            ),
        },
    }
}

/// A loaded configuration with its assembled network.
struct Loaded {
    config: Config,
    network: ThermalNetwork,
    core_names: Vec<String>,
}

fn load(config_path: &Path) -> AppResult<Loaded> {
    let config = ct_project::load(config_path)?;
    let network = config.build_network()?;
    let core_names = (0..network.cores())
        .map(|c| {
            network
                .node_name(c)
                .map_or_else(|| format!("core{c}"), str::to_string)
        })
        .collect();
    Ok(Loaded {
        config,
        network,
        core_names,
    })
}

fn leakage_model(config: &Config) -> AppResult<LinearLeakage> {
    let def = config.leakage.as_ref().ok_or_else(|| {
        AppError::InvalidInput("--leakage given but the configuration has no leakage section".into())
    })?;
    Ok(LinearLeakage::new(
        def.nominal_w.clone(),
        def.sensitivity_per_k,
        def.reference_k,
    ))
}

fn check_columns(table: &csv::Table, cores: usize, what: &str) -> AppResult<()> {
    if table.rows() > 0 && table.columns != cores {
        return Err(AppError::InvalidInput(format!(
            "{what} has {} power columns, the network has {cores} cores",
            table.columns
        )));
    }
    Ok(())
}

fn write_output(
    output: Option<&Path>,
    core_names: &[String],
    temperature: &[f64],
) -> AppResult<()> {
    let text = csv::format(core_names, temperature);
    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| AppError::FileWrite {
                path: path.to_path_buf(),
                source,
            })?;
            let samples = temperature.len() / core_names.len().max(1);
            println!("✓ Wrote {samples} samples to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| AppError::FileWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let Loaded {
        config, network, ..
    } = load(config_path)?;
    let (cores, nodes) = (network.cores(), network.nodes());
    let system = ThermalSystem::new(network, config.ambience())?;

    let lambda = system.eigenvalues();
    let slowest = lambda.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let fastest = lambda.iter().copied().fold(f64::INFINITY, f64::min);
    println!("✓ Configuration is valid: {}", config.name);
    println!("  {cores} cores, {nodes} nodes");
    println!("  Eigenvalues in [{fastest:.6e}, {slowest:.6e}] 1/s");
    if fastest < 0.0 {
        // Explicit schemes need h·|λ| bounded; RK4 is stable up to about 2.78.
        println!("  Largest stable RK4 step: {:.3e} s", 2.78 / -fastest);
    }
    Ok(())
}

fn cmd_run_fixed(
    config_path: &Path,
    power_path: &Path,
    output: Option<&Path>,
    leakage: bool,
) -> AppResult<()> {
    let loaded = load(config_path)?;
    let mut power = csv::read(power_path)?;
    check_columns(&power, loaded.network.cores(), "power profile")?;

    let time_step = loaded.config.time_step();
    let system = ThermalSystem::new(loaded.network, loaded.config.ambience())?;
    let integrator = FixedStepIntegrator::new(system, time_step)?;
    info!(samples = power.rows(), time_step, leakage, "fixed-step run");

    let temperature = if leakage {
        let mut hook = leakage_model(&loaded.config)?;
        integrator.compute_with_leakage(&mut power.values, &mut hook)
    } else {
        integrator.compute_all(&power.values)
    };
    write_output(output, &loaded.core_names, &temperature)
}

fn cmd_run_variable(
    config_path: &Path,
    power_path: &Path,
    output: Option<&Path>,
    leakage: bool,
) -> AppResult<()> {
    let loaded = load(config_path)?;
    let table = csv::read(power_path)?;
    if table.rows() == 0 {
        return write_output(output, &loaded.core_names, &[]);
    }
    if table.columns < 2 {
        return Err(AppError::InvalidInput(
            "schedule rows need an interval and at least one power column".into(),
        ));
    }
    let (intervals, mut power) = table.split_first_column();
    check_columns(&power, loaded.network.cores(), "schedule")?;

    let system = Arc::new(ThermalSystem::new(loaded.network, loaded.config.ambience())?);
    let integrator = VariableStepIntegrator::new(system);
    info!(samples = intervals.len(), leakage, "variable-step run");

    let temperature = if leakage {
        let mut hook = leakage_model(&loaded.config)?;
        integrator.compute_with_leakage(&mut power.values, &intervals, &mut hook)?
    } else {
        integrator.compute(&power.values, &intervals)?
    };
    write_output(output, &loaded.core_names, &temperature)
}

fn cmd_run_numeric(
    config_path: &Path,
    power_path: &Path,
    output: Option<&Path>,
    integrator: IntegratorType,
    substeps: usize,
) -> AppResult<()> {
    let loaded = load(config_path)?;
    let power = csv::read(power_path)?;
    check_columns(&power, loaded.network.cores(), "power profile")?;

    let time_step = loaded.config.time_step();
    info!(samples = power.rows(), time_step, substeps, ?integrator, "numeric run");
    let temperature = integrate_profile(
        &loaded.network,
        loaded.config.ambience(),
        &power.values,
        time_step,
        substeps,
        integrator,
    )?;
    write_output(output, &loaded.core_names, &temperature)
}
