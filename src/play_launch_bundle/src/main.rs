//! play_launch_bundle CLI

use clap::{Parser, Subcommand};
use play_launch_bundle::{
    assemble_launch, params::render_params_file, record::PathLocator, record::SystemRunner,
    AmentIndex, AssemblyConfig, ProcessSpec, RecordGenerator,
};
use std::{
    path::{Path, PathBuf},
    process,
};

#[derive(Parser)]
#[command(name = "play_launch_bundle")]
#[command(about = "Deferred parameter bundle assembly for the MoveIt demo node", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true)]
    quiet: bool,

    /// Assembly configuration YAML
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the unresolved process declaration as JSON
    Describe {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve every deferred value and write the process record
    Resolve {
        /// Launch arguments (key:=value)
        #[arg(value_parser = parse_launch_arg)]
        args: Vec<(String, String)>,

        /// Output file path (default: record.json)
        #[arg(short, long, default_value = "record.json")]
        output: PathBuf,

        /// Also write the resolved parameters as a ROS 2 parameter file
        #[arg(long)]
        params_file: Option<PathBuf>,
    },
}

fn parse_launch_arg(s: &str) -> Result<(String, String), String> {
    match s.split_once(":=") {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("Invalid launch argument format: {}", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Describe { args, output } => {
            assemble(cli.config.as_deref(), &args).and_then(|spec| describe(&spec, output.as_deref()))
        }
        Commands::Resolve {
            args,
            output,
            params_file,
        } => assemble(cli.config.as_deref(), &args)
            .and_then(|spec| resolve_and_write(&spec, &output, params_file.as_deref())),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn assemble(
    config_path: Option<&Path>,
    args: &[(String, String)],
) -> Result<ProcessSpec, Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => AssemblyConfig::from_file(path)?,
        None => AssemblyConfig::default(),
    };
    for (key, value) in args {
        config.apply_override(key, value)?;
    }

    let index = AmentIndex::from_env();
    log::debug!("Ament prefixes: {:?}", index.prefixes());
    Ok(assemble_launch(&index, &config)?)
}

fn describe(spec: &ProcessSpec, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let json = spec.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            log::info!("Wrote process declaration: {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn resolve_and_write(
    spec: &ProcessSpec,
    output: &Path,
    params_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = AmentIndex::from_env();
    let locator = PathLocator::from_env();
    let generator = RecordGenerator::new(&index, &locator, &SystemRunner);
    let record = generator.generate_process_record(spec)?;

    std::fs::write(output, record.to_json()?)?;
    log::info!("Generated record.json: {}", output.display());
    log::info!("  {} parameters resolved", record.params.len());

    if let Some(path) = params_file {
        std::fs::write(path, render_params_file(&record.name, &record.params)?)?;
        log::info!("Wrote parameter file: {}", path.display());
    }

    Ok(())
}
