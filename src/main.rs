//=====================================================
// File: main.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: ArcanaScript CLI entry point
// Objective: Run or statically check .arc scripts with configurable seed,
//            loop ceiling and save directory
//=====================================================

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use arcanascript::interpreter::rng;
use arcanascript::{ConsoleHost, Interpreter, InterpreterConfig, logging};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "arcanascript", about = "ArcanaScript CLI")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute an .arc script.
    Run(RunArgs),
    /// Validate block structure and statements without executing.
    Check(CheckArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    /// Path to the script to execute.
    pub script: PathBuf,

    /// Configuration file to load instead of the default location.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// PRNG seed for this run.
    #[arg(long = "seed", conflicts_with = "random_seed")]
    pub seed: Option<u32>,

    /// Draw the seed from the operating system and print it.
    #[arg(long = "random-seed")]
    pub random_seed: bool,

    /// Iteration ceiling for until loops.
    #[arg(long = "until-limit")]
    pub until_limit: Option<usize>,

    /// Directory that Scribe writes into.
    #[arg(long = "save-dir")]
    pub save_dir: Option<PathBuf>,

    /// Log interpreter activity to stderr.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the script to validate.
    pub script: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let verbose = matches!(&args.command, Command::Run(run) if run.verbose);
    logging::init(verbose);

    let outcome = match args.command {
        Command::Run(cmd) => run_entry(cmd),
        Command::Check(cmd) => check_entry(&cmd.script),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn read_script(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))
}

fn resolve_config(args: &RunArgs) -> Result<InterpreterConfig> {
    let mut config = InterpreterConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.random_seed {
        config.seed = rng::entropy_seed();
        eprintln!("seed: {}", config.seed);
    }
    if let Some(limit) = args.until_limit {
        config.until_limit = limit;
    }
    if let Some(dir) = &args.save_dir {
        config.save_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run_entry(args: RunArgs) -> Result<()> {
    let source = read_script(&args.script)?;
    let config = resolve_config(&args)?;
    info!(script = %args.script.display(), seed = config.seed, "running script");
    let host = ConsoleHost::new(config.save_dir_or_cwd());
    let mut interpreter = Interpreter::with_host(config, Box::new(host));
    interpreter
        .interpret(&source)
        .map_err(|err| anyhow::anyhow!("[{}] {}", err.code(), err))
        .with_context(|| format!("running {}", args.script.display()))
}

fn check_entry(path: &Path) -> Result<()> {
    let source = read_script(path)?;
    arcanascript::check(&source).with_context(|| format!("checking {}", path.display()))?;
    println!("{}: ok", path.display());
    Ok(())
}

//=====================================================
// End of file
//=====================================================
