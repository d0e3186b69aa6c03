use clap::Parser;
use finsight::data::Household;
use finsight::{Command, Context, execute, init_logging};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finsight")]
#[command(about = "Personal finance analytics for a household file")]
struct Args {
    /// Path to the data directory (default: ~/.finsight/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write logs to finsight.log in the data directory instead of stderr
    #[arg(long)]
    log_file: bool,

    /// Household YAML file
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".finsight")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level, args.log_file)?;

    let household = Household::load(&args.file)?;
    let ctx = Context::new(&args.file, &data_dir);
    let output = execute(&args.command, &household, &ctx)?;
    println!("{output}");

    Ok(())
}
