//! CLI for lcglab — generate LCG sequences and check them for uniformity and independence.

mod commands;

use clap::{Parser, Subcommand};

use commands::GeneratorArgs;

#[derive(Parser)]
#[command(name = "lcglab")]
#[command(about = "lcglab — linear congruential generator with chi-square and runs validation")]
#[command(version = lcglab_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate parameters, generate the sequence, and test it
    Generate {
        #[command(flatten)]
        args: GeneratorArgs,
    },

    /// Move the seed to (X0 + 137) mod m and generate/test again
    Regenerate {
        #[command(flatten)]
        args: GeneratorArgs,
    },

    /// Print the chi-square critical value for a df/alpha pair
    Critical {
        /// Degrees of freedom
        #[arg(long)]
        df: usize,

        /// Significance level
        #[arg(long, default_value = "0.05")]
        alpha: f64,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { args } => commands::generate::run(&args),
        Commands::Regenerate { args } => commands::regenerate::run(&args),
        Commands::Critical { df, alpha } => commands::critical::run(df, alpha),
    }
}
