pub mod run;

use clap::Parser;

/// panotiles - Batch krpano tile generator for car tours
#[derive(Parser, Debug)]
#[command(name = "panotiles")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub run: run::RunArgs,
}
