use std::env;

use ef_trainer::{cli, config};

fn main() {
    config::init_logging();
    let args: Vec<String> = env::args().collect();
    std::process::exit(cli::run_with_args(&args));
}
