#[macro_use]
extern crate log;

use std::io;
use std::process;

use env_logger::Env;
use ppm_ticks::header::{self, Header};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let stdout = io::stdout();
    if let Err(error) = header::emit(&Header::default(), stdout.lock()) {
        error!("{}", error);
        process::exit(1);
    }
}
