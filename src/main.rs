use std::env;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use charfreq::{driver, Config};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<OsString> = env::args_os().collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    match driver::run(&config, &mut io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
