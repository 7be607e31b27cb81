#![forbid(unsafe_code)]

use std::process::ExitCode;

use flightdeck_data::FlightSource;
use flightdeck_demo::app::App;
use flightdeck_demo::cli::{self, Parsed};
use flightdeck_runtime::{Program, ProgramConfig};

fn main() -> ExitCode {
    flightdeck_core::logging::init();

    let opts = match cli::parse(std::env::args().skip(1)) {
        Ok(Parsed::Help) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Parsed::Version) => {
            println!("flightdeck-demo {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Ok(Parsed::Run(opts)) => opts,
        Err(message) => {
            eprintln!("error: {message}\n\n{}", cli::USAGE);
            return ExitCode::from(2);
        }
    };

    let source = FlightSource::new().with_page_size(opts.page_size);
    let app = App::new(source, opts.strategy);
    let config = ProgramConfig::default().with_mouse(opts.mouse);
    let result = Program::with_config(app, config).and_then(|mut program| program.run());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
