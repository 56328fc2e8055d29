use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match trendline::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
