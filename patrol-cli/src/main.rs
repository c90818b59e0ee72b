//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    pretty_env_logger::init();
    if let Err(err) = patrol_cli::run() {
        eprintln!("patrol: {err}");
        std::process::exit(1);
    }
}
