#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = sortviz::run_from_env() {
        eprintln!("sortviz: {error}");
        std::process::exit(error.exit_code());
    }
}
