use std::process;

fn main() {
    if let Err(e) = richhelp::cli::run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
