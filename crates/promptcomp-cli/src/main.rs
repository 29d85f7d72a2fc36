mod cli;

use promptcomp_core::notify::ReportedError;

fn main() {
    if let Err(e) = cli::run() {
        if e.downcast_ref::<ReportedError>().is_none() {
            eprintln!("{e:#}"); // pretty anyhow chain
        }
        std::process::exit(1);
    }
}
