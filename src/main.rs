// Mon Oct 19 2026 - Alex

use colored::Colorize;
use vtable_db_generator::ui::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
