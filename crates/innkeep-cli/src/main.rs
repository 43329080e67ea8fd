//! Innkeep CLI - interactive hotel, customer, and reservation management.

mod cli;
mod menu;

use clap::Parser;
use cli::Cli;
use innkeep::ReservationSystem;

fn main() {
    let cli = Cli::parse();
    let system = ReservationSystem::open(cli.data_dir);

    if let Err(e) = menu::main_menu(&system) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
