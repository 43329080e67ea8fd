//! Interactive menu loop over the reservation system.
//!
//! The menus only collect field values and render results; every rule lives
//! in the library. Blank input on a modify prompt means "keep the current
//! value" and is translated to `None` here, so the library API stays
//! explicit about present-vs-absent.
//!
//! Input comes through an injected reader so the loops can be driven by a
//! script in tests. End of input surfaces as `ErrorKind::UnexpectedEof` from
//! the prompts and unwinds every loop; [`main_menu`] turns it into a normal
//! exit.

use std::io::{self, BufRead, ErrorKind, Write};

use colored::Colorize;
use serde::Serialize;

use innkeep::{ReservationSystem, Result as InnkeepResult, StorageBackend};

/// Run the main menu over stdin until the user exits or input ends.
pub fn main_menu<B: StorageBackend>(system: &ReservationSystem<B>) -> io::Result<()> {
    let mut input = io::stdin().lock();
    match run(system, &mut input) {
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            println!("\nExiting... Goodbye!");
            Ok(())
        }
        other => other,
    }
}

fn run<B: StorageBackend>(
    system: &ReservationSystem<B>,
    input: &mut impl BufRead,
) -> io::Result<()> {
    loop {
        println!("\n{}", "Hotel Management System".bold());
        println!("1. Hotel Management");
        println!("2. Customer Management");
        println!("3. Reservation Management");
        println!("4. Exit");

        match prompt(input, "Enter your choice")?.as_str() {
            "1" => hotel_menu(system, input)?,
            "2" => customer_menu(system, input)?,
            "3" => reservation_menu(system, input)?,
            "4" => {
                println!("Exiting... Goodbye!");
                return Ok(());
            }
            _ => println!("{}", "Invalid choice. Please try again.".yellow()),
        }
    }
}

fn hotel_menu<B: StorageBackend>(
    system: &ReservationSystem<B>,
    input: &mut impl BufRead,
) -> io::Result<()> {
    loop {
        println!("\n{}", "Hotel Management".bold());
        println!("1. Add Hotel");
        println!("2. Modify Hotel");
        println!("3. Delete Hotel");
        println!("4. Display Hotels");
        println!("5. Reserve Room");
        println!("6. Cancel Reservation");
        println!("7. Back to Main Menu");

        match prompt(input, "Enter your choice")?.as_str() {
            "1" => {
                let id = prompt(input, "Enter Hotel ID")?;
                let name = prompt(input, "Enter Hotel Name")?;
                let location = prompt(input, "Enter Location")?;
                let rooms = prompt_u32(input, "Enter Number of Rooms")?;
                report(system.hotels.create(&id, &name, &location, rooms));
            }
            "2" => {
                let id = prompt(input, "Enter Hotel ID to Modify")?;
                let name = prompt_optional(input, "Enter New Name (leave blank to keep same)")?;
                let location =
                    prompt_optional(input, "Enter New Location (leave blank to keep same)")?;
                let rooms =
                    prompt_optional_u32(input, "Enter New Room Count (leave blank to keep same)")?;
                report(system.hotels.modify(&id, name.as_deref(), location.as_deref(), rooms));
            }
            "3" => {
                let id = prompt(input, "Enter Hotel ID to Delete")?;
                report(system.hotels.delete(&id));
            }
            "4" => display("Hotels", system.hotels.display()),
            "5" => {
                let id = prompt(input, "Enter Hotel ID to Reserve Room")?;
                report(system.hotels.reserve_room(&id));
            }
            "6" => {
                let id = prompt(input, "Enter Hotel ID to Cancel Reservation")?;
                report(system.hotels.cancel_reservation(&id));
            }
            "7" => return Ok(()),
            _ => println!("{}", "Invalid choice. Try again.".yellow()),
        }
    }
}

fn customer_menu<B: StorageBackend>(
    system: &ReservationSystem<B>,
    input: &mut impl BufRead,
) -> io::Result<()> {
    loop {
        println!("\n{}", "Customer Management".bold());
        println!("1. Add Customer");
        println!("2. Modify Customer");
        println!("3. Delete Customer");
        println!("4. Display Customers");
        println!("5. Back to Main Menu");

        match prompt(input, "Enter your choice")?.as_str() {
            "1" => {
                let id = prompt(input, "Enter Customer ID")?;
                let name = prompt(input, "Enter Customer Name")?;
                let email = prompt(input, "Enter Email")?;
                report(system.customers.create(&id, &name, &email));
            }
            "2" => {
                let id = prompt(input, "Enter Customer ID to Modify")?;
                let name = prompt_optional(input, "Enter New Name (leave blank to keep same)")?;
                let email = prompt_optional(input, "Enter New Email (leave blank to keep same)")?;
                report(system.customers.modify(&id, name.as_deref(), email.as_deref()));
            }
            "3" => {
                let id = prompt(input, "Enter Customer ID to Delete")?;
                report(system.customers.delete(&id));
            }
            "4" => display("Customers", system.customers.display()),
            "5" => return Ok(()),
            _ => println!("{}", "Invalid choice. Try again.".yellow()),
        }
    }
}

fn reservation_menu<B: StorageBackend>(
    system: &ReservationSystem<B>,
    input: &mut impl BufRead,
) -> io::Result<()> {
    loop {
        println!("\n{}", "Reservation Management".bold());
        println!("1. Create Reservation");
        println!("2. Cancel Reservation");
        println!("3. Display Reservations");
        println!("4. Back to Main Menu");

        match prompt(input, "Enter your choice")?.as_str() {
            "1" => {
                let id = prompt(input, "Enter Reservation ID")?;
                let customer_id = prompt(input, "Enter Customer ID")?;
                let hotel_id = prompt(input, "Enter Hotel ID")?;
                report(system.reservations.create(&id, &customer_id, &hotel_id));
            }
            "2" => {
                let id = prompt(input, "Enter Reservation ID to Cancel")?;
                report(system.reservations.cancel(&id));
            }
            "3" => display("Reservations", system.reservations.display()),
            "4" => return Ok(()),
            _ => println!("{}", "Invalid choice. Try again.".yellow()),
        }
    }
}

// Prompt helpers

/// Read one trimmed line. Zero bytes read means the input is closed; that is
/// reported as `UnexpectedEof` so every loop above unwinds instead of
/// spinning on empty reads.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

/// Blank input means "no value" and becomes `None`.
fn prompt_optional(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    let value = prompt(input, label)?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

fn prompt_u32(input: &mut impl BufRead, label: &str) -> io::Result<u32> {
    loop {
        match prompt(input, label)?.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("{}", "Please enter a whole number.".yellow()),
        }
    }
}

fn prompt_optional_u32(input: &mut impl BufRead, label: &str) -> io::Result<Option<u32>> {
    loop {
        let Some(value) = prompt_optional(input, label)? else {
            return Ok(None);
        };
        match value.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("{}", "Please enter a whole number or leave blank.".yellow()),
        }
    }
}

// Output helpers

/// Report an operation outcome; failures never end the loop.
fn report(result: InnkeepResult<()>) {
    match result {
        Ok(()) => println!("{}", "Done.".green()),
        Err(e) => println!("{} {}", "Error:".red().bold(), e),
    }
}

fn display<T: Serialize>(label: &str, result: InnkeepResult<T>) {
    match result {
        Ok(records) => match serde_json::to_string_pretty(&records) {
            Ok(rendered) => println!("{label}: {rendered}"),
            Err(e) => println!("{} {}", "Error:".red().bold(), e),
        },
        Err(e) => println!("{} {}", "Error:".red().bold(), e),
    }
}
