/// Neax Tattoos booking client
///
/// Interactive client flow:
/// 1. Restores a persisted session and loads the catalog concurrently
/// 2. Lets the visitor sign in or create an account
/// 3. Walks the four-step booking wizard and commits the appointment
/// 4. Shows the visitor's booking history
///
/// Configuration: STUDIO_API_URL, STUDIO_TOKEN_PATH (or in a .env file)
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use booking_core::{BookingWizard, Step, TIME_SLOTS};
use studio_client::api::ApiGateway;
use studio_client::booking::{submit_booking, HANDOFF_DELAY};
use studio_client::catalog::{Catalog, CatalogLoader};
use studio_client::config::ClientConfig;
use studio_client::history::BookingHistory;
use studio_client::session::{new_shared_session, SessionStore};

fn init_env() {
    let _ = dotenv::dotenv();
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read input")?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ClientConfig::from_env();
    let session = new_shared_session();
    let gateway = ApiGateway::new(config.api_url.clone(), session.clone());
    let store = SessionStore::new(gateway.clone(), session, config.token_path.clone());
    let loader = CatalogLoader::new(gateway.clone());
    let history = BookingHistory::new(gateway.clone());

    println!("Neax Tattoos — appointment booking");
    println!("API: {}", config.api_url);

    // Credential restore and catalog load have no ordering dependency.
    let (restored, catalog) = tokio::join!(store.restore(), loader.load());
    if let Some(user) = restored {
        println!("Welcome back, {}!", user.name);
    }

    loop {
        println!();
        println!("[1] Sign in  [2] Create account  [3] Book appointment  [4] My appointments  [5] Sign out  [q] Quit");
        match prompt("> ")?.as_str() {
            "1" => sign_in(&store).await?,
            "2" => create_account(&store).await?,
            "3" => {
                // Protected flow: unauthenticated is the default until
                // restore or login succeeds.
                if store.is_authenticated().await {
                    book_appointment(&gateway, &store, &history, &catalog).await?;
                } else {
                    println!("Please sign in to book an appointment.");
                }
            }
            "4" => {
                if store.is_authenticated().await {
                    show_history(&store, &history).await;
                } else {
                    println!("Please sign in to see your appointments.");
                }
            }
            "5" => {
                store.logout().await;
                println!("Logged out successfully.");
            }
            "q" | "Q" => break,
            other => println!("Unknown option: {other}"),
        }
    }

    Ok(())
}

async fn sign_in(store: &SessionStore) -> Result<()> {
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;
    match store.login(&email, &password).await {
        Ok(user) => println!("Welcome back, {}!", user.name),
        Err(err) => println!("Sign-in failed: {err}"),
    }
    Ok(())
}

async fn create_account(store: &SessionStore) -> Result<()> {
    let name = prompt("Name: ")?;
    let email = prompt("Email: ")?;
    let phone = prompt("Phone (optional): ")?;
    let password = prompt("Password: ")?;
    let phone = if phone.is_empty() { None } else { Some(phone.as_str()) };
    match store.register(&email, &password, &name, phone).await {
        Ok(user) => println!("Account created successfully. Welcome, {}!", user.name),
        Err(err) => println!("Registration failed: {err}"),
    }
    Ok(())
}

async fn book_appointment(
    gateway: &ApiGateway,
    store: &SessionStore,
    history: &BookingHistory,
    catalog: &Catalog,
) -> Result<()> {
    let mut wizard = BookingWizard::new();

    loop {
        let step = wizard.step();
        println!();
        println!("Step {} of 4 — {}", step.number(), step.label());

        match step {
            Step::ServiceSelect => {
                for (idx, service) in catalog.services.iter().enumerate() {
                    let price = if service.price_start == 0 {
                        "FREE".to_string()
                    } else {
                        format!("from ${}", service.price_start)
                    };
                    println!(
                        "  [{}] {} — {} ({} min, {})",
                        idx + 1,
                        service.name,
                        service.description,
                        service.duration_minutes,
                        price
                    );
                }
            }
            Step::ArtistSelect => {
                for (idx, artist) in catalog.artists.iter().enumerate() {
                    println!(
                        "  [{}] {} — {} ({} years)",
                        idx + 1,
                        artist.name,
                        artist.specialty,
                        artist.years_experience
                    );
                }
            }
            Step::DateTimeSelect => {
                println!("  Enter a date as YYYY-MM-DD, or pick a time slot:");
                for (idx, slot) in TIME_SLOTS.iter().enumerate() {
                    println!("  [{}] {}", idx + 1, slot);
                }
            }
            Step::Confirm => {
                let draft = wizard.draft();
                if let Some(service) = &draft.service {
                    println!("  Service: {}", service.name);
                }
                if let Some(artist) = &draft.artist {
                    println!("  Artist:  {}", artist.name);
                }
                if let Some(date) = draft.date {
                    println!("  Date:    {date}");
                }
                if let Some(time) = &draft.time {
                    println!("  Time:    {time}");
                }
                println!("  Notes:   {}", wizard.draft().notes);
            }
        }

        let commands = match step {
            Step::Confirm => "[c] confirm  [notes <text>] add notes  [p] previous  [x] cancel",
            _ => "[n] next  [p] previous  [x] cancel",
        };
        println!("  {commands}");

        let input = prompt("booking> ")?;
        match input.as_str() {
            "x" => {
                println!("Booking cancelled.");
                return Ok(());
            }
            "p" => {
                if wizard.retreat().is_none() {
                    println!("Already at the first step.");
                }
            }
            "n" => {
                if let Err(err) = wizard.advance() {
                    println!("{err}");
                }
            }
            "c" if step == Step::Confirm => {
                match submit_booking(gateway, &mut wizard).await {
                    Ok(created) => {
                        println!("Booking confirmed! Status: {:?}", created.status);
                        println!("Check your email for details.");
                        tokio::time::sleep(HANDOFF_DELAY).await;
                        show_history(store, history).await;
                        return Ok(());
                    }
                    Err(err) => {
                        // Draft preserved; the user may retry from here.
                        println!("Booking failed: {err}");
                    }
                }
            }
            other => {
                if let Some(text) = other.strip_prefix("notes ") {
                    wizard.set_notes(text);
                    continue;
                }
                handle_selection(&mut wizard, step, other, catalog);
            }
        }
    }
}

fn handle_selection(wizard: &mut BookingWizard, step: Step, input: &str, catalog: &Catalog) {
    match step {
        Step::ServiceSelect => {
            match input
                .parse::<usize>()
                .ok()
                .and_then(|n| catalog.services.get(n.wrapping_sub(1)))
            {
                Some(service) => wizard.select_service(service.clone()),
                None => println!("Pick a service by number."),
            }
        }
        Step::ArtistSelect => {
            match input
                .parse::<usize>()
                .ok()
                .and_then(|n| catalog.artists.get(n.wrapping_sub(1)))
            {
                Some(artist) => wizard.select_artist(artist.clone()),
                None => println!("Pick an artist by number."),
            }
        }
        Step::DateTimeSelect => {
            if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
                if let Err(err) = wizard.select_date(date) {
                    println!("{err}");
                }
            } else if let Some(slot) = input
                .parse::<usize>()
                .ok()
                .and_then(|n| TIME_SLOTS.get(n.wrapping_sub(1)))
            {
                if let Err(err) = wizard.select_time(slot) {
                    println!("{err}");
                }
            } else {
                println!("Enter a date as YYYY-MM-DD or a slot number.");
            }
        }
        Step::Confirm => println!("Use [c] to confirm or [p] to go back."),
    }
}

async fn show_history(store: &SessionStore, history: &BookingHistory) {
    match history.fetch().await {
        Ok(view) => {
            if view.is_empty() {
                println!("No appointments yet. Book your first tattoo appointment with us!");
                return;
            }
            println!("Your appointments:");
            for booking in view.bookings() {
                let notes = booking.notes.as_deref().unwrap_or("");
                println!(
                    "  {} with {} on {} at {} [{:?}] {}",
                    booking.service_name,
                    booking.artist_name,
                    booking.appointment_date,
                    booking.appointment_time,
                    booking.status,
                    notes
                );
            }
        }
        Err(err) => {
            println!("Failed to load bookings: {err}");
            if matches!(err, studio_client::api::ApiError::Rejected { status: 401, .. }) {
                // Expired credential: reset and send the user back to the
                // public entry point instead of a hard error.
                store.logout().await;
                println!("Your session has expired, please sign in again.");
            }
        }
    }
}
