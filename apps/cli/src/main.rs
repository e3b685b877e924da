use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::AppConfig, load_settings, CustomerDashboard, Dashboard, DriverDashboard, JobProgress,
    JobsView, LoginForm, MockAuthenticator, Notification, RegisterForm, Screen, SessionStore,
};
use shared::{
    domain::{Identity, JobId, UserKind},
    records::{JobOffer, Priority, ServiceRecord},
};
use storage::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "towing", about = "Swift Tow Fleet terminal client")]
struct Cli {
    /// Overrides the configured database url.
    #[arg(long)]
    database_url: Option<String>,
    /// Overrides the simulated authentication latency.
    #[arg(long)]
    auth_delay_ms: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        email: String,
        #[arg(long, default_value = "password")]
        password: String,
        #[arg(long, default_value = "customer")]
        kind: UserKind,
    },
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "customer")]
        kind: UserKind,
        #[arg(long, default_value = "")]
        vehicle_type: String,
    },
    Logout,
    Whoami,
    /// Go online, accept an offer and walk it through to completion.
    Drive {
        #[arg(long, default_value_t = 1)]
        job_id: i64,
    },
    /// List the signed-in customer's services.
    Services,
    /// Print the app bundle and push settings.
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(database_url) = cli.database_url {
        settings.database_url = database_url;
    }
    if let Some(delay) = cli.auth_delay_ms {
        settings.auth_delay_ms = delay;
    }

    if let Command::Config = cli.command {
        print_app_config(&settings.app);
        return Ok(());
    }

    let store = SqliteStore::new(&settings.database_url)
        .await
        .with_context(|| format!("failed to open '{}'", settings.database_url))?;
    let session = SessionStore::load(
        Arc::new(store),
        Arc::new(MockAuthenticator::new(settings.auth_delay())),
    )
    .await?;
    info!(
        database_url = %settings.database_url,
        screen = ?Screen::current(&session).await,
        "session loaded"
    );

    match cli.command {
        Command::Login {
            email,
            password,
            kind,
        } => {
            let form = LoginForm {
                email,
                password,
                kind,
            };
            let outcome = form.submit(&session).await;
            report(outcome.identity.as_ref(), outcome.notification.as_ref());
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            phone,
            kind,
            vehicle_type,
        } => {
            let form = RegisterForm {
                name,
                email,
                phone,
                password,
                confirm_password,
                kind,
                vehicle_type,
            };
            let outcome = form.submit(&session).await;
            report(outcome.identity.as_ref(), outcome.notification.as_ref());
        }
        Command::Logout => {
            session.logout().await?;
            println!("Signed out");
        }
        Command::Whoami => match session.current().await {
            Some(identity) => {
                print_identity(&identity);
                println!("Screen: {:?}", Screen::for_identity(Some(&identity)));
            }
            None => println!("Signed out"),
        },
        Command::Drive { job_id } => {
            let identity = signed_in(&session).await?;
            let mut dashboard = DriverDashboard::new(identity)?;
            drive(&mut dashboard, JobId(job_id))?;
        }
        Command::Services => {
            let identity = signed_in(&session).await?;
            match Dashboard::open(identity)? {
                Dashboard::Customer(dashboard) => print_services(&dashboard),
                Dashboard::Driver(_) => bail!("services are only listed for customers"),
            }
        }
        Command::Config => {}
    }

    Ok(())
}

async fn signed_in(session: &SessionStore) -> Result<Identity> {
    match session.current().await {
        Some(identity) => Ok(identity),
        None => bail!("not signed in; run `towing login <email>` first"),
    }
}

fn report(identity: Option<&Identity>, notification: Option<&Notification>) {
    if let Some(notification) = notification {
        let marker = if notification.is_error() { "!" } else { "*" };
        println!(
            "{marker} {}: {}",
            notification.title, notification.description
        );
    }
    if let Some(identity) = identity {
        print_identity(identity);
    }
}

fn print_identity(identity: &Identity) {
    println!("Signed in as {} <{}>", identity.name, identity.email);
    println!("  kind:    {}", identity.kind);
    if let Some(phone) = &identity.phone {
        println!("  phone:   {phone}");
    }
    if let Some(vehicle_type) = &identity.vehicle_type {
        println!("  vehicle: {vehicle_type}");
    }
}

fn print_offer(offer: &JobOffer) {
    let urgent = if offer.priority == Priority::Urgent {
        " [Urgent]"
    } else {
        ""
    };
    println!(
        "  #{} {}{} {} ({} • {})",
        offer.id,
        offer.kind.request_title(),
        urgent,
        offer.price,
        offer.distance,
        offer.estimated_time
    );
    println!("     {}", offer.vehicle.summary());
    println!(
        "     {} -> {}",
        offer.pickup_location, offer.dropoff_location
    );
    println!("     {} {}", offer.customer.name, offer.customer.phone);
}

fn drive(dashboard: &mut DriverDashboard, job_id: JobId) -> Result<()> {
    dashboard.set_online(true)?;
    match dashboard.jobs_view() {
        JobsView::Offers(offers) => {
            println!("Available jobs:");
            offers.iter().for_each(print_offer);
        }
        JobsView::Offline | JobsView::JobInProgress(_) => {}
    }

    let accepted = dashboard.accept_offer(job_id)?;
    println!(
        "Accepted job #{} ({})",
        accepted.id(),
        accepted.offer.kind.service_title()
    );

    while let Some(label) = dashboard.next_action_label() {
        match dashboard.perform_next_action()? {
            JobProgress::Advanced(status) => println!("{label} -> {}", status.display_text()),
            JobProgress::Completed(job) => {
                println!("{label} -> job #{} closed", job.offer.id);
            }
        }
    }

    let earnings = dashboard.earnings();
    println!(
        "Earnings: today {} / week {} / month {} ({} jobs)",
        earnings.today, earnings.week, earnings.month, earnings.total_jobs
    );
    Ok(())
}

fn print_service(service: &ServiceRecord) {
    println!(
        "  #{} {} [{}] {}",
        service.id,
        service.kind.service_title(),
        service.status.display_text(),
        service.price
    );
    println!("     {}", service.vehicle.summary());
    if let Some(driver) = &service.driver {
        let eta = driver
            .eta
            .as_deref()
            .map(|eta| format!(", ETA {eta}"))
            .unwrap_or_default();
        println!("     driver {} ({:.1}★{eta})", driver.name, driver.rating);
    }
}

fn print_services(dashboard: &CustomerDashboard) {
    let active = dashboard.active_services();
    println!("Active services:");
    if active.is_empty() {
        println!("  none");
    }
    active.into_iter().for_each(print_service);

    let history = dashboard.completed_services();
    println!("Service history:");
    if history.is_empty() {
        println!("  none");
    }
    history.into_iter().for_each(print_service);
}

fn print_app_config(app: &AppConfig) {
    println!("app id:   {}", app.app_id);
    println!("app name: {}", app.app_name);
    println!("web dir:  {}", app.web_dir);
    if let Some(server) = &app.server {
        println!("server:   {} (cleartext: {})", server.url, server.cleartext);
    }
    let push = app
        .push_presentation
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("push:     {push}");
}
