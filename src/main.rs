use std::sync::Arc;

use anyhow::bail;
use appointment_dashboard::{
    config::Config,
    messages::MessageView,
    models::AppointmentStatus,
    notify::ConsoleNotifier,
    render::{render_dashboard, render_messages},
    service::HttpAppointmentService,
    session::{Gate, Session, gate},
    view::DashboardView,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "appointment-dashboard", about = "Review appointment requests and messages")]
struct Cli {
    /// Overrides DASHBOARD_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the appointments table (default).
    Appointments,
    /// Show contact messages.
    Messages,
    /// Change one appointment's status, then show the table.
    SetStatus {
        id: String,
        status: AppointmentStatus,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::from_env()?;
    if let Some(url) = cli.api_url {
        cfg.api_url = url.trim_end_matches('/').to_string();
    }

    let session = match cfg.access_token.clone() {
        Some(token) => Session::authenticated(token, cfg.admin.clone()),
        None => Session::anonymous(),
    };
    if let Gate::Redirect(to) = gate(&session) {
        bail!("not signed in (redirecting to {to}); set DASHBOARD_ACCESS_TOKEN");
    }

    let session = Arc::new(session);
    let service = Arc::new(HttpAppointmentService::new(&cfg)?);
    let notifier = Arc::new(ConsoleNotifier);

    tracing::info!(api = %cfg.api_url, "dashboard starting");

    match cli.command.unwrap_or(Command::Appointments) {
        Command::Messages => {
            let view = MessageView::activate(&session, service.as_ref(), notifier.as_ref()).await?;
            print!("{}", render_messages(view.messages()));
        }
        Command::Appointments => {
            let view = DashboardView::activate(session, service, notifier)?;
            view.load().await;
            print_dashboard(&view);
            view.deactivate();
        }
        Command::SetStatus { id, status } => {
            let view = DashboardView::activate(session, service, notifier)?;
            view.load().await;
            view.update_status(&id, status).await;
            print_dashboard(&view);
            view.deactivate();
        }
    }

    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    let snapshot = view.snapshot();
    let out = render_dashboard(
        view.admin(),
        snapshot.iter().map(|r| &**r),
        |id| view.pending_status(id),
    );
    print!("{out}");
}
