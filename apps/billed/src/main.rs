use std::{io, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    render::NEW_BILL_TITLE, BillsController, BillsStore, HttpBillsStore, InMemoryStore,
    NewBillController, NewBillForm, Renderer, Route, SelectedFile, SubmitOutcome, TextRenderer,
};
use shared::domain::Session;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod console;

use config::{load_session, load_settings, parse_store_target, StoreTarget};
use console::{ConsoleNotifier, ConsoleRouter};

#[derive(Parser, Debug)]
#[command(name = "billed", about = "Submit and review expense bills")]
struct Args {
    /// `memory`, `none` or the base URL of the bills service.
    #[arg(long)]
    store_url: Option<String>,
    /// JSON file holding the signed-in user (`{"type":"Employee","email":"..."}`).
    #[arg(long)]
    session_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the bills list (the dashboard for admins).
    List,
    /// Upload a receipt and submit a new bill.
    New {
        #[arg(long = "type")]
        expense_type: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        vat: String,
        #[arg(long, default_value = "")]
        pct: String,
        #[arg(long, default_value = "")]
        commentary: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Show the receipt attached to a bill.
    Receipt { bill_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let session_file = args
        .session_file
        .unwrap_or_else(|| PathBuf::from(&settings.session_file));
    let session = load_session(&session_file)?;
    let target = match &args.store_url {
        Some(raw) => parse_store_target(raw)?,
        None => settings.store_target()?,
    };
    let store = build_store(&target, &session, &settings)?;
    info!(user = %session.email, store = ?target, "billed starting");

    let home = if session.is_admin() {
        Route::Dashboard
    } else {
        Route::Bills
    };
    let router = Arc::new(ConsoleRouter::new(home));
    let renderer: Arc<dyn Renderer> = if session.is_admin() {
        Arc::new(TextRenderer::read_only(io::stdout()))
    } else {
        Arc::new(TextRenderer::new(io::stdout()))
    };
    let bills = BillsController::new(
        session.clone(),
        store.clone(),
        router.clone(),
        renderer.clone(),
    );

    match args.command {
        Command::List => {
            bills.load().await;
        }
        Command::New {
            expense_type,
            name,
            date,
            amount,
            vat,
            pct,
            commentary,
            file,
        } => {
            if session.is_admin() {
                bail!("admins cannot submit bills");
            }
            bills.handle_click_new_bill();
            let form = NewBillForm {
                expense_type,
                name,
                date,
                amount,
                vat,
                pct,
                commentary,
            };
            submit_new_bill(&session, store, router.clone(), form, file).await?;
            if router.current() == Route::Bills {
                bills.load().await;
            }
        }
        Command::Receipt { bill_id } => {
            let rows = bills
                .get_bills()
                .await
                .context("failed to list bills")?
                .unwrap_or_default();
            let Some(row) = rows
                .iter()
                .find(|row| row.id.as_ref().map(|id| id.as_str()) == Some(bill_id.as_str()))
            else {
                bail!("no bill with id '{bill_id}'");
            };
            bills.handle_click_icon_eye(row.file_url.as_deref());
        }
    }

    Ok(())
}

fn build_store(
    target: &StoreTarget,
    session: &Session,
    settings: &config::Settings,
) -> Result<Option<Arc<dyn BillsStore>>> {
    let store: Option<Arc<dyn BillsStore>> = match target {
        StoreTarget::Memory => Some(Arc::new(InMemoryStore::with_fixtures()) as Arc<dyn BillsStore>),
        StoreTarget::Disabled => None,
        StoreTarget::Http(url) => {
            let http = HttpBillsStore::new(url, session.token.clone(), settings.request_timeout())
                .with_context(|| format!("failed to configure bills store at '{url}'"))?;
            Some(Arc::new(http) as Arc<dyn BillsStore>)
        }
    };
    Ok(store)
}

async fn submit_new_bill(
    session: &Session,
    store: Option<Arc<dyn BillsStore>>,
    router: Arc<ConsoleRouter>,
    form: NewBillForm,
    file: PathBuf,
) -> Result<()> {
    println!("{NEW_BILL_TITLE}");
    let mut new_bill =
        NewBillController::new(session.clone(), store, router, Arc::new(ConsoleNotifier));
    let selected = SelectedFile::from_path(&file).await?;
    new_bill.handle_change_file(selected).await;

    match new_bill.handle_submit(&form).await {
        SubmitOutcome::Persisted(saved) => {
            info!(bill_id = ?saved.id, "bill submitted");
        }
        SubmitOutcome::PersistFailed(err) => {
            warn!("bill may not have been saved: {err}");
        }
        SubmitOutcome::NoStore => {
            warn!("no store configured; bill was not saved");
        }
        SubmitOutcome::Blocked(err) => {
            bail!("bill not submitted: {err}");
        }
    }
    Ok(())
}
