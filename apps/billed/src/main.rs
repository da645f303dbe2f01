use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dom::HeadlessDocument;
use frontend::{
    router::{mount_bills_page, BillsRoute, MountedBills, PageState},
    BillsUi,
};
use shared::{
    domain::{BillId, UserSession},
    routes::Route,
};
use storage::{fixtures, BillsSource, Storage};
use tracing::{info, warn};

mod config;

use config::{load_settings, LoadedSettings, Settings};

#[derive(Parser, Debug)]
#[command(name = "billed", about = "Employee bills page rendered in a headless document")]
struct Cli {
    #[arg(long, default_value = "billed.toml")]
    config: PathBuf,
    /// Overrides the bills file from the configuration.
    #[arg(long)]
    bills: Option<PathBuf>,
    /// Overrides the session email from the configuration.
    #[arg(long)]
    email: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Writes the sample bills to the bills file.
    Seed,
    /// Prints the bills page markup.
    Render {
        #[arg(long)]
        loading: bool,
        #[arg(long)]
        error: Option<String>,
    },
    /// Prints the session's bills with display dates, in store order.
    List,
    /// Clicks the receipt icon of a bill and prints the modal body.
    Preview { bill_id: String },
    /// Clicks the new bill button and prints the route it leads to.
    NewBill,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let LoadedSettings {
        mut settings,
        warnings,
    } = load_settings(&cli.config);
    if let Some(bills) = cli.bills {
        settings.bills_path = bills;
    }
    if let Some(email) = cli.email {
        settings.user_email = email;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();
    for warning in &warnings {
        warn!(config = %cli.config.display(), %warning, "configuration value ignored");
    }

    match cli.command {
        Command::Seed => {
            let storage = Storage::from_records(fixtures::bills());
            storage.save(&settings.bills_path).await?;
            println!(
                "wrote {} bills to {}",
                storage.len().await,
                settings.bills_path.display()
            );
        }
        Command::Render { loading, error } => {
            if loading || error.is_some() {
                let ui = BillsUi {
                    loading,
                    error: error.as_deref(),
                    ..BillsUi::default()
                };
                println!("{}", ui.render());
            } else {
                let (document, _, _) = mount(&settings).await?;
                println!("{}", document.body_html());
            }
        }
        Command::List => {
            let storage = Storage::open(&settings.bills_path).await?;
            let document = HeadlessDocument::new();
            let container = frontend::Bills::new(frontend::BillsContext {
                document: Rc::new(document.clone()),
                on_navigate: Rc::new(|_: Route| {}),
                store: Some(Rc::new(storage)),
                session: settings.session(),
                modal: Rc::new(dom::HeadlessModal::new(document, settings.modal_width)),
            });
            for bill in container.get_bills().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    bill.id,
                    bill.date,
                    frontend::format::format_amount(bill.amount),
                    frontend::format::format_status(bill.status)
                );
            }
        }
        Command::Preview { bill_id } => {
            let storage = Storage::open(&settings.bills_path).await?;
            let bill = storage
                .get_bill(&BillId(bill_id.clone()))
                .await
                .with_context(|| format!("unknown bill {bill_id}"))?;
            let Some(url) = bill.file_url else {
                bail!("bill {bill_id} has no receipt");
            };

            let (document, _mounted, _) = mount_with(&settings, Rc::new(storage)).await?;
            let icon = document
                .get_all_by_test_id("icon-eye")?
                .into_iter()
                .find(|icon| icon.attribute("data-bill-url").as_deref() == Some(url.as_str()))
                .with_context(|| format!("bill {bill_id} is not listed for this session"))?;
            icon.click();

            let body = document
                .find("#modaleFile .modal-body")?
                .context("receipt modal missing from the page")?;
            println!("{}", body.inner_html());
        }
        Command::NewBill => {
            let (document, _mounted, navigations) = mount(&settings).await?;
            document.get_by_test_id("btn-new-bill")?.click();
            for route in navigations.borrow().iter() {
                println!("{}", route.path());
            }
        }
    }

    Ok(())
}

type Navigations = Rc<RefCell<Vec<Route>>>;

async fn mount(settings: &Settings) -> Result<(HeadlessDocument, MountedBills, Navigations)> {
    let storage = Storage::open(&settings.bills_path).await?;
    mount_with(settings, Rc::new(storage)).await
}

/// The returned `MountedBills` owns the container; page listeners stop reacting
/// once it is dropped.
async fn mount_with(
    settings: &Settings,
    store: Rc<dyn BillsSource>,
) -> Result<(HeadlessDocument, MountedBills, Navigations)> {
    let navigations: Navigations = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&navigations);
    let session: UserSession = settings.session();
    let document = HeadlessDocument::new();

    let mounted = mount_bills_page(
        &document,
        BillsRoute {
            store,
            session,
            on_navigate: Rc::new(move |route: Route| sink.borrow_mut().push(route)),
            modal_width: settings.modal_width,
        },
    )
    .await?;

    if let PageState::Failed { message } = &mounted.state {
        bail!("bills page failed to load: {message}");
    }
    info!(
        bills_path = %settings.bills_path.display(),
        eye_icons = mounted.bindings.eye_icons,
        "bills page mounted"
    );
    Ok((document, mounted, navigations))
}
