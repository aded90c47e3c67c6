//! Zewotir Admin Console
//!
//! Command-line front end for the admin dashboard. Every command that reads
//! dashboard data navigates through the session guard first.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zw_common::{
    AssetType, BlogPost, Compliance, ContactInquiry, Currency, Customer, FaqItem, Industry,
    Microfinance, PortfolioAsset, RegionalState, RoleDefinition, StaffSize, SubCity, Subaccount,
    Transaction,
};
use zw_console::commands;
use zw_console::resources::table::{self, SortSpec, TableQuery, DEFAULT_PAGE_SIZE};
use zw_console::resources::{Deletable, Resource, ResourceView};
use zw_console::{AppState, Config, GuardOutcome};

#[derive(Parser, Debug)]
#[command(name = "zw-console")]
#[command(version, about = "Zewotir admin dashboard console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with email (or phone number) and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ZW_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Complete an OTP sign-in
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },
    /// Email a password reset OTP
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the emailed OTP
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        token: String,
        #[arg(long, env = "ZW_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the verified session
    Whoami,
    /// Show the sidebar for the signed-in role
    Menu,
    /// List a resource as JSON rows
    List {
        resource: ResourceKind,
        /// Portfolio tab
        #[arg(long)]
        asset_type: Option<AssetType>,
        /// Column search as `column=text`
        #[arg(long, value_parser = parse_search)]
        search: Option<(String, String)>,
        /// Sort the current page by this column
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, requires = "sort")]
        desc: bool,
        /// One-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// Delete one record
    Delete {
        resource: ResourceKind,
        id: String,
        #[arg(long)]
        asset_type: Option<AssetType>,
        /// Confirm the deletion; without it nothing is sent
        #[arg(long)]
        yes: bool,
    },
    /// Switch live or test mode for the selected business
    Live { mode: LiveMode },
    /// Select the business later commands are scoped by
    UseBusiness { id: String },
    /// List the merchant's businesses
    Businesses,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LiveMode {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    Transactions,
    Customers,
    Microfinance,
    Compliance,
    Industries,
    States,
    SubCities,
    StaffSizes,
    Currencies,
    Portfolio,
    Blog,
    Inquiries,
    Faqs,
    Roles,
    Subaccounts,
}

impl ResourceKind {
    /// Dashboard route the resource lives under.
    const fn route(self) -> &'static str {
        match self {
            Self::Transactions => "/dashboard/transactions",
            Self::Customers => "/dashboard/customer",
            Self::Microfinance => "/dashboard/microfinance",
            Self::Compliance => "/dashboard/compliance",
            Self::Industries => "/dashboard/settings?tab=industry",
            Self::States => "/dashboard/settings?tab=state",
            Self::SubCities => "/dashboard/settings?tab=subcity",
            Self::StaffSizes => "/dashboard/settings?tab=staffsize",
            Self::Currencies => "/dashboard/settings?tab=currency",
            Self::Portfolio => "/dashboard/portfolio",
            Self::Blog => "/dashboard/Blog",
            Self::Inquiries => "/dashboard/Inquiries",
            Self::Faqs => "/dashboard/faq",
            Self::Roles => "/dashboard/roles",
            Self::Subaccounts => "/dashboard/subaccounts",
        }
    }
}

fn parse_search(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(column, text)| (column.trim().to_string(), text.to_string()))
        .filter(|(column, _)| !column.is_empty())
        .ok_or_else(|| format!("expected `column=text`, got `{raw}`"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _sentry_guard = zw_console::init_sentry();
    init_tracing(&config);

    let state = AppState::from_config(config)
        .await
        .context("Failed to open the session store")?;

    run(&state, cli.command).await
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zw_console=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = commands::sign_in(&state.api, &email, &password).await?;
            print_json(&session_summary(&session))?;
        }
        Command::VerifyOtp { email, otp } => {
            let session = commands::verify_otp(&state.api, &email, &otp).await?;
            print_json(&session_summary(&session))?;
        }
        Command::ForgotPassword { email } => {
            commands::forgot_password(&state.api, &email).await?;
            println!("Password reset OTP sent to {email}");
        }
        Command::ResetPassword {
            email,
            token,
            new_password,
        } => {
            commands::reset_password(&state.api, &email, &token, &new_password).await?;
            println!("Password updated. You can now log in.");
        }
        Command::Logout => commands::sign_out(&state.api).await?,
        Command::Whoami => {
            let session = enter(state, "/dashboard").await?;
            print_json(&session_summary(&session))?;
            if let Some(profile) = commands::tenant_profile(&state.api).await? {
                print_json(&profile)?;
            }
        }
        Command::Menu => {
            let mut shell = state.shell();
            guard_outcome(shell.navigate("/dashboard").await)?;
            print_json(&shell.menu())?;
        }
        Command::List {
            resource,
            asset_type,
            search,
            sort,
            desc,
            page,
            page_size,
        } => {
            enter(state, resource.route()).await?;
            let query = TableQuery {
                search,
                sort: sort.map(|column| SortSpec {
                    column,
                    descending: desc,
                }),
                page: page.saturating_sub(1),
                page_size: page_size.max(1),
            };
            list(state, resource, asset_type, &query).await?;
        }
        Command::Delete {
            resource,
            id,
            asset_type,
            yes,
        } => {
            enter(state, resource.route()).await?;
            delete(state, resource, asset_type, &id, yes).await?;
        }
        Command::Live { mode } => {
            enter(state, "/dashboard").await?;
            commands::set_live_mode(&state.api, matches!(mode, LiveMode::On)).await?;
            println!("{}", if matches!(mode, LiveMode::On) { "Live" } else { "Test" });
        }
        Command::UseBusiness { id } => {
            enter(state, "/dashboard").await?;
            commands::use_business(&state.api, &id).await?;
        }
        Command::Businesses => {
            enter(state, "/dashboard").await?;
            print_json(&commands::list_businesses(&state.api).await?)?;
        }
    }
    Ok(())
}

/// Navigate into the dashboard and fail unless the guard allows it.
async fn enter(state: &AppState, route: &str) -> anyhow::Result<zw_common::Session> {
    guard_outcome(state.shell().navigate(route).await)
}

fn guard_outcome(outcome: GuardOutcome) -> anyhow::Result<zw_common::Session> {
    match outcome {
        GuardOutcome::Allow(session) => Ok(session),
        GuardOutcome::Redirect { to } => bail!("Not signed in (redirected to {to}). Run `zw-console login`."),
        GuardOutcome::Forbidden { permission } => bail!("Your role lacks {permission}"),
        GuardOutcome::Public => bail!("Not a dashboard route"),
    }
}

#[derive(Serialize)]
struct SessionSummary<'a> {
    user_id: &'a str,
    display_name: &'a str,
    email: Option<&'a str>,
    role: Option<&'a str>,
}

fn session_summary(session: &zw_common::Session) -> SessionSummary<'_> {
    SessionSummary {
        user_id: &session.user_id,
        display_name: &session.display_name,
        email: session.email.as_deref(),
        role: session.role.as_ref().map(zw_common::Role::as_str),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn list(
    state: &AppState,
    kind: ResourceKind,
    asset_type: Option<AssetType>,
    query: &TableQuery,
) -> anyhow::Result<()> {
    let api = &state.api;
    let mut scope = state.scope().await;
    scope.asset_type = asset_type;

    let page = match kind {
        ResourceKind::Transactions => fetch_page::<Transaction>(api, scope, query).await,
        ResourceKind::Customers => fetch_page::<Customer>(api, scope, query).await,
        ResourceKind::Microfinance => fetch_page::<Microfinance>(api, scope, query).await,
        ResourceKind::Compliance => fetch_page::<Compliance>(api, scope, query).await,
        ResourceKind::Industries => fetch_page::<Industry>(api, scope, query).await,
        ResourceKind::States => fetch_page::<RegionalState>(api, scope, query).await,
        ResourceKind::SubCities => fetch_page::<SubCity>(api, scope, query).await,
        ResourceKind::StaffSizes => fetch_page::<StaffSize>(api, scope, query).await,
        ResourceKind::Currencies => fetch_page::<Currency>(api, scope, query).await,
        ResourceKind::Portfolio => fetch_page::<PortfolioAsset>(api, scope, query).await,
        ResourceKind::Blog => fetch_page::<BlogPost>(api, scope, query).await,
        ResourceKind::Inquiries => fetch_page::<ContactInquiry>(api, scope, query).await,
        ResourceKind::Faqs => fetch_page::<FaqItem>(api, scope, query).await,
        ResourceKind::Roles => fetch_page::<RoleDefinition>(api, scope, query).await,
        ResourceKind::Subaccounts => fetch_page::<Subaccount>(api, scope, query).await,
    }?;
    print_json(&page)
}

async fn fetch_page<R: Resource>(
    api: &zw_console::ApiClient,
    scope: zw_console::Scope,
    query: &TableQuery,
) -> anyhow::Result<table::TablePage> {
    let mut view = ResourceView::<R>::new(api.clone(), scope);
    view.refresh().await;
    if let Some(message) = view.state().error() {
        bail!("Failed to load {}: {message}", R::NAME);
    }
    Ok(table::narrow(view.records(), query))
}

async fn delete(
    state: &AppState,
    kind: ResourceKind,
    asset_type: Option<AssetType>,
    id: &str,
    confirmed: bool,
) -> anyhow::Result<()> {
    let api = &state.api;
    let mut scope = state.scope().await;
    scope.asset_type = asset_type;

    match kind {
        ResourceKind::Microfinance => delete_one::<Microfinance>(api, scope, id, confirmed).await,
        ResourceKind::Industries => delete_one::<Industry>(api, scope, id, confirmed).await,
        ResourceKind::States => delete_one::<RegionalState>(api, scope, id, confirmed).await,
        ResourceKind::SubCities => delete_one::<SubCity>(api, scope, id, confirmed).await,
        ResourceKind::StaffSizes => delete_one::<StaffSize>(api, scope, id, confirmed).await,
        ResourceKind::Currencies => delete_one::<Currency>(api, scope, id, confirmed).await,
        ResourceKind::Portfolio => delete_one::<PortfolioAsset>(api, scope, id, confirmed).await,
        ResourceKind::Blog => delete_one::<BlogPost>(api, scope, id, confirmed).await,
        ResourceKind::Subaccounts => delete_one::<Subaccount>(api, scope, id, confirmed).await,
        other => bail!("{other:?} cannot be deleted"),
    }
}

async fn delete_one<R: Deletable>(
    api: &zw_console::ApiClient,
    scope: zw_console::Scope,
    id: &str,
    confirmed: bool,
) -> anyhow::Result<()> {
    let mut view = ResourceView::<R>::new(api.clone(), scope);
    view.refresh().await;
    if let Some(message) = view.state().error() {
        bail!("Failed to load {}: {message}", R::NAME);
    }

    let record = view
        .find(id)
        .cloned()
        .with_context(|| format!("No record {id} in {}", R::NAME))?;
    view.request_delete(record);

    if !confirmed {
        view.cancel_delete();
        println!("Not deleted. Pass --yes to confirm.");
        return Ok(());
    }

    view.confirm_delete().await?;
    for notice in view.take_notices() {
        info!("{}", notice.message);
        println!("{}", notice.message);
    }
    Ok(())
}
