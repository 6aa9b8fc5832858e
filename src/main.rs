use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crmdesk::models::query::{QueryIntent, StatusFilter};
use crmdesk::models::session::Credentials;
use crmdesk::routing::{self, RouteDecision};
use crmdesk::services::dashboard::{DashboardStats, Poller};
use crmdesk::{AppState, Config};

/// Terminal smoke flow: restore (or log in), list the first page of
/// customers, print dashboard stats, and poll for a short while.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    tracing::info!("✅ Configuration loaded successfully");

    let state = AppState::new(&config)?;

    // Restore must complete before any guarded view renders.
    state.guard.restore().await;

    if let RouteDecision::RedirectToLogin { .. } = routing::decide(&state.guard, "/customers", false)
    {
        let username = std::env::var("CRM_USERNAME")
            .map_err(|_| anyhow::anyhow!("CRM_USERNAME must be set when no session is stored"))?;
        let password = std::env::var("CRM_PASSWORD")
            .map_err(|_| anyhow::anyhow!("CRM_PASSWORD must be set when no session is stored"))?;

        match state.guard.login(Credentials { username, password }).await {
            Ok(user) => tracing::info!("✅ Logged in as {} ({:?})", user.username, user.role),
            Err(e) => {
                eprintln!("{}", e.user_message());
                std::process::exit(1);
            }
        }
    }

    let status = match std::env::args().nth(1).as_deref() {
        Some("lead") => StatusFilter::Lead,
        Some("prospect") => StatusFilter::Prospect,
        Some("customer") => StatusFilter::Customer,
        Some("inactive") => StatusFilter::Inactive,
        _ => StatusFilter::All,
    };

    let intent = QueryIntent {
        status,
        ..QueryIntent::default()
    };

    let page = match state.customers.list(&intent).await {
        Ok(page) => page,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    println!(
        "{} customers ({} total, {} pages)",
        page.customers.len(),
        page.total_items,
        page.total_pages
    );
    for customer in &page.customers {
        println!(
            "  #{:<5} {:<30} {:<10} {:.1}★",
            customer.id,
            customer.full_name(),
            customer.status.as_str(),
            customer.rating
        );
    }

    let stats = DashboardStats::from_customers(&page.customers);
    println!(
        "leads: {}  prospects: {}  customers: {}  inactive: {}  avg rating: {:.1}",
        stats.leads, stats.prospects, stats.active_customers, stats.inactive, stats.average_rating
    );

    // Dashboard-style refresh: poll until interrupted, then cancel.
    let customers = state.customers.clone();
    let poller = Poller::start(Duration::from_secs(30), move || {
        let customers = customers.clone();
        async move {
            match customers.list_latest(&QueryIntent::default()).await {
                Ok(Some(page)) => {
                    let stats = DashboardStats::from_customers(&page.customers);
                    tracing::info!(
                        "📊 Dashboard refresh: {} customers, avg rating {:.1}",
                        stats.total_customers,
                        stats.average_rating
                    );
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("⚠️ Dashboard refresh failed: {}", e.user_message()),
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    poller.stop();
    tracing::info!("👋 Shutting down");

    Ok(())
}
