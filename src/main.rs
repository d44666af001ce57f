// src/main.rs
use model_marketplace::adapter::MarketplaceCoordinator;
use model_marketplace::config::Config;
use model_marketplace::domain::errors::{AppError, AppResult};
use model_marketplace::domain::models::Notification;

use std::env;
use std::sync::{Arc, Mutex};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = match env::var("MARKETPLACE_CONFIG") {
        Ok(path) => Config::from_file(path)?,
        Err(_) => Config::from_env()?,
    };

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting model_marketplace v{}", env!("CARGO_PKG_VERSION"));

    let marketplace = MarketplaceCoordinator::from_config(&config);

    // Print banners as they appear
    let seen = Arc::new(Mutex::new(0usize));
    let _banners = {
        let seen = seen.clone();
        marketplace.notifications().subscribe(move |list: &[Notification]| {
            let mut seen = seen.lock().unwrap();
            if list.len() > *seen {
                if let Some(latest) = list.last() {
                    println!("[{}] {}", latest.kind, latest.message);
                }
            }
            *seen = list.len();
        })
    };

    let routes: Vec<String> = env::args().skip(1).collect();
    if routes.is_empty() {
        run_demo(&marketplace).await?;
    } else {
        for route in routes {
            print_view(&marketplace, &route)?;
        }
    }

    marketplace.stop();
    log::info!("Shutdown complete. Goodbye!");
    Ok(())
}

fn print_view(marketplace: &MarketplaceCoordinator, route: &str) -> AppResult<()> {
    let view = marketplace.render_path(route);
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Walk through a connect, browse and purchase session
async fn run_demo(marketplace: &MarketplaceCoordinator) -> AppResult<()> {
    log::info!("=== Featured models ===");
    for listing in marketplace.catalog().featured() {
        log::info!(
            "{} by {}: {} {} ({:.1} stars)",
            listing.name,
            listing.creator,
            listing.price,
            listing.currency,
            listing.rating
        );
    }

    log::info!("Connecting wallet...");
    let account = marketplace.connect().await?;
    log::info!("Connected as {} with {}", account.address, account.balance);

    let target = marketplace
        .catalog()
        .search("vision")
        .into_iter()
        .find(|l| !l.owned)
        .ok_or_else(|| AppError::Unknown("No purchasable model matches 'vision'".to_string()))?;

    log::info!("Purchasing {}...", target.name);
    marketplace.purchase(&target.id).await?;

    print_view(marketplace, "/dashboard")?;

    marketplace.disconnect();
    Ok(())
}
