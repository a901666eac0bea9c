use std::process::ExitCode;

use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gasolink::browser::LocalityBrowser;
use gasolink::config::AppConfig;
use gasolink::domain::available_fuel_labels;
use gasolink::favorites::{FavoritesStore, JsonFileBacking};
use gasolink::source::{CachedStationSource, HttpStationSource, MockStationSource, StationSource};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad configuration");
            return ExitCode::FAILURE;
        }
    };

    let favorites_path = match config.favorites_path() {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "cannot locate favorites");
            return ExitCode::FAILURE;
        }
    };
    let favorites = FavoritesStore::new(JsonFileBacking::new(&favorites_path));
    let saved = favorites.load().await;
    info!(path = %favorites_path.display(), count = saved.len(), "favorites ready");

    let result = match &config.mock_data {
        Some(path) => match MockStationSource::from_json_file(path) {
            Ok(mock) => run(mock, &config, &favorites).await,
            Err(e) => Err(e.to_string()),
        },
        None => match HttpStationSource::new(config.source_config()) {
            Ok(http) => {
                let cached = CachedStationSource::new(http, &config.cache_config());
                run(cached, &config, &favorites).await
            }
            Err(e) => Err(e.to_string()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "gasolink failed");
            ExitCode::FAILURE
        }
    }
}

async fn run<S: StationSource>(
    source: S,
    config: &AppConfig,
    favorites: &FavoritesStore<JsonFileBacking>,
) -> Result<(), String> {
    println!("Fuels: {}", available_fuel_labels().join(", "));

    let saved = favorites.favorites();
    if saved.is_empty() {
        println!("No favorite stations yet.");
    } else {
        println!("Favorite stations:");
        for favorite in saved.iter() {
            println!("  {:>6}  {}", favorite.id, favorite.name);
        }
    }

    let Some(locality) = config.locality else {
        println!();
        println!("Set GASOLINK_LOCALITY to browse the stations of a locality.");
        return Ok(());
    };

    let browser = LocalityBrowser::new(source);
    let count = browser
        .select_locality(locality)
        .await
        .map_err(|e| e.to_string())?;

    let now = Utc::now();
    let page = browser.page(now).await;
    println!();
    println!(
        "Locality {locality}: {count} stations, page {}/{}, prices {:.1}-{:.1}",
        page.current_page, page.total_pages, page.price_bounds.min, page.price_bounds.max
    );

    for station in &page.visible {
        let star = if favorites.is_favorite(&station.id.to_string()) {
            "*"
        } else {
            " "
        };
        let cheapest = station
            .cheapest()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        let age = station
            .hours_since_update(now)
            .map(|h| format!("{h:.0}h ago"))
            .unwrap_or_else(|| "never updated".to_string());
        println!("{star} {:>6}  {:<40} {:>6}  {age}", station.id, station.name, cheapest);
    }

    Ok(())
}
