mod export;
mod extract;
mod fetch;
mod model;
mod parser;

use clap::Parser;
use fetch::{AdresowoFetcher, Fetcher};
use model::Listing;
use std::path::PathBuf;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

/// Politeness pacing between page requests.
const PAGE_DELAY: Duration = Duration::from_secs(1);

/// Scraper for apartment listings on adresowo.pl, writing results to CSV.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// City to scrape (e.g. lodz, warszawa, wroclaw)
    #[arg(long, default_value = "lodz")]
    city: String,

    /// Number of result pages to fetch
    #[arg(long, default_value_t = 8)]
    pages: u32,

    /// Output CSV path; defaults to data/ogloszenia_<city>.csv
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("data/ogloszenia_{}.csv", args.city)));

    let fetcher = match AdresowoFetcher::new() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            return;
        }
    };

    info!("Scraping {} for city: {}...", model::BASE_URL, args.city);
    let listings = scrape_city(&fetcher, &args.city, args.pages).await;

    if listings.is_empty() {
        info!("No listings collected.");
        return;
    }

    info!(
        "Finished, writing {} listings to {}...",
        listings.len(),
        output.display()
    );
    match export::write_csv(&output, &listings) {
        Ok(()) => info!("Saved {}", output.display()),
        Err(e) => error!("Write to {} failed: {e}", output.display()),
    }
}

/// Sequential page loop. Each page is fetched, parsed and extracted before
/// the next one; a failed fetch or parse skips only that page, and the first
/// page with no offer cards ends the run (end of the result set).
async fn scrape_city(fetcher: &impl Fetcher, city: &str, pages: u32) -> Vec<Listing> {
    let mut collected = Vec::new();

    for page in 1..=pages {
        info!("Fetching page {page}/{pages}...");

        let html = match fetcher.fetch_page(city, page).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Page {page}: {e}");
                continue;
            }
        };

        let listings = match parser::parse_listings(&html) {
            Ok(listings) => listings,
            Err(e) => {
                warn!("Page {page}: {e}");
                continue;
            }
        };

        if listings.is_empty() {
            info!("No listings on page {page}, stopping.");
            break;
        }

        info!("Found {} listings.", listings.len());
        collected.extend(listings);

        sleep(PAGE_DELAY).await;
    }

    collected
}
