// Page-level listing locator
use crate::extract::extract_listing;
use crate::model::{Listing, ParseError};
use scraper::{Html, Selector};
use tracing::warn;

/// Finds every offer card on a results page and extracts a record from each.
/// A card that fails extraction is logged and dropped; the page as a whole
/// never fails because of one card. An empty result means the page carried
/// no offer cards at all.
pub fn parse_listings(html: &str) -> Result<Vec<Listing>, ParseError> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse("div[data-offer-card]")
        .map_err(|e| ParseError::Selector(e.to_string()))?;

    let mut listings = Vec::new();
    for card in document.select(&card_sel) {
        match extract_listing(card) {
            Ok(listing) => listings.push(listing),
            Err(e) => warn!("skipping listing card: {e}"),
        }
    }
    Ok(listings)
}
