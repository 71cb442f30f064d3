// Adresowo-specific card extraction and numeric normalization
use crate::model::{BASE_URL, Listing, PROPERTY_TYPE, ParseError};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

/// Marker phrase on cards sold without an agency.
const PRIVATE_MARKER: &str = "bez pośredników";

static ROOMS_EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(\d+)\s*(?:pok\.?)?\s*$").expect("rooms regex"));
static ROOMS_FALLBACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*pok").expect("rooms fallback regex"));

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(e.to_string()))
}

/// Replaces hard spaces and trims surrounding whitespace.
fn clean(s: &str) -> String {
    s.replace('\u{a0}', " ").trim().to_string()
}

/// "635 000 zł" -> 635000. Drops every non-digit character, which handles
/// thousands separators and currency suffixes uniformly.
pub fn parse_price(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}

/// "50 m²" / "50,25 m²" -> square metres. Decimal comma is normalized,
/// then the first run of digits and dots is parsed.
pub fn parse_area(s: &str) -> Option<f64> {
    let s = s.replace(',', ".");
    let start = s.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let run: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match run.parse::<f64>() {
        Ok(n) if n > 0.0 => Some(n),
        _ => None,
    }
}

/// "3" / "3 pok." -> 3. A whole-string match is tried first, then a bare
/// substring search for digits before "pok".
pub fn parse_rooms(s: &str) -> Option<u32> {
    let captures = ROOMS_EXACT_RE
        .captures(s.trim())
        .or_else(|| ROOMS_FALLBACK_RE.captures(s))?;
    let n: u32 = captures.get(1)?.as_str().parse().ok()?;
    (n > 0).then_some(n)
}

/// Relative hrefs get the site root prepended; absolute links pass through.
fn resolve_link(href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{BASE_URL}{href}")
    }
}

/// Pulls the structured fields out of one `div[data-offer-card]` fragment.
/// Every sub-element is optional: an absent stat, link, location, street or
/// description becomes an empty field, never an extraction failure.
pub fn extract_listing(card: ElementRef<'_>) -> Result<Listing, ParseError> {
    let stat_sel = selector("p.flex-auto.text-base.text-neutral-800")?;
    let bold_sel = selector("span.font-bold")?;
    let link_sel = selector("a[href]")?;
    let location_sel = selector("span.line-clamp-1.font-bold")?;
    let street_sel = selector("span.line-clamp-1.text-neutral-900")?;
    let desc_sel = selector("p.line-clamp-4")?;

    let text = card.text().collect::<String>();
    let text_lower = text.to_lowercase();

    let id = card.attr("data-id").unwrap_or("").to_string();

    // Stat elements come in fixed order: price, area, rooms.
    // Fewer than three is tolerated.
    let stats: Vec<ElementRef<'_>> = card.select(&stat_sel).collect();
    let stat_text = |i: usize| -> String {
        stats
            .get(i)
            .and_then(|stat| stat.select(&bold_sel).next())
            .map(|bold| clean(&bold.text().collect::<String>()))
            .unwrap_or_default()
    };
    let price = parse_price(&stat_text(0));
    let area = parse_area(&stat_text(1));
    let rooms = parse_rooms(&stat_text(2));

    let link = card
        .select(&link_sel)
        .next()
        .and_then(|a| a.attr("href"))
        .map(resolve_link)
        .unwrap_or_default();

    let first_text = |sel: &Selector| -> String {
        card.select(sel)
            .next()
            .map(|el| clean(&el.text().collect::<String>()))
            .unwrap_or_default()
    };

    Ok(Listing {
        id,
        price,
        area,
        rooms,
        location: first_text(&location_sel),
        street: first_text(&street_sel),
        property_type: PROPERTY_TYPE.to_string(),
        is_private: text_lower.contains(PRIVATE_MARKER),
        description: first_text(&desc_sel),
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract_fixture(html: &str) -> Listing {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("div[data-offer-card]").unwrap();
        let card = doc.select(&sel).next().expect("fixture has a card");
        extract_listing(card).expect("extraction succeeds")
    }

    const FULL_CARD: &str = r#"
        <div data-offer-card="true" data-id="ofr-12345">
          <a href="/oferta/mieszkanie-lodz-12345">Mieszkanie, Łódź</a>
          <p class="flex-auto text-base text-neutral-800"><span class="font-bold">635 000 zł</span></p>
          <p class="flex-auto text-base text-neutral-800"><span class="font-bold">50,25 m²</span></p>
          <p class="flex-auto text-base text-neutral-800"><span class="font-bold">3 pok.</span></p>
          <span class="line-clamp-1 font-bold">Łódź, Śródmieście</span>
          <span class="line-clamp-1 text-neutral-900">Piotrkowska</span>
          <p class="line-clamp-4">Przestronne mieszkanie, Bez Pośredników!</p>
        </div>"#;

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("635 000 zł"), Some(635_000));
        assert_eq!(parse_price("635\u{a0}000\u{a0}zł"), Some(635_000));
        assert_eq!(parse_price("0 zł"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("zł"), None);
    }

    #[test]
    fn area_parsing() {
        assert_eq!(parse_area("50 m²"), Some(50.0));
        assert_eq!(parse_area("50,25 m²"), Some(50.25));
        assert_eq!(parse_area("0 m²"), None);
        assert_eq!(parse_area("m²"), None);
        assert_eq!(parse_area(""), None);
    }

    #[test]
    fn rooms_parsing() {
        assert_eq!(parse_rooms("3"), Some(3));
        assert_eq!(parse_rooms("3 pok."), Some(3));
        assert_eq!(parse_rooms("3 pok"), Some(3));
        assert_eq!(parse_rooms("  4  POK.  "), Some(4));
        assert_eq!(parse_rooms("kawalerka"), None);
        assert_eq!(parse_rooms("0"), None);
        assert_eq!(parse_rooms(""), None);
        // fallback path: digits before "pok" anywhere in the string
        assert_eq!(parse_rooms("13 pok extra"), Some(13));
    }

    #[test]
    fn link_resolution() {
        assert_eq!(
            resolve_link("/oferta/123"),
            "https://adresowo.pl/oferta/123"
        );
        assert_eq!(
            resolve_link("https://adresowo.pl/oferta/123"),
            "https://adresowo.pl/oferta/123"
        );
    }

    #[test]
    fn extracts_all_fields_from_full_card() {
        let listing = extract_fixture(FULL_CARD);
        assert_eq!(listing.id, "ofr-12345");
        assert_eq!(listing.price, Some(635_000));
        assert_eq!(listing.area, Some(50.25));
        assert_eq!(listing.rooms, Some(3));
        assert_eq!(listing.location, "Łódź, Śródmieście");
        assert_eq!(listing.street, "Piotrkowska");
        assert_eq!(listing.property_type, "Mieszkanie");
        assert!(listing.is_private);
        assert_eq!(
            listing.description,
            "Przestronne mieszkanie, Bez Pośredników!"
        );
        assert_eq!(
            listing.link,
            "https://adresowo.pl/oferta/mieszkanie-lodz-12345"
        );
    }

    #[test]
    fn missing_stats_yield_absent_numerics_not_failure() {
        let listing = extract_fixture(
            r#"<div data-offer-card="true" data-id="ofr-1">
                 <a href="/oferta/1">oferta</a>
               </div>"#,
        );
        assert_eq!(listing.id, "ofr-1");
        assert_eq!(listing.price, None);
        assert_eq!(listing.area, None);
        assert_eq!(listing.rooms, None);
        assert_eq!(listing.location, "");
        assert!(!listing.is_private);
    }

    #[test]
    fn missing_id_and_link_become_empty_strings() {
        let listing = extract_fixture(r#"<div data-offer-card="true"><p>cokolwiek</p></div>"#);
        assert_eq!(listing.id, "");
        assert_eq!(listing.link, "");
    }

    #[test]
    fn private_marker_is_case_insensitive() {
        let private = extract_fixture(
            r#"<div data-offer-card="true"><p>Oferta: BEZ POŚREDNIKÓW.</p></div>"#,
        );
        assert!(private.is_private);
        let agency =
            extract_fixture(r#"<div data-offer-card="true"><p>Oferta biura nieruchomości</p></div>"#);
        assert!(!agency.is_private);
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract_fixture(FULL_CARD);
        let second = extract_fixture(FULL_CARD);
        assert_eq!(first, second);
    }
}
