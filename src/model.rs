// Core structs: Listing, error taxonomy
use serde::{Serialize, Serializer};
use thiserror::Error;

pub const BASE_URL: &str = "https://adresowo.pl";

/// Fixed property type for the apartment search path.
pub const PROPERTY_TYPE: &str = "Mieszkanie";

/// One extracted listing card. Numeric fields are `None` when the card text
/// could not be parsed, so "unknown" never collapses into zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Cena")]
    pub price: Option<u64>,
    #[serde(rename = "Metraż")]
    pub area: Option<f64>,
    #[serde(rename = "Pokoje")]
    pub rooms: Option<u32>,
    #[serde(rename = "Lokalizacja")]
    pub location: String,
    #[serde(rename = "Ulica")]
    pub street: String,
    #[serde(rename = "Typ")]
    pub property_type: String,
    #[serde(rename = "Bez Pośredników", serialize_with = "tak_nie")]
    pub is_private: bool,
    #[serde(rename = "Opis")]
    pub description: String,
    #[serde(rename = "Link")]
    pub link: String,
}

fn tak_nie<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "Tak" } else { "Nie" })
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector: {0}")]
    Selector(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
