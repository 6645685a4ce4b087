//! Read entities definitions.

pub mod auction;
pub mod calendar;
pub mod stats;

use common::DateTime;
use serde::{Deserialize, Deserializer};
use tracing as log;

use crate::domain::{auction::Department, Auction};

pub use self::{calendar::Calendar, stats::Stats};

/// Bulk export of [`Auction`]s, as served by `auctions.json`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// [`DateTime`] when this [`Listing`] was exported.
    #[serde(default)]
    pub generated_at: Option<DateTime>,

    /// Name of the region this [`Listing`] covers.
    #[serde(default)]
    pub region: Option<String>,

    /// [`Department`]s this [`Listing`] covers.
    #[serde(default)]
    pub departments: Vec<Department>,

    /// Exported [`Auction`]s.
    ///
    /// Malformed records are skipped, so they don't spoil the rest.
    #[serde(deserialize_with = "skip_malformed")]
    pub auctions: Vec<Auction>,
}

/// Deserializes [`Auction`]s one by one, skipping the malformed ones.
fn skip_malformed<'de, D>(deserializer: D) -> Result<Vec<Auction>, D::Error>
where
    D: Deserializer<'de>,
{
    let records = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let total = records.len();
    let auctions = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| {
            serde_json::from_value(record)
                .map_err(|e| {
                    log::warn!("skipping malformed `Auction` #{i}: {e}");
                })
                .ok()
        })
        .collect::<Vec<Auction>>();
    if auctions.len() < total {
        log::warn!(
            "skipped {} of {total} malformed `Auction`s",
            total - auctions.len(),
        );
    }
    Ok(auctions)
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::Listing;

    #[test]
    fn skips_malformed_records() {
        let listing: Listing = serde_json::from_value(json!({
            "auctions": [
                {"id": "a", "createdAt": "2025-01-02 10:00:00"},
                {"id": "b", "startingPrice": "cheap"},
                {"id": "c", "rooms": 3.0, "auctionDate": "15 mars 2025"},
                {"noId": true},
            ],
        }))
        .unwrap();

        let ids = listing
            .auctions
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn requires_auctions_array() {
        assert!(serde_json::from_value::<Listing>(json!({})).is_err());
        assert!(
            serde_json::from_value::<Listing>(json!({"auctions": {}})).is_err()
        );
    }
}
