use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Game — A decoded storefront listing
// ---------------------------------------------------------------------------

/// A storefront product that decoded cleanly from the promotions feed.
///
/// `price` is in the smallest currency unit. `free` is derived from it at
/// construction time, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "GameRecord")]
pub struct Game {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub free: bool,
    /// Page slug of the product on the storefront.
    #[serde(rename = "productURL")]
    pub product_url: String,
    #[serde(rename = "thumbnailURL")]
    pub thumbnail_url: Option<String>,
}

impl Game {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: i64,
        product_url: impl Into<String>,
        thumbnail_url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            free: price == 0,
            product_url: product_url.into(),
            thumbnail_url,
        }
    }
}

/// Serialized form of a [`Game`]. Any incoming `free` key is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameRecord {
    title: String,
    description: String,
    price: i64,
    #[serde(rename = "productURL")]
    product_url: String,
    #[serde(rename = "thumbnailURL", default)]
    thumbnail_url: Option<String>,
}

impl From<GameRecord> for Game {
    fn from(record: GameRecord) -> Self {
        Game::new(
            record.title,
            record.description,
            record.price,
            record.product_url,
            record.thumbnail_url,
        )
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Product page: {}", self.product_url)?;
        write!(
            f,
            "Thumbnail: {}",
            self.thumbnail_url.as_deref().unwrap_or("None")
        )
    }
}
