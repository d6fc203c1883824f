use std::time::Duration;

use tracing::Level;

/// Free games promotions feed, pinned to the GB storefront.
pub const FREE_GAMES_URL: &str = "https://store-site-backend-static-ipv4.ak.epicgames.com/freeGamesPromotions?locale=en-US&country=GB&allowCountries=GB";

pub const USER_AGENT: &str = concat!("epic-free-games/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const MAX_REDIRECTS: usize = 10;

/// Severity used when a single product fails to decode.
pub const DEFAULT_DECODE_FAILURE_LEVEL: Level = Level::ERROR;

/// Key image type holding the product thumbnail.
pub const THUMBNAIL_IMAGE_TYPE: &str = "Thumbnail";

/// Keys leading from the response root to the product list.
pub const PRODUCTS_PATH: [&str; 4] = ["data", "Catalog", "searchStore", "elements"];
