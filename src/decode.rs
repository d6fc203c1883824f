//! Decoding of the promotions feed into [`Game`] records.
//!
//! The feed is walked as an untyped [`serde_json::Value`] tree. Each field
//! extraction checks the shape it relies on and reports a [`DecodeError`]
//! instead of assuming it. A failing field aborts the decode of that one
//! product; the batch carries on without it.

use serde_json::{Map, Value};
use tracing::{debug, error, info, trace, warn, Level};

use crate::config;
use crate::error::{DecodeError, Result};
use crate::models::Game;

type DecodeResult<T> = std::result::Result<T, DecodeError>;

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parse a response body into a generic JSON tree.
pub fn parse_response(body: &str) -> Result<Value> {
    Ok(serde_json::from_str(body)?)
}

/// Locate the raw product list at `data.Catalog.searchStore.elements`.
///
/// The list is returned untouched, including when it is empty.
pub fn get_products_from_response(json: &Value) -> DecodeResult<&[Value]> {
    let mut current = json;
    let mut walked: Vec<&str> = Vec::with_capacity(config::PRODUCTS_PATH.len());
    for key in config::PRODUCTS_PATH {
        let map = current.as_object().ok_or_else(|| {
            if walked.is_empty() {
                DecodeError::InvalidInput("Response is not a JSON object".into())
            } else {
                DecodeError::InvalidInput(format!("{} is not an object", walked.join(".")))
            }
        })?;
        walked.push(key);
        current = map
            .get(key)
            .ok_or_else(|| DecodeError::MissingPath(walked.join(".")))?;
    }
    current.as_array().map(Vec::as_slice).ok_or_else(|| {
        DecodeError::InvalidValue(format!("{} is not a list", walked.join(".")))
    })
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

fn as_product(product: &Value) -> DecodeResult<&Map<String, Value>> {
    product
        .as_object()
        .ok_or_else(|| DecodeError::InvalidInput("Product is not an object".into()))
}

fn text_field(product: &Value, key: &str) -> DecodeResult<String> {
    let value = as_product(product)?
        .get(key)
        .ok_or_else(|| DecodeError::MissingField(format!("{key} does not exist in product")))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DecodeError::InvalidValue(format!("{key} value {value} is not text")))
}

pub fn get_title_of_product(product: &Value) -> DecodeResult<String> {
    text_field(product, "title")
}

pub fn get_description_of_product(product: &Value) -> DecodeResult<String> {
    text_field(product, "description")
}

/// Price at `price.totalPrice.discountPrice`, in the smallest currency unit.
///
/// Only integral JSON numbers within `i64` are accepted. Fractional numbers,
/// and numbers written with a fraction part such as `100.0`, are rejected
/// rather than truncated. Numeric strings are rejected too.
pub fn get_price_of_product(product: &Value) -> DecodeResult<i64> {
    let mut current = product;
    let mut walked: Vec<&str> = Vec::with_capacity(3);
    for key in ["price", "totalPrice", "discountPrice"] {
        let map = current.as_object().ok_or_else(|| {
            if walked.is_empty() {
                DecodeError::InvalidInput("Product is not an object".into())
            } else {
                DecodeError::InvalidInput(format!("{} is not an object", walked.join(".")))
            }
        })?;
        walked.push(key);
        current = map.get(key).ok_or_else(|| {
            DecodeError::MissingField(format!("{} does not exist in product", walked.join(".")))
        })?;
    }
    current.as_i64().ok_or_else(|| {
        if current.is_u64() {
            DecodeError::InvalidValue(format!("Price {current} is out of range"))
        } else {
            DecodeError::InvalidValue(format!("Price {current} is not a whole number"))
        }
    })
}

/// Page slug of the first offer mapping.
pub fn get_product_url(product: &Value) -> DecodeResult<String> {
    let mappings = as_product(product)?
        .get("offerMappings")
        .ok_or_else(|| DecodeError::MissingField("offerMappings does not exist in product".into()))?
        .as_array()
        .ok_or_else(|| DecodeError::InvalidInput("offerMappings is not a list".into()))?;
    let first = mappings
        .first()
        .ok_or_else(|| DecodeError::MissingField("offerMappings is empty".into()))?
        .as_object()
        .ok_or_else(|| DecodeError::InvalidInput("offerMappings entry is not an object".into()))?;
    let slug = first
        .get("pageSlug")
        .ok_or_else(|| DecodeError::MissingField("pageSlug does not exist in offer mapping".into()))?;
    slug.as_str()
        .map(str::to_string)
        .ok_or_else(|| DecodeError::InvalidValue(format!("URL {slug} is not text")))
}

/// URL of the first key image typed `Thumbnail` with a text `url`.
///
/// Never fails: a missing or malformed `keyImages` list, or no usable
/// thumbnail entry, all yield `None`.
pub fn get_thumbnail_of_product(product: &Value) -> Option<String> {
    let Some(images) = product.get("keyImages") else {
        info!("Could not find images in product data");
        return None;
    };
    let Some(images) = images.as_array() else {
        debug!("keyImages is not a list, ignoring");
        return None;
    };
    images
        .iter()
        .filter(|image| {
            image.get("type").and_then(Value::as_str) == Some(config::THUMBNAIL_IMAGE_TYPE)
        })
        .find_map(|image| image.get("url").and_then(Value::as_str))
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Product and batch decoding
// ---------------------------------------------------------------------------

/// Decode one raw product into a [`Game`].
///
/// Fields are extracted in the order title, description, price, URL,
/// thumbnail; the first failure is returned.
pub fn decode_product(product: &Value) -> DecodeResult<Game> {
    let title = get_title_of_product(product)?;
    let description = get_description_of_product(product)?;
    let price = get_price_of_product(product)?;
    let product_url = get_product_url(product)?;
    let thumbnail_url = get_thumbnail_of_product(product);
    Ok(Game::new(title, description, price, product_url, thumbnail_url))
}

fn log_decode_failure(level: Level, err: &DecodeError) {
    match level {
        Level::ERROR => error!(%err, "Skipping product"),
        Level::WARN => warn!(%err, "Skipping product"),
        Level::INFO => info!(%err, "Skipping product"),
        Level::DEBUG => debug!(%err, "Skipping product"),
        Level::TRACE => trace!(%err, "Skipping product"),
    }
}

/// Decode every product and keep the free ones, in input order.
///
/// Products that fail to decode are logged at `failure_level` and skipped.
pub fn filter_free_games(products: &[Value], failure_level: Level) -> Vec<Game> {
    products
        .iter()
        .filter_map(|product| match decode_product(product) {
            Ok(game) => Some(game),
            Err(err) => {
                log_decode_failure(failure_level, &err);
                None
            }
        })
        .filter(|game| {
            if game.free {
                info!(title = %game.title, "Game is free");
            }
            game.free
        })
        .collect()
}

/// Batch entry point over an untyped product collection.
///
/// A collection that is not a list fails as a whole; individual bad products
/// inside a list are logged at `failure_level` and skipped.
pub fn process_products(products: &Value, failure_level: Level) -> DecodeResult<Vec<Game>> {
    let products = products
        .as_array()
        .ok_or_else(|| DecodeError::InvalidInput("Products list invalid".into()))?;
    Ok(filter_free_games(products, failure_level))
}
