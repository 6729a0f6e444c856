//! Populate a [STAC API](https://github.com/radiantearth/stac-api-spec) with
//! collections and items.
//!
//! This crate **is**:
//!
//! - A blocking client for the transaction endpoints of a STAC API
//! - A builder that turns a small collection descriptor into a [stac::Collection]
//!
//! This crate **is not**:
//!
//! - A crawler: items are built by the caller
//! - A validator: documents are checked only as far as [stac] deserialization goes
//!
//! # Publishing a collection
//!
//! ```no_run
//! use stac_populator::{CollectionDescriptor, Upsert};
//!
//! let descriptor = CollectionDescriptor::from_path("collection.yaml").unwrap();
//! let collection = stac_populator::create_stac_collection("my-collection", &descriptor).unwrap();
//! let upsert = stac_populator::post_stac_collection("https://stac.test", &collection).unwrap();
//! assert_ne!(upsert, Upsert::Exists);
//! ```
//!
//! Use a [Client] directly to configure certificate verification, timeouts, or
//! whether conflicting collections are updated.

#![warn(missing_docs, unused_qualifications)]

mod client;
mod collection;
mod descriptor;
mod error;
mod format;
mod populator;
mod transaction;
mod validate;

pub use {
    client::{Client, Config, Upsert},
    collection::{NEEDS_SUMMARIES_UPDATE, create_stac_collection},
    descriptor::{CollectionDescriptor, REQUIRED_DEFINITIONS, SpatialExtentDescriptor},
    error::Error,
    format::Format,
    populator::Populator,
    transaction::TransactionClient,
    validate::url_validate,
};

use stac::{Collection, Item};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns a string suitable for use as a HTTP user agent.
pub fn user_agent() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
}

/// Returns true if a GET on the url succeeds, using a default [Client].
///
/// # Examples
///
/// ```no_run
/// assert!(stac_populator::stac_host_reachable("https://stac.test"));
/// ```
pub fn stac_host_reachable(url: &str) -> bool {
    Client::new()
        .map(|client| client.host_reachable(url))
        .unwrap_or(false)
}

/// Returns true if the collection exists on the host, using a default [Client].
pub fn stac_collection_exists(stac_host: &str, collection_id: &str) -> bool {
    Client::new()
        .map(|client| client.collection_exists(stac_host, collection_id))
        .unwrap_or(false)
}

/// Creates or updates a collection on the host, using a default [Client].
pub fn post_stac_collection(stac_host: &str, collection: &Collection) -> Result<Upsert> {
    Client::new()?.post_collection(stac_host, collection)
}

/// Creates or updates an item in a collection on the host, using a default [Client].
pub fn post_stac_item(stac_host: &str, collection_id: &str, item: &Item) -> Result<Upsert> {
    Client::new()?.post_item(stac_host, collection_id, item)
}
