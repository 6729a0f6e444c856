use crate::Upsert;
use stac::{Collection, Item};

/// A client that can create or update STAC items and collections.
///
/// [`TransactionClient::add_collection`] and
/// [`TransactionClient::add_item`] are required methods.
/// [`TransactionClient::add_items`] has a default implementation that calls
/// `add_item` in a loop.
pub trait TransactionClient {
    /// The error type for this client.
    type Error;

    /// Adds a collection.
    fn add_collection(&mut self, collection: Collection) -> Result<Upsert, Self::Error>;

    /// Adds a single item.
    fn add_item(&mut self, item: Item) -> Result<Upsert, Self::Error>;

    /// Adds multiple items.
    ///
    /// The default implementation calls [`TransactionClient::add_item`] for
    /// each item sequentially and stops at the first error.
    fn add_items(&mut self, items: Vec<Item>) -> Result<Vec<Upsert>, Self::Error> {
        let mut upserts = Vec::with_capacity(items.len());
        for item in items {
            upserts.push(self.add_item(item)?);
        }
        Ok(upserts)
    }
}
