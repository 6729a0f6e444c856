use crate::{
    Client, CollectionDescriptor, Error, REQUIRED_DEFINITIONS, Result, TransactionClient, Upsert,
};
use stac::{Collection, Item};

/// Publishes one collection, and then its items, to a STAC host.
///
/// Creating a populator checks the descriptor and the host, so a populator
/// always points at a well-formed, reachable host.
///
/// # Examples
///
/// ```no_run
/// use stac_populator::{Client, CollectionDescriptor, Populator};
///
/// let descriptor = CollectionDescriptor::from_path("data/collection.yaml").unwrap();
/// let mut populator = Populator::new("https://stac.test", descriptor, Client::new().unwrap()).unwrap();
/// let _ = populator.publish_collection().unwrap();
/// let _ = populator.ingest(vec![stac::Item::new("an-item")]).unwrap();
/// ```
#[derive(Debug)]
pub struct Populator {
    client: Client,
    stac_host: String,
    collection_id: String,
    collection_name: String,
    descriptor: CollectionDescriptor,
}

impl Populator {
    /// Creates a new populator.
    ///
    /// Fails with [Error::MissingDefinition] if the descriptor lacks one of
    /// [REQUIRED_DEFINITIONS], [Error::InvalidHost] if the host isn't a url,
    /// and [Error::UnreachableHost] if a GET on the host fails.
    pub fn new(
        stac_host: impl ToString,
        descriptor: CollectionDescriptor,
        client: Client,
    ) -> Result<Populator> {
        descriptor.require(&REQUIRED_DEFINITIONS)?;
        let collection_id = descriptor
            .id()
            .ok_or_else(|| Error::MissingDefinition("id".to_string()))?
            .to_string();
        let collection_name = descriptor
            .title()
            .ok_or_else(|| Error::MissingDefinition("title".to_string()))?
            .to_string();
        let stac_host = stac_host.to_string();
        if !crate::url_validate(&stac_host) {
            return Err(Error::InvalidHost(stac_host));
        }
        if !client.host_reachable(&stac_host) {
            return Err(Error::UnreachableHost(stac_host));
        }
        tracing::info!("collection {collection_name} is assigned id {collection_id}");
        Ok(Populator {
            client,
            stac_host,
            collection_id,
            collection_name,
            descriptor,
        })
    }

    /// Returns the STAC host.
    pub fn stac_host(&self) -> &str {
        &self.stac_host
    }

    /// Returns the id of the collection.
    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Returns the title of the collection.
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Builds the collection without publishing it.
    pub fn create_stac_collection(&self) -> Result<Collection> {
        tracing::info!("creating collection '{}'", self.collection_name);
        crate::create_stac_collection(&self.collection_id, &self.descriptor)
    }

    /// Builds the collection and creates or updates it on the host.
    pub fn publish_collection(&mut self) -> Result<Collection> {
        let collection = self.create_stac_collection()?;
        let _ = self.add_collection(collection.clone())?;
        Ok(collection)
    }

    /// Creates or updates each item in the collection, returning how many were sent.
    pub fn ingest(&mut self, items: impl IntoIterator<Item = Item>) -> Result<usize> {
        tracing::info!("data ingestion");
        let items: Vec<Item> = items.into_iter().collect();
        let upserts = self.add_items(items)?;
        Ok(upserts.len())
    }
}

impl TransactionClient for Populator {
    type Error = Error;

    fn add_collection(&mut self, collection: Collection) -> Result<Upsert> {
        self.client.post_collection(&self.stac_host, &collection)
    }

    fn add_item(&mut self, item: Item) -> Result<Upsert> {
        tracing::debug!("creating STAC representation for {}", item.id);
        self.client
            .post_item(&self.stac_host, &self.collection_id, &item)
    }
}
