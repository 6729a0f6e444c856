use crate::{Error, Result};
use reqwest::{
    Method, StatusCode,
    blocking::{Client as HttpClient, Response},
};
use serde::{Deserialize, Serialize};
use stac::{Collection, Item};
use std::time::Duration;
use url::Url;

/// A blocking client for the transaction endpoints of a STAC API.
///
/// # Examples
///
/// ```no_run
/// use stac_populator::{Client, Config};
///
/// let client = Client::with_config(Config {
///     update: false,
///     ..Default::default()
/// })
/// .unwrap();
/// assert!(client.host_reachable("https://stac.test"));
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    client: HttpClient,
    update: bool,
}

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Skip TLS certificate verification.
    ///
    /// Only turn this on for hosts with self-signed certificates that you trust.
    pub accept_invalid_certs: bool,

    /// The total timeout of each request.
    ///
    /// There is no timeout by default.
    pub timeout: Option<Duration>,

    /// Whether a conflicting collection or item is replaced with a PUT.
    pub update: bool,
}

/// What happened when a collection or item was posted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    /// The server accepted the POST.
    Created,

    /// The POST conflicted and the PUT succeeded.
    Updated,

    /// The POST conflicted and updating is disabled.
    Exists,
}

impl Client {
    /// Creates a client with the default [Config].
    pub fn new() -> Result<Client> {
        Client::with_config(Config::default())
    }

    /// Creates a client from a [Config].
    pub fn with_config(config: Config) -> Result<Client> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }
        let client = HttpClient::builder()
            .user_agent(crate::user_agent())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()?;
        Ok(Client {
            client,
            update: config.update,
        })
    }

    /// Returns true if a GET on the url doesn't fail.
    ///
    /// Transport errors and 4xx or 5xx statuses make a host unreachable.
    pub fn host_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send() {
            Ok(response) => match response.error_for_status() {
                Ok(_) => true,
                Err(err) => {
                    tracing::debug!("{url} is not reachable: {err}");
                    false
                }
            },
            Err(err) => {
                tracing::debug!("{url} is not reachable: {err}");
                false
            }
        }
    }

    /// Returns true if `GET {stac_host}/collections/{collection_id}` is a 200.
    ///
    /// Any other status, a transport error, or a bad host is `false`, so a
    /// missing collection can't be told apart from a failing server.
    pub fn collection_exists(&self, stac_host: &str, collection_id: &str) -> bool {
        let url = match endpoint(stac_host, &["collections", collection_id]) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!("invalid stac host {stac_host}: {err}");
                return false;
            }
        };
        match self.client.get(url).send() {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                tracing::debug!("could not get collection={collection_id}: {err}");
                false
            }
        }
    }

    /// Creates a collection, or updates it if it already exists.
    ///
    /// The collection is POSTed to `{stac_host}/collections`. A 409 conflict
    /// is followed by a PUT of the same body to the same endpoint, unless
    /// updating is disabled. Any other unsuccessful status is an
    /// [Error::HttpStatus].
    pub fn post_collection(&self, stac_host: &str, collection: &Collection) -> Result<Upsert> {
        let url = endpoint(stac_host, &["collections"])?;
        self.upsert(url, stac_host, "collection", &collection.id, collection)
    }

    /// Creates an item in a collection, or updates it if it already exists.
    ///
    /// The item is POSTed to `{stac_host}/collections/{collection_id}/items`,
    /// with the same conflict handling as [Client::post_collection]. The
    /// body's `collection` is always set to `collection_id`, overwriting any
    /// other collection the item names.
    pub fn post_item(&self, stac_host: &str, collection_id: &str, item: &Item) -> Result<Upsert> {
        let url = endpoint(stac_host, &["collections", collection_id, "items"])?;
        if item.collection.as_deref() == Some(collection_id) {
            self.upsert(url, stac_host, "item", &item.id, item)
        } else {
            if let Some(other) = &item.collection {
                tracing::warn!(
                    "item {} names collection {other}, posting it to {collection_id}",
                    item.id
                );
            }
            let mut item = item.clone();
            item.collection = Some(collection_id.to_string());
            self.upsert(url, stac_host, "item", &item.id, &item)
        }
    }

    fn upsert<T: Serialize + ?Sized>(
        &self,
        url: Url,
        stac_host: &str,
        kind: &str,
        id: &str,
        body: &T,
    ) -> Result<Upsert> {
        let response = self.client.post(url.clone()).json(body).send()?;
        let status = response.status();
        if status == StatusCode::CONFLICT {
            if self.update {
                tracing::warn!(
                    "STAC {kind} {id} already exists on {stac_host} ({status}), updating"
                );
                let response = self.client.put(url).json(body).send()?;
                let _ = check(Method::PUT, response)?;
                Ok(Upsert::Updated)
            } else {
                tracing::info!("STAC {kind} {id} already exists on {stac_host} ({status})");
                Ok(Upsert::Exists)
            }
        } else {
            let _ = check(Method::POST, response)?;
            tracing::info!("pushed STAC {kind} {id} to {stac_host} ({status})");
            Ok(Upsert::Created)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            accept_invalid_certs: false,
            timeout: None,
            update: true,
        }
    }
}

fn check(method: Method, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::HttpStatus {
            method,
            url: response.url().to_string(),
            status,
        })
    }
}

/// Appends path segments to a host url.
///
/// The host's own path is kept and a trailing slash is ignored.
fn endpoint(stac_host: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(stac_host)?;
    let _ = url
        .path_segments_mut()
        .map_err(|_| Error::UrlCannotBeABase(stac_host.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
