use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Crate-specific error enum
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// [chrono::ParseError]
    #[error(transparent)]
    ChronoParse(#[from] chrono::ParseError),

    /// Returned when unable to read a descriptor from a path.
    #[error("{io}: {path}")]
    FromPath {
        /// The [std::io::Error]
        #[source]
        io: std::io::Error,

        /// The path.
        path: String,
    },

    /// The server answered with a status we don't handle.
    #[error("{method} {url} returned {status}")]
    HttpStatus {
        /// The request method.
        method: Method,

        /// The requested url.
        url: String,

        /// The response status.
        status: StatusCode,
    },

    /// This is not a valid bounding box.
    #[error("invalid bbox: {0:?}")]
    InvalidBbox(Vec<f64>),

    /// The STAC host url is not appropriately formatted.
    #[error("stac host url is not appropriately formatted: {0}")]
    InvalidHost(String),

    /// [std::io::Error]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A definition required by the populator is missing from the descriptor.
    #[error("'{0}' is required in the collection descriptor")]
    MissingDefinition(String),

    /// Returned when a required field is missing or empty.
    #[error("no \"{0}\" field")]
    MissingField(&'static str),

    /// This is not a JSON object.
    #[error("json value is not an object")]
    NotAnObject(serde_json::Value),

    /// [reqwest::Error]
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// [serde_yaml::Error]
    #[error(transparent)]
    SerdeYaml(#[from] serde_yaml::Error),

    /// The STAC host did not answer a GET successfully.
    #[error("stac host is not reachable: {0}")]
    UnreachableHost(String),

    /// Unsupported descriptor format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The url can't have path segments appended, e.g. `mailto:` urls.
    #[error("url cannot be a base: {0}")]
    UrlCannotBeABase(String),

    /// [url::ParseError]
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
}
