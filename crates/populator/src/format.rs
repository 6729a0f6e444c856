use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::{fmt::Display, fs::File, io::Read, path::Path, str::FromStr};

/// The format of a collection descriptor file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Format {
    /// JSON data (the default).
    #[default]
    Json,

    /// YAML data.
    Yaml,
}

impl Format {
    /// Infer the format from a file extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_populator::Format;
    ///
    /// assert_eq!(Format::Yaml, Format::infer_from_href("collection_config.yml").unwrap());
    /// ```
    pub fn infer_from_href(href: &str) -> Option<Format> {
        href.rsplit_once('.').and_then(|(_, ext)| ext.parse().ok())
    }

    /// Reads a local file in the given format.
    ///
    /// IO errors are returned as [Error::FromPath] so the path isn't lost.
    pub fn from_path<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T> {
        let path = path.as_ref();
        let mut buf = Vec::new();
        let _ = File::open(path)
            .and_then(|mut file| file.read_to_end(&mut buf))
            .map_err(|io| Error::FromPath {
                io,
                path: path.to_string_lossy().into_owned(),
            })?;
        self.from_slice(&buf)
    }

    /// Deserializes a value from some bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_populator::Format;
    ///
    /// let value: serde_json::Value = Format::Yaml.from_slice(b"id: an-id").unwrap();
    /// assert_eq!(value["id"], "an-id");
    /// ```
    pub fn from_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let value = match self {
            Format::Json => serde_json::from_slice(bytes)?,
            Format::Yaml => serde_yaml::from_slice(bytes)?,
        };
        Ok(value)
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Format> {
        match s.to_ascii_lowercase().as_str() {
            "json" | "geojson" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}
