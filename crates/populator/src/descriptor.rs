use crate::{Error, Format, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Definitions a [Populator](crate::Populator) requires in its descriptor.
pub const REQUIRED_DEFINITIONS: [&str; 5] = ["title", "id", "description", "keywords", "license"];

/// A simplified description of a STAC collection.
///
/// The extents use a compact form, and every other field is passed through to
/// the collection as-is.
///
/// # Examples
///
/// ```
/// use stac_populator::CollectionDescriptor;
/// use serde_json::json;
///
/// let descriptor: CollectionDescriptor = serde_json::from_value(json!({
///     "spatialextent": [-180, -90, 180, 90],
///     "temporalextent": ["1850-01-01", null],
///     "description": "A collection",
/// }))
/// .unwrap();
/// assert_eq!(descriptor.temporal_extent[1], None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    /// The spatial extent of the collection.
    #[serde(rename = "spatialextent")]
    pub spatial_extent: SpatialExtentDescriptor,

    /// The start and end dates of the collection as `YYYY-MM-DD`.
    ///
    /// A `None` or empty bound is open-ended.
    #[serde(rename = "temporalextent")]
    pub temporal_extent: [Option<String>; 2],

    /// All other collection fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A single bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpatialExtentDescriptor {
    /// `[west, south, east, north]`, or the six-value 3D form.
    Bounds(Vec<f64>),

    /// Named bounds.
    Named {
        /// Western longitude.
        west: f64,
        /// Southern latitude.
        south: f64,
        /// Eastern longitude.
        east: f64,
        /// Northern latitude.
        north: f64,
    },
}

impl CollectionDescriptor {
    /// Reads a descriptor from a JSON or YAML file.
    ///
    /// The format is inferred from the extension and defaults to JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_populator::CollectionDescriptor;
    ///
    /// let descriptor = CollectionDescriptor::from_path("data/collection.yaml").unwrap();
    /// assert_eq!(descriptor.id(), Some("ouranos-cmip6"));
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<CollectionDescriptor> {
        let path = path.as_ref();
        let format = path
            .to_str()
            .and_then(Format::infer_from_href)
            .unwrap_or_default();
        format.from_path(path)
    }

    /// Returns the `id` field, if it is a string.
    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Returns the `title` field, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// Returns the `description` field, if it is a string.
    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    /// Checks that every definition is present and not null.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_populator::CollectionDescriptor;
    ///
    /// let descriptor = CollectionDescriptor::from_path("data/collection.yaml").unwrap();
    /// descriptor.require(&stac_populator::REQUIRED_DEFINITIONS).unwrap();
    /// ```
    pub fn require(&self, definitions: &[&str]) -> Result<()> {
        for definition in definitions {
            if self.fields.get(*definition).is_none_or(Value::is_null) {
                tracing::error!("'{definition}' is required in the collection descriptor");
                return Err(Error::MissingDefinition(definition.to_string()));
            }
        }
        Ok(())
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl SpatialExtentDescriptor {
    /// Returns the bounds as a flat bbox vector.
    ///
    /// Fails if there are not four or six values.
    pub fn to_bbox(&self) -> Result<Vec<f64>> {
        match self {
            Self::Bounds(bounds) => {
                if bounds.len() == 4 || bounds.len() == 6 {
                    Ok(bounds.clone())
                } else {
                    Err(Error::InvalidBbox(bounds.clone()))
                }
            }
            Self::Named {
                west,
                south,
                east,
                north,
            } => Ok(vec![*west, *south, *east, *north]),
        }
    }
}

impl TryFrom<Map<String, Value>> for CollectionDescriptor {
    type Error = Error;

    fn try_from(map: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(map)).map_err(Error::from)
    }
}
