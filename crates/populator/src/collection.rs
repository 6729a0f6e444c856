use crate::{CollectionDescriptor, Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::{Value, json};
use stac::Collection;

/// The summaries key that marks a collection as waiting for real summaries.
pub const NEEDS_SUMMARIES_UPDATE: &str = "needs_summaries_update";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Creates a basic STAC collection from a descriptor.
///
/// The descriptor is left untouched. Its extents become the collection's
/// single bbox and single temporal interval, and every other field is copied
/// onto the collection. The `collection_id` wins over any `id` in the
/// descriptor.
///
/// # Examples
///
/// ```
/// use stac_populator::CollectionDescriptor;
///
/// let descriptor = CollectionDescriptor::from_path("data/collection.json").unwrap();
/// let collection = stac_populator::create_stac_collection("an-id", &descriptor).unwrap();
/// assert_eq!(collection.id, "an-id");
/// ```
pub fn create_stac_collection(
    collection_id: &str,
    descriptor: &CollectionDescriptor,
) -> Result<Collection> {
    if collection_id.is_empty() {
        return Err(Error::MissingField("id"));
    }
    let description = descriptor
        .description()
        .ok_or(Error::MissingField("description"))?;
    let bbox = descriptor.spatial_extent.to_bbox()?;
    let [start, end] = &descriptor.temporal_extent;
    let interval = [parse_bound(start.as_deref())?, parse_bound(end.as_deref())?];

    let mut object = match serde_json::to_value(Collection::new(collection_id, description))? {
        Value::Object(object) => object,
        value => return Err(Error::NotAnObject(value)),
    };
    for (key, value) in &descriptor.fields {
        if key != "id" {
            let _ = object.insert(key.clone(), value.clone());
        }
    }
    let _ = object.insert(
        "extent".into(),
        json!({
            "spatial": {"bbox": [bbox]},
            "temporal": {"interval": [interval]},
        }),
    );
    let _ = object.insert(
        "summaries".into(),
        json!({ NEEDS_SUMMARIES_UPDATE: ["true"] }),
    );
    let collection = serde_json::from_value(Value::Object(object))?;
    Ok(collection)
}

fn parse_bound(bound: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match bound {
        None | Some("") => Ok(None),
        Some(date) => {
            let date = NaiveDate::parse_from_str(date, DATE_FORMAT)?;
            Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
        }
    }
}
