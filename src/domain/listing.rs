use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// A position as returned by the upstream API.
///
/// Only the fields that make it into [`PublicListing`] are kept, as raw JSON
/// values. `None` means the field was absent; an explicit `null` is
/// `Some(Value::Null)`.
#[derive(Debug, Clone, Default)]
pub struct UpstreamListing {
    pub id: Option<Value>,
    pub kind: Option<Value>,
    pub name: Option<Value>,
    pub friendly_id: Option<Value>,
    pub experience: Option<Value>,
    pub location: Option<Value>,
    pub education: Option<Value>,
    pub department: Option<Value>,
    pub description: Option<Value>,
    pub category: Option<Value>,
    pub creation_date: Option<Value>,
    pub updated_date: Option<Value>,
    pub tags: Option<Value>,
}

// A repeated key keeps its last value, as `serde_json::Map` does on insert.
impl From<Map<String, Value>> for UpstreamListing {
    fn from(mut object: Map<String, Value>) -> Self {
        Self {
            id: object.remove("_id"),
            kind: object.remove("type"),
            name: object.remove("name"),
            friendly_id: object.remove("friendly_id"),
            experience: object.remove("experience"),
            location: object.remove("location"),
            education: object.remove("education"),
            department: object.remove("department"),
            description: object.remove("description"),
            category: object.remove("category"),
            creation_date: object.remove("creation_date"),
            updated_date: object.remove("updated_date"),
            tags: object.remove("tags"),
        }
    }
}

/// The public shape served to the job-board frontend.
///
/// Field order here is the key order of the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicListing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
}

impl From<UpstreamListing> for PublicListing {
    fn from(listing: UpstreamListing) -> Self {
        Self {
            id: listing.id,
            kind: listing.kind,
            name: listing.name,
            url: listing.friendly_id,
            experience: listing.experience,
            location: listing.location,
            education: listing.education,
            department: listing.department,
            description: listing.description,
            category: listing.category,
            creation_date: listing.creation_date,
            updated_date: listing.updated_date,
            tags: listing.tags,
        }
    }
}

/// Parse an upstream response body. The body must be a JSON array of objects.
pub fn parse_listings(body: &str) -> Result<Vec<UpstreamListing>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(body)?;
    Ok(objects.into_iter().map(UpstreamListing::from).collect())
}

pub fn project_listings(listings: Vec<UpstreamListing>) -> Vec<PublicListing> {
    listings.into_iter().map(PublicListing::from).collect()
}
