// App listing models (/v2/apps)

use serde::{Deserialize, Serialize};

/// One decoded page of `GET /v2/apps`.
#[derive(Debug, Clone, Default)]
pub struct AppSearchResults {
    pub next_url: Option<String>,
    pub resources: Vec<AppSearchResource>,
    /// Resources that could not be decoded and were left out.
    pub skipped: usize,
}

/// One listed app. `null` and missing fields both become zero values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSearchResource {
    pub metadata: Option<AppSearchMetadata>,
    pub entity: Option<AppSearchEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSearchMetadata {
    pub guid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppSearchEntity {
    pub name: Option<String>,
    pub instances: Option<u32>,
    pub space_guid: Option<String>,
}

/// Identity and declared limits of one app, as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadDescriptor {
    pub guid: String,
    pub name: String,
    pub space_guid: String,
    pub instances: u32,
}

impl From<AppSearchResource> for WorkloadDescriptor {
    fn from(r: AppSearchResource) -> Self {
        let metadata = r.metadata.unwrap_or_default();
        let entity = r.entity.unwrap_or_default();
        Self {
            guid: metadata.guid.unwrap_or_default(),
            name: entity.name.unwrap_or_default(),
            space_guid: entity.space_guid.unwrap_or_default(),
            instances: entity.instances.unwrap_or_default(),
        }
    }
}
