use crate::models::AttributeBundle;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when resolving profiles from Appwrite
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Profile Resolver backed by Appwrite.
///
/// Supplies the requester's and candidates' attribute bundles; the matching
/// engine treats this as an opaque data source. A candidate document that
/// fails to parse into a complete bundle is skipped rather than failing the
/// request; a missing requester bundle is fatal (`ProfileNotFound`).
pub struct AppwriteResolver {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    /// Collection holding one roommate-preference document per user.
    profiles_collection: String,
}

impl AppwriteResolver {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        profiles_collection: String,
    ) -> Result<Self, ResolverError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ResolverError::RequestError)?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            profiles_collection,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.profiles_collection
        )
    }

    /// Fetch the attribute bundle for a single user.
    pub async fn get_bundle(&self, user_id: &str) -> Result<AttributeBundle, ResolverError> {
        // Appwrite query format: JSON array of query strings
        let query_json = format!(r#"["userId={}"]"#, user_id);
        let encoded_query = urlencoding::encode(&query_json);
        let url = format!("{}?query={}", self.documents_url(), encoded_query);

        tracing::debug!("Fetching bundle for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolverError::ApiError(format!(
                "Failed to fetch bundle: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| ResolverError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents
            .first()
            .ok_or_else(|| ResolverError::ProfileNotFound(user_id.to_string()))?;

        // Appwrite nests attributes under "data" on some API versions
        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| ResolverError::InvalidResponse(format!("Failed to parse bundle: {}", e)))
    }

    /// Fetch every candidate bundle, excluding the requester.
    ///
    /// Documents that do not parse into a complete bundle are dropped and
    /// logged; incomplete candidates are never fatal.
    pub async fn get_all_bundles(
        &self,
        excluding_user_id: &str,
    ) -> Result<Vec<AttributeBundle>, ResolverError> {
        let queries = vec![format!("notEqual(\"userId\", \"{}\")", excluding_user_id)];
        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| ResolverError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);
        let url = format!("{}?query={}", self.documents_url(), encoded_queries);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolverError::ApiError(format!(
                "Failed to query candidates: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| ResolverError::InvalidResponse("Missing documents array".into()))?;

        let bundles: Vec<AttributeBundle> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value::<AttributeBundle>(data.clone()) {
                    Ok(bundle) => Some(bundle),
                    Err(e) => {
                        tracing::debug!("Skipping incomplete candidate document: {}", e);
                        None
                    }
                }
            })
            .filter(|bundle| bundle.user_id != excluding_user_id)
            .collect();

        tracing::debug!("Resolved {} candidate bundles (total: {})", bundles.len(), total);

        Ok(bundles)
    }
}
