use crate::models::{CurrentUser, Decision, Profile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the profile directory backend
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the managed document store holding user profiles
///
/// Serves as both collaborators the engine depends on: the profile
/// directory (full candidate fetch) and the decision store (like/dislike
/// writes against the acting user's document).
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    users_collection: String,
}

impl DirectoryClient {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        users_collection: String,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            users_collection,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.users_collection
        )
    }

    fn status_error(status: reqwest::StatusCode, context: &str) -> DirectoryError {
        match status.as_u16() {
            401 | 403 => DirectoryError::Unauthorized,
            404 => DirectoryError::NotFound(context.to_string()),
            _ => DirectoryError::ApiError(format!("{}: {}", context, status)),
        }
    }

    /// Fetch the full profile directory
    ///
    /// One unordered snapshot per session load. The profile id is the
    /// document reference id, not a field of the document body, so it is
    /// injected before deserializing. Documents that fail to parse are
    /// skipped rather than failing the whole fetch.
    pub async fn get_all_users(&self) -> Result<Vec<Profile>, DirectoryError> {
        let url = self.documents_url();

        tracing::debug!("Fetching profile directory from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(
                response.status(),
                "Failed to fetch profile directory",
            ));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let profiles: Vec<Profile> = documents
            .iter()
            .filter_map(Self::parse_document)
            .collect();

        tracing::debug!("Fetched {} profiles from directory", profiles.len());

        Ok(profiles)
    }

    /// Fetch the acting user's document, including the like/dislike sets
    pub async fn get_user(&self, user_id: &str) -> Result<CurrentUser, DirectoryError> {
        let url = format!("{}/{}", self.documents_url(), user_id);

        tracing::debug!("Fetching user document: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(
                response.status(),
                &format!("User {} not found", user_id),
            ));
        }

        let json: Value = response.json().await?;
        let with_id = Self::inject_document_id(&json)
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing document id".into()))?;

        serde_json::from_value(with_id)
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse user: {}", e)))
    }

    /// Persist a like decision
    ///
    /// Writes the acting user's full like set, so replaying the same
    /// (user, target) pair converges on the same document state.
    pub async fn like_user(
        &self,
        user: &CurrentUser,
        target_id: &str,
    ) -> Result<(), DirectoryError> {
        self.write_decision(user, target_id, Decision::Accept).await
    }

    /// Persist a dislike decision. Idempotent like [`Self::like_user`].
    pub async fn dislike_user(
        &self,
        user: &CurrentUser,
        target_id: &str,
    ) -> Result<(), DirectoryError> {
        self.write_decision(user, target_id, Decision::Reject).await
    }

    async fn write_decision(
        &self,
        user: &CurrentUser,
        target_id: &str,
        decision: Decision,
    ) -> Result<(), DirectoryError> {
        let url = format!("{}/{}", self.documents_url(), user.user_id);

        let data = match decision {
            Decision::Accept => serde_json::json!({ "like": user.liked }),
            Decision::Reject => serde_json::json!({ "dislike": user.disliked }),
        };

        let response = self
            .client
            .patch(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(
                response.status(),
                &format!("Failed to persist decision for {}", user.user_id),
            ));
        }

        tracing::debug!(
            "Persisted decision: {} -> {} ({:?})",
            user.user_id,
            target_id,
            decision
        );

        Ok(())
    }

    /// Check whether the backend is reachable
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url.trim_end_matches('/'));

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("Directory health check failed: {}", e);
                false
            }
        }
    }

    /// Copy the document's `$id` reference into the `userId` field and
    /// return the merged body for deserialization
    fn inject_document_id(doc: &Value) -> Option<Value> {
        let id = doc.get("$id").and_then(|v| v.as_str())?;
        let body = doc.get("data").unwrap_or(doc);

        let mut merged = body.clone();
        merged
            .as_object_mut()?
            .insert("userId".to_string(), Value::String(id.to_string()));

        Some(merged)
    }

    fn parse_document(doc: &Value) -> Option<Profile> {
        let merged = Self::inject_document_id(doc)?;

        match serde_json::from_value(merged) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!("Skipping malformed profile document: {}", e);
                None
            }
        }
    }
}
