//! Credential bundle as printed by `sf org display --json`.
//!
//! Only `result.accessToken` and `result.instanceUrl` matter to the client;
//! the remaining fields are informational and default to empty.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::error::SfError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(default)]
    pub status: i64,
    pub result: CredentialResult,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResult {
    #[serde(default)]
    pub id: String,
    pub access_token: String,
    pub instance_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub connected_status: String,
    #[serde(default)]
    pub alias: String,
}

impl std::fmt::Debug for CredentialResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResult")
            .field("id", &self.id)
            .field("access_token", &"***")
            .field("instance_url", &self.instance_url)
            .field("username", &self.username)
            .field("client_id", &self.client_id)
            .field("connected_status", &self.connected_status)
            .field("alias", &self.alias)
            .finish()
    }
}

impl Credentials {
    /// Build a bundle directly from an instance URL and token.
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Credentials {
            status: 0,
            result: CredentialResult {
                id: String::new(),
                access_token: access_token.into(),
                instance_url: instance_url.into(),
                username: String::new(),
                client_id: String::new(),
                connected_status: String::new(),
                alias: String::new(),
            },
            warnings: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SfError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        serde_path_to_error::deserialize(deserializer).map_err(|err| {
            error!("Failed to parse credential bundle at {}: {}", err.path(), err.inner());
            SfError::Credentials(format!("at `{}`: {}", err.path(), err.inner()))
        })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, SfError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }

    /// Reads e.g. the `creds.json` written by `sf org display -o <alias> --json > creds.json`.
    #[instrument]
    pub async fn from_file(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self, SfError> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        debug!("Read {} bytes of credentials", json.len());
        Self::from_json_str(&json)
    }

    pub fn instance_url(&self) -> &str {
        &self.result.instance_url
    }

    pub fn access_token(&self) -> &str {
        &self.result.access_token
    }
}
