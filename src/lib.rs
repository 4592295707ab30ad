//! Minimal async client for the Salesforce REST API.
//!
//! ```no_run
//! use sf_client::{Credentials, Record, SfClient};
//!
//! # async fn run() -> Result<(), sf_client::SfError> {
//! // sf org display -o my-alias --json > creds.json
//! let creds = Credentials::from_file("creds.json").await?;
//! let sf = SfClient::new(&creds);
//!
//! let created = sf.insert("Account", &Record::new().field("Name", "Acme")).await?;
//! if created.success {
//!     let id = created.id().unwrap_or_default().to_string();
//!     sf.update("Account", &id, &Record::new().field("Name", "Acme 2")).await?;
//! }
//!
//! let found = sf.query("SELECT Id, Name FROM Account").await?;
//! println!("{} -> {}", found.status, found.body);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod record;
pub mod response;

pub use auth::BearerAuth;
pub use client::{SfClient, SfResult};
pub use config::{
    ClientConfig, ClientConfigBuilder, ClientConfigBuilderError, DEFAULT_API_VERSION,
};
pub use credentials::{CredentialResult, Credentials};
pub use error::SfError;
pub use record::{FieldValue, Record};
pub use response::SfResponse;
