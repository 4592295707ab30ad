use derive_builder::Builder;

pub const DEFAULT_API_VERSION: &str = "v60.0";

/// Settings fixed for the lifetime of an `SfClient`.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(public, build_fn(validate = "Self::validate"))]
pub struct ClientConfig {
    /// REST API version segment, e.g. `v60.0`.
    #[builder(setter(into), default = "DEFAULT_API_VERSION.to_string()")]
    pub api_version: String,

    #[builder(setter(into, strip_option), default)]
    pub user_agent: Option<String>,
}

impl ClientConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.api_version {
            Some(version) if version.is_empty() || version.contains('/') => {
                Err(format!("api_version `{}` is not a single path segment", version))
            }
            _ => Ok(()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: None,
        }
    }
}
