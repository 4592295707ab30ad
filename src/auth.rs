use reqwest::RequestBuilder;
use std::fmt::{self, Debug};

/// `Authorization: Bearer <access token>` from the credential bundle.
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        BearerAuth { token: token.into() }
    }

    pub fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

impl Debug for BearerAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerAuth")
            .field("token", &"***") // never print the session id
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let auth = BearerAuth::new("00Dxx!secret");
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn applies_bearer_header() {
        let auth = BearerAuth::new("tok");
        let request = auth
            .apply_auth(reqwest::Client::new().get("http://localhost/x"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
    }
}
