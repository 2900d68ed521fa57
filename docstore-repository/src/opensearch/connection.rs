//! Connection settings for the OpenSearch client.

use std::fmt;

/// Where and how to reach the search engine.
#[derive(Clone)]
pub struct ConnectionSettings {
    /// Server URL, e.g. `https://localhost:9200`.
    pub url: String,
    /// Basic auth user name.
    pub username: Option<String>,
    /// Basic auth password.
    pub password: Option<String>,
    /// Whether the server certificate is validated.
    pub verify_certs: bool,
}

impl ConnectionSettings {
    /// Settings for an unauthenticated server with certificate validation on.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: None,
            password: None,
            verify_certs: true,
        }
    }

    /// Build the URL from its parts, e.g. `https`, `localhost`, `9200`.
    pub fn from_parts(scheme: &str, host: &str, port: u16) -> Self {
        Self::new(format!("{}://{}:{}", scheme, host, port))
    }

    /// Set basic auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Enable or disable certificate validation.
    pub fn with_verify_certs(mut self, verify_certs: bool) -> Self {
        self.verify_certs = verify_certs;
        self
    }

    /// Credentials, only when both parts are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("verify_certs", &self.verify_certs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let settings = ConnectionSettings::from_parts("https", "es.local", 9243);
        assert_eq!(settings.url, "https://es.local:9243");
        assert!(settings.verify_certs);
        assert!(settings.credentials().is_none());
    }

    #[test]
    fn test_credentials_require_both_parts() {
        let mut settings = ConnectionSettings::new("http://localhost:9200");
        settings.username = Some("elastic".to_string());
        assert!(settings.credentials().is_none());

        let settings = settings.with_credentials("elastic", "changeme");
        assert_eq!(settings.credentials(), Some(("elastic", "changeme")));
    }

    #[test]
    fn test_debug_hides_password() {
        let settings = ConnectionSettings::new("http://localhost:9200")
            .with_credentials("elastic", "changeme")
            .with_verify_certs(false);

        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("changeme"));
        assert!(rendered.contains("elastic"));
        assert!(rendered.contains("verify_certs: false"));
    }
}
