use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Upstream responded with {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

// The request URL names the tenant, so it never reaches the response body.
impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl ProxyError {
    /// Message followed by every `source()` in the chain, one per line.
    pub fn diagnostic(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let line = err.to_string();
            // thiserror's #[from] variants already embed the first source
            if !text.contains(&line) {
                text.push_str("\n  caused by: ");
                text.push_str(&line);
            }
            source = std::error::Error::source(err);
        }
        text
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_display_contains_body() {
        let err = ProxyError::Upstream {
            status: 404,
            body: "not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn config_error_display() {
        let err = ProxyError::Config("company_id is empty".into());
        assert!(err.to_string().contains("company_id is empty"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{invalid").unwrap_err();
        let err: ProxyError = json_err.into();
        assert!(matches!(err, ProxyError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn diagnostic_without_source_is_display() {
        let err = ProxyError::Upstream {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.diagnostic(), err.to_string());
    }

    #[test]
    fn diagnostic_does_not_repeat_embedded_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: ProxyError = json_err.into();
        let text = err.diagnostic();
        assert!(text.starts_with("JSON error"));
        assert!(!text.contains("caused by"));
    }
}
