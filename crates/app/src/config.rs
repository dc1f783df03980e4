use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub upload_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            upload_timeout: Duration::from_secs(DEFAULT_UPLOAD_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Reads `TCLINE_BACKEND_URL` and `TCLINE_UPLOAD_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(url) = lookup("TCLINE_BACKEND_URL").filter(|u| !u.trim().is_empty()) {
            cfg.backend_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("TCLINE_UPLOAD_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => cfg.upload_timeout = Duration::from_secs(secs),
                _ => tracing::warn!("ignoring invalid TCLINE_UPLOAD_TIMEOUT_SECS={raw:?}"),
            }
        }
        cfg
    }

    pub fn process_endpoint(&self) -> String {
        format!("{}/process", self.backend_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let cfg = AppConfig::from_lookup(|_| None);
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.process_endpoint(), "http://127.0.0.1:5000/process");
    }

    #[test]
    fn env_overrides_are_applied() {
        let cfg = AppConfig::from_lookup(|key| match key {
            "TCLINE_BACKEND_URL" => Some("http://media-box:8080/".into()),
            "TCLINE_UPLOAD_TIMEOUT_SECS" => Some("30".into()),
            _ => None,
        });
        assert_eq!(cfg.process_endpoint(), "http://media-box:8080/process");
        assert_eq!(cfg.upload_timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_timeout_keeps_default() {
        let cfg = AppConfig::from_lookup(|key| {
            (key == "TCLINE_UPLOAD_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(cfg.upload_timeout, AppConfig::default().upload_timeout);
    }
}
