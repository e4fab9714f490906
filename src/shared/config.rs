//! Application configuration. jwxt backend parameters, paths.

use serde::Deserialize;

/// Default jwxt base URL (SHU deployment).
pub const DEFAULT_BASE_URL: &str = "https://jwxt.shu.edu.cn";

/// Default module code (`gnmkdm`) for the course-selection display endpoint.
pub const DEFAULT_GNMKDM: &str = "N253512";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// jwxt base URL. Read from WEEK_TINT_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Academic year (`xnm`, e.g. "2024"). Read from WEEK_TINT_XNM.
    #[serde(default)]
    pub xnm: Option<String>,

    /// Term (`xqm`, e.g. "3" for the first term). Read from WEEK_TINT_XQM.
    #[serde(default)]
    pub xqm: Option<String>,

    /// Module code (`gnmkdm`) of the display endpoint. Read from WEEK_TINT_GNMKDM.
    #[serde(default)]
    pub gnmkdm: Option<String>,

    /// Session cookie for the authenticated jwxt session (e.g. "JSESSIONID=...").
    /// Read from WEEK_TINT_COOKIE.
    #[serde(default)]
    pub cookie: Option<String>,

    /// CSRF token, when the deployment requires one. Read from WEEK_TINT_CSRFTOKEN.
    #[serde(default)]
    pub csrftoken: Option<String>,

    /// Directory for cached course data and color preferences. Read from
    /// WEEK_TINT_DATA_DIR. Defaults to ./data.
    #[serde(default)]
    pub data_dir: Option<String>,
}

impl AppConfig {
    /// Load from environment (and optional file). `.env` is loaded by main
    /// before this runs.
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("WEEK_TINT"));
        if let Ok(path) = std::env::var("WEEK_TINT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the jwxt base URL. Defaults to the SHU deployment.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Returns the module code. Defaults to the course-selection display module.
    pub fn gnmkdm_or_default(&self) -> String {
        self.gnmkdm
            .clone()
            .unwrap_or_else(|| DEFAULT_GNMKDM.to_string())
    }

    /// Returns the data directory. Defaults to ./data.
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// True when enough is configured to fetch from the live backend:
    /// academic year, term and an authenticated session cookie.
    pub fn is_jwxt_configured(&self) -> bool {
        self.xnm.is_some() && self.xqm.is_some() && self.cookie.is_some()
    }
}
