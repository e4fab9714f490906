//! jwxt gateway: fetches the selected-course list over HTTP.
//!
//! POSTs the same form the course-selection page submits to the
//! `zzxkyzb_cxZzxkYzbChoosedDisplay` endpoint, authenticated by the session
//! cookie from the configuration. Implements `CourseSource`.

use crate::adapters::jwxt::mapper;
use crate::domain::{CourseRecord, DomainError};
use crate::ports::CourseSource;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Path of the selected-course display endpoint, relative to the base URL.
const DISPLAY_PATH: &str = "/jwglxt/xsxk/zzxkyzb_cxZzxkYzbChoosedDisplay.html";

/// Path of the selection index page, used as the Referer the backend expects.
const INDEX_PATH: &str = "/jwglxt/xsxk/zzxkyzb_cxZzxkYzbIndex.html";

/// HTTP adapter for the jwxt scheduling backend.
pub struct JwxtCourseSource {
    client: reqwest::Client,
    base_url: String,
    xnm: String,
    xqm: String,
    gnmkdm: String,
    cookie: String,
    csrftoken: String,
    /// Guards against overlapping fetches of the same session.
    fetching: AtomicBool,
}

impl JwxtCourseSource {
    pub fn new(
        base_url: String,
        xnm: String,
        xqm: String,
        gnmkdm: String,
        cookie: String,
        csrftoken: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            xnm,
            xqm,
            gnmkdm,
            cookie,
            csrftoken: csrftoken.unwrap_or_default(),
            fetching: AtomicBool::new(false),
        }
    }

    /// Form the selection page submits. Most selector fields are empty for a
    /// plain "already chosen" query; `kzlx=ck` asks for selected courses.
    fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("kklxdm", String::new()),
            ("xkkz_id", String::new()),
            ("njdm_id", String::new()),
            ("zyh_id", String::new()),
            ("zyfx_id", "wfx".to_string()),
            ("bh_id", String::new()),
            ("xbm", String::new()),
            ("xslbdm", String::new()),
            ("ccdm", String::new()),
            ("xsbj", String::new()),
            ("xkxnm", self.xnm.clone()),
            ("xkxqm", self.xqm.clone()),
            ("kch", String::new()),
            ("kcm", String::new()),
            ("jsh", String::new()),
            ("jsm", String::new()),
            ("sjd", String::new()),
            ("kkfs", String::new()),
            ("xq", String::new()),
            ("jc", String::new()),
            ("sfym", "false".to_string()),
            ("sfct", "false".to_string()),
            ("sfxx", "false".to_string()),
            ("sfzn", "false".to_string()),
            ("sfywyl", "false".to_string()),
            ("sfgss", "false".to_string()),
            ("show_type", "1".to_string()),
            ("sfcx", "0".to_string()),
            ("sfms", "0".to_string()),
            ("kzlx", "ck".to_string()),
            ("doType", "query".to_string()),
            ("gnmkdm", self.gnmkdm.clone()),
            ("csrftoken", self.csrftoken.clone()),
        ]
    }

    async fn fetch_inner(&self) -> Result<Vec<CourseRecord>, DomainError> {
        let url = format!("{}{}?gnmkdm={}", self.base_url, DISPLAY_PATH, self.gnmkdm);
        let referer = format!(
            "{}{}?doType=details&gnmkdm={}&layout=default",
            self.base_url, INDEX_PATH, self.gnmkdm
        );
        debug!(%url, "requesting selected-course list");

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", referer)
            .header("Cookie", self.cookie.clone())
            .form(&self.form())
            .send()
            .await
            .map_err(|e| DomainError::Source(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::Source(format!(
                "jwxt returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::Source(format!("invalid JSON: {e}")))?;

        let courses = mapper::parse_course_payload(&payload);
        info!(count = courses.len(), "fetched courses from jwxt");
        Ok(courses)
    }
}

#[async_trait::async_trait]
impl CourseSource for JwxtCourseSource {
    async fn fetch_courses(&self) -> Result<Vec<CourseRecord>, DomainError> {
        if self
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DomainError::Source("fetch already in progress".into()));
        }
        let result = self.fetch_inner().await;
        self.fetching.store(false, Ordering::Release);
        result
    }
}
