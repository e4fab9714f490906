//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use week_tint::adapters::jwxt::{JwxtCourseSource, SampleCourseSource};
use week_tint::adapters::persistence::{ColorStoreJson, CourseCacheJson};
use week_tint::adapters::ui::{TerminalGridRenderer, TuiInputPort};
use week_tint::ports::{ColorStore, CourseCache, CourseSource, GridRenderer, InputPort};
use week_tint::shared::config::AppConfig;
use week_tint::usecases::AnnotateService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    week_tint::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_default();

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    tokio::fs::create_dir_all(&data_path).await?;
    let data_dir_abs = data_path
        .canonicalize()
        .unwrap_or_else(|_| data_path.clone());
    info!(path = %data_dir_abs.display(), "data directory");

    // --- Course source: live jwxt session when configured, demo data otherwise ---
    let source: Arc<dyn CourseSource> = if cfg.is_jwxt_configured() {
        info!(
            base_url = %cfg.base_url_or_default(),
            xnm = %cfg.xnm.clone().unwrap_or_default(),
            xqm = %cfg.xqm.clone().unwrap_or_default(),
            "jwxt source enabled"
        );
        Arc::new(JwxtCourseSource::new(
            cfg.base_url_or_default(),
            cfg.xnm.clone().unwrap_or_default(),
            cfg.xqm.clone().unwrap_or_default(),
            cfg.gnmkdm_or_default(),
            cfg.cookie.clone().unwrap_or_default(),
            cfg.csrftoken.clone(),
        ))
    } else {
        warn!("WEEK_TINT_XNM/XQM/COOKIE not set, using sample course data");
        Arc::new(SampleCourseSource::new())
    };

    // --- Persistence ---
    let cache: Arc<dyn CourseCache> = Arc::new(CourseCacheJson::new(data_path.join("courses.json")));
    let color_store: Arc<dyn ColorStore> =
        Arc::new(ColorStoreJson::new(data_path.join("colors.json")));

    // --- Rendering + service ---
    let renderer: Arc<dyn GridRenderer> = Arc::new(TerminalGridRenderer::new());
    let service = Arc::new(AnnotateService::new(
        Arc::clone(&source),
        Arc::clone(&cache),
        Arc::clone(&renderer),
    ));

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(Arc::clone(&service), Arc::clone(&color_store)));

    input_port.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
