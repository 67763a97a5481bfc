use crate::runner::context::context_utils::{
    create_test_database, create_test_settings, force_drop_db,
};
use crate::runner::context::fake_processor::FakeProcessor;
use app_state::{
    AppConstants, AppSettings, CONSTANTS, load_constants_from_path, load_settings_from_path,
};
use color_eyre::eyre::{Result, eyre};
use common_services::utils::nice_id;
use reqwest::Client;
use sqlx::PgPool;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub fn init_test_constants(constants: AppConstants) {
    if CONSTANTS.set(constants).is_err() {
        info!("AppConstants were already initialized by another test.");
    }
}

/// A running API on its own database, plus a fake payment processor behind it.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: Client,
    pub processor: FakeProcessor,
    db_name: String,
    management_pool: PgPool,
    api_handle: JoinHandle<()>,
    processor_handle: JoinHandle<()>,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        info!("Setting up test environment...");

        let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("assets/settings.yaml")
            .canonicalize()?;
        let base_settings = load_settings_from_path(&settings_path, None)?;
        init_test_constants(load_constants_from_path(&settings_path)?);

        let db_name = format!("scoop_test_{}", nice_id(8).to_lowercase());
        let (main_pool, management_pool) =
            create_test_database(&base_settings.secrets.database_url, &db_name).await?;

        let mut settings = create_test_settings(&db_name, &base_settings)?;
        let processor = FakeProcessor::default();
        let (processor_url, processor_handle) = processor.spawn().await?;
        settings.payment_processor.base_url = processor_url;

        let api_pool = main_pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        let http_client = Client::new();
        Self::wait_for_healthy_api(&settings, &http_client).await?;

        info!("Test environment is ready.");
        Ok(Self {
            pool: main_pool,
            settings,
            http_client,
            processor,
            db_name,
            management_pool,
            api_handle,
            processor_handle,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api.public_url, path)
    }

    async fn wait_for_healthy_api(settings: &AppSettings, http_client: &Client) -> Result<()> {
        let health_url = format!("{}/health", &settings.api.public_url);
        for attempt in 1..=20 {
            info!("Health check attempt {}...", attempt);
            match http_client.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("API is healthy!");
                    return Ok(());
                }
                Ok(response) => {
                    warn!("API health check returned {}", response.status());
                }
                Err(e) => {
                    warn!("API health check failed: {:?}. Retrying...", e);
                }
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Err(eyre!("API did not become healthy within the timeout period."))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.api_handle.abort();
        self.processor_handle.abort();

        let db_name = self.db_name.clone();
        let pool = self.management_pool.clone();
        tokio::spawn(async move {
            info!("Dropping test database: {}", db_name);
            if let Err(e) = force_drop_db(&pool, &db_name).await {
                error!("Failed to clean up test database {}: {}", db_name, e);
            }
        });

        info!("Teardown complete.");
    }
}
