use crate::payment_processor::{ProcessorCharge, ProcessorError, StripeChargeList};
use app_state::PaymentProcessorSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Read access to the charges held by the payment processor.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Every charge created in `[since, until)`.
    async fn list_charges(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ProcessorCharge>, ProcessorError>;
}

#[derive(Clone)]
pub struct StripeClient {
    http_client: Client,
    charges_url: Url,
    secret_key: String,
    page_size: u32,
}

impl StripeClient {
    pub fn new(
        http_client: Client,
        settings: &PaymentProcessorSettings,
        secret_key: &str,
    ) -> Result<Self, ProcessorError> {
        let charges_url = Url::parse(&settings.base_url)?.join("/v1/charges")?;
        Ok(Self {
            http_client,
            charges_url,
            secret_key: secret_key.to_owned(),
            page_size: settings.page_size.clamp(1, 100),
        })
    }

    fn page_url(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
        starting_after: Option<&str>,
    ) -> Url {
        let mut url = self.charges_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("created[gte]", &since.timestamp().to_string())
                .append_pair("created[lt]", &until.timestamp().to_string())
                .append_pair("limit", &self.page_size.to_string());
            if let Some(cursor) = starting_after {
                query.append_pair("starting_after", cursor);
            }
        }
        url
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    #[instrument(skip(self))]
    async fn list_charges(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<ProcessorCharge>, ProcessorError> {
        let mut charges = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let url = self.page_url(since, until, cursor.as_deref());
            let response = self
                .http_client
                .get(url)
                .bearer_auth(&self.secret_key)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                return Err(ProcessorError::RemoteServerError(format!(
                    "listing charges failed with {status}: {error_text}"
                )));
            }

            let page: StripeChargeList = response.json().await?;
            debug!(count = page.data.len(), has_more = page.has_more, "Fetched charge page");
            cursor = page.data.last().map(|charge| charge.id.clone());
            for charge in page.data {
                charges.push(ProcessorCharge::try_from(charge)?);
            }

            if !page.has_more || cursor.is_none() {
                break;
            }
        }

        Ok(charges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn page_url_carries_window_and_cursor() {
        let settings = PaymentProcessorSettings {
            base_url: "https://api.stripe.com".to_string(),
            page_size: 100,
        };
        let client = StripeClient::new(Client::new(), &settings, "sk_test").unwrap();
        let since = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let until = Utc.with_ymd_and_hms(2024, 6, 8, 0, 0, 0).unwrap();

        let first = client.page_url(since, until, None);
        assert_eq!(first.path(), "/v1/charges");
        let pairs: Vec<(String, String)> = first.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("created[gte]".to_string(), since.timestamp().to_string())));
        assert!(pairs.contains(&("created[lt]".to_string(), until.timestamp().to_string())));
        assert!(pairs.contains(&("limit".to_string(), "100".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "starting_after"));

        let next = client.page_url(since, until, Some("ch_42"));
        assert!(next.query_pairs().any(|(k, v)| k == "starting_after" && v == "ch_42"));
    }
}
