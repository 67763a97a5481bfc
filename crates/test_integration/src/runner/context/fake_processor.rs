use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use color_eyre::Result;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// A charge as the fake processor serves it.
#[derive(Debug, Clone)]
pub struct FakeCharge {
    pub id: String,
    pub amount: i64,
    pub status: &'static str,
    pub refunded: bool,
    pub created: i64,
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(rename = "created[gte]")]
    created_gte: i64,
    #[serde(rename = "created[lt]")]
    created_lt: i64,
    limit: usize,
    starting_after: Option<String>,
}

/// In-process stand-in for the processor's `GET /v1/charges`, paginated like the real one.
#[derive(Clone, Default)]
pub struct FakeProcessor {
    charges: Arc<RwLock<Vec<FakeCharge>>>,
}

impl FakeProcessor {
    pub async fn set_charges(&self, charges: Vec<FakeCharge>) {
        *self.charges.write().await = charges;
    }

    pub async fn spawn(&self) -> Result<(String, JoinHandle<()>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let app = Router::new()
            .route("/v1/charges", get(list_charges))
            .with_state(self.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Fake processor failed: {}", e);
            }
        });
        Ok((base_url, handle))
    }
}

async fn list_charges(
    State(processor): State<FakeProcessor>,
    Query(params): Query<ListParams>,
) -> Json<Value> {
    let charges = processor.charges.read().await;
    let mut in_window: Vec<&FakeCharge> = charges
        .iter()
        .filter(|c| c.created >= params.created_gte && c.created < params.created_lt)
        .collect();
    in_window.sort_by(|a, b| a.id.cmp(&b.id));

    let start = params
        .starting_after
        .as_deref()
        .and_then(|cursor| in_window.iter().position(|c| c.id == cursor))
        .map_or(0, |i| i + 1);
    let page: Vec<Value> = in_window
        .iter()
        .skip(start)
        .take(params.limit)
        .map(|c| {
            json!({
                "id": c.id,
                "object": "charge",
                "amount": c.amount,
                "currency": "usd",
                "status": c.status,
                "refunded": c.refunded,
                "created": c.created,
            })
        })
        .collect();
    let has_more = start + page.len() < in_window.len();

    Json(json!({ "object": "list", "data": page, "has_more": has_more }))
}
