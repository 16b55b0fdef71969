use crate::messages::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use blocknet_core::task::service::{AsyncService, AsyncServiceError, AsyncServiceFuture};
use blocknet_p2p_flows::FlowContext;
use blocknet_p2p_lib::service::normalize_listen_address;
use blocknet_p2p_lib::{PeerApi, ProtocolError};
use blocknet_utils::triggers::SingleTrigger;
use log::{info, trace};
use std::sync::Arc;

const API_SERVICE: &str = "api-service";

/// The HTTP face of the node. The gateway resolves client requests against
/// these endpoints; `POST /transaction` funnels into the same handler a
/// transaction arriving over the peer RPC would hit.
pub struct ApiService {
    ctx: Arc<FlowContext>,
    listen_address: String,
    shutdown: SingleTrigger,
}

impl ApiService {
    pub fn new(ctx: Arc<FlowContext>, listen_address: String) -> Self {
        Self { ctx, listen_address, shutdown: SingleTrigger::default() }
    }
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "error": self.1 }))).into_response()
    }
}

impl From<ProtocolError> for ApiError {
    fn from(err: ProtocolError) -> Self {
        let code = match &err {
            ProtocolError::Rule(_) | ProtocolError::Mempool(_) | ProtocolError::Conversion(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self(code, err.to_string())
    }
}

async fn healthcheck() -> Json<HealthcheckResponse> {
    Json(HealthcheckResponse { status: "ok".to_string() })
}

async fn get_block_by_height(
    State(ctx): State<Arc<FlowContext>>,
    Json(request): Json<GetBlockByHeightRequest>,
) -> Result<Json<GetBlockByHeightResponse>, ApiError> {
    let block = ctx
        .chain()
        .block_by_height(request.height)
        .map_err(|err| ApiError(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))?;
    Ok(Json(GetBlockByHeightResponse { block: (*block).clone() }))
}

async fn get_utxos_by_address(
    State(ctx): State<Arc<FlowContext>>,
    Json(request): Json<GetUtxosByAddressRequest>,
) -> Json<GetUtxosByAddressResponse> {
    // Wallets only care about spendable entries
    let utxos = ctx.chain().utxos_by_address(request.address).into_iter().filter(|entry| !entry.is_spent).collect();
    Json(GetUtxosByAddressResponse { utxos })
}

async fn submit_transaction(
    State(ctx): State<Arc<FlowContext>>,
    Json(request): Json<SubmitTransactionRequest>,
) -> Result<Json<SubmitTransactionResponse>, ApiError> {
    let transaction = ctx.new_transaction(request.transaction).await?;
    Ok(Json(SubmitTransactionResponse { transaction }))
}

async fn get_height(State(ctx): State<Arc<FlowContext>>) -> Json<GetHeightResponse> {
    Json(GetHeightResponse { height: ctx.chain().height() })
}

fn router(ctx: Arc<FlowContext>) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/block", get(get_block_by_height))
        .route("/utxo", get(get_utxos_by_address))
        .route("/transaction", post(submit_transaction))
        .route("/height", get(get_height))
        .with_state(ctx)
}

impl AsyncService for ApiService {
    fn ident(self: Arc<Self>) -> &'static str {
        API_SERVICE
    }

    fn start(self: Arc<Self>) -> AsyncServiceFuture {
        trace!("{} starting", API_SERVICE);
        let shutdown_signal = self.shutdown.listener.clone();

        Box::pin(async move {
            let address = normalize_listen_address(&self.listen_address);
            let listener = tokio::net::TcpListener::bind(&address)
                .await
                .map_err(|err| AsyncServiceError::Service(format!("{API_SERVICE} failed to bind {address}: {err}")))?;
            info!("API server listening on {}", address);

            axum::serve(listener, router(self.ctx.clone()))
                .with_graceful_shutdown(shutdown_signal)
                .await
                .map_err(|err| AsyncServiceError::Service(format!("{API_SERVICE} terminated: {err}")))
        })
    }

    fn signal_exit(self: Arc<Self>) {
        trace!("sending an exit signal to {}", API_SERVICE);
        self.shutdown.trigger.trigger();
    }

    fn stop(self: Arc<Self>) -> AsyncServiceFuture {
        Box::pin(async move {
            trace!("{} exiting", API_SERVICE);
            Ok(())
        })
    }
}
