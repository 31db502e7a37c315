//! In-process deployment: a fake JSON-RPC node and fake oracles on ephemeral
//! ports, plus the real middleware built by `MiddlewareContainer` and served
//! over TCP.

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use dv_02_chain_gateway::domain::abi::{
    selector, DEBTOR_END_TIMESTAMP_WORD, DEBTOR_MAX_CORRUPTION_WORD, DEBTOR_MAX_LIVENESS_WORD,
    GET_DEBTOR_SIGNATURE, REPORT_TYPED_HASH_SIGNATURE,
};
use dv_04_report_pipeline::test_helpers::{active_position, TEST_VERIFIER_KEY};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use node_runtime::{MiddlewareConfig, MiddlewareContainer};
use primitive_types::U256;
use serde_json::{json, Value};
use sha3::{Digest, Keccak256};
use shared_types::{parse_address, Address, DebtPosition, Hash};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const LENDING_CONTRACT: &str = "0x2222222222222222222222222222222222222222";
pub const REPORTER_REGISTRY: &str = "0x3333333333333333333333333333333333333333";
pub const CORRUPTION_TOKEN: &str = "corruption-token";
pub const IDENTIFIER_TOKEN: &str = "identifier-token";
pub const CHAIN_HEIGHT: u64 = 1_000;
pub const DEADLINE_BLOCKS: u64 = 50;
pub const VERSION: u64 = 1;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================================
// FAKE CHAIN NODE
// =============================================================================

/// JSON-RPC node serving the lending contract and the reporter registry.
pub struct ChainNode {
    pub position: Mutex<DebtPosition>,
    pub ledger_reverts: Mutex<bool>,
    pub registry_reverts: Mutex<bool>,
    /// Digests handed out by `reportTypedHash`, in order.
    pub digests: Mutex<Vec<Hash>>,
    /// Contract calls and RPC methods, in order.
    pub calls: Mutex<Vec<&'static str>>,
}

impl Default for ChainNode {
    fn default() -> Self {
        Self {
            position: Mutex::new(active_position(U256::from(1000), U256::from(500))),
            ledger_reverts: Mutex::new(false),
            registry_reverts: Mutex::new(false),
            digests: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ChainNode {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn answer(&self, request: &Value) -> Result<Value, String> {
        match request["method"].as_str() {
            Some("eth_blockNumber") => {
                self.record("eth_blockNumber");
                Ok(json!(format!("0x{CHAIN_HEIGHT:x}")))
            }
            Some("eth_call") => self.eth_call(&request["params"]),
            other => Err(format!("method not found: {other:?}")),
        }
    }

    fn eth_call(&self, params: &Value) -> Result<Value, String> {
        if params[1] != "latest" {
            return Err("only latest is served".into());
        }
        let to = params[0]["to"].as_str().and_then(parse_address);
        let data = params[0]["data"]
            .as_str()
            .and_then(|d| hex::decode(d.trim_start_matches("0x")).ok())
            .ok_or("calldata is not hex")?;
        if data.len() < 4 {
            return Err("calldata too short".into());
        }

        if data[..4] == selector(GET_DEBTOR_SIGNATURE) {
            self.record("getDebtor");
            if to != parse_address(LENDING_CONTRACT) {
                return Err("getDebtor sent to the wrong contract".into());
            }
            if *self.ledger_reverts.lock().unwrap() {
                return Err("execution reverted".into());
            }
            Ok(json!(encode_debtor(&self.position.lock().unwrap())))
        } else if data[..4] == selector(REPORT_TYPED_HASH_SIGNATURE) {
            self.record("reportTypedHash");
            if to != parse_address(REPORTER_REGISTRY) {
                return Err("reportTypedHash sent to the wrong contract".into());
            }
            if *self.registry_reverts.lock().unwrap() {
                return Err("execution reverted".into());
            }
            let mut digest = [0u8; 32];
            digest.copy_from_slice(&Keccak256::digest(&data));
            self.digests.lock().unwrap().push(digest);
            Ok(json!(format!("0x{}", hex::encode(digest))))
        } else {
            Err("unknown selector".into())
        }
    }
}

fn encode_debtor(position: &DebtPosition) -> String {
    let mut data = vec![0u8; 32 * 8];
    let words = [
        (DEBTOR_END_TIMESTAMP_WORD, position.end_timestamp),
        (DEBTOR_MAX_LIVENESS_WORD, position.max_slashable_amount_per_liveness),
        (DEBTOR_MAX_CORRUPTION_WORD, position.max_slashable_amount_per_corruption),
    ];
    for (index, value) in words {
        value.to_big_endian(&mut data[index * 32..(index + 1) * 32]);
    }
    format!("0x{}", hex::encode(data))
}

async fn json_rpc(State(node): State<Arc<ChainNode>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let reply = match node.answer(&request) {
        Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": 3, "message": message}
        }),
    };
    Json(reply)
}

// =============================================================================
// FAKE ORACLES
// =============================================================================

/// Canned answer of a fake collaborator.
#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(u16),
    /// 200 with a body that is not JSON.
    Garbage,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(body) => Json(body).into_response(),
            Reply::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Reply::Garbage => (StatusCode::OK, "<html>oops</html>").into_response(),
        }
    }
}

/// Liveness oracle, corruption oracle and identifier service on one router.
pub struct Oracles {
    pub liveness: Mutex<Reply>,
    pub corruption: Mutex<Reply>,
    pub identifier: Mutex<Reply>,
    pub liveness_queries: Mutex<Vec<Option<String>>>,
    pub corruption_requests: Mutex<Vec<Value>>,
    pub identifier_requests: Mutex<Vec<Value>>,
}

impl Default for Oracles {
    fn default() -> Self {
        Self {
            liveness: Mutex::new(Reply::Json(json!({
                "livenessData": {
                    "numOfValidatorsOnline": "8",
                    "numOfValidatorsOffline": "2",
                    "totalValidators": "10"
                },
                "severityScore": "0.2"
            }))),
            corruption: Mutex::new(Reply::Json(json!({"severityScore": "0.2"}))),
            identifier: Mutex::new(Reply::Json(json!({"nextIdentifier": "7"}))),
            liveness_queries: Mutex::new(Vec::new()),
            corruption_requests: Mutex::new(Vec::new()),
            identifier_requests: Mutex::new(Vec::new()),
        }
    }
}

impl Oracles {
    pub fn set_liveness(&self, reply: Reply) {
        *self.liveness.lock().unwrap() = reply;
    }

    pub fn set_corruption(&self, reply: Reply) {
        *self.corruption.lock().unwrap() = reply;
    }

    pub fn set_identifier(&self, reply: Reply) {
        *self.identifier.lock().unwrap() = reply;
    }

    pub fn identifier_requests(&self) -> Vec<Value> {
        self.identifier_requests.lock().unwrap().clone()
    }
}

fn bearer_matches(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {token}"))
}

async fn liveness(State(oracles): State<Arc<Oracles>>, RawQuery(query): RawQuery) -> Response {
    oracles.liveness_queries.lock().unwrap().push(query);
    oracles.liveness.lock().unwrap().clone().into_response()
}

async fn corruption(
    State(oracles): State<Arc<Oracles>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !bearer_matches(&headers, CORRUPTION_TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    oracles.corruption_requests.lock().unwrap().push(body);
    oracles.corruption.lock().unwrap().clone().into_response()
}

async fn identifier(
    State(oracles): State<Arc<Oracles>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !bearer_matches(&headers, IDENTIFIER_TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    oracles.identifier_requests.lock().unwrap().push(body);
    oracles.identifier.lock().unwrap().clone().into_response()
}

fn oracle_router(oracles: Arc<Oracles>) -> Router {
    Router::new()
        .route("/liveness", get(liveness))
        .route("/corruption", post(corruption))
        .route("/identifier", post(identifier))
        .with_state(oracles)
}

// =============================================================================
// DEPLOYMENT
// =============================================================================

/// A running middleware plus the fakes behind it. Shuts down on drop.
pub struct Deployment {
    pub base_url: String,
    pub chain: Arc<ChainNode>,
    pub oracles: Arc<Oracles>,
    pub verifier: Address,
    client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Deployment {
    pub async fn start() -> Self {
        let chain = Arc::new(ChainNode::default());
        let oracles = Arc::new(Oracles::default());
        let rpc_router = Router::new()
            .route("/", post(json_rpc))
            .with_state(chain.clone());
        let rpc_url = serve(rpc_router).await;
        let oracle_url = serve(oracle_router(oracles.clone())).await;

        let env: HashMap<&str, String> = HashMap::from([
            ("VERSION", VERSION.to_string()),
            (
                "DEFAULT_SERVICE_PROVIDER_BORROW_ADDRESS",
                "0x1111111111111111111111111111111111111111".to_string(),
            ),
            ("DESIGNATED_VERIFIER_PRIVATE_KEY", TEST_VERIFIER_KEY.to_string()),
            ("PROVIDER_URL", rpc_url),
            ("K_SQUARED_LENDING_CONTRACT", LENDING_CONTRACT.to_string()),
            ("K_SQUARED_REPORTER_REGISTRY", REPORTER_REGISTRY.to_string()),
            ("LIVENESS_ENDPOINT", format!("{oracle_url}/liveness")),
            (
                "CORRUPTION_VERIFICATION_ENDPOINT",
                format!("{oracle_url}/corruption"),
            ),
            ("DATA_FEED_ENDPOINT", format!("{oracle_url}/feed")),
            ("IDENTIFIER_GENERATOR_ENDPOINT", format!("{oracle_url}/identifier")),
            ("CHAIN_ID", "17000".to_string()),
            (
                "REPORT_DEADLINE_LENGTH_IN_ETH_BLOCKS",
                DEADLINE_BLOCKS.to_string(),
            ),
            ("CORRUPTION_VALIDATION_BEARER_TOKEN", CORRUPTION_TOKEN.to_string()),
            ("IDENTIFIER_BEARER_TOKEN", IDENTIFIER_TOKEN.to_string()),
            ("DV_HTTP_HOST", "127.0.0.1".to_string()),
            ("DV_HTTP_PORT", "0".to_string()),
            ("DV_OUTBOUND_TIMEOUT_MS", "5000".to_string()),
        ]);
        let config = MiddlewareConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
        let container = MiddlewareContainer::new(config).unwrap();
        let verifier = container.config.verifier.address();

        let gateway = container.api_gateway();
        let listener = gateway.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            gateway
                .serve(listener, async move {
                    let _ = stopped.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            chain,
            oracles,
            verifier,
            client: reqwest::Client::new(),
            shutdown: Some(shutdown),
        }
    }

    /// POST a JSON body to `/report`.
    pub async fn post_report(&self, body: &Value) -> (StatusCode, Value) {
        self.post_raw(body.to_string()).await
    }

    pub async fn post_raw(&self, body: impl Into<reqwest::Body>) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}/report", self.base_url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        read(response).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap();
        read(response).await
    }
}

impl Drop for Deployment {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn read(response: reqwest::Response) -> (StatusCode, Value) {
    let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
    let bytes = response.bytes().await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Address that produced `designatedVerifierSignature` over `digest`.
pub fn recover_signer(digest: &Hash, signature: &Value) -> Address {
    let word = |name: &str| {
        let text = signature[name].as_str().unwrap();
        hex::decode(text.trim_start_matches("0x")).unwrap()
    };
    let mut rs = word("r");
    rs.extend(word("s"));
    let signature_bytes = Signature::from_slice(&rs).unwrap();
    let v: u8 = signature["v"].as_str().unwrap().parse().unwrap();
    let recovery_id = RecoveryId::from_byte(v - 27).unwrap();

    let key = VerifyingKey::recover_from_prehash(digest, &signature_bytes, recovery_id).unwrap();
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}
