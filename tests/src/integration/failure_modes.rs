//! # Failure Mode Integration Tests
//!
//! Rejections and collaborator failures as a reporter sees them: status code,
//! `{error: {msg}}` envelope, and which collaborators were contacted.

#[cfg(test)]
mod tests {
    use crate::integration::harness::{Deployment, Reply, VERSION};
    use axum::http::StatusCode;
    use dv_01_self_attestation::test_helpers::generate_keypair;
    use dv_04_report_pipeline::messages;
    use dv_04_report_pipeline::test_helpers::{corruption_body, liveness_body};
    use primitive_types::U256;
    use serde_json::{json, Value};
    use shared_types::DebtPosition;

    fn corruption_request(proposed: Value) -> Value {
        let (secret, _) = generate_keypair();
        let info = json!({"events": [{"type": "double-sign", "slot": 100}]});
        corruption_body(&secret, VERSION, &info, proposed)
    }

    fn error_message(body: &Value) -> &str {
        body["error"]["msg"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_empty_body() {
        let deployment = Deployment::start().await;
        let (status, body) = deployment.post_raw("").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": {"msg": "No body"}}));
    }

    #[tokio::test]
    async fn test_unparseable_body() {
        let deployment = Deployment::start().await;
        let (status, body) = deployment.post_raw("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), messages::UNPARSEABLE_BODY);
    }

    /// Test: A stale version is rejected before any collaborator is contacted.
    #[tokio::test]
    async fn test_wrong_version_contacts_nobody() {
        let deployment = Deployment::start().await;
        let mut request = corruption_request(json!("100"));
        request["version"] = json!(VERSION + 1);

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), messages::INVALID_VERSION);
        assert!(deployment.chain.calls().is_empty());
    }

    /// Test: Tampered common info fails attestation; the chain is never read.
    #[tokio::test]
    async fn test_tampered_attestation() {
        let deployment = Deployment::start().await;
        let mut request = corruption_request(json!("100"));
        request["rpbsSelfAttestation"]["commonInfo"]["events"][0]["slot"] = json!(101);

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&body), messages::INVALID_SELF_ATTESTATION);
        assert!(deployment.chain.calls().is_empty());
    }

    /// Test: No active position stops the pipeline before any oracle call.
    #[tokio::test]
    async fn test_no_debt_position() {
        let deployment = Deployment::start().await;
        *deployment.chain.position.lock().unwrap() = DebtPosition::default();

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_message(&body), messages::NO_DEBT_POSITION);
        assert_eq!(deployment.chain.calls(), vec!["getDebtor"]);
        assert!(deployment.oracles.corruption_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ledger_revert() {
        let deployment = Deployment::start().await;
        *deployment.chain.ledger_reverts.lock().unwrap() = true;

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_message(&body), messages::UNABLE_TO_READ_DEBT_POSITION);
    }

    /// Test: The expected amount is named when the proposal is off by one.
    #[tokio::test]
    async fn test_slash_amount_mismatch() {
        let deployment = Deployment::start().await;

        let (status, body) = deployment.post_report(&corruption_request(json!("101"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            error_message(&body),
            "Invalid slash amount. Expected 100 based on 500 max slashing"
        );
        assert!(deployment.oracles.identifier_requests().is_empty());
    }

    /// Test: Ceilings at wei scale are computed without overflow or rounding.
    #[tokio::test]
    async fn test_wei_scale_ceiling() {
        let deployment = Deployment::start().await;
        let ceiling = U256::from(1_000u64) * U256::exp10(18);
        deployment.chain.position.lock().unwrap().max_slashable_amount_per_corruption = ceiling;
        deployment.oracles.set_corruption(Reply::Json(json!({"severityScore": "0.25"})));

        let (status, body) = deployment
            .post_report(&corruption_request(json!("250000000000000000000")))
            .await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["signedReport"]["amount"], "250000000000000000000");
    }

    /// Test: An unquoted wei-scale amount is ratified without loss.
    #[tokio::test]
    async fn test_wei_scale_integer_literal() {
        let deployment = Deployment::start().await;
        let ceiling = U256::from(1_000u64) * U256::exp10(18);
        deployment.chain.position.lock().unwrap().max_slashable_amount_per_corruption = ceiling;
        deployment.oracles.set_corruption(Reply::Json(json!({"severityScore": "0.25"})));
        let literal: Value = serde_json::from_str("250000000000000000000").unwrap();

        let (status, body) = deployment.post_report(&corruption_request(literal)).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["signedReport"]["amount"], "250000000000000000000");
    }

    #[tokio::test]
    async fn test_corruption_oracle_down() {
        let deployment = Deployment::start().await;
        deployment.oracles.set_corruption(Reply::Status(503));

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_message(&body), messages::UNABLE_TO_VALIDATE_CORRUPTION);
        assert!(deployment.oracles.identifier_requests().is_empty());
    }

    #[tokio::test]
    async fn test_severity_out_of_range() {
        let deployment = Deployment::start().await;
        deployment.oracles.set_corruption(Reply::Json(json!({"severityScore": "1.5"})));

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_message(&body), messages::INVALID_SEVERITY_SCORE);
    }

    /// Test: An oracle outage is a dependency failure, not a verdict on the claim.
    #[tokio::test]
    async fn test_liveness_oracle_down() {
        let deployment = Deployment::start().await;
        deployment.oracles.set_liveness(Reply::Status(503));
        let (secret, _) = generate_keypair();
        let request = liveness_body(&secret, VERSION, (8, 2, 10), (8, 2, 10), json!("200"));

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_message(&body), messages::UNABLE_TO_GET_LIVENESS);
    }

    #[tokio::test]
    async fn test_liveness_oracle_garbage() {
        let deployment = Deployment::start().await;
        deployment.oracles.set_liveness(Reply::Garbage);
        let (secret, _) = generate_keypair();
        let request = liveness_body(&secret, VERSION, (8, 2, 10), (8, 2, 10), json!("200"));

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_message(&body), messages::INVALID_LIVENESS_RESPONSE);
    }

    /// Test: Claimed counts that disagree with the oracle are rejected.
    #[tokio::test]
    async fn test_liveness_claim_disagrees_with_oracle() {
        let deployment = Deployment::start().await;
        let (secret, _) = generate_keypair();
        let request = liveness_body(&secret, VERSION, (7, 3, 10), (7, 3, 10), json!("200"));

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error_message(&body), messages::LIVENESS_MISMATCH_ENDPOINT);
        assert!(deployment.oracles.identifier_requests().is_empty());
    }

    #[tokio::test]
    async fn test_identifier_service_down() {
        let deployment = Deployment::start().await;
        deployment.oracles.set_identifier(Reply::Status(500));

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_message(&body), messages::UNABLE_TO_GET_IDENTIFIER);
    }

    #[tokio::test]
    async fn test_identifier_missing_from_response() {
        let deployment = Deployment::start().await;
        deployment.oracles.set_identifier(Reply::Json(json!({})));

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(error_message(&body), messages::INVALID_IDENTIFIER);
        assert!(!deployment.chain.calls().contains(&"reportTypedHash"));
    }

    /// Test: A registry failure is internal; the caller gets no detail.
    #[tokio::test]
    async fn test_registry_failure_is_generic() {
        let deployment = Deployment::start().await;
        *deployment.chain.registry_reverts.lock().unwrap() = true;

        let (status, body) = deployment.post_report(&corruption_request(json!("100"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": {"msg": "Internal error"}}));
        assert!(deployment.chain.digests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let deployment = Deployment::start().await;
        let (status, body) = deployment.get("/reports").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_message(&body), "Not found");
    }
}
