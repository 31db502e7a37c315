//! # Report Flow Integration Tests
//!
//! Successful reports, driven over HTTP through the wired middleware:
//!
//! ```text
//! POST /report → envelope → self-attestation → getDebtor → oracle
//!              → slash ratification → identifier → eth_blockNumber
//!              → reportTypedHash → co-signature
//! ```

#[cfg(test)]
mod tests {
    use crate::integration::harness::{
        recover_signer, Deployment, CHAIN_HEIGHT, DEADLINE_BLOCKS, VERSION,
    };
    use axum::http::StatusCode;
    use dv_01_self_attestation::test_helpers::generate_keypair;
    use dv_04_report_pipeline::test_helpers::{corruption_body, liveness_body, TEST_DEBTOR};
    use serde_json::json;

    /// Test: A valid corruption report is co-signed by the configured key.
    #[tokio::test]
    async fn test_corruption_report_end_to_end() {
        let deployment = Deployment::start().await;
        let (secret, _) = generate_keypair();
        let info = json!({"events": [{"type": "double-sign", "slot": 100, "validator": "0xabc"}]});
        let request = corruption_body(&secret, VERSION, &info, json!("100"));

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        let report = &body["signedReport"];
        assert_eq!(report["slashType"], "1");
        assert_eq!(report["debtor"], TEST_DEBTOR);
        assert_eq!(report["amount"], "100");
        assert_eq!(report["identifier"], "7");
        assert_eq!(report["block"], CHAIN_HEIGHT + DEADLINE_BLOCKS);

        let signature = &body["designatedVerifierSignature"];
        assert_eq!(signature["deadline"], CHAIN_HEIGHT + DEADLINE_BLOCKS);
        let digests = deployment.chain.digests.lock().unwrap().clone();
        assert_eq!(digests.len(), 1);
        assert_eq!(recover_signer(&digests[0], signature), deployment.verifier);

        assert_eq!(
            deployment.chain.calls(),
            vec!["getDebtor", "eth_blockNumber", "reportTypedHash"]
        );
    }

    /// Test: The echoed inputs are the submitted ones, unmodified.
    #[tokio::test]
    async fn test_inputs_echoed_verbatim() {
        let deployment = Deployment::start().await;
        let (secret, _) = generate_keypair();
        let info = json!({"events": [{"type": "double-sign", "slot": "100"}]});
        let request = corruption_body(&secret, VERSION, &info, json!(100));

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["inputs"]["eventType"], "CORRUPTION");
        assert_eq!(body["inputs"]["eventData"], request["eventData"]);
        assert_eq!(
            body["inputs"]["rpbsSelfAttestation"],
            request["rpbsSelfAttestation"]
        );
    }

    /// Test: Collaborators receive the events, the credential and the report context.
    #[tokio::test]
    async fn test_collaborators_receive_report_context() {
        let deployment = Deployment::start().await;
        let (secret, _) = generate_keypair();
        let info = json!({"events": [{"type": "double-sign", "slot": 100}]});
        let request = corruption_body(&secret, VERSION, &info, json!("100"));

        let (status, body) = deployment.post_report(&request).await;
        assert_eq!(status, StatusCode::OK, "{body}");

        let corruption = deployment.oracles.corruption_requests.lock().unwrap().clone();
        assert_eq!(corruption.len(), 1);
        assert_eq!(corruption[0]["events"][0]["type"], "double-sign");
        assert_eq!(corruption[0]["events"][0]["slot"], 100);

        let identifier = deployment.oracles.identifier_requests();
        assert_eq!(identifier.len(), 1);
        assert_eq!(identifier[0]["eventType"], "CORRUPTION");
        assert_eq!(identifier[0]["serviceProviderAddress"], TEST_DEBTOR);
        assert_eq!(identifier[0]["eventData"], request["eventData"]);
        assert_eq!(identifier[0]["report"]["amount"], "100");
        assert_eq!(identifier[0]["report"]["slashType"], "1");
        assert!(identifier[0]["report"]["signature"]
            .as_str()
            .unwrap()
            .starts_with("0x"));
    }

    /// Test: A valid liveness report uses the oracle's severity and the liveness ceiling.
    #[tokio::test]
    async fn test_liveness_report_end_to_end() {
        let deployment = Deployment::start().await;
        let (secret, _) = generate_keypair();
        // 1000 * 0.2
        let request = liveness_body(&secret, VERSION, (8, 2, 10), (8, 2, 10), json!("200"));

        let (status, body) = deployment.post_report(&request).await;

        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["signedReport"]["slashType"], "0");
        assert_eq!(body["signedReport"]["amount"], "200");
        assert_eq!(
            *deployment.oracles.liveness_queries.lock().unwrap(),
            vec![Some("provider=0x11&epoch=5".to_string())]
        );
        assert!(deployment.oracles.corruption_requests.lock().unwrap().is_empty());

        let digests = deployment.chain.digests.lock().unwrap().clone();
        assert_eq!(
            recover_signer(&digests[0], &body["designatedVerifierSignature"]),
            deployment.verifier
        );
    }

    /// Test: Identical submissions get independent identifiers and signatures.
    #[tokio::test]
    async fn test_resubmission_is_not_deduplicated() {
        let deployment = Deployment::start().await;
        let (secret, _) = generate_keypair();
        let info = json!({"events": [{"type": "double-sign", "slot": 100}]});
        let request = corruption_body(&secret, VERSION, &info, json!("100"));

        let (first, _) = deployment.post_report(&request).await;
        let (second, _) = deployment.post_report(&request).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);
        assert_eq!(deployment.oracles.identifier_requests().len(), 2);
    }

    /// Test: /info publishes the verifier address and never a credential.
    #[tokio::test]
    async fn test_info_endpoint() {
        let deployment = Deployment::start().await;

        let (status, body) = deployment.get("/info").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["VERSION"], VERSION);
        assert_eq!(body["CHAIN_ID"], 17000);
        assert_eq!(body["REPORT_DEADLINE_LENGTH_IN_ETH_BLOCKS"], DEADLINE_BLOCKS);
        assert_eq!(
            body["DESIGNATED_VERIFIER"],
            serde_json::to_value(deployment.verifier).unwrap()
        );
        let text = body.to_string();
        assert!(!text.contains("corruption-token"));
        assert!(!text.contains("identifier-token"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let deployment = Deployment::start().await;
        let (status, body) = deployment.get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }
}
