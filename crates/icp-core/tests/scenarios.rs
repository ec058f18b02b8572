use icp_core::{ClientError, Config, CoreError, Demo, Scenario};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn certificate_info() -> Value {
    json!({ "subject": "João Silva:12345678901", "issuer": "AC CERTISIGN RFB G5" })
}

fn signature(id: &str) -> Value {
    json!({
        "signatureId": id,
        "certificateInfo": certificate_info(),
        "isValid": true,
        "validationDetails": { "chainValid": true, "notRevoked": true, "timeValid": true },
        "signedAt": "2024-09-24T20:35:00.000Z"
    })
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_session(server: &MockServer) {
    mount_json(
        server,
        "POST",
        "/api/auth/login",
        201,
        json!({ "token": "tok", "userId": "clusr0001", "email": "admin@test.com" }),
    )
    .await;
    mount_json(
        server,
        "POST",
        "/api/auth/logout",
        201,
        json!({ "message": "Logout realizado com sucesso" }),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/api/users/my-documents",
        200,
        json!({ "documents": [{
            "id": "cldoc0000",
            "filename": "antigo.pdf",
            "uploadedAt": "2024-09-20T10:00:00.000Z",
            "signaturesCount": 1,
            "isFullySigned": true
        }] }),
    )
    .await;
}

async fn mount_upload(server: &MockServer) {
    mount_json(
        server,
        "POST",
        "/api/documents/upload",
        201,
        json!({ "documentId": "cldoc0001", "size": 9 }),
    )
    .await;
}

fn config_for(server: &MockServer, assets: &Path, output: &Path) -> Config {
    let mut config = Config::new(assets.to_path_buf()).with_base_url(format!("{}/api", server.uri()));
    config.output_dir = output.to_path_buf();
    config
}

fn write_document(assets: &Path) {
    fs::write(assets.join("test-document.pdf"), b"%PDF-1.4\n").unwrap();
}

#[tokio::test]
async fn simple_scenario_lists_documents() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    let dir = TempDir::new().unwrap();

    let mut demo = Demo::new(config_for(&server, dir.path(), dir.path()), Vec::new()).unwrap();
    let outcome = demo.run(Scenario::Simple).await.unwrap();
    assert!(!demo.client().is_authenticated());

    let text = String::from_utf8(demo.into_output()).unwrap();
    assert!(outcome.document_id.is_none());
    assert!(text.contains("👤 User: admin@test.com"));
    assert!(text.contains("📝 Name: antigo.pdf"));
    assert!(text.contains("Simple example completed!"));

    let requests = server.received_requests().await.unwrap();
    let routes: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        routes,
        vec!["/api/auth/login", "/api/users/my-documents", "/api/auth/logout"]
    );
}

#[tokio::test]
async fn upload_scenario_reports_created_id() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_upload(&server).await;
    mount_json(
        &server,
        "GET",
        "/api/documents/cldoc0001/verify",
        200,
        json!({ "totalSignatures": 0, "signatures": [] }),
    )
    .await;

    let dir = TempDir::new().unwrap();
    write_document(dir.path());

    let mut demo = Demo::new(config_for(&server, dir.path(), dir.path()), Vec::new()).unwrap();
    let outcome = demo.run(Scenario::Upload).await.unwrap();

    assert_eq!(outcome.document_id.as_deref(), Some("cldoc0001"));
    let text = String::from_utf8(demo.into_output()).unwrap();
    assert!(text.contains("Total signatures: 0"));
    assert!(text.contains("Document ID created: cldoc0001"));
}

#[tokio::test]
async fn full_scenario_skips_signing_without_certificate() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_upload(&server).await;
    mount_json(
        &server,
        "GET",
        "/api/documents/cldoc0001/verify",
        200,
        json!({ "totalSignatures": 0, "signatures": [] }),
    )
    .await;

    let dir = TempDir::new().unwrap();
    write_document(dir.path());

    let mut demo = Demo::new(config_for(&server, dir.path(), dir.path()), Vec::new()).unwrap();
    let outcome = demo.run(Scenario::Full).await.unwrap();

    assert!(outcome.signature_id.is_none());
    assert!(outcome.signed_document.is_none());
    let text = String::from_utf8(demo.into_output()).unwrap();
    assert!(text.contains("Test certificate not found, skipping signature"));
    assert!(text.contains("test-certificate.p12"));
    assert!(text.contains("Walkthrough completed successfully!"));
}

#[tokio::test]
async fn full_scenario_signs_and_downloads() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_upload(&server).await;
    mount_json(
        &server,
        "POST",
        "/api/documents/cldoc0001/sign-icp",
        201,
        json!({
            "signatureId": "clsig0001",
            "documentId": "cldoc0001",
            "certificateInfo": certificate_info(),
            "standard": "ICP-Brasil"
        }),
    )
    .await;
    // First verification happens before signing, the second after
    Mock::given(method("GET"))
        .and(path("/api/documents/cldoc0001/verify"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "totalSignatures": 0, "signatures": [] })),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "GET",
        "/api/documents/cldoc0001/verify",
        200,
        json!({ "totalSignatures": 1, "signatures": [signature("clsig0001")] }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/documents/cldoc0001/download/signed"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"0\x80\x06\x09signed".to_vec()))
        .mount(&server)
        .await;

    let assets = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_document(assets.path());
    fs::write(assets.path().join("test-certificate.p12"), b"pkcs12").unwrap();
    let output_dir = output.path().join("signed");

    let mut demo = Demo::new(config_for(&server, assets.path(), &output_dir), Vec::new()).unwrap();
    let outcome = demo.run(Scenario::Full).await.unwrap();

    assert_eq!(outcome.signature_id.as_deref(), Some("clsig0001"));
    let signed = outcome.signed_document.unwrap();
    assert_eq!(signed, output_dir.join("documento_assinado_cldoc0001.p7s"));
    assert_eq!(fs::read(&signed).unwrap(), b"0\x80\x06\x09signed");

    let text = String::from_utf8(demo.into_output()).unwrap();
    assert!(text.contains("🆔 Signature ID: clsig0001"));
    assert!(text.contains("Total signatures: 1"));
    assert!(text.contains("📊 Size: 10 bytes"));
}

#[tokio::test]
async fn failing_step_aborts_scenario() {
    let server = MockServer::start().await;
    mount_session(&server).await;
    mount_upload(&server).await;
    mount_json(
        &server,
        "GET",
        "/api/documents/cldoc0001/verify",
        404,
        json!({ "message": "document not found" }),
    )
    .await;

    let dir = TempDir::new().unwrap();
    write_document(dir.path());

    let mut demo = Demo::new(config_for(&server, dir.path(), dir.path()), Vec::new()).unwrap();
    let err = demo.run(Scenario::Upload).await.unwrap_err();

    match err {
        CoreError::Client(ClientError::Application { message, .. }) => {
            assert_eq!(message, "document not found")
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // No logout after the failed step
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/api/auth/logout"));
}

#[tokio::test]
async fn missing_document_fails_before_upload_request() {
    let server = MockServer::start().await;
    mount_session(&server).await;

    let dir = TempDir::new().unwrap();
    let mut demo = Demo::new(config_for(&server, dir.path(), dir.path()), Vec::new()).unwrap();
    let err = demo.run(Scenario::Upload).await.unwrap_err();

    assert!(matches!(err, CoreError::Client(ClientError::NotFound(_))));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/auth/login");
}
