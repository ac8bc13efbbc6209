use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_database::AppwriteClient;
use shared_utils::test_utils::TestConfig;

fn client_for(mock_server: &MockServer) -> AppwriteClient {
    let mut config = TestConfig::default().to_app_config();
    config.appwrite_endpoint = mock_server.uri();
    AppwriteClient::new(&config)
}

#[tokio::test]
async fn test_create_document_requests_store_assigned_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/databases/test-database/collections/patients/documents"))
        .and(header("X-Appwrite-Project", "test-project"))
        .and(header("X-Appwrite-Key", "test-api-key"))
        .and(body_partial_json(json!({
            "documentId": "unique()",
            "data": { "name": "Test Patient" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "$id": "doc-1",
            "name": "Test Patient"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let created = client
        .create_document("patients", json!({ "name": "Test Patient" }))
        .await
        .unwrap();

    assert_eq!(created["$id"], "doc-1");
}

#[tokio::test]
async fn test_list_documents_sends_order_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/test-database/collections/appointments/documents"))
        .and(query_param("queries[]", r#"orderDesc("$createdAt")"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "documents": [{ "$id": "doc-1", "status": "pending" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let list = client
        .list_documents("appointments", &[r#"orderDesc("$createdAt")"#])
        .await
        .unwrap();

    assert_eq!(list.total, 1);
    assert_eq!(list.documents.len(), 1);
}

#[tokio::test]
async fn test_failed_request_surfaces_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/databases/test-database/collections/appointments/documents/doc-1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("document not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get_document("appointments", "doc-1").await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_file_view_url_includes_bucket_and_project() {
    let mock_server = MockServer::start().await;

    let client = client_for(&mock_server);
    let url = client.file_view_url("file-1");

    assert_eq!(
        url,
        format!(
            "{}/storage/buckets/identification/files/file-1/view?project=test-project",
            mock_server.uri()
        )
    );
}
