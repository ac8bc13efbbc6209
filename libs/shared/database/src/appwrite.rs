use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    multipart, Client, Method,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;

/// A page of documents as returned by the Appwrite Databases API.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Value>,
}

/// Thin client over the Appwrite Databases and Storage REST APIs.
///
/// All requests authenticate with the server API key; failures surface as
/// errors classified by response status. There are no retries and no
/// partial-write semantics beyond what Appwrite itself provides.
pub struct AppwriteClient {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    bucket_id: String,
}

impl AppwriteClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.appwrite_endpoint.clone(),
            project_id: config.appwrite_project_id.clone(),
            api_key: config.appwrite_api_key.clone(),
            database_id: config.appwrite_database_id.clone(),
            bucket_id: config.appwrite_storage_bucket_id.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("X-Appwrite-Project", HeaderValue::from_str(&self.project_id).unwrap());
        headers.insert("X-Appwrite-Key", HeaderValue::from_str(&self.api_key).unwrap());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = format!("{}{}", self.endpoint, path);
        debug!("Making request to {}", url);

        let mut req = self.client.request(method, &url).headers(self.get_headers());

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Appwrite API error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("Appwrite API error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<Value>().await?;
        Ok(data)
    }

    fn documents_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection_id
        )
    }

    /// Create a document with a store-assigned id.
    pub async fn create_document(&self, collection_id: &str, data: Value) -> Result<Value> {
        let path = self.documents_path(collection_id);

        self.request(
            Method::POST,
            &path,
            Some(json!({
                "documentId": "unique()",
                "data": data,
            })),
        )
        .await
    }

    pub async fn get_document(&self, collection_id: &str, document_id: &str) -> Result<Value> {
        let path = format!("{}/{}", self.documents_path(collection_id), document_id);

        self.request(Method::GET, &path, None).await
    }

    /// Patch a document in place. Appwrite replaces only the supplied
    /// attributes; the write is last-write-wins, there is no version token.
    pub async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> Result<Value> {
        let path = format!("{}/{}", self.documents_path(collection_id), document_id);

        self.request(Method::PATCH, &path, Some(json!({ "data": data }))).await
    }

    /// List documents, optionally constrained by Appwrite query strings
    /// such as `orderDesc("$createdAt")`.
    pub async fn list_documents(
        &self,
        collection_id: &str,
        queries: &[&str],
    ) -> Result<DocumentList> {
        let mut path = self.documents_path(collection_id);

        if !queries.is_empty() {
            let query_string = queries
                .iter()
                .map(|query| format!("queries[]={}", urlencoding::encode(query)))
                .collect::<Vec<_>>()
                .join("&");
            path = format!("{}?{}", path, query_string);
        }

        let data = self.request(Method::GET, &path, None).await?;
        let list: DocumentList = serde_json::from_value(data)?;
        Ok(list)
    }

    /// Upload a file to the storage bucket, returning the created file record.
    pub async fn create_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<Value> {
        let url = format!("{}/storage/buckets/{}/files", self.endpoint, self.bucket_id);
        debug!("Uploading file {} to {}", file_name, url);

        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .text("fileId", "unique()")
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Appwrite storage error ({}): {}", status, error_text);
            return Err(anyhow!("Appwrite storage error ({}): {}", status, error_text));
        }

        let data = response.json::<Value>().await?;
        Ok(data)
    }

    /// Public view URL for an uploaded file.
    pub fn file_view_url(&self, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.endpoint, self.bucket_id, file_id, self.project_id
        )
    }
}
