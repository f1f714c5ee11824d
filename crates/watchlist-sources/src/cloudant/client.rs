use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, warn};
use url::Url;
use watchlist_config::DatabaseConfig;
use watchlist_models::{DocRef, DocumentAck, ListItem, StoredItem};

use crate::cloudant::types::{AllDocsResponse, CouchError, DocumentBody};
use crate::error::ClientError;
use crate::http;
use crate::traits::DocumentStore;

const SERVICE: &str = "cloudant";

/// Client for a CouchDB-compatible HTTP document store (Cloudant, CouchDB)
#[derive(Clone)]
pub struct CloudantClient {
    client: Client,
    base_url: Url,
    database: String,
    credentials: Option<(String, String)>,
}

impl CloudantClient {
    /// Create a client for `database` on the server at `uri`.
    ///
    /// Credentials embedded in the URI are removed from it and sent as basic
    /// auth instead, so they never show up in request logs.
    pub fn new(client: Client, uri: &str, database: impl Into<String>) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(uri).map_err(|e| ClientError::InvalidUrl {
            service: SERVICE,
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl {
                service: SERVICE,
                message: format!("{} cannot be a base URL", uri),
            });
        }

        let credentials = if base_url.username().is_empty() {
            None
        } else {
            let username = decode_userinfo(base_url.username());
            let password = base_url.password().map(decode_userinfo).unwrap_or_default();
            base_url
                .set_username("")
                .and_then(|_| base_url.set_password(None))
                .map_err(|_| ClientError::InvalidUrl {
                    service: SERVICE,
                    message: "cannot remove credentials from the database URI".to_string(),
                })?;
            Some((username, password))
        };

        Ok(Self {
            client,
            base_url,
            database: database.into(),
            credentials,
        })
    }

    pub fn from_config(config: &DatabaseConfig) -> Result<Self, ClientError> {
        let client = http::build_client(SERVICE, config.timeout_secs, config.accept_invalid_certs)?;
        Self::new(client, &config.uri, config.name.clone())
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push(&self.database).extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        self.authorize(request)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })
    }

    /// Map a failed write to a conflict or not-found where the status says so
    async fn write_error(&self, doc: &DocRef, response: Response) -> ClientError {
        match response.status() {
            StatusCode::CONFLICT => ClientError::Conflict {
                id: doc.id.clone(),
                rev: doc.rev.clone(),
            },
            StatusCode::NOT_FOUND => ClientError::NotFound {
                resource: format!("document {}", doc.id),
            },
            _ => http::status_error(SERVICE, response).await,
        }
    }
}

fn decode_userinfo(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[async_trait]
impl DocumentStore for CloudantClient {
    async fn list_all(&self) -> Result<Vec<StoredItem>, ClientError> {
        let request = self
            .client
            .get(self.url(&["_all_docs"]))
            .query(&[("include_docs", "true")]);
        let response = self.send(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource: format!("database {}", self.database),
            });
        }
        if !response.status().is_success() {
            return Err(http::status_error(SERVICE, response).await);
        }

        let all_docs: AllDocsResponse = http::decode_json(SERVICE, response).await?;
        let mut items = Vec::with_capacity(all_docs.rows.len());

        for row in all_docs.rows {
            if row.id.starts_with("_design/") {
                continue;
            }
            let Some(doc) = row.doc else {
                continue;
            };
            match serde_json::from_value::<StoredItem>(doc) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(
                        operation = "list_documents",
                        doc_id = %row.id,
                        error = %e,
                        "Skipping document that is not a list item"
                    );
                }
            }
        }

        debug!(operation = "list_documents", count = items.len(), "Loaded list documents");
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<StoredItem, ClientError> {
        let response = self.send(self.client.get(self.url(&[id]))).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource: format!("document {}", id),
            });
        }
        if !response.status().is_success() {
            return Err(http::status_error(SERVICE, response).await);
        }

        http::decode_json(SERVICE, response).await
    }

    async fn create(&self, item: &ListItem) -> Result<DocumentAck, ClientError> {
        let body = DocumentBody { item, extra: None };
        let response = self
            .send(self.client.post(self.url(&[])).json(&body))
            .await?;

        if !response.status().is_success() {
            return Err(http::status_error(SERVICE, response).await);
        }

        let ack: DocumentAck = http::decode_json(SERVICE, response).await?;
        info!(operation = "create_document", doc_id = %ack.id, rev = %ack.rev, "Created list document");
        Ok(ack)
    }

    async fn update(&self, doc: &DocRef, item: &StoredItem) -> Result<DocumentAck, ClientError> {
        let body = DocumentBody {
            item: &item.item,
            extra: Some(&item.extra),
        };
        let request = self
            .client
            .put(self.url(&[doc.id.as_str()]))
            .query(&[("rev", doc.rev.as_str())])
            .json(&body);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(self.write_error(doc, response).await);
        }

        let ack: DocumentAck = http::decode_json(SERVICE, response).await?;
        info!(operation = "update_document", doc_id = %ack.id, rev = %ack.rev, "Updated list document");
        Ok(ack)
    }

    async fn delete(&self, doc: &DocRef) -> Result<DocumentAck, ClientError> {
        let request = self
            .client
            .delete(self.url(&[doc.id.as_str()]))
            .query(&[("rev", doc.rev.as_str())]);
        let response = self.send(request).await?;

        if !response.status().is_success() {
            return Err(self.write_error(doc, response).await);
        }

        let ack: DocumentAck = http::decode_json(SERVICE, response).await?;
        info!(operation = "delete_document", doc_id = %ack.id, "Deleted list document");
        Ok(ack)
    }

    async fn ensure_database(&self) -> Result<bool, ClientError> {
        let response = self.send(self.client.put(self.url(&[]))).await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::ACCEPTED => Ok(true),
            StatusCode::PRECONDITION_FAILED => Ok(false),
            _ => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                // Prefer the store's own reason over the raw body when it sends one
                let body = serde_json::from_str::<CouchError>(&body)
                    .map(|e| format!("{}: {}", e.error, e.reason))
                    .unwrap_or(body);
                Err(ClientError::Status {
                    service: SERVICE,
                    status,
                    body,
                })
            }
        }
    }
}
