//! Thin HTTP client over the Catalog API endpoints.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::debug;

/// Status and raw body of a response, printed as-is by the CLI.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> eyre::Result<Reply> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "Received response");
        Ok(Reply { status, body })
    }

    pub async fn create_product(
        &self,
        name: &str,
        price: &Value,
        is_18_plus: bool,
        category_id: i32,
    ) -> eyre::Result<Reply> {
        let payload = product_payload(name, price, is_18_plus, category_id);
        self.send(self.http.post(self.url("/products")).json(&payload))
            .await
    }

    pub async fn update_product(&self, id: i32, is_18_plus: bool) -> eyre::Result<Reply> {
        let url = self.url(&format!("/products/{}", id));
        self.send(self.http.patch(url).json(&json!({ "is_18_plus": is_18_plus })))
            .await
    }

    pub async fn delete_product(&self, id: i32) -> eyre::Result<Reply> {
        let url = self.url(&format!("/products/{}", id));
        self.send(self.http.delete(url)).await
    }

    pub async fn create_category(&self, name: &str) -> eyre::Result<Reply> {
        self.send(
            self.http
                .post(self.url("/categories"))
                .json(&json!({ "name": name })),
        )
        .await
    }
}

/// Body for `POST /products`, using the `category_id` alias.
pub fn product_payload(name: &str, price: &Value, is_18_plus: bool, category_id: i32) -> Value {
    json!({
        "name": name,
        "price": price,
        "is_18_plus": is_18_plus,
        "category_id": category_id,
    })
}
