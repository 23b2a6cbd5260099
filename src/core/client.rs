use crate::core::cache::{QueryCache, Tag};
use crate::domain::model::{
    CategoriesResponse, MessageResponse, NewProductForm, Product, ProductDetailsResponse,
    ProductsResponse, SearchQuery, SearchResponse, UpdateProductForm,
};
use crate::domain::ports::{ConfigProvider, ProductSource};
use crate::utils::error::{Result, ShopError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const API_BASE_PATH: &str = "/api/v1/product/";

/// Typed client for the product REST API. Read endpoints go through the
/// tag-indexed response cache; write endpoints invalidate the tags they
/// touch.
pub struct ProductClient {
    http: Client,
    base: Url,
    cache: QueryCache,
}

impl ProductClient {
    pub fn new(config: &dyn ConfigProvider) -> Result<Self> {
        let server = config.server_url().trim_end_matches('/');
        let base = Url::parse(&format!("{}{}", server, API_BASE_PATH))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            http,
            base,
            cache: QueryCache::new(config.cache_ttl_seconds()),
        })
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// URL of the search endpoint. `search` and `page` are always present;
    /// `price`, `sort` and `category` are appended only when set, in that
    /// order.
    pub fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = self.base.join("all")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("search", &query.search);
            pairs.append_pair("page", &query.page.to_string());
            if let Some(price) = query.price.filter(|price| *price > 0) {
                pairs.append_pair("price", &price.to_string());
            }
            if let Some(sort) = query.sort {
                pairs.append_pair("sort", sort.as_str());
            }
            if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
                pairs.append_pair("category", category);
            }
        }
        Ok(url)
    }

    pub async fn latest_products(&self) -> Result<Vec<Product>> {
        let url = self.base.join("latest")?;
        let response: ProductsResponse = self.get_cached(url, vec![Tag::ProductList]).await?;
        Ok(response.products)
    }

    pub async fn admin_products(&self, admin_id: &str) -> Result<Vec<Product>> {
        let mut url = self.base.join("admin-products")?;
        url.query_pairs_mut().append_pair("id", admin_id);
        let response: ProductsResponse = self.get_cached(url, vec![Tag::ProductList]).await?;
        Ok(response.products)
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        let url = self.base.join("categories")?;
        let response: CategoriesResponse = self.get_cached(url, vec![Tag::CategoryList]).await?;
        Ok(response.categories)
    }

    pub async fn search_products(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.search_url(query)?;
        self.get_cached(url, vec![Tag::ProductList]).await
    }

    pub async fn product_details(&self, product_id: &str) -> Result<Product> {
        let url = self.base.join(product_id)?;
        let response: ProductDetailsResponse = self
            .get_cached(url, vec![Tag::Product(product_id.to_string())])
            .await?;
        Ok(response.product)
    }

    pub async fn create_product(&self, admin_id: &str, form: &NewProductForm) -> Result<String> {
        let mut url = self.base.join("new")?;
        url.query_pairs_mut().append_pair("id", admin_id);

        let body = Form::new()
            .text("name", form.name.clone())
            .text("price", form.price.to_string())
            .text("stock", form.stock.to_string())
            .text("category", form.category.clone())
            .part("photo", photo_part(&form.photo).await?);

        tracing::debug!("POST {}", url);
        let response = self.http.post(url).multipart(body).send().await?;
        let payload: MessageResponse = decode(response).await?;

        self.cache.invalidate(&[Tag::ProductList, Tag::CategoryList]);
        Ok(payload.message)
    }

    pub async fn update_product(
        &self,
        admin_id: &str,
        product_id: &str,
        form: &UpdateProductForm,
    ) -> Result<String> {
        let mut url = self.base.join(product_id)?;
        url.query_pairs_mut().append_pair("id", admin_id);

        let mut body = Form::new();
        if let Some(name) = &form.name {
            body = body.text("name", name.clone());
        }
        if let Some(price) = form.price {
            body = body.text("price", price.to_string());
        }
        if let Some(stock) = form.stock {
            body = body.text("stock", stock.to_string());
        }
        if let Some(category) = &form.category {
            body = body.text("category", category.clone());
        }
        if let Some(photo) = &form.photo {
            body = body.part("photo", photo_part(photo).await?);
        }

        tracing::debug!("PUT {}", url);
        let response = self.http.put(url).multipart(body).send().await?;
        let payload: MessageResponse = decode(response).await?;

        self.cache.invalidate(&[
            Tag::Product(product_id.to_string()),
            Tag::ProductList,
            Tag::CategoryList,
        ]);
        Ok(payload.message)
    }

    pub async fn delete_product(&self, admin_id: &str, product_id: &str) -> Result<String> {
        let mut url = self.base.join(product_id)?;
        url.query_pairs_mut().append_pair("id", admin_id);

        tracing::debug!("DELETE {}", url);
        let response = self.http.delete(url).send().await?;
        let payload: MessageResponse = decode(response).await?;

        self.cache.invalidate(&[
            Tag::Product(product_id.to_string()),
            Tag::ProductList,
            Tag::CategoryList,
        ]);
        Ok(payload.message)
    }

    async fn get_cached<T>(&self, url: Url, tags: Vec<Tag>) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let key = url.to_string();
        if let Some(value) = self.cache.get(&key) {
            tracing::debug!("cache hit: {}", key);
            return Ok(serde_json::from_value(value)?);
        }

        tracing::debug!("GET {}", key);
        let response = self.http.get(url).send().await?;
        let payload: T = decode(response).await?;
        self.cache.insert(key, serde_json::to_value(&payload)?, tags);
        Ok(payload)
    }
}

#[async_trait]
impl ProductSource for ProductClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.search_products(query).await
    }

    async fn list_categories(&self) -> Result<Vec<String>> {
        self.categories().await
    }
}

/// Non-2xx responses carry a JSON body with a `message` field; fall back
/// to the HTTP status text when the body is not in that shape.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<MessageResponse>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    Err(ShopError::ApiError {
        status: status.as_u16(),
        message,
    })
}

async fn photo_part(path: &Path) -> Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("photo")
        .to_string();
    Ok(Part::bytes(bytes).file_name(file_name))
}
