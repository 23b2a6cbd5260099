use httpmock::prelude::*;
use shop_search::domain::model::{NewProductForm, SearchQuery, UpdateProductForm};
use shop_search::{CliConfig, ProductClient};
use tempfile::TempDir;

fn client_for(server: &MockServer) -> ProductClient {
    let config = CliConfig {
        server_url: Some(server.base_url()),
        search: String::new(),
        sort: None,
        max_price: None,
        category: None,
        page: 1,
        add: None,
        export: None,
        config: None,
        timeout_seconds: Some(5),
        cache_ttl_seconds: None,
        verbose: false,
    };
    ProductClient::new(&config).unwrap()
}

fn photo_in(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("shirt.jpg");
    std::fs::write(&path, b"not really a jpeg").unwrap();
    path
}

#[tokio::test]
async fn test_create_product_sends_multipart_form() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/product/new")
            .query_param("id", "admin1")
            .body_contains("Blue Shirt")
            .body_contains("clothing")
            .body_contains("shirt.jpg");
        then.status(201)
            .json_body(serde_json::json!({"message": "Product Created Successfully"}));
    });

    let temp_dir = TempDir::new().unwrap();
    let form = NewProductForm {
        name: "Blue Shirt".to_string(),
        price: 450,
        stock: 4,
        category: "clothing".to_string(),
        photo: photo_in(&temp_dir),
    };

    let client = client_for(&server);
    let message = client.create_product("admin1", &form).await.unwrap();
    assert_eq!(message, "Product Created Successfully");
    create_mock.assert();
}

#[tokio::test]
async fn test_update_sends_only_set_fields() {
    let server = MockServer::start();
    let update_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/v1/product/p9")
            .query_param("id", "admin1")
            .body_contains("price")
            .body_contains("99");
        then.status(200)
            .json_body(serde_json::json!({"message": "Product Updated Successfully"}));
    });

    let form = UpdateProductForm {
        price: Some(99),
        ..UpdateProductForm::default()
    };

    let client = client_for(&server);
    let message = client.update_product("admin1", "p9", &form).await.unwrap();
    assert_eq!(message, "Product Updated Successfully");
    update_mock.assert();
}

#[tokio::test]
async fn test_delete_product() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/v1/product/p9")
            .query_param("id", "admin1");
        then.status(200)
            .json_body(serde_json::json!({"message": "Product Deleted Successfully"}));
    });

    let client = client_for(&server);
    let message = client.delete_product("admin1", "p9").await.unwrap();
    assert_eq!(message, "Product Deleted Successfully");
    delete_mock.assert();
}

#[tokio::test]
async fn test_create_invalidates_cached_reads() {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/product/all");
        then.status(200)
            .json_body(serde_json::json!({"products": [], "totalPage": 1}));
    });
    let categories_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/product/categories");
        then.status(200)
            .json_body(serde_json::json!({"categories": ["clothing"]}));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/product/new");
        then.status(201)
            .json_body(serde_json::json!({"message": "Product Created Successfully"}));
    });

    let temp_dir = TempDir::new().unwrap();
    let client = client_for(&server);
    let query = SearchQuery::default();

    client.search_products(&query).await.unwrap();
    client.categories().await.unwrap();
    client.search_products(&query).await.unwrap();
    search_mock.assert_hits(1);
    categories_mock.assert_hits(1);

    let form = NewProductForm {
        name: "Hat".to_string(),
        price: 100,
        stock: 1,
        category: "accessories".to_string(),
        photo: photo_in(&temp_dir),
    };
    client.create_product("admin1", &form).await.unwrap();

    // a new product may change both the result lists and the category set
    client.search_products(&query).await.unwrap();
    client.categories().await.unwrap();
    search_mock.assert_hits(2);
    categories_mock.assert_hits(2);
}

#[tokio::test]
async fn test_admin_mutation_error_surfaces_server_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/v1/product/p9");
        then.status(401)
            .json_body(serde_json::json!({"message": "Only Admin Allowed"}));
    });

    let client = client_for(&server);
    let err = client.delete_product("user1", "p9").await.unwrap_err();
    assert_eq!(err.notification(), "Only Admin Allowed");
}
