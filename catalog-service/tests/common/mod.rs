#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use catalog_service::domain::account::models::Account;
use catalog_service::domain::account::models::Username;
use catalog_service::domain::account::ports::AccountRepository;
use catalog_service::domain::account::service::AccountService;
use catalog_service::domain::errors::RepositoryError;
use catalog_service::domain::product::models::Product;
use catalog_service::domain::product::models::ProductId;
use catalog_service::domain::product::models::StoredProduct;
use catalog_service::domain::product::ports::ProductRepository;
use catalog_service::domain::product::service::ProductService;
use catalog_service::domain::profile::models::Profile;
use catalog_service::domain::profile::models::ProfileId;
use catalog_service::domain::profile::ports::ProfileRepository;
use catalog_service::domain::profile::service::ProfileService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Router wired to in-memory repositories and driven in-process.
pub struct TestApp {
    router: Router,
    pub authenticator: Arc<Authenticator>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
}

/// Status and decoded JSON body of a response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));
        let accounts = Arc::new(InMemoryAccountRepository::default());
        let products = Arc::new(InMemoryProductRepository::default());
        let profiles = Arc::new(InMemoryProfileRepository::default());

        let state = AppState {
            account_service: Arc::new(AccountService::new(
                Arc::clone(&accounts),
                Arc::clone(&authenticator),
                chrono::Duration::hours(1),
            )),
            product_service: Arc::new(ProductService::new(Arc::clone(&products))),
            profile_service: Arc::new(ProfileService::new(Arc::clone(&profiles))),
            authenticator: Arc::clone(&authenticator),
        };

        Self {
            router: create_router(state),
            authenticator,
            accounts,
            products,
            profiles,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn post_json(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, None, Some(body)).await
    }

    pub async fn put_json_authenticated(
        &self,
        path: &str,
        authorization: &str,
        body: Value,
    ) -> TestResponse {
        self.request(Method::PUT, path, Some(authorization), Some(body))
            .await
    }

    pub async fn delete_authenticated(&self, path: &str, authorization: &str) -> TestResponse {
        self.request(Method::DELETE, path, Some(authorization), None)
            .await
    }

    /// Register then log in, returning the `Authorization` header value.
    pub async fn login_as(&self, username: &str, role: &str) -> String {
        let password = "correct-horse-battery-staple";

        let registered = self
            .post_json(
                "/api/auth/register",
                serde_json::json!({"username": username, "password": password, "role": role}),
            )
            .await;
        assert_eq!(registered.status, StatusCode::OK);

        let login = self
            .post_json(
                "/api/auth/login",
                serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(login.status, StatusCode::OK);

        format!("Bearer {}", login.body["token"].as_str().expect("token"))
    }

    pub fn token(&self, account_id: &str, role: &str, ttl: chrono::Duration) -> String {
        self.authenticator
            .issue_token(account_id, role, ttl)
            .expect("Failed to issue token")
    }
}

pub fn widget() -> Product {
    Product {
        id: ProductId::from_string("p1"),
        name: "Widget".to_string(),
        price: 9.99,
        category: Some("tools".to_string()),
        in_stock: Some(true),
    }
}

#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<HashMap<String, Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.lock().unwrap();
        let key = account.username.to_string();

        if accounts.contains_key(&key) {
            return Err(RepositoryError::Duplicate(key));
        }

        accounts.insert(key, account.clone());
        Ok(account)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, RepositoryError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .get(username.as_str())
            .cloned())
    }
}

/// Product collection that can be told to fail saves or inserts.
///
/// Records are held under a storage key, normally their id. Every write is
/// appended to `operations` as `"<op>:<key>"`.
#[derive(Default)]
pub struct InMemoryProductRepository {
    records: Mutex<Vec<(ProductId, Product)>>,
    operations: Mutex<Vec<String>>,
    reject_saves: AtomicBool,
    reject_inserts: AtomicBool,
}

impl InMemoryProductRepository {
    pub fn seed(&self, product: Product) {
        self.seed_under(&product.id.as_str().to_owned(), product);
    }

    /// Store a product under a key that differs from its id.
    pub fn seed_under(&self, key: &str, product: Product) {
        self.records
            .lock()
            .unwrap()
            .push((ProductId::from_string(key), product));
    }

    /// First record whose product id matches.
    pub fn get(&self, id: &str) -> Option<Product> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(_, p)| p.id.as_str() == id)
            .map(|(_, p)| p.clone())
    }

    /// Every `(storage key, product)` pair.
    pub fn records(&self) -> Vec<(String, Product)> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|(key, p)| (key.to_string(), p.clone()))
            .collect()
    }

    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    pub fn reject_saves(&self) {
        self.reject_saves.store(true, Ordering::SeqCst);
    }

    pub fn reject_inserts(&self) {
        self.reject_inserts.store(true, Ordering::SeqCst);
    }

    fn record(&self, op: &str, key: &ProductId) {
        self.operations
            .lock()
            .unwrap()
            .push(format!("{}:{}", op, key));
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, p)| p.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.records().into_iter().map(|(_, p)| p).collect())
    }

    async fn list_stored(&self) -> Result<Vec<StoredProduct>, RepositoryError> {
        Ok(self
            .records()
            .into_iter()
            .map(|(key, product)| StoredProduct {
                key: ProductId::from_string(key),
                product,
            })
            .collect())
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, RepositoryError> {
        let needle = name.to_lowercase();

        Ok(self
            .records()
            .into_iter()
            .map(|(_, p)| p)
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect())
    }

    async fn save(&self, key: &ProductId, product: &Product) -> Result<(), RepositoryError> {
        self.record("save", key);

        if self.reject_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database("save rejected".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(RepositoryError::Missing(key.to_string())),
        }
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        self.record("insert", &product.id);

        if self.reject_inserts.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database("insert rejected".to_string()));
        }

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|(key, _)| key == &product.id) {
            return Err(RepositoryError::Duplicate(product.id.to_string()));
        }

        records.push((product.id.clone(), product.clone()));
        Ok(())
    }

    async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        self.record("delete", id);

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(key, _)| key != id);

        Ok(records.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<Profile>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), RepositoryError> {
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.id == id)
            .cloned())
    }

    async fn list_newest_first(&self) -> Result<Vec<Profile>, RepositoryError> {
        let mut profiles = self.profiles.lock().unwrap().clone();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }
}
