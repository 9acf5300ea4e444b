//! Explicitly wired application context. Components are shared by `Arc`;
//! there is no global registry.

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::features::products::ProductsClient;
use crate::navigation::{app_routes, Router};
use crate::session::{Bootstrapper, SessionClient, SessionStore};
use crate::transport::ApiClient;
use reqwest::cookie::Jar;
use std::sync::Arc;

pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<SessionStore>,
    pub api: ApiClient,
    pub router: Arc<Router>,
    pub session: Arc<SessionClient>,
    pub bootstrapper: Bootstrapper,
    pub products: ProductsClient,
}

impl AppContext {
    /// Builds the context with an empty cookie jar.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        Self::with_jar(config, Arc::new(Jar::default()))
    }

    /// Builds the context around an existing cookie jar, e.g. one that already
    /// holds a refresh cookie.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_jar(config: AppConfig, jar: Arc<Jar>) -> Result<Self, ApiError> {
        let store = Arc::new(SessionStore::new());
        let api = ApiClient::with_jar(&config, store.clone(), jar)?;
        let router = Arc::new(Router::new(store.clone(), app_routes()));
        let session = Arc::new(SessionClient::new(api.clone(), store.clone(), router.clone()));
        let bootstrapper = Bootstrapper::new(session.clone());
        let products = ProductsClient::new(api.clone());

        Ok(Self {
            config,
            store,
            api,
            router,
            session,
            bootstrapper,
            products,
        })
    }
}
