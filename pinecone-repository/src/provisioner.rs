//! Client provisioning.
//!
//! `ClientProvisioner` builds the vector index client at most once and makes
//! sure the configured index exists before handing the client out.
//!
//! # Initialization sequence
//!
//! 1. Build the client from the configuration (no network I/O).
//! 2. List the existing indexes.
//! 3. If the configured index is missing, create it with the fixed dimension
//!    and metric, then wait for `init_timeout`.
//! 4. Cache and return the client.
//!
//! The wait in step 3 is blind: readiness is never checked, the index is
//! assumed usable once the timeout has elapsed.
//!
//! # Concurrency
//!
//! The cached client lives in a `tokio::sync::OnceCell`. Callers arriving while
//! an initialization is in flight wait for it instead of starting their own,
//! so at most one listing/creation sequence runs at a time. A failed attempt
//! caches nothing and the next caller starts over.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::config::PineconeConfig;
use crate::errors::{ProvisionError, VectorIndexError};
use crate::interfaces::VectorIndexProvider;
use crate::pinecone::{index_request, PineconeProvider};
use crate::types::IndexList;

type ClientFactory<P> =
    Box<dyn Fn(&PineconeConfig) -> Result<P, VectorIndexError> + Send + Sync + 'static>;

/// Builds and memoizes a vector index client.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use pinecone_repository::{ClientProvisioner, PineconeConfig, VectorIndexProvider};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PineconeConfig::new("pk-...", "documents", Duration::from_secs(60));
/// let provisioner = ClientProvisioner::pinecone(config);
///
/// // The first call lists (and maybe creates) the index, later calls are free.
/// let client = provisioner.get_client().await?;
/// let again = provisioner.get_client().await?;
/// assert!(std::sync::Arc::ptr_eq(&client, &again));
/// # Ok(())
/// # }
/// ```
pub struct ClientProvisioner<P> {
    config: PineconeConfig,
    factory: ClientFactory<P>,
    client: OnceCell<Arc<P>>,
}

impl ClientProvisioner<PineconeProvider> {
    /// Create a provisioner that hands out `PineconeProvider` clients.
    pub fn pinecone(config: PineconeConfig) -> Self {
        Self::new(config, PineconeProvider::new)
    }
}

impl<P: VectorIndexProvider> ClientProvisioner<P> {
    /// Create a provisioner with a custom client factory.
    ///
    /// # Arguments
    ///
    /// * `config` - Credential, index name and post-creation wait
    /// * `factory` - Builds a client from the configuration; must not do network I/O
    pub fn new<F>(config: PineconeConfig, factory: F) -> Self
    where
        F: Fn(&PineconeConfig) -> Result<P, VectorIndexError> + Send + Sync + 'static,
    {
        Self {
            config,
            factory: Box::new(factory),
            client: OnceCell::new(),
        }
    }

    /// The configuration this provisioner was built with.
    pub fn config(&self) -> &PineconeConfig {
        &self.config
    }

    /// Whether a client has been provisioned and cached.
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    /// Return the cached client, provisioning it first if needed.
    ///
    /// Once this has succeeded, every later call returns the same instance
    /// without contacting the service.
    ///
    /// # Returns
    ///
    /// * `Ok(Arc<P>)` - The ready client
    /// * `Err(ProvisionError)` - If initialization failed; nothing is cached
    pub async fn get_client(&self) -> Result<Arc<P>, ProvisionError> {
        self.client
            .get_or_try_init(|| self.init_client())
            .await
            .map(Arc::clone)
    }

    /// Run the initialization sequence without touching the cache.
    pub async fn init_client(&self) -> Result<Arc<P>, ProvisionError> {
        let client = (self.factory)(&self.config).map_err(|e| {
            error!(error = %e, "Failed to initialize Pinecone client");
            ProvisionError::init(e)
        })?;

        let index_name = &self.config.index_name;
        let existing = fetch_existing_indexes(&client).await?;

        if existing.contains(index_name) {
            info!(index_name = %index_name, "Index already exists");
        } else {
            self.create_index(&client).await?;
        }

        Ok(Arc::new(client))
    }

    async fn create_index(&self, client: &P) -> Result<(), ProvisionError> {
        let index_name = &self.config.index_name;
        let request = index_request(index_name.as_str());

        client.create_index(&request).await.map_err(|e| {
            error!(index_name = %index_name, error = %e, "Index creation failed");
            ProvisionError::create_index(index_name.as_str(), e)
        })?;

        info!(
            index_name = %index_name,
            timeout_secs = self.config.init_timeout.as_secs_f64(),
            "Waiting for index initialization to complete"
        );
        tokio::time::sleep(self.config.init_timeout).await;
        info!(index_name = %index_name, "Index created");

        Ok(())
    }
}

async fn fetch_existing_indexes<P: VectorIndexProvider>(
    client: &P,
) -> Result<IndexList, ProvisionError> {
    client.list_indexes().await.map_err(|e| {
        error!(error = %e, "Failed to fetch existing indexes");
        ProvisionError::list_indexes(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProvisionErrorKind;
    use crate::types::CreateIndexRequest;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Mutex;
    use tokio::time::Instant;

    const LIST_LATENCY: Duration = Duration::from_millis(50);

    /// Call log shared by every mock client built by one factory.
    #[derive(Debug, Default)]
    struct MockState {
        calls: Mutex<Vec<&'static str>>,
        create_requests: Mutex<Vec<CreateIndexRequest>>,
        created_at: Mutex<Option<Instant>>,
        factory_calls: AtomicUsize,
        list_failures: AtomicUsize,
        fail_create: AtomicBool,
    }

    impl MockState {
        async fn count(&self, call: &str) -> usize {
            self.calls.lock().await.iter().filter(|c| **c == call).count()
        }
    }

    /// Mock provider for testing
    #[derive(Debug)]
    struct MockProvider {
        existing: Vec<String>,
        state: Arc<MockState>,
    }

    #[async_trait]
    impl VectorIndexProvider for MockProvider {
        async fn list_indexes(&self) -> Result<IndexList, VectorIndexError> {
            self.state.calls.lock().await.push("list");
            tokio::time::sleep(LIST_LATENCY).await;

            let remaining = self.state.list_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.state.list_failures.store(remaining - 1, Ordering::SeqCst);
                return Err(VectorIndexError::connection("Mock network failure"));
            }
            Ok(IndexList::from_names(self.existing.iter().cloned()))
        }

        async fn create_index(&self, request: &CreateIndexRequest) -> Result<(), VectorIndexError> {
            self.state.calls.lock().await.push("create");
            self.state.create_requests.lock().await.push(request.clone());

            if self.state.fail_create.load(Ordering::SeqCst) {
                return Err(VectorIndexError::api(500, "Mock failure"));
            }
            *self.state.created_at.lock().await = Some(Instant::now());
            Ok(())
        }
    }

    fn test_config(index_name: &str, timeout_secs: u64) -> PineconeConfig {
        PineconeConfig::new("pk-test", index_name, Duration::from_secs(timeout_secs))
    }

    fn mock_provisioner(
        config: PineconeConfig,
        existing: &[&str],
    ) -> (ClientProvisioner<MockProvider>, Arc<MockState>) {
        let state = Arc::new(MockState::default());
        let existing: Vec<String> = existing.iter().map(|s| s.to_string()).collect();
        let factory_state = state.clone();

        let provisioner = ClientProvisioner::new(config, move |_config: &PineconeConfig| {
            factory_state.factory_calls.fetch_add(1, Ordering::SeqCst);
            Ok(MockProvider {
                existing: existing.clone(),
                state: factory_state.clone(),
            })
        });

        (provisioner, state)
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_client_memoizes_the_handle() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["bar"]);

        let first = provisioner.get_client().await.unwrap();
        let second = provisioner.get_client().await.unwrap();
        let third = provisioner.get_client().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &third));
        assert!(provisioner.is_initialized());
        assert_eq!(state.factory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.count("list").await, 1);
        assert_eq!(state.count("create").await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_existing_index_is_not_created() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["bar"]);
        let started = Instant::now();

        provisioner.get_client().await.unwrap();

        assert_eq!(*state.calls.lock().await, vec!["list"]);
        assert!(state.create_requests.lock().await.is_empty());
        // Only the listing latency, no post-creation wait.
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_index_is_created_and_waited_for() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["foo"]);

        provisioner.get_client().await.unwrap();
        let returned_at = Instant::now();

        let requests = state.create_requests.lock().await.clone();
        assert_eq!(
            requests,
            vec![CreateIndexRequest {
                name: "bar".to_string(),
                dimension: 1536,
                metric: crate::types::Metric::Cosine,
                spec: None,
            }]
        );

        let created_at =
            (*state.created_at.lock().await).expect("create should have resolved");
        assert!(returned_at.duration_since(created_at) >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_without_indexes_creates_the_index() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 1), &[]);

        provisioner.get_client().await.unwrap();

        assert_eq!(state.count("create").await, 1);
        assert_eq!(state.create_requests.lock().await[0].name, "bar");
    }

    #[tokio::test(start_paused = true)]
    async fn test_creation_path_makes_no_readiness_calls() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 1), &["foo"]);

        provisioner.get_client().await.unwrap();

        assert_eq!(state.factory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*state.calls.lock().await, vec!["list", "create"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_failure_is_not_cached() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["foo"]);
        state.list_failures.store(1, Ordering::SeqCst);

        let err = provisioner.get_client().await.unwrap_err();

        assert_eq!(err.kind(), ProvisionErrorKind::List);
        assert_eq!(err.to_string(), "Failed to fetch existing indexes");
        assert_eq!(
            err.backend_error(),
            Some(&VectorIndexError::connection("Mock network failure"))
        );
        assert_eq!(state.count("create").await, 0);
        assert!(!provisioner.is_initialized());

        // The next call starts over from the listing.
        provisioner.get_client().await.unwrap();
        assert_eq!(state.count("list").await, 2);
        assert_eq!(state.factory_calls.load(Ordering::SeqCst), 2);
        assert!(provisioner.is_initialized());
    }

    #[tokio::test(start_paused = true)]
    async fn test_creation_failure_is_not_cached() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["foo"]);
        state.fail_create.store(true, Ordering::SeqCst);
        let started = Instant::now();

        let err = provisioner.get_client().await.unwrap_err();

        assert_eq!(err.kind(), ProvisionErrorKind::Create);
        assert_eq!(err.to_string(), "Index creation failed");
        assert!(matches!(err, ProvisionError::CreateIndex { ref name, .. } if name == "bar"));
        assert_eq!(err.backend_error().and_then(|e| e.status()), Some(500));
        assert!(!provisioner.is_initialized());
        assert!(started.elapsed() < Duration::from_secs(5));

        state.fail_create.store(false, Ordering::SeqCst);
        provisioner.get_client().await.unwrap();
        assert_eq!(state.count("create").await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_factory_failure_is_an_init_error() {
        let provisioner: ClientProvisioner<MockProvider> =
            ClientProvisioner::new(test_config("bar", 5), |_config: &PineconeConfig| {
                Err(VectorIndexError::config("bad key"))
            });

        let err = provisioner.get_client().await.unwrap_err();

        assert_eq!(err.kind(), ProvisionErrorKind::Init);
        assert_eq!(err.to_string(), "Failed to initialize Pinecone client");
        assert!(!provisioner.is_initialized());
    }

    #[tokio::test(start_paused = true)]
    async fn test_init_client_bypasses_the_cache() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["bar"]);

        let a = provisioner.init_client().await.unwrap();
        let b = provisioner.init_client().await.unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        assert!(!provisioner.is_initialized());
        assert_eq!(state.count("list").await, 2);
    }

    /// Concurrent first callers share a single in-flight initialization
    /// instead of each listing (and possibly creating) the index.
    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_initialization() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["foo"]);

        let (a, b, c) = tokio::join!(
            provisioner.get_client(),
            provisioner.get_client(),
            provisioner.get_client()
        );
        let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());

        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));
        assert_eq!(state.factory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.count("list").await, 1);
        assert_eq!(state.count("create").await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_waiter_retries_after_failed_attempt() {
        let (provisioner, state) = mock_provisioner(test_config("bar", 5), &["bar"]);
        state.list_failures.store(1, Ordering::SeqCst);

        let (a, b) = tokio::join!(provisioner.get_client(), provisioner.get_client());

        // One caller sees the listing failure, the other runs a fresh attempt.
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(state.count("list").await, 2);
        assert!(provisioner.is_initialized());
    }
}
