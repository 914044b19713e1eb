use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use lru::LruCache;
use prompt_core::{GenerationOptions, Provider, ProviderClient};
use tokio::sync::Mutex;
use tokio::time::Duration;

use crate::rate_limit::RateLimiter;

/// Text generation backend used by the service.
#[async_trait]
pub trait Generator: Send + Sync {
    fn provider(&self) -> Provider;
    async fn generate(&self, model: &str, prompt: &str, options: &GenerationOptions) -> Result<String>;
    async fn list_models(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl Generator for ProviderClient {
    fn provider(&self) -> Provider {
        ProviderClient::provider(self)
    }

    async fn generate(&self, model: &str, prompt: &str, options: &GenerationOptions) -> Result<String> {
        self.query(model, prompt, options).await
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        ProviderClient::list_models(self).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    prompt: String,
    model: String,
}

/// Generation with a bounded per-(prompt, model) cache and a rate limit on
/// the provider calls that miss it.
pub struct GenerationService {
    generator: Arc<dyn Generator>,
    default_model: String,
    cache: Mutex<LruCache<CacheKey, String>>,
    limiter: RateLimiter,
}

impl GenerationService {
    /// `cache_capacity` of zero is treated as one.
    pub fn new(
        generator: Arc<dyn Generator>,
        default_model: impl Into<String>,
        rate_limit: Duration,
        cache_capacity: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            generator,
            default_model: default_model.into(),
            cache: Mutex::new(LruCache::new(capacity)),
            limiter: RateLimiter::new(rate_limit),
        }
    }

    pub fn provider(&self) -> Provider {
        self.generator.provider()
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
        options: &GenerationOptions,
    ) -> Result<String> {
        let key = CacheKey {
            prompt: prompt.to_string(),
            model: model.unwrap_or(&self.default_model).to_string(),
        };

        if let Some(cached) = self.cache.lock().await.get(&key) {
            tracing::debug!(model = %key.model, "cache hit");
            return Ok(cached.clone());
        }

        // Only provider calls are rate limited; cache hits returned above.
        self.limiter.acquire().await;
        let text = self.generator.generate(&key.model, prompt, options).await?;

        self.cache.lock().await.put(key, text.clone());
        Ok(text)
    }

    pub async fn list_models(&self) -> Result<Vec<String>> {
        self.generator.list_models().await
    }
}
