//! Loaders shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use resource_loader::{LoadError, Loader};
use serde_json::Value;
use tokio::sync::Barrier;

/// Loader returning a document and counting invocations
pub struct CountingLoader {
    value: Value,
    calls: AtomicUsize,
}

impl CountingLoader {
    pub fn new(value: Value) -> Arc<Self> {
        Arc::new(Self {
            value,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Loader for CountingLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }
}

/// Loader that always fails
pub struct FailingLoader(pub &'static str);

#[async_trait]
impl Loader for FailingLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        Err(LoadError::Failed(self.0.to_string()))
    }
}

/// Loader that completes after a delay
pub struct DelayedLoader {
    pub delay: Duration,
    pub value: Value,
}

#[async_trait]
impl Loader for DelayedLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.value.clone())
    }
}

/// Loader that only completes once every sibling loader has started
pub struct BarrierLoader {
    pub barrier: Arc<Barrier>,
    pub value: Value,
}

#[async_trait]
impl Loader for BarrierLoader {
    async fn load(&self) -> Result<Value, LoadError> {
        self.barrier.wait().await;
        Ok(self.value.clone())
    }
}
