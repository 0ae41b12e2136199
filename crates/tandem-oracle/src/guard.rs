//! Concurrency bound and timeout enforcement around any gateway.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::OracleError;
use crate::record::OracleRecord;
use crate::{OracleGateway, OracleRequest};

/// Wraps a gateway so that at most `max_in_flight` queries run at once and
/// each query is cut off at its request timeout.
///
/// The permit is held only while the wrapped query runs.
pub struct GuardedGateway<G> {
    inner: G,
    permits: Arc<Semaphore>,
}

impl<G> GuardedGateway<G> {
    /// A bound of zero is treated as one.
    #[must_use]
    pub fn new(inner: G, max_in_flight: usize) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
        }
    }

    /// Permits currently free.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    #[must_use]
    pub const fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: OracleGateway> OracleGateway for GuardedGateway<G> {
    async fn query(&self, request: &OracleRequest) -> Result<Vec<OracleRecord>, OracleError> {
        let Ok(_permit) = self.permits.acquire().await else {
            return Err(OracleError::Malformed("gateway permits closed".to_string()));
        };
        match tokio::time::timeout(request.timeout, self.inner.query(request)).await {
            Ok(result) => result,
            Err(_) => Err(OracleError::Timeout(request.timeout)),
        }
    }
}
