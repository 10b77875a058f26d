//! Core trait for graph database backends.

use async_trait::async_trait;

use crate::config::DatabaseType;
use crate::error::AppError;

/// Capability interface implemented once per backend.
///
/// A backend is constructed by its own `connect` function and is already
/// connected by the time it is handed out; this trait covers everything the
/// server needs afterwards. Backends are selected by the
/// [`GraphDriver`](crate::graph::GraphDriver) enum tag, so the trait does not
/// need to be object safe.
#[async_trait]
pub trait GraphBackend: Send + Sync {
    /// Which backend variant this driver talks to.
    fn provider(&self) -> DatabaseType;

    /// One lightweight round-trip to confirm the store is reachable.
    ///
    /// Used once at startup by the initialization routine and again on
    /// demand by the status surface.
    async fn health_check(&self) -> Result<(), AppError>;

    /// Wipes all graph data in the configured database.
    ///
    /// Backing stores and schemas survive; only the graph content goes.
    async fn clear(&self) -> Result<(), AppError>;
}
