//! Correlation identifier carried by every request.
//!
//! The middleware opens a scope per request; error constructors and log
//! spans read the identifier back with [`TraceId::current`]. Task-locals do
//! not follow `spawn_blocking`, so blocking work is wrapped with
//! [`TraceId::propagate_blocking`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    pub(crate) static TRACE_ID: TraceId;
}

/// UUID identifying one request across logs, errors and the `trace-id`
/// response header.
///
/// # Examples
/// ```
/// use coupon_backend::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "redeeming coupon");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller-supplied identifier, such as one set by a kiosk
    /// front-end. Anything but a non-nil UUID is ignored.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim())
            .ok()
            .filter(|uuid| !uuid.is_nil())
            .map(Self)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    ///
    /// # Examples
    /// ```
    /// use coupon_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// Capture the current identifier so a blocking closure sees it too.
    pub fn propagate_blocking<F, R>(f: F) -> impl FnOnce() -> R + Send + 'static
    where
        F: FnOnce() -> R + Send + 'static,
    {
        let current = Self::current();
        move || match current {
            Some(id) => TRACE_ID.sync_scope(id, f),
            None => f(),
        }
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
