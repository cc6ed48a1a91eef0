//! Conversion workflow - resolution and submission
//!
//! The two workflow components, composed linearly: the [`TopologyResolver`]
//! translates inventory paths into object references, then the
//! [`StretchConverter`] validates the resolved topology and submits it to the
//! management plane exactly once.

pub mod converter;
pub mod resolver;

pub use converter::{ConversionRequest, StretchConverter};
pub use resolver::{ResolvedTopology, TopologyPaths, TopologyResolver};

use crate::error::{Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Await a remote call, aborting it if the caller cancels first.
pub(crate) async fn with_cancel<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    if cancel.is_cancelled() {
        return Err(Error::Cancelled);
    }

    tokio::select! {
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = call => result,
    }
}
