//! URL construction for the backend routes the checks hit
//!
//! Every URL is derived from the configured base by appending path segments,
//! so a base with its own path prefix (e.g. behind a reverse proxy) keeps it.

use crate::config::{API_PREFIX, ProbeConfig};
use crate::error::{ProbeError, Result};
use url::Url;

/// Resolved URLs for one harness run
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Interactive API docs, used as the connectivity probe
    pub docs: Url,
    /// API root (`/api/`, trailing slash included)
    pub api_root: Url,
    /// Status-record collection (`/api/status`)
    pub status: Url,
    /// Endpoint-coverage targets as (declared path, resolved URL)
    pub coverage: Vec<(String, Url)>,
}

impl Endpoints {
    /// Resolves every route against `config.base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::CannotBeABase`] if the base URL cannot carry
    /// path segments.
    pub fn resolve(config: &ProbeConfig) -> Result<Self> {
        let base = &config.base_url;

        let coverage = config
            .expected_endpoints
            .iter()
            .map(|path| {
                let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
                join_segments(base, &segments).map(|url| (path.clone(), url))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            docs: join_segments(base, &["docs"])?,
            api_root: join_segments(base, &[API_PREFIX, ""])?,
            status: join_segments(base, &[API_PREFIX, "status"])?,
            coverage,
        })
    }
}

/// Appends `segments` to the path of `base`
///
/// Segments are percent-encoded, so a segment can never climb out of the
/// base path. An empty trailing segment produces a trailing slash.
pub fn join_segments(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ProbeError::CannotBeABase { url: base.clone() })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
