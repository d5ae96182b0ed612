//! Filter session implementation.

use crate::core::error::{SessionError, SessionId, SessionResult};
use crate::core::filter::FilterKind;
use crate::core::parameter::{ParameterKind, ParameterSet};
use crate::core::types::ImageValue;
use crate::filters::catalog::FilterCatalog;
use crate::filters::executor::{BuiltinExecutor, ImageOperationExecutor};
use crate::session::stats::SessionStats;
use std::time::Instant;

/// Current filter selection, parameters and images for one user session.
///
/// The derived image, when present, is always the current filter applied
/// with the current parameters to the current source image. Every mutation
/// invalidates it and recomputes before returning.
#[derive(Debug)]
pub struct FilterSession<E = BuiltinExecutor> {
    id: SessionId,
    catalog: FilterCatalog,
    executor: E,
    filter: FilterKind,
    parameters: ParameterSet,
    source: Option<ImageValue>,
    derived: Option<ImageValue>,
    stats: SessionStats,
}

impl FilterSession<BuiltinExecutor> {
    /// Session backed by the built-in CPU executor.
    pub fn builtin() -> Self {
        Self::new(BuiltinExecutor::new())
    }
}

impl<E: ImageOperationExecutor> FilterSession<E> {
    /// Create a session starting on the default filter (Sepia Tone).
    pub fn new(executor: E) -> Self {
        Self::with_initial_filter(executor, FilterKind::default())
    }

    /// Create a session starting on `kind`, with its default parameters.
    ///
    /// The catalog is derived from the executor's declared inputs.
    pub fn with_initial_filter(executor: E, kind: FilterKind) -> Self {
        let catalog = FilterCatalog::from_executor(&executor);
        Self::with_catalog(executor, catalog, kind)
    }

    /// Create a session with an explicit catalog.
    pub fn with_catalog(executor: E, catalog: FilterCatalog, kind: FilterKind) -> Self {
        let parameters = catalog.defaults_for(kind);
        let session = Self {
            id: SessionId::new(),
            catalog,
            executor,
            filter: kind,
            parameters,
            source: None,
            derived: None,
            stats: SessionStats::default(),
        };
        log::debug!("[{}] Session started with {}", session.id, kind);
        session
    }

    /// Replace the source image and recompute.
    pub fn set_source_image(&mut self, image: ImageValue) -> SessionResult<()> {
        log::debug!(
            "[{}] Source image set ({}x{})",
            self.id,
            image.width(),
            image.height()
        );
        self.source = Some(image);
        self.derived = None;
        self.recompute()
    }

    /// Switch to `kind`, reset parameters to its defaults and recompute.
    ///
    /// Values for parameters the new filter does not accept are discarded.
    pub fn select_filter(&mut self, kind: FilterKind) -> SessionResult<()> {
        self.filter = kind;
        self.parameters = self.catalog.defaults_for(kind);
        self.derived = None;
        log::debug!("[{}] Selected {} with {}", self.id, kind, self.parameters);
        self.recompute()
    }

    /// Set one parameter and recompute.
    ///
    /// Fails with [`SessionError::InvalidParameter`] without changing any
    /// state if the current filter does not accept `kind` or `value` is out
    /// of range.
    pub fn set_parameter(&mut self, kind: ParameterKind, value: f64) -> SessionResult<()> {
        if !self.catalog.accepts(self.filter, kind) {
            return Err(SessionError::InvalidParameter {
                filter: self.filter,
                parameter: kind,
                reason: format!("{} does not accept {}", self.filter, kind),
            });
        }

        kind.definition()
            .validate(value)
            .map_err(|reason| SessionError::InvalidParameter {
                filter: self.filter,
                parameter: kind,
                reason,
            })?;

        self.parameters.insert(kind, value);
        self.recompute()
    }

    /// Recompute the derived image from the current state.
    ///
    /// Without a source image this is a no-op. On executor failure the
    /// derived image is cleared and [`SessionError::ProcessingFailed`] is
    /// returned; the session stays usable.
    pub fn recompute(&mut self) -> SessionResult<()> {
        let Some(source) = &self.source else {
            self.derived = None;
            return Ok(());
        };

        let params = self
            .parameters
            .restricted_to(self.catalog.accepted_parameters(self.filter));

        let start = Instant::now();
        let result = self.executor.apply(self.filter, source, &params);
        let elapsed = start.elapsed();
        self.stats.record(elapsed, result.is_ok());

        match result {
            Ok(image) => {
                log::debug!(
                    "[{}] Applied {} with {} in {:?}",
                    self.id,
                    self.filter,
                    params,
                    elapsed
                );
                self.derived = Some(image);
                Ok(())
            }
            Err(error) => {
                log::warn!("[{}] {} failed: {}", self.id, self.filter, error);
                self.derived = None;
                Err(SessionError::ProcessingFailed {
                    filter: self.filter,
                    reason: error.to_string(),
                })
            }
        }
    }

    /// The derived image, if the last recompute succeeded.
    pub fn current_derived_image(&self) -> Option<&ImageValue> {
        self.derived.as_ref()
    }

    /// Hand the derived image to the caller, leaving none behind.
    pub fn take_derived_image(&mut self) -> Option<ImageValue> {
        self.derived.take()
    }

    /// The current source image.
    pub fn source_image(&self) -> Option<&ImageValue> {
        self.source.as_ref()
    }

    /// The currently selected filter.
    pub fn current_filter(&self) -> FilterKind {
        self.filter
    }

    /// Current parameter values (accepted parameters of the current filter).
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Current value of one parameter.
    pub fn parameter(&self, kind: ParameterKind) -> Option<f64> {
        self.parameters.get(kind)
    }

    /// The catalog this session validates against.
    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    /// The executor this session runs filters with.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Recompute statistics.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}

impl<E> Drop for FilterSession<E> {
    fn drop(&mut self) {
        log::debug!("[{}] Session ended after {} recomputes", self.id, self.stats.recomputes);
    }
}
