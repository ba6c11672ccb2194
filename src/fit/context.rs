//! Session-scoped estimator state.
//!
//! The context owns everything an estimate needs that outlives one request:
//! the catalog, the historical records, the training knobs, and the trained
//! regressor. Training is lazy. The first caller that needs a prediction
//! trains while holding the lock; concurrent callers wait and then share the
//! same fitted model, so a session never trains twice by accident.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::data::{DataSource, MaterialCatalog, build_training_set, training_rng};
use crate::domain::{HistoricalProject, TrainingConfig};
use crate::error::AppError;
use crate::models::{Regressor, TrainingReport, build_regressor};

/// Builds an untrained regressor for a training config.
pub type RegressorFactory = Arc<dyn Fn(&TrainingConfig) -> Box<dyn Regressor> + Send + Sync>;

/// Outcome of the most recent training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSummary {
    pub historical: usize,
    pub synthetic: usize,
    pub report: TrainingReport,
}

struct Trained {
    model: Arc<dyn Regressor>,
    summary: TrainingSummary,
}

pub struct EstimatorContext {
    catalog: MaterialCatalog,
    history: Vec<HistoricalProject>,
    config: TrainingConfig,
    factory: RegressorFactory,
    trained: Mutex<Option<Trained>>,
    training_runs: AtomicUsize,
}

impl EstimatorContext {
    pub fn new(
        catalog: MaterialCatalog,
        history: Vec<HistoricalProject>,
        config: TrainingConfig,
    ) -> Self {
        Self::with_factory(catalog, history, config, Arc::new(build_regressor))
    }

    /// Use a custom regression strategy instead of the one named in `config`.
    pub fn with_factory(
        catalog: MaterialCatalog,
        history: Vec<HistoricalProject>,
        config: TrainingConfig,
        factory: RegressorFactory,
    ) -> Self {
        Self {
            catalog,
            history,
            config,
            factory,
            trained: Mutex::new(None),
            training_runs: AtomicUsize::new(0),
        }
    }

    /// Pull catalog and history once from the web layer's data.
    pub fn from_source(source: &dyn DataSource, config: TrainingConfig) -> Result<Self, AppError> {
        let catalog = MaterialCatalog::new(source.materials()?);
        let history = source.historical_projects()?;
        info!(
            materials = catalog.len(),
            projects = history.len(),
            "estimator context ready"
        );
        Ok(Self::new(catalog, history, config))
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &[HistoricalProject] {
        &self.history
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The trained regressor, training it first if this session has not yet.
    pub fn regressor(&self) -> Result<Arc<dyn Regressor>, AppError> {
        let mut guard = self.lock();
        if let Some(trained) = guard.as_ref() {
            return Ok(Arc::clone(&trained.model));
        }
        let trained = self.train()?;
        let model = Arc::clone(&trained.model);
        *guard = Some(trained);
        Ok(model)
    }

    /// Train a fresh model and replace the current one.
    ///
    /// On failure the previous model (if any) is dropped as well, so no
    /// prediction is served from a stale fit.
    pub fn retrain(&self) -> Result<TrainingSummary, AppError> {
        let mut guard = self.lock();
        *guard = None;
        let trained = self.train()?;
        let summary = trained.summary;
        *guard = Some(trained);
        Ok(summary)
    }

    pub fn is_trained(&self) -> bool {
        self.lock().is_some()
    }

    pub fn training_summary(&self) -> Option<TrainingSummary> {
        self.lock().as_ref().map(|t| t.summary)
    }

    /// Number of training runs started by this context.
    pub fn training_runs(&self) -> usize {
        self.training_runs.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Trained>> {
        self.trained.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Caller must hold the lock.
    fn train(&self) -> Result<Trained, AppError> {
        self.training_runs.fetch_add(1, Ordering::SeqCst);

        let mut rng = training_rng(self.config.seed);
        let set = build_training_set(&self.history, self.config.synthetic_count, &mut rng);
        info!(
            historical = set.historical,
            synthetic = set.synthetic,
            "built training set"
        );

        let mut model = (self.factory)(&self.config);
        let report = model.train(&set.examples)?;

        Ok(Trained {
            model: Arc::from(model),
            summary: TrainingSummary {
                historical: set.historical,
                synthetic: set.synthetic,
                report,
            },
        })
    }
}
