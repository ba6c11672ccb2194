//! Training set construction: parsed history plus synthetic projects.
//!
//! Historical records only carry free text, so each one contributes a
//! low-information example (placeholder floors/quality/material count) that
//! anchors the regression near realistic totals. The bulk of the signal comes
//! from synthetic projects priced by a fixed multiplicative rule.

use std::sync::LazyLock;

use rand::prelude::*;
use rand::rngs::StdRng;
use regex::Regex;

use crate::domain::{HistoricalProject, TrainingExample};

/// Area assumed when a summary carries no number.
pub const FALLBACK_AREA: f64 = 1000.0;
/// Budget assumed when no `₹NL` figure is present.
pub const FALLBACK_BUDGET: f64 = 500_000.0;
/// One lakh in rupees.
pub const LAKH: f64 = 100_000.0;

/// Placeholder features for historical records: floors, quality index, material count.
const HISTORY_FLOORS: f64 = 2.0;
const HISTORY_QUALITY: f64 = 2.0;
const HISTORY_MATERIALS: f64 = 5.0;

/// Cost step per quality index in the synthetic pricing rule.
pub const QUALITY_STEP: f64 = 0.2;

static FIRST_INTEGER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[0-9]+").ok());
static BUDGET_LAKHS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"₹([0-9]+)L").ok());

/// A training batch and where its rows came from.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub examples: Vec<TrainingExample>,
    pub historical: usize,
    pub synthetic: usize,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// RNG for one training run: seeded runs are reproducible, unseeded ones are not.
pub fn training_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Build the full training batch: one example per historical project followed
/// by `synthetic_count` generated ones.
pub fn build_training_set<R: Rng>(
    projects: &[HistoricalProject],
    synthetic_count: usize,
    rng: &mut R,
) -> TrainingSet {
    let mut examples = historical_examples(projects);
    let historical = examples.len();
    examples.extend(synthetic_examples(synthetic_count, rng));

    TrainingSet {
        synthetic: examples.len() - historical,
        historical,
        examples,
    }
}

pub fn historical_examples(projects: &[HistoricalProject]) -> Vec<TrainingExample> {
    projects
        .iter()
        .map(|p| TrainingExample {
            features: [
                area_from_summary(&p.summary),
                HISTORY_FLOORS,
                HISTORY_QUALITY,
                HISTORY_MATERIALS,
            ],
            target: budget_from_text(&p.budget),
        })
        .collect()
}

pub fn synthetic_examples<R: Rng>(count: usize, rng: &mut R) -> Vec<TrainingExample> {
    (0..count)
        .map(|_| {
            let area = rng.gen_range(500.0..5500.0);
            let floors = f64::from(rng.gen_range(1u32..=4));
            let quality = f64::from(rng.gen_range(0u32..=3));
            let materials = f64::from(rng.gen_range(5u32..15));
            TrainingExample {
                features: [area, floors, quality, materials],
                target: synthetic_target(area, floors, quality, materials),
            }
        })
        .collect()
}

/// Pricing rule for synthetic projects.
pub fn synthetic_target(area: f64, floors: f64, quality: f64, materials: f64) -> f64 {
    let mut cost = area * 1200.0;
    cost *= 1.0 + floors * 0.3;
    cost *= quality_factor(quality);
    cost *= 1.0 + materials * 0.05;
    cost
}

/// Multiplier the synthetic rule applies for a quality index.
pub fn quality_factor(quality: f64) -> f64 {
    1.0 + quality * QUALITY_STEP
}

/// First run of digits in the summary, or the fallback area.
pub fn area_from_summary(summary: &str) -> f64 {
    FIRST_INTEGER
        .as_ref()
        .and_then(|re| re.find(summary))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(|v| v as f64)
        .unwrap_or(FALLBACK_AREA)
}

/// `₹NL` budget in rupees, or the fallback budget.
pub fn budget_from_text(budget: &str) -> f64 {
    BUDGET_LAKHS
        .as_ref()
        .and_then(|re| re.captures(budget))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .map(|lakhs| lakhs as f64 * LAKH)
        .unwrap_or(FALLBACK_BUDGET)
}
