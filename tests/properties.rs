use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use proptest::prelude::*;

use buildcost::data::{DataSource, FileSource, MaterialCatalog};
use buildcost::domain::{Features, ProjectRequest, QualityTier, RegressorKind, TrainingConfig, TrainingExample};
use buildcost::error::AppError;
use buildcost::estimate::estimate;
use buildcost::fit::EstimatorContext;
use buildcost::models::{Regressor, TrainingReport};
use buildcost::rules::base_cost;

/// Always predicts zero, so the rule-based breakdown decides the total.
struct Zero;

impl Regressor for Zero {
    fn kind(&self) -> RegressorKind {
        RegressorKind::Linear
    }

    fn train(&mut self, examples: &[TrainingExample]) -> Result<TrainingReport, AppError> {
        Ok(TrainingReport {
            samples: examples.len(),
            rmse: 0.0,
        })
    }

    fn predict(&self, _features: &Features) -> Result<f64, AppError> {
        Ok(0.0)
    }
}

fn source() -> FileSource {
    FileSource::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

static LINEAR: LazyLock<EstimatorContext> = LazyLock::new(|| {
    let config = TrainingConfig {
        regressor: RegressorKind::Linear,
        seed: Some(11),
        ..TrainingConfig::default()
    };
    EstimatorContext::from_source(&source(), config).unwrap()
});

static RULES_ONLY: LazyLock<EstimatorContext> = LazyLock::new(|| {
    let src = source();
    EstimatorContext::with_factory(
        MaterialCatalog::new(src.materials().unwrap()),
        src.historical_projects().unwrap(),
        TrainingConfig::default(),
        Arc::new(|_: &TrainingConfig| -> Box<dyn Regressor> { Box::new(Zero) }),
    )
});

/// The shipped default strategy under a few fixed seeds.
static DEFAULT_MLP: LazyLock<Vec<EstimatorContext>> = LazyLock::new(|| {
    [1, 3, 42]
        .into_iter()
        .map(|seed| {
            let config = TrainingConfig {
                seed: Some(seed),
                ..TrainingConfig::default()
            };
            EstimatorContext::from_source(&source(), config).unwrap()
        })
        .collect()
});

fn totals_by_quality(ctx: &EstimatorContext, area: f64, floors: i64, materials: &[i64]) -> Vec<f64> {
    QualityTier::ALL
        .iter()
        .map(|q| {
            estimate(ctx, &request(area, floors, q.label(), materials.to_vec()))
                .unwrap()
                .total_cost
        })
        .collect()
}

#[test]
fn default_strategy_is_the_mlp() {
    assert_eq!(TrainingConfig::default().regressor, RegressorKind::Mlp);
}

#[test]
fn default_mlp_orders_large_single_material_builds_by_quality() {
    for (ctx, seed) in DEFAULT_MLP.iter().zip([1, 3, 42]) {
        for area in [5000.0, 9500.0] {
            let totals = totals_by_quality(ctx, area, 1, &[1]);
            assert!(
                totals.windows(2).all(|w| w[0] < w[1]),
                "seed {seed} area {area}: {totals:?}"
            );
        }
    }
}

fn quality_label() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["basic", "standard", "premium", "luxury"])
}

fn request(area: f64, floors: i64, quality: &str, materials: Vec<i64>) -> ProjectRequest {
    ProjectRequest {
        project_type: "residential".to_string(),
        area,
        floors,
        quality: quality.to_string(),
        selected_materials: materials,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn range_brackets_the_total(
        area in 100.0f64..=10_000.0,
        floors in 1i64..=6,
        quality in quality_label(),
        materials in prop::collection::vec(1i64..=12, 1..6),
    ) {
        let result = estimate(&LINEAR, &request(area, floors, quality, materials)).unwrap();
        prop_assert!(result.total_cost > 0.0);
        prop_assert!((result.range_low - 0.9 * result.total_cost).abs() <= 1e-6 * result.total_cost);
        prop_assert!((result.range_high - 1.1 * result.total_cost).abs() <= 1e-6 * result.total_cost);
        prop_assert!(result.range_low < result.total_cost && result.total_cost < result.range_high);
        prop_assert!(result.total_cost >= result.breakdown_total);
        prop_assert!(result.recommendations.len() >= 2);
    }

    #[test]
    fn base_weights_split_the_base_cost(
        area in 100.0f64..=10_000.0,
        floors in 1i64..=6,
        quality in quality_label(),
        materials in prop::collection::vec(1i64..=12, 1..6),
    ) {
        let result = estimate(&RULES_ONLY, &request(area, floors, quality, materials)).unwrap();
        let tier: QualityTier = quality.parse().unwrap();
        let base = base_cost(area, floors as u32, tier);
        let b = result.breakdown;
        prop_assert!((b.base_total() - base).abs() <= 1e-6 * base);
        prop_assert!((b.labor - 0.25 * base).abs() <= 1e-6 * base);
        prop_assert!((b.structure - 0.35 * base).abs() <= 1e-6 * base);
        prop_assert!((result.breakdown_total - (b.materials + base)).abs() <= 1e-6 * result.breakdown_total);
    }

    #[test]
    fn better_quality_costs_more(
        area in 100.0f64..=10_000.0,
        floors in 1i64..=6,
        materials in prop::collection::vec(1i64..=12, 1..6),
    ) {
        for ctx in DEFAULT_MLP.iter() {
            let totals = totals_by_quality(ctx, area, floors, &materials);
            prop_assert!(totals.windows(2).all(|w| w[0] < w[1]), "{:?}", totals);
        }
    }

    #[test]
    fn better_quality_breakdown_costs_more(
        area in 100.0f64..=10_000.0,
        floors in 1i64..=6,
        materials in prop::collection::vec(1i64..=12, 1..6),
    ) {
        let totals = totals_by_quality(&RULES_ONLY, area, floors, &materials);
        prop_assert!(totals.windows(2).all(|w| w[0] < w[1]), "{:?}", totals);
    }

    #[test]
    fn more_floors_cost_more(
        area in 100.0f64..=10_000.0,
        floors in 1u32..=10,
        quality in prop::sample::select(QualityTier::ALL.to_vec()),
    ) {
        prop_assert!(base_cost(area, floors + 1, quality) > base_cost(area, floors, quality));
    }

    #[test]
    fn out_of_range_area_is_rejected(
        area in prop_oneof![0.0f64..99.99, 10_000.01f64..1e7],
    ) {
        let err = estimate(&RULES_ONLY, &request(area, 1, "standard", vec![1])).unwrap_err();
        prop_assert!(err.is_validation());
    }
}
