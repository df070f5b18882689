mod common;

use cogsmith_core::{ObjectiveWeights, Placement};
use cogsmith_data::{Boosts, ItemKind};
use common::ShelfBuilder;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SAMPLES: u64 = 300;

fn mean_child_objective(first: &Placement, second: &Placement, weights: &ObjectiveWeights) -> f64 {
    let total: f64 = (0..SAMPLES)
        .map(|seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            weights.evaluate(&first.crossover_with_rng(second, &mut rng))
        })
        .sum();
    total / SAMPLES as f64
}

#[test]
fn test_crossover_is_symmetric_in_distribution() {
    let (template, mut rng) = ShelfBuilder::new()
        .with_seed(7)
        .with_plain(120)
        .with_boost(
            ItemKind::Plus,
            Boosts {
                build_rate: 0.3,
                ..Default::default()
            },
        )
        .build();
    let a = Placement::random_with_rng(&template, &mut rng);
    let b = Placement::random_with_rng(&template, &mut rng);
    let weights = ObjectiveWeights::new(1.0, 1.0, 10.0);

    let ab = mean_child_objective(&a, &b, &weights);
    let ba = mean_child_objective(&b, &a, &weights);
    let scale = weights.evaluate(&a).max(weights.evaluate(&b));
    assert!(
        (ab - ba).abs() < 0.02 * scale,
        "mean child objective {ab} vs {ba}"
    );
}

#[test]
fn test_crossover_keeps_totals_when_everything_fits() {
    let (template, mut rng) = ShelfBuilder::new().with_plain(96).build();
    let a = Placement::random_with_rng(&template, &mut rng);
    let b = Placement::random_with_rng(&template, &mut rng);
    let weights = ObjectiveWeights::new(1.0, 0.0, 0.0);

    // Every cog fits on the shelf, so every child holds the whole inventory.
    let child = a.crossover_with_rng(&b, &mut rng);
    assert_eq!(weights.evaluate(&child), weights.evaluate(&a));
    assert_eq!(weights.evaluate(&child), weights.evaluate(&b));
}
