/// Asserts that a placement holds every one of the template's cogs exactly once.
#[macro_export]
macro_rules! assert_conserved {
    ($placement:expr) => {
        let expected: Vec<usize> = $placement.template().item_ids().collect();
        assert_eq!(
            common::accounted_ids(&$placement),
            expected,
            "Cog multiset not conserved"
        );
    };
}

/// Asserts that a cog's strength table is a distribution over the placeable cells.
#[macro_export]
macro_rules! assert_strength_normalized {
    ($template:expr, $id:expr) => {
        let table = $template.items()[$id].strengths();
        assert!(
            (table.sum() - 1.0).abs() < 1e-9,
            "Strengths of cog {} sum to {}",
            $id,
            table.sum()
        );
        for coord in cogsmith_data::Coord::all() {
            let w = table.get(coord);
            if $template.mask().is_placeable(coord) {
                assert!(w > 0.0, "Cog {} has no weight at placeable {}", $id, coord);
            } else {
                assert_eq!(w, 0.0, "Cog {} has weight at blocked {}", $id, coord);
            }
        }
    };
}

/// Asserts that two floats agree to within a tolerance.
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r): (f64, f64) = ($left, $right);
        assert!((l - r).abs() <= $tol, "{} and {} differ by more than {}", l, r, $tol);
    };
}
