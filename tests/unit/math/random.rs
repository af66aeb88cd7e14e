//! Tests for the seedable random selector and the jitter falloff

#[cfg(test)]
mod tests {
    use gallery_scatter::math::random::{RandomSelector, jitter_factor};

    #[test]
    fn test_seeded_selectors_agree() {
        let mut a = RandomSelector::seeded(7);
        let mut b = RandomSelector::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.unit().to_bits(), b.unit().to_bits());
        }
    }

    #[test]
    fn test_ranges() {
        let mut selector = RandomSelector::seeded(11);
        for _ in 0..1000 {
            let unit = selector.unit();
            assert!((0.0..1.0).contains(&unit));
            let signed = selector.signed_unit();
            assert!((-1.0..1.0).contains(&signed));
            let below = selector.below(50);
            assert!((0..50).contains(&below));
            let jitter = selector.jitter(150.0);
            assert!((-150..150).contains(&jitter));
        }
    }

    // Tests that a non-positive limit behaves as a limit of one
    #[test]
    fn test_below_degenerate_limit() {
        let mut selector = RandomSelector::seeded(3);
        for _ in 0..100 {
            assert_eq!(selector.below(0), 0);
            assert_eq!(selector.below(-40), 0);
        }
    }

    #[test]
    fn test_spawn_extremes() {
        let mut selector = RandomSelector::seeded(5);
        for _ in 0..1000 {
            assert!(!selector.spawns(0.0));
            assert!(selector.spawns(1.0));
        }
    }

    #[test]
    fn test_unseeded_selector_produces_values() {
        let mut selector = RandomSelector::new(None);
        assert!((0.0..1.0).contains(&selector.unit()));
    }

    // Tests the falloff runs from 1.0 at the first sample to 0.4 at the last
    #[test]
    fn test_jitter_factor() {
        assert!((jitter_factor(0, 12, 0.6) - 1.0).abs() < 1e-12);
        assert!((jitter_factor(11, 12, 0.6) - 0.4).abs() < 1e-12);
        assert!(jitter_factor(5, 12, 0.6) > jitter_factor(6, 12, 0.6));
        // Samples past the end stay at the final factor
        assert!((jitter_factor(40, 12, 0.6) - 0.4).abs() < 1e-12);
        assert!((jitter_factor(3, 1, 0.6) - 1.0).abs() < f64::EPSILON);
    }
}
