use rand::{rngs::StdRng, Rng, SeedableRng};
use zindex::{distance_squared, IndexConfig, LinearIndex, ZIndex};

const D: usize = 3;

fn random_point(rng: &mut StdRng) -> [u32; D] {
    let mut point = [0; D];
    for x in &mut point {
        *x = rng.gen_range(0..1024);
    }
    point
}

#[test]
fn windowed_results_are_exact_matches() {
    let mut index = ZIndex::<D>::default();
    let mut linear = LinearIndex::<D>::new();

    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..2000 {
        let point = random_point(&mut rng);
        index.insert(point).unwrap();
        linear.insert(point);
    }

    for _ in 0..200 {
        let center = random_point(&mut rng);
        let radius = rng.gen_range(5.0..100.0);

        let mut expected = Vec::new();
        linear
            .query_radius(&center, radius, |p| expected.push(*p))
            .unwrap();

        let mut actual = Vec::new();
        index
            .query_radius(&center, radius, |p| actual.push(*p))
            .unwrap();

        // Every reported point is a true match
        let radius_squared = (radius * radius) as i128;
        for point in &actual {
            assert!(distance_squared(&center, point) <= radius_squared);
            assert!(expected.contains(point));
        }

        // Every true match inside the key window is reported
        let window = index.key_window(&center);
        let in_window = expected
            .iter()
            .filter(|p| window.contains(&index.encode(p)))
            .count();
        assert_eq!(actual.len(), in_window);
    }
}

#[test]
fn full_window_is_complete() {
    // A window wider than the key space turns the index into an exact one.
    let config = IndexConfig::new(10, u64::MAX);
    let mut index = ZIndex::<D>::new(config).unwrap();
    let mut linear = LinearIndex::<D>::new();

    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let point = random_point(&mut rng);
        index.insert(point).unwrap();
        linear.insert(point);

        let center = random_point(&mut rng);
        let radius = rng.gen_range(10.0..200.0);

        let mut expected = Vec::new();
        linear
            .query_radius(&center, radius, |p| expected.push(*p))
            .unwrap();
        let mut actual = index
            .query_radius_iter(&center, radius)
            .unwrap()
            .copied()
            .collect::<Vec<_>>();

        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(expected, actual);
    }
}
