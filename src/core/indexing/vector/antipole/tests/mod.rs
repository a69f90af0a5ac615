use crate::core::vector::VectorStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod test_index;

/// `count` uniformly random vectors in `[0, 1)^dimension`, reproducible per seed.
fn random_vectors(count: usize, dimension: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| (0..dimension).map(|_| rng.gen::<f32>()).collect()).collect()
}

fn store_of(vectors: Vec<Vec<f32>>) -> VectorStore {
    VectorStore::from_vectors(vectors).unwrap()
}

/// The four-point example: two tight pairs far apart.
fn two_pair_vectors() -> Vec<Vec<f32>> {
    vec![
        vec![0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0],
        vec![10.0, 10.0, 10.0],
        vec![10.0, 10.0, 9.0],
    ]
}
