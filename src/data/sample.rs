use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::model::View;

/// Seed used when the configuration does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Draw `min(n, view.len())` rows without replacement.
///
/// The draw depends only on `seed` and the view length, so the same view and
/// seed always yield the same rows. Rows keep their relative view order.
pub fn sample<'a>(view: &View<'a>, n: usize, seed: u64) -> View<'a> {
    let len = view.len();
    if n >= len {
        return view.clone();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = index::sample(&mut rng, len, n).into_vec();
    picked.sort_unstable();

    let indices = picked.into_iter().map(|p| view.indices()[p]).collect();
    log::debug!("sampled {n} of {len} rows (seed {seed})");
    View::from_indices(view.dataset(), indices)
}
