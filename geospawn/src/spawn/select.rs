//! Weighted random draws.

use rand::Rng;

/// Pick one item with probability proportional to its weight.
///
/// Draws `r` uniformly from `[0, Σw)` and walks the items subtracting each
/// weight until `r` falls inside one. Negative and NaN weights count as
/// zero. Falls back to a uniform pick when the lengths differ or the total is
/// zero or infinite. Returns `None` only for an empty slice.
pub fn select_weighted<'a, T, R: Rng>(
    items: &'a [T],
    weights: &[f64],
    rng: &mut R,
) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    if items.len() != weights.len() {
        return select_uniform(items, rng);
    }

    let total: f64 = weights.iter().copied().map(mass).sum();
    if !(total > 0.0) || !total.is_finite() {
        return select_uniform(items, rng);
    }

    let mut remaining = rng.gen::<f64>() * total;
    for (item, weight) in items.iter().zip(weights) {
        let weight = mass(*weight);
        if remaining < weight {
            return Some(item);
        }
        remaining -= weight;
    }

    // Rounding can leave a sliver past the last item
    items
        .iter()
        .zip(weights)
        .rev()
        .find(|(_, w)| mass(**w) > 0.0)
        .map(|(item, _)| item)
}

fn select_uniform<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.gen_range(0..items.len()))
    }
}

#[inline]
fn mass(weight: f64) -> f64 {
    if weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Stack size for a resource: `1 + floor(u × max(1, floor(rarity × 5) + 1))`.
///
/// Rare resources (rarity near 0) always spawn singly; common ones (rarity 1)
/// spawn 1 to 6.
pub fn roll_quantity<R: Rng>(rarity: f64, rng: &mut R) -> u32 {
    let rarity = if rarity.is_finite() {
        rarity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let span = ((rarity * 5.0).floor() as u32 + 1).max(1);
    1 + rng.gen_range(0..span)
}
