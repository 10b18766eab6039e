use chordseek_shared::{Anchor, Position};

/// Linear scan for the anchor closest to `from`.
///
/// Ties keep the first anchor encountered; iteration order is whatever the
/// caller supplies. Candidates whose distance is NaN are never selected.
pub fn nearest_anchor<'a, I>(candidates: I, from: &Position) -> Option<(&'a Anchor, f32)>
where
    I: IntoIterator<Item = &'a Anchor>,
{
    let mut nearest: Option<(&'a Anchor, f32)> = None;

    for anchor in candidates {
        let distance = anchor.position().distance(from);
        if distance.is_nan() {
            continue;
        }
        match nearest {
            Some((_, min_distance)) if !(distance < min_distance) => {}
            _ => nearest = Some((anchor, distance)),
        }
    }

    nearest
}
