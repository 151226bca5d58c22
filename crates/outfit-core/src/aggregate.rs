//! Merge explicit and activity-inferred preferences into one weight set.

use outfit_policy::PreferenceProfile;
use outfit_types::WeightedAttribute;

/// Combine a profile with activity weights and renormalize.
///
/// Activity weights for attributes the profile already weighs are averaged
/// with the explicit weight; other activity weights are appended. The
/// result is scaled so that the absolute weights sum to `total_weight`.
/// Sets whose absolute weights sum below `epsilon` are returned unscaled.
pub fn aggregate(
    profile: &PreferenceProfile,
    activity_weights: Option<&[WeightedAttribute]>,
    use_activity: bool,
    total_weight: f64,
    epsilon: f64,
) -> Vec<WeightedAttribute> {
    let mut merged = profile.weighted();

    if use_activity {
        for activity in activity_weights.unwrap_or_default() {
            match merged.iter_mut().find(|w| w.attribute == activity.attribute) {
                Some(explicit) => explicit.weight = f64::midpoint(explicit.weight, activity.weight),
                None => merged.push(*activity),
            }
        }
    }

    renormalize(&mut merged, total_weight, epsilon);
    merged
}

/// Scale weights in place so that their absolute values sum to `total`.
pub fn renormalize(weights: &mut [WeightedAttribute], total: f64, epsilon: f64) {
    let sum: f64 = weights.iter().map(|w| w.weight.abs()).sum();
    if sum < epsilon {
        return;
    }
    let scale = total / sum;
    for weight in weights.iter_mut() {
        weight.weight *= scale;
    }
}
