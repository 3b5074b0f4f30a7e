use std::collections::HashMap;

/// Fills each missing value with the mean of the present values sharing its key.
/// Rows without a key, or whose group has no values, stay missing.
pub fn fill_by_group_mean<'a>(values: &[Option<f64>], keys: &[Option<&'a str>]) -> Vec<Option<f64>> {
    let mut totals: HashMap<&'a str, (f64, usize)> = HashMap::new();
    for (value, key) in values.iter().zip(keys) {
        if let (Some(v), Some(k)) = (value, key) {
            let entry = totals.entry(*k).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    values
        .iter()
        .zip(keys)
        .map(|(value, key)| {
            value.or_else(|| {
                key.and_then(|k| totals.get(k))
                    .map(|(sum, n)| sum / *n as f64)
            })
        })
        .collect()
}
