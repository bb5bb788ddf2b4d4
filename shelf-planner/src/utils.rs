use std::cmp::Ordering;

/// Allows comparing and sorting f64 even if `NaN` is involved.
///
/// Pretend that `NaN` is larger than all other values, so that it ends up
/// last when sorting in ascending order.
pub(crate) fn nan_safe_f64_cmp(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, _) => Ordering::Less,
    })
}

/// `nan_safe_f64_cmp_desc(a, b)` is the same as `nan_safe_f64_cmp(b, a)` except that `NaN`
/// still ends up last when sorting in descending order.
pub(crate) fn nan_safe_f64_cmp_desc(a: &f64, b: &f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => nan_safe_f64_cmp(b, a),
    }
}
