//! Helpers for finding consecutive rank runs.

/// True for two or more values that each step up by exactly one.
pub fn is_consecutive(values: &[u8]) -> bool {
    values.len() >= 2 && values.windows(2).all(|pair| pair[1] == pair[0] + 1)
}

/// Every slice of exactly `span` consecutive values. `values` must be sorted and unique.
pub fn windows(values: &[u8], span: usize) -> Vec<&[u8]> {
    if span == 0 || span > values.len() {
        return Vec::new();
    }
    values
        .windows(span)
        .filter(|window| is_consecutive(window))
        .collect()
}

/// Every consecutive slice of at least `min_span` values, shortest spans first.
pub fn windows_from(values: &[u8], min_span: usize) -> Vec<&[u8]> {
    let mut out = Vec::new();
    for span in min_span.max(2)..=values.len() {
        out.extend(windows(values, span));
    }
    out
}
