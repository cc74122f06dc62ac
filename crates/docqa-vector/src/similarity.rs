/// Cosine similarity of two vectors, in `[-1, 1]`.
///
/// Mismatched lengths, empty input and zero-magnitude vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || a.len() != b.len() { return 0.0; }
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0f32, 0f32, 0f32), |(d, na, nb), (x, y)| (d + x * y, na + x * x, nb + y * y));
    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}
