//! Levenshtein edit distance over Unicode scalar values.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Runs in `O(len(a) * len(b))` time with two rolling rows sized by the
/// shorter operand.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let (long, short) = if a.len() < b.len() { (&b, &a) } else { (&a, &b) };

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current: Vec<usize> = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        current[0] = i + 1;

        for (j, &sc) in short.iter().enumerate() {
            let insertion = previous[j + 1] + 1;
            let deletion = current[j] + 1;
            let substitution = previous[j] + usize::from(lc != sc);

            current[j + 1] = insertion.min(deletion).min(substitution);
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[short.len()]
}

/// Whether `candidate` is within `threshold` edits of any of `targets`.
/// Returns the first target that qualifies, in the order given.
pub fn closest_within<'a, I>(candidate: &str, targets: I, threshold: usize) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    targets
        .into_iter()
        .find(|target| levenshtein(candidate, target) <= threshold)
}
