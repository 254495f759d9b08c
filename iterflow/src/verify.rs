//! Coverage checks for collected traversal results.

use crate::errors::CoverageError;

/// Returns true iff `collected` is a permutation of `0..universe_size`.
pub fn verify_permutation(collected: &[i64], universe_size: usize) -> bool {
    check_permutation(collected, universe_size).is_ok()
}

/// Checks that `collected` is a permutation of `0..universe_size`.
///
/// Sorts a copy; the input is left untouched.
pub fn check_permutation(collected: &[i64], universe_size: usize) -> Result<(), CoverageError> {
    if collected.len() != universe_size {
        return Err(CoverageError::Length {
            expected: universe_size,
            actual: collected.len(),
        });
    }

    let mut sorted = collected.to_vec();
    sorted.sort_unstable();
    match sorted
        .iter()
        .enumerate()
        .find(|&(position, &value)| i64::try_from(position).map_or(true, |p| p != value))
    {
        Some((position, &value)) => Err(CoverageError::Mismatch { position, value }),
        None => Ok(()),
    }
}
