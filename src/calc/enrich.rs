//! Pass-through enrichment applied after a transformer builds its records:
//! positional overlay of array-valued trace attributes and selection flags.

/// Value at `index` of an optional per-point array, if the array is present
/// and long enough. Trailing records beyond the array's length stay bare.
#[must_use]
pub fn positional<T: Clone>(values: Option<&[T]>, index: usize) -> Option<T> {
    values.and_then(|arr| arr.get(index).cloned())
}

/// Expands a selected-point index list into per-record flags.
///
/// Out-of-range indices are ignored rather than reported; selection state
/// routinely outlives a data update that shortened the trace.
#[must_use]
pub fn selection_flags(len: usize, selected: Option<&[usize]>) -> Vec<bool> {
    let mut flags = vec![false; len];
    if let Some(indices) = selected {
        for &index in indices {
            if index < len {
                flags[index] = true;
            }
        }
    }
    flags
}
