/// Split `items` into consecutive, non-overlapping chunks of `size`.
///
/// Chunk order follows item order and the final chunk may be shorter
/// than `size`. An empty slice yields no chunks.
///
/// # Panics
///
/// Panics if `size` is zero. Batch sizes are validated at config
/// construction, so a zero here is a programming error.
pub fn batches<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    assert!(size > 0, "batch size must be positive");
    items.chunks(size)
}
