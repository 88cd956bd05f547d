/// Returns the number of logical CPU cores available on the system, used to
/// resolve `threads = 0` ("auto") into a worker count.
///
/// Guaranteed to return a value ≥ 1 (falls back to 1 if the platform can't
/// report a parallelism estimate).
pub fn count_cores() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
