//! Chunk planner — partitions `[0, file_len)` into [`Tile`]s whose cores
//! tile the file exactly once and whose halos give each worker enough
//! lookahead/lookbehind to recognise a run's end and terminator.
//!
//! Splits a big buffer into worker-sized spans with a small overlap region,
//! the same shape as a chunked-compression pipeline's block splitter, but
//! here the overlap exists to avoid splitting a string run rather than to
//! resume a block chain.

use crate::config::Config;

/// One unit of work for the dispatcher: `[start, end)` is the full slice a
/// worker reads (including both halos); `[core_start, core_end)` is the
/// sub-range whose run starts this tile is responsible for emitting.
///
/// Invariants:
/// `start <= core_start < core_end <= end`; adjacent tiles satisfy
/// `tile[i].core_end == tile[i+1].core_start`; the first tile's
/// `core_start == 0`; the last tile's `core_end == file_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub start: usize,
    pub core_start: usize,
    pub core_end: usize,
    pub end: usize,
}

const MIN_TILE_HINT: usize = 32 * 1024;
const AUTO_TILE_MIN: usize = 64 * 1024;
const AUTO_TILE_MAX: usize = 2 * 1024 * 1024;
const TILE_ROUND: usize = 64 * 1024;

/// Resolves the tile (core) size to use.
///
/// - `hint >= 32 KiB` is used as-is; a smaller nonzero hint is clamped up to
///   32 KiB.
/// - `hint == 0` triggers auto-sizing: target `file_len / (4*workers + 1)`,
///   clamp into `[64 KiB, 2 MiB]`, force `>= 8*ov`, round up to a 64 KiB
///   multiple.
fn resolve_tile_size(hint: usize, file_len: usize, workers: usize, ov: usize) -> usize {
    if hint != 0 {
        return hint.max(MIN_TILE_HINT);
    }

    let workers = workers.max(1);
    let target = file_len / (4 * workers + 1);
    let mut size = target.clamp(AUTO_TILE_MIN, AUTO_TILE_MAX);
    size = size.max(8 * ov.max(1));
    // Round up to a 64 KiB multiple.
    let rem = size % TILE_ROUND;
    if rem != 0 {
        size += TILE_ROUND - rem;
    }
    size
}

/// Builds the tile plan for a file of length `file_len`.
///
/// `tile_size_hint` comes straight from a CLI flag (0 = auto); `workers` is
/// the resolved worker count used only to size tiles in auto mode.
pub fn build_plan(cfg: &Config, file_len: usize, workers: usize, tile_size_hint: usize) -> Vec<Tile> {
    if file_len == 0 {
        return vec![Tile { start: 0, core_start: 0, core_end: 0, end: 0 }];
    }

    let ov = cfg.overlap();
    let tile_size = resolve_tile_size(tile_size_hint, file_len, workers, ov);

    let mut tiles = Vec::new();
    let mut pos = 0usize;
    while pos < file_len {
        let core_start = pos;
        let core_end = (pos + tile_size).min(file_len);
        let start = core_start - ov.min(core_start);
        let end = core_end + ov.min(file_len - core_end);
        tiles.push(Tile { start, core_start, core_end, end });
        pos = core_end;
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Encodings, OutputFormat};

    fn cfg(min_len: usize, null_only: bool) -> Config {
        Config::new(
            min_len,
            Encodings { ascii: true, utf16le: true, utf16be: false },
            0,
            OutputFormat::Text,
            null_only,
            4096,
        )
        .unwrap()
    }

    #[test]
    fn empty_file_yields_single_empty_tile() {
        let plan = build_plan(&cfg(4, false), 0, 4, 0);
        assert_eq!(plan, vec![Tile { start: 0, core_start: 0, core_end: 0, end: 0 }]);
    }

    #[test]
    fn cores_partition_the_file_without_gap_or_overlap() {
        let c = cfg(4, false);
        let file_len = 5_000_000;
        let plan = build_plan(&c, file_len, 4, 0);
        assert_eq!(plan.first().unwrap().core_start, 0);
        assert_eq!(plan.last().unwrap().core_end, file_len);
        for w in plan.windows(2) {
            assert_eq!(w[0].core_end, w[1].core_start);
        }
        for t in &plan {
            assert!(t.core_start >= t.start);
            assert!(t.core_end <= t.end);
            assert!(t.core_end > t.core_start);
        }
    }

    #[test]
    fn halo_width_matches_overlap_formula() {
        let c = cfg(4, false);
        let ov = c.overlap();
        assert_eq!(ov, 6); // utf16 dominates: 2*(4-1)

        let file_len = 5_000_000;
        let plan = build_plan(&c, file_len, 4, 0);
        for w in plan.windows(2) {
            let halo = w[0].end - w[1].start;
            assert!(halo >= ov);
        }
    }

    #[test]
    fn explicit_hint_is_honoured_when_above_floor() {
        let c = cfg(4, false);
        let plan = build_plan(&c, 1_000_000, 4, 128 * 1024);
        assert_eq!(plan[0].core_end - plan[0].core_start, 128 * 1024);
    }

    #[test]
    fn small_hint_is_clamped_up_to_32kib() {
        let c = cfg(4, false);
        let plan = build_plan(&c, 200_000, 4, 1024);
        assert_eq!(plan[0].core_end - plan[0].core_start, 32 * 1024);
    }
}
