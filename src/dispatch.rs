//! Dispatcher — runs both detectors over every tile using a work-stealing
//! atomic index shared by a pool of workers.
//!
//! Drives independent per-tile work across a `rayon::scope`. Workers write
//! directly through the shared [`Emitter`] as they go — emission order
//! across tiles is unspecified, so there is nothing to reassemble or
//! reorder afterward.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::Config;
use crate::detect::{ascii, utf16};
use crate::emit::{Emitter, Sink};
use crate::plan::Tile;
use crate::util::count_cores;

/// Resolves how many worker threads to use: `max(1, min(configured, tiles))`,
/// where `configured` is the probed CPU count when `threads == 0`.
pub fn resolve_workers(threads: usize, n_tiles: usize) -> usize {
    let configured = if threads == 0 { count_cores() } else { threads };
    configured.max(1).min(n_tiles.max(1))
}

/// Runs the configured detectors across `tiles`, writing every qualifying
/// record through `emitter`. Blocks until every tile has been processed.
pub fn run_scan<S: Sink + Send>(
    cfg: &Config,
    buf: &[u8],
    tiles: &[Tile],
    threads: usize,
    emitter: &Emitter<S>,
) {
    let n_workers = resolve_workers(threads, tiles.len());
    let next_tile = AtomicUsize::new(0);

    if n_workers == 1 {
        worker_loop(cfg, buf, tiles, &next_tile, emitter);
        return;
    }

    rayon::scope(|scope| {
        for _ in 0..n_workers {
            scope.spawn(|_| worker_loop(cfg, buf, tiles, &next_tile, emitter));
        }
    });
}

fn worker_loop<S: Sink + Send>(
    cfg: &Config,
    buf: &[u8],
    tiles: &[Tile],
    next_tile: &AtomicUsize,
    emitter: &Emitter<S>,
) {
    loop {
        let idx = next_tile.fetch_add(1, Ordering::Relaxed);
        if idx >= tiles.len() {
            return;
        }

        let tile = tiles[idx];
        let slice = &buf[tile.start..tile.end];
        let core_start = tile.core_start - tile.start;
        let core_end = tile.core_end - tile.start;
        let base_offset = tile.start as u64;

        // Fixed order: ASCII first, UTF-16LE second. A
        // detector error is logged and does not stop sibling tiles or the
        // other detector on this same tile.
        if cfg.encodings.ascii {
            if let Err(e) = ascii::scan(cfg, base_offset, core_start, core_end, slice, emitter) {
                log::warn!("tile {idx}: ascii scan aborted: {e}");
            }
        }
        if cfg.encodings.utf16le {
            if let Err(e) =
                utf16::scan(cfg, utf16::Endian::Little, base_offset, core_start, core_end, slice, emitter)
            {
                log::warn!("tile {idx}: utf16le scan aborted: {e}");
            }
        }
        if cfg.encodings.utf16be {
            if let Err(e) =
                utf16::scan(cfg, utf16::Endian::Big, base_offset, core_start, core_end, slice, emitter)
            {
                log::warn!("tile {idx}: utf16be scan aborted: {e}");
            }
        }
    }
}
