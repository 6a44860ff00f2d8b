// RLE mask decoder.
// Input text is whitespace-separated `start length` pairs. `start` is a
// 1-based row-major pixel index; each pair marks one foreground run.
// Everything not covered by a run stays background.

use std::num::IntErrorKind;

use log::debug;

use crate::error::Error;
use crate::types::{BinaryMask, pixel_count};

/// One foreground run as written in the RLE text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: u64, // 1-based
    pub length: u64,
}

/// Parse and validate every pair before anything touches a mask.
pub fn parse_runs(rle: &str) -> Result<Vec<Run>, Error> {
    let tokens: Vec<&str> = rle.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        let last = tokens.last().copied().unwrap_or_default();
        return Err(Error::malformed(last, "odd token count, trailing start has no length"));
    }

    // Digits beyond u64 saturate; such runs are then skipped or clamped like any other.
    let number = |tok: &str| -> Result<u64, Error> {
        match tok.parse::<u64>() {
            Ok(n) => Ok(n),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
            Err(_) => Err(Error::malformed(tok, "not a non-negative integer")),
        }
    };

    tokens
        .chunks_exact(2)
        .map(|pair| {
            Ok(Run {
                start: number(pair[0])?,
                length: number(pair[1])?,
            })
        })
        .collect()
}

/// Decode `rle` into a `width * height` mask.
///
/// Runs whose start falls outside the grid are skipped without error; runs
/// that extend past the last pixel are cut at the grid end.
pub fn decode(rle: &str, width: u32, height: u32) -> Result<BinaryMask, Error> {
    let runs = parse_runs(rle)?;
    let mut mask = BinaryMask::zeroed(width, height)?;
    let total = pixel_count(width, height)?;

    let mut skipped = 0usize;
    for run in &runs {
        // start == 0 would be index -1
        let Some(start) = run.start.checked_sub(1) else {
            skipped += 1;
            continue;
        };
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        if start >= total {
            skipped += 1;
            continue;
        }
        let length = usize::try_from(run.length).unwrap_or(usize::MAX);
        let end = start.saturating_add(length).min(total);
        mask.fill_run(start, end);
    }

    if skipped > 0 {
        debug!("rle: skipped {skipped} of {} runs outside {width}x{height}", runs.len());
    }
    Ok(mask)
}
