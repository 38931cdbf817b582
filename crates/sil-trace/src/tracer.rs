use log::debug;
use sil_core::{CHANNELS, Coordinate, PixelBuffer};

use crate::contour::Contour;
use crate::direction::{Direction, neighbor};
use crate::error::TraceError;
use crate::sampler::{DEFAULT_ALPHA_THRESHOLD, PixelSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    pub alpha_threshold: u8,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

/// First border pixel in row-major order and the coordinate scanned just
/// before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub start: Coordinate,
    /// `(0, 0)` when the very first scanned pixel is already a border pixel.
    pub before_start: Coordinate,
}

/// Walk state for one trace call.
struct TraceState {
    start: Coordinate,
    before_start: Coordinate,
    current: Coordinate,
    direction: Direction,
}

/// Moore-neighborhood boundary tracer with Jacob's stopping condition.
///
/// Holds only configuration; all walk state lives inside [`MooreTracer::trace`],
/// so one tracer can be shared across threads tracing independent buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MooreTracer {
    sampler: PixelSampler,
}

impl MooreTracer {
    pub fn new(cfg: &TraceConfig) -> Self {
        Self {
            sampler: PixelSampler::new(cfg.alpha_threshold),
        }
    }

    pub fn sampler(&self) -> &PixelSampler {
        &self.sampler
    }

    /// Row-major scan for the first border pixel.
    pub fn find_seed(&self, buf: &PixelBuffer<'_>) -> Option<Seed> {
        if buf.is_empty() {
            return None;
        }
        for y in 0..buf.height() {
            let Some(x) = buf
                .row(y)
                .chunks_exact(CHANNELS)
                .position(|px| self.sampler.is_border_alpha(px[3]))
            else {
                continue;
            };

            let before_start = match (x, y) {
                (0, 0) => Coordinate::new(0, 0),
                (0, _) => Coordinate::new(buf.width() - 1, y - 1),
                _ => Coordinate::new(x - 1, y),
            };
            return Some(Seed {
                start: Coordinate::new(x, y),
                before_start,
            });
        }
        None
    }

    pub fn trace(&self, buf: &PixelBuffer<'_>) -> Result<Contour, TraceError> {
        let seed = self.find_seed(buf).ok_or(TraceError::NoBorderFound)?;
        debug!(
            "seed at {} (scan predecessor {})",
            seed.start, seed.before_start
        );

        let (points, probes) = self.walk(buf, seed)?;
        debug!(
            "contour closed with {} points after {} probes",
            points.len(),
            probes
        );
        Ok(Contour::closed(points, probes))
    }

    fn walk(
        &self,
        buf: &PixelBuffer<'_>,
        seed: Seed,
    ) -> Result<(Vec<Coordinate>, usize), TraceError> {
        let (width, height) = (buf.width(), buf.height());

        // Sweeps start one step clockwise of the pixel the walk arrived from.
        let backtrack = heading(seed.start, seed.before_start)?;
        let mut state = TraceState {
            start: seed.start,
            before_start: seed.before_start,
            current: seed.start,
            direction: backtrack.next_clockwise(),
        };

        // Each (pixel, direction) pair is visited at most once per lap.
        let limit = width.saturating_mul(height).saturating_mul(8);
        let mut path = vec![state.start];
        let mut probes = 0_usize;

        loop {
            if probes == limit {
                return Err(TraceError::StepLimitExceeded { limit });
            }
            probes += 1;

            let Some(candidate) = neighbor(state.current, state.direction, width, height) else {
                state.direction = state.direction.next_clockwise();
                continue;
            };

            if candidate == state.before_start && state.current == state.start {
                break;
            }

            if self.sampler.is_border_at(buf, candidate) {
                let backtrack = heading(candidate, state.current)?;
                path.push(candidate);
                state.current = candidate;
                state.direction = backtrack.next_clockwise();
            } else {
                state.direction = state.direction.next_clockwise();
            }
        }

        // The last move re-entered the seed; that step is the closing edge.
        if path.len() > 1 {
            debug_assert_eq!(path.last(), Some(&state.start));
            path.pop();
        }

        Ok((path, probes))
    }
}

fn heading(from: Coordinate, to: Coordinate) -> Result<Direction, TraceError> {
    Direction::between(from, to).ok_or(TraceError::DegenerateAdjacency { from, to })
}

/// Traces the outer boundary of the shape in `buffer`.
pub fn trace(buffer: &PixelBuffer<'_>, alpha_threshold: u8) -> Result<Contour, TraceError> {
    MooreTracer::new(&TraceConfig { alpha_threshold }).trace(buffer)
}

/// Validates raw RGBA parts, then traces. `stride` is in bytes.
pub fn trace_rgba(
    width: usize,
    height: usize,
    stride: usize,
    data: &[u8],
    alpha_threshold: u8,
) -> Result<Contour, TraceError> {
    let buffer = PixelBuffer::from_slice(width, height, stride, data)?;
    trace(&buffer, alpha_threshold)
}
