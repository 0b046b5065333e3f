//! Candidate offset generators for the placement searches

use crate::foundation::math::Vec2;

/// Square-ring spiral of 2D offsets around the origin
///
/// Ring `k` holds every grid point whose Chebyshev distance is `k` steps.
/// Within a ring points come nearest-first, ties broken by grid coordinates,
/// so the walk is fully deterministic.
#[derive(Debug, Clone)]
pub struct SpiralOffsets {
    step: f32,
    max_ring: i32,
    ring: i32,
    pending: Vec<(i32, i32)>,
}

impl SpiralOffsets {
    /// Spiral with the given step reaching out to `max_radius`
    pub fn new(step: f32, max_radius: f32) -> Self {
        let max_ring = if step > 0.0 && max_radius > 0.0 {
            (max_radius / step).ceil() as i32
        } else {
            0
        };
        Self { step, max_ring, ring: 0, pending: vec![(0, 0)] }
    }

    fn fill_ring(&mut self, k: i32) {
        // Top and bottom edges, then the side columns without their corners
        let mut ring: Vec<(i32, i32)> = (-k..=k)
            .flat_map(|i| [(i, -k), (i, k)])
            .chain((1 - k..k).flat_map(|j| [(-k, j), (k, j)]))
            .collect();
        // Reverse order so `pop` yields nearest-first
        ring.sort_by_key(|&(i, j)| std::cmp::Reverse((i * i + j * j, j, i)));
        self.pending = ring;
    }
}

impl Iterator for SpiralOffsets {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        loop {
            if let Some((i, j)) = self.pending.pop() {
                return Some(Vec2::new(i as f32 * self.step, j as f32 * self.step));
            }
            if self.ring >= self.max_ring {
                return None;
            }
            self.ring += 1;
            self.fill_ring(self.ring);
        }
    }
}

/// Alternating 1D offsets `0, +s, -s, +2s, -2s, ...` up to `max_offset`
pub fn slide_offsets(step: f32, max_offset: f32) -> impl Iterator<Item = f32> {
    let count = if step > 0.0 && max_offset > 0.0 {
        (max_offset / step).floor() as i32
    } else {
        0
    };
    std::iter::once(0.0).chain((1..=count).flat_map(move |k| {
        let offset = k as f32 * step;
        [offset, -offset]
    }))
}
