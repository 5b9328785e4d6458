//! Moving Average Buffer (§4.2): a bounded FIFO of magnitude vectors that
//! emits their per-bin mean, normalized in dB, once full.

use std::collections::VecDeque;

/// Bounded queue of up to `width` magnitude vectors. Mirrors the teacher's
/// [`RingBufferWithSerialSliceAccess`]-style "push, and once full, evict the
/// oldest" discipline, but over heap-allocated `Vec<f32>` rows (this engine
/// is offline/batch and unbounded in track history anyway, see §5) rather
/// than a fixed-capacity stack array.
#[derive(Debug)]
pub struct MovingAverageBuffer {
    width: usize,
    block_size: usize,
    window: VecDeque<Vec<f32>>,
}

impl MovingAverageBuffer {
    pub fn new(width: usize, block_size: usize) -> Self {
        assert!(width >= 1, "moving average width must be at least 1");
        Self {
            width,
            block_size,
            window: VecDeque::with_capacity(width),
        }
    }

    /// Appends one block's magnitude vector. Once `width` vectors have been
    /// collected, returns their element-wise mean, normalized via
    /// `norm_db(x) = 20 * log10(2x / block_size)`, and drops the oldest
    /// vector to keep the window at `width`. Returns `None` while the
    /// window is still filling up.
    pub fn push(&mut self, magnitudes: Vec<f32>) -> Option<Vec<f32>> {
        debug_assert_eq!(magnitudes.len(), self.block_size / 2);

        self.window.push_back(magnitudes);
        if self.window.len() < self.width {
            return None;
        }

        let bins = self.block_size / 2;
        let mut sums = vec![0.0f32; bins];
        for vector in &self.window {
            for (sum, value) in sums.iter_mut().zip(vector.iter()) {
                *sum += value;
            }
        }

        let width = self.width as f32;
        let block_size = self.block_size as f32;
        let normalized: Vec<f32> = sums
            .into_iter()
            .map(|sum| {
                let avg = sum / width;
                20.0 * (2.0 * avg / block_size).log10()
            })
            .collect();

        self.window.pop_front();
        Some(normalized)
    }
}
