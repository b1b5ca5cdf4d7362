use std::time::Duration;

/// Fixed-capacity ring of recent durations with an exact running mean.
///
/// The rolling sum is kept in integer `Duration` arithmetic, so it always equals
/// the sum of the valid slots and never drifts.
#[derive(Debug, Clone)]
pub struct RingAverage<const N: usize> {
    values: [Duration; N],
    next_index: usize,
    len: usize,
    rolling_sum: Duration,
}

impl<const N: usize> Default for RingAverage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RingAverage<N> {
    pub fn new() -> Self {
        const { assert!(N > 1, "ring capacity must exceed one") };

        Self {
            values: [Duration::ZERO; N],
            next_index: 0,
            len: 0,
            rolling_sum: Duration::ZERO,
        }
    }

    /// A ring primed with a single observation.
    pub fn with_seed(seed: Duration) -> Self {
        let mut ring = Self::new();
        ring.add(seed);
        ring
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn add(&mut self, value: Duration) {
        if self.len == N {
            self.rolling_sum -= self.values[self.next_index];
        } else {
            self.len += 1;
        }
        self.values[self.next_index] = value;
        self.rolling_sum += value;
        self.next_index = (self.next_index + 1) % N;
    }

    /// Mean of the valid samples, or zero when there are none.
    pub fn average(&self) -> Duration {
        if self.len == 0 {
            return Duration::ZERO;
        }
        // len <= N, and N fits in u32 for any ring that fits in memory.
        self.rolling_sum / self.len as u32
    }

    pub fn clear(&mut self) {
        self.rolling_sum = Duration::ZERO;
        self.next_index = 0;
        self.len = 0;
    }

    pub fn fill(&mut self, value: Duration) {
        self.values = [value; N];
        self.next_index = 0;
        self.len = N;
        self.rolling_sum = value * N as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us(v: u64) -> Duration {
        Duration::from_micros(v)
    }

    fn exact_mean(samples: &[Duration]) -> Duration {
        let sum: Duration = samples.iter().sum();
        sum / samples.len() as u32
    }

    #[test]
    fn test_empty_average_is_zero() {
        let ring = RingAverage::<4>::new();
        assert!(ring.is_empty());
        assert_eq!(ring.average(), Duration::ZERO);
    }

    #[test]
    fn test_seed_primes_single_sample() {
        let ring = RingAverage::<32>::with_seed(Duration::from_millis(4));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.average(), Duration::from_millis(4));
    }

    #[test]
    fn test_average_below_capacity() {
        let mut ring = RingAverage::<4>::new();
        let samples = [us(100), us(200), us(301)];
        for s in samples {
            ring.add(s);
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.average(), exact_mean(&samples));
    }

    #[test]
    fn test_average_at_capacity() {
        let mut ring = RingAverage::<4>::new();
        let samples = [us(1), us(2), us(3), us(10)];
        for s in samples {
            ring.add(s);
        }
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.average(), exact_mean(&samples));
    }

    #[test]
    fn test_wraparound_drops_oldest() {
        let mut ring = RingAverage::<4>::new();
        let samples = [us(1000), us(2), us(4), us(6), us(8), us(10)];
        for s in samples {
            ring.add(s);
        }
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.average(), exact_mean(&samples[2..]));
    }

    #[test]
    fn test_sum_stays_exact_over_many_wraps() {
        let mut ring = RingAverage::<3>::new();
        let samples: Vec<Duration> = (0..1000u64).map(|i| Duration::from_nanos(i * 7 + 3)).collect();
        for &s in &samples {
            ring.add(s);
        }
        assert_eq!(ring.average(), exact_mean(&samples[samples.len() - 3..]));
    }

    #[test]
    fn test_integer_division_truncates() {
        let mut ring = RingAverage::<4>::new();
        ring.add(Duration::from_nanos(1));
        ring.add(Duration::from_nanos(2));
        assert_eq!(ring.average(), Duration::from_nanos(1));
    }

    #[test]
    fn test_clear_resets_to_zero() {
        let mut ring = RingAverage::<4>::with_seed(us(50));
        ring.add(us(70));
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.average(), Duration::ZERO);

        ring.add(us(9));
        assert_eq!(ring.average(), us(9));
    }

    #[test]
    fn test_fill_sets_every_slot() {
        let mut ring = RingAverage::<8>::with_seed(us(3));
        ring.fill(us(250));
        assert_eq!(ring.len(), ring.capacity());
        assert_eq!(ring.average(), us(250));

        ring.add(us(1050));
        assert_eq!(ring.average(), (us(250) * 7 + us(1050)) / 8);
    }
}
