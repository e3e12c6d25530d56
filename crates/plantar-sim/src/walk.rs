use rand::Rng;

/// Gait-cycle loading factor, oscillating within [0.4, 1.0].
pub fn walk_cycle(step: u64) -> f64 {
    (step as f64 * 0.2).sin() * 0.3 + 0.7
}

/// True while `step % period` lies strictly between `after` and `period`.
pub fn in_anomaly_window(step: u64, period: u64, after: u64) -> bool {
    if period == 0 {
        return false;
    }
    step % period > after
}

/// Uniform sample from `[lo, hi)`; collapses to `lo` on an empty range.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Symmetric noise in `[-amplitude, amplitude)`.
pub(crate) fn noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    uniform(rng, -amplitude, amplitude)
}
