//! Scale functions mapping data space onto pixel space
//!
//! Ordinal band scales place categories, linear and square-root scales map
//! magnitudes. Tick generation and domain "nicing" follow the usual 1-2-5
//! progression so axes land on round numbers.

/// Ordinal scale dividing a continuous range into evenly spaced bands
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Build a band scale with separate inner/outer padding (fractions of a step)
    pub fn new(
        domain: &[String],
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> Self {
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let padding_inner = padding_inner.clamp(0.0, 1.0);
        let step = (r1 - r0) / (n - padding_inner + padding_outer * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding_inner)) * 0.5;
        Self {
            domain: domain.to_vec(),
            start,
            step,
            bandwidth: step * (1.0 - padding_inner),
        }
    }

    /// Same padding inside and outside
    pub fn padded(domain: &[String], range: (f64, f64), padding: f64) -> Self {
        Self::new(domain, range, padding, padding)
    }

    /// Left/top edge of the band for `key`
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Center of the band for `key`
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|p| p + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Continuous linear scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Scale over `[0, max]`, falling back to `[0, 1]` for an empty maximum
    pub fn from_zero(max: f64, range: (f64, f64)) -> Self {
        let max = if max > 0.0 { max } else { 1.0 };
        Self::new((0.0, max), range)
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Extend the domain outward to round tick boundaries
    pub fn nice(self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        let mut prev_step = 0.0;
        for _ in 0..10 {
            let step = tick_step(start, stop, count);
            if step == prev_step || step <= 0.0 {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
            prev_step = step;
        }
        Self { domain: (start, stop), ..self }
    }

    /// Round tick values covering the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (start, stop) = self.domain;
        let step = tick_step(start, stop, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![start];
        }
        let i0 = (start / step).ceil() as i64;
        let i1 = (stop / step).floor() as i64;
        (i0..=i1).map(|i| round_tick(i as f64 * step)).collect()
    }
}

/// Square-root scale: area, not radius, grows linearly with the value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    max: f64,
    range: (f64, f64),
}

impl SqrtScale {
    /// Domain `[0, max]` (0 treated as 1)
    pub fn new(max: f64, range: (f64, f64)) -> Self {
        let max = if max > 0.0 { max } else { 1.0 };
        Self { max, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let t = value.max(0.0).sqrt() / self.max.sqrt();
        r0 + t * (r1 - r0)
    }
}

/// 1-2-5 tick spacing for roughly `count` ticks over `[start, stop]`
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span == 0.0 || count == 0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

fn round_tick(v: f64) -> f64 {
    // strip float noise such as 0.30000000000000004
    (v * 1e9).round() / 1e9
}
