use std::sync::Arc;

/// Minor ticks closer than this to a major tick are not drawn.
pub const MINOR_TICK_EPSILON: f64 = 1e-4;

/// Upper bound on the number of major ticks across one axis extent.
pub const MAX_MAJOR_TICKS: f64 = 20.0;

/// Most values [`find_ticks`] returns; larger requests yield nothing.
pub const MAX_TICKS: usize = 100_000;

const INITIAL_MAJOR_STEP: f64 = 5.0;
const INITIAL_MINOR_STEP: f64 = 1.0;

/// Visual weight of a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickWeight {
    /// Long tick with a label and a grid cross-line.
    Major,
    /// Short unlabeled tick.
    Minor,
}

/// A position along an axis where a tick mark is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// The value at this tick in data coordinates
    pub value: f64,

    /// The step size between ticks of the same weight
    pub step_size: f64,

    /// The visual weight of the tick mark
    pub weight: TickWeight,
}

impl Tick {
    /// Create a new tick.
    pub fn new(value: f64, step_size: f64, weight: TickWeight) -> Self {
        Self {
            value,
            step_size,
            weight,
        }
    }
}

/// A function which formats tick values into label strings.
pub type TickFormatter = Arc<dyn Fn(Tick) -> String + Send + Sync>;

/// Formats integers without a fractional part and sub-unit steps with just
/// enough decimals to tell neighbours apart.
pub fn default_formatter(tick: Tick) -> String {
    // Avoid rendering "-0".
    let value = if tick.value == 0.0 { 0.0 } else { tick.value };
    let log_step = tick.step_size.log10();
    if !log_step.is_finite() || log_step >= 0.0 {
        format!("{:.0}", value)
    } else {
        let decimal_places = (-log_step).ceil() as usize;
        format!("{:.*}", decimal_places, value)
    }
}

/// Multiples of `step` inside `[floor(range_start), ceil(range_stop)]`,
/// ascending, boundaries included.
///
/// Each value is computed as `k * step` rather than accumulated so that long
/// ranges do not drift. A step so small that the range holds more than
/// [`MAX_TICKS`] values gives an empty list.
pub fn find_ticks(step: f64, range_start: f64, range_stop: f64) -> Vec<f64> {
    if !(step.is_finite() && step > 0.0) || !range_start.is_finite() || !range_stop.is_finite() {
        return Vec::new();
    }
    let lo = range_start.floor();
    let hi = range_stop.ceil();
    if lo > hi {
        return Vec::new();
    }

    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    let count = last - first + 1.0;
    if !count.is_finite() || count > MAX_TICKS as f64 {
        tracing::warn!(
            "step {} over [{}, {}] gives {} ticks; skipping",
            step,
            lo,
            hi,
            count
        );
        return Vec::new();
    }
    (first as i64..=last as i64)
        .map(|k| k as f64 * step)
        .collect()
}

/// Minor ticks of the range with every value that coincides with a major tick
/// removed.
pub fn minor_ticks(minor_step: f64, majors: &[f64], range_start: f64, range_stop: f64) -> Vec<f64> {
    find_ticks(minor_step, range_start, range_stop)
        .into_iter()
        .filter(|minor| {
            !majors
                .iter()
                .any(|major| (minor - major).abs() < MINOR_TICK_EPSILON)
        })
        .collect()
}

/// Major and minor step sizes for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDensity {
    pub major: f64,
    pub minor: f64,
}

impl Default for TickDensity {
    fn default() -> Self {
        Self {
            major: INITIAL_MAJOR_STEP,
            minor: INITIAL_MINOR_STEP,
        }
    }
}

impl TickDensity {
    /// Start from 5/1 and keep doubling the major step (the old major becoming
    /// the minor step) until at most [`MAX_MAJOR_TICKS`] majors span `extent`.
    pub fn for_extent(extent: f64) -> Self {
        let mut density = Self::default();
        if !extent.is_finite() {
            return density;
        }
        while extent / density.major > MAX_MAJOR_TICKS {
            density.minor = density.major;
            density.major *= 2.0;
        }
        density
    }

    /// Major ticks for the range followed by the non-coinciding minor ticks.
    pub fn ticks(&self, range_start: f64, range_stop: f64) -> Vec<Tick> {
        let majors = find_ticks(self.major, range_start, range_stop);
        let minors = minor_ticks(self.minor, &majors, range_start, range_stop);
        majors
            .iter()
            .map(|&v| Tick::new(v, self.major, TickWeight::Major))
            .chain(
                minors
                    .into_iter()
                    .map(|v| Tick::new(v, self.minor, TickWeight::Minor)),
            )
            .collect()
    }
}
