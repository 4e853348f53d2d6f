use std::fmt;

/// Text recorded in place of a density that cannot be computed
pub const DENSITY_SENTINEL: &str = "NA";

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Image size in megabytes, held at the two-decimal precision it is recorded with
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ImageSize(f64);

impl ImageSize {
    pub fn from_bytes(bytes: u64) -> Self {
        Self::from_megabytes(bytes as f64 / BYTES_PER_MEGABYTE)
    }

    /// Negative and non-finite inputs are treated as an unknown (zero) size.
    pub fn from_megabytes(megabytes: f64) -> Self {
        if !megabytes.is_finite() || megabytes < 0.0 {
            return Self(0.0);
        }
        Self((megabytes * 100.0).round() / 100.0)
    }

    pub fn megabytes(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 <= 0.0
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// CRITICAL and HIGH finding counts for one report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: u64,
    pub high: u64,
}

impl SeverityCounts {
    pub fn new(critical: u64, high: u64) -> Self {
        Self { critical, high }
    }

    pub fn total(&self) -> u64 {
        self.critical + self.high
    }
}

/// Vulnerability density: (CRITICAL + HIGH) findings per megabyte.
///
/// `Undefined` when the image size is zero or unknown; it is written as
/// [`DENSITY_SENTINEL`] and never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Density {
    Value(f64),
    Undefined,
}

impl Density {
    pub fn compute(counts: SeverityCounts, size: ImageSize) -> Self {
        if size.is_zero() {
            return Density::Undefined;
        }
        Density::Value(counts.total() as f64 / size.megabytes())
    }

    /// Parses the recorded form: four-decimal number or the sentinel
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(DENSITY_SENTINEL) {
            return Some(Density::Undefined);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Density::Value)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Density::Value(v) => Some(*v),
            Density::Undefined => None,
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Density::Value(v) => write!(f, "{:.4}", v),
            Density::Undefined => f.write_str(DENSITY_SENTINEL),
        }
    }
}
