//! Tolerance rules: how closely a candidate value must track a reference.
//!
//! Every rule is a pure function `(reference, candidate) → [0, 1]`. Numeric
//! rules compare numbers and fall back to case-insensitive text equality when
//! either side is not a number (`ADJ` output voltage, package codes).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{MpnError, Result};
use crate::model::SpecValue;

/// Default acceptability threshold for [`ToleranceRule::is_acceptable`].
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.7;

/// Relative epsilon for numeric equality.
const RELATIVE_EPSILON: f64 = 1e-9;

/// Deviation at which a percentage tolerance reaches zero, as a multiple of
/// the tolerance itself.
const PERCENTAGE_DECAY_END: f64 = 1.5;

/// The comparison strategy of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToleranceKind {
    /// Values must be equal
    ExactMatch,
    /// Relative deviation up to `percent` scores 1.0, decaying to 0.0 at 1.5×
    PercentageTolerance { percent: f64 },
    /// Candidate must be at least the reference (voltage and current ratings)
    MinimumRequired,
    /// Candidate must be at most the reference, decaying to 0.0 at `multiplier`×
    MaximumAllowed { multiplier: f64 },
    /// Candidate must lie in an asymmetric band around the reference
    RangeTolerance { low_percent: f64, high_percent: f64 },
}

impl ToleranceKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ExactMatch => "exact_match",
            Self::PercentageTolerance { .. } => "percentage_tolerance",
            Self::MinimumRequired => "minimum_required",
            Self::MaximumAllowed { .. } => "maximum_allowed",
            Self::RangeTolerance { .. } => "range_tolerance",
        }
    }
}

/// A tolerance rule with its acceptability threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceRule {
    kind: ToleranceKind,
    threshold: f64,
}

impl ToleranceRule {
    #[must_use]
    pub const fn new(kind: ToleranceKind) -> Self {
        Self {
            kind,
            threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
        }
    }

    #[must_use]
    pub const fn exact_match() -> Self {
        Self::new(ToleranceKind::ExactMatch)
    }

    #[must_use]
    pub const fn percentage_tolerance(percent: f64) -> Self {
        Self::new(ToleranceKind::PercentageTolerance { percent })
    }

    #[must_use]
    pub const fn minimum_required() -> Self {
        Self::new(ToleranceKind::MinimumRequired)
    }

    #[must_use]
    pub const fn maximum_allowed(multiplier: f64) -> Self {
        Self::new(ToleranceKind::MaximumAllowed { multiplier })
    }

    #[must_use]
    pub const fn range_tolerance(low_percent: f64, high_percent: f64) -> Self {
        Self::new(ToleranceKind::RangeTolerance {
            low_percent,
            high_percent,
        })
    }

    /// Override the acceptability threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ToleranceKind {
        self.kind
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Exact, percentage and range rules score both directions alike.
    #[must_use]
    pub const fn is_symmetric(&self) -> bool {
        matches!(
            self.kind,
            ToleranceKind::ExactMatch
                | ToleranceKind::PercentageTolerance { .. }
                | ToleranceKind::RangeTolerance { .. }
        )
    }

    /// Check rule parameters. Called when metadata is registered.
    pub fn validate(&self) -> Result<()> {
        let name = self.name();
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MpnError::invalid_rule(
                name,
                format!("threshold {} must be between 0.0 and 1.0", self.threshold),
            ));
        }
        match self.kind {
            ToleranceKind::ExactMatch | ToleranceKind::MinimumRequired => Ok(()),
            ToleranceKind::PercentageTolerance { percent } => {
                if percent.is_finite() && percent > 0.0 {
                    Ok(())
                } else {
                    Err(MpnError::invalid_rule(
                        name,
                        format!("percent {percent} must be positive"),
                    ))
                }
            }
            ToleranceKind::MaximumAllowed { multiplier } => {
                if multiplier.is_finite() && multiplier > 1.0 {
                    Ok(())
                } else {
                    Err(MpnError::invalid_rule(
                        name,
                        format!("multiplier {multiplier} must be greater than 1.0"),
                    ))
                }
            }
            ToleranceKind::RangeTolerance {
                low_percent,
                high_percent,
            } => {
                let valid = |p: f64| p.is_finite() && p >= 0.0;
                if valid(low_percent) && valid(high_percent) {
                    Ok(())
                } else {
                    Err(MpnError::invalid_rule(
                        name,
                        format!(
                            "band percentages ({low_percent}, {high_percent}) must be non-negative"
                        ),
                    ))
                }
            }
        }
    }

    /// Score `candidate` against `reference` in [0, 1].
    #[must_use]
    pub fn compare(&self, reference: &SpecValue, candidate: &SpecValue) -> f64 {
        let score = match (reference.as_f64(), candidate.as_f64()) {
            (Some(r), Some(c)) => self.compare_numbers(reference, r, c),
            _ => text_equality(reference, candidate),
        };
        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        }
    }

    /// `compare(reference, candidate) >= threshold`.
    #[must_use]
    pub fn is_acceptable(&self, reference: &SpecValue, candidate: &SpecValue) -> bool {
        self.compare(reference, candidate) >= self.threshold
    }

    fn compare_numbers(&self, reference: &SpecValue, r: f64, c: f64) -> f64 {
        match self.kind {
            ToleranceKind::ExactMatch => bool_score(approx_eq(r, c)),
            ToleranceKind::PercentageTolerance { percent } => percentage_score(percent, r, c),
            ToleranceKind::MinimumRequired => minimum_score(r, c),
            ToleranceKind::MaximumAllowed { multiplier } => maximum_score(multiplier, r, c),
            ToleranceKind::RangeTolerance {
                low_percent,
                high_percent,
            } => {
                let (lower, upper) = match (reference.min(), reference.max()) {
                    (Some(lo), Some(hi)) => (lo, hi),
                    _ => (
                        r - r.abs() * low_percent / 100.0,
                        r + r.abs() * high_percent / 100.0,
                    ),
                };
                range_score(r, lower, upper, c)
            }
        }
    }
}

fn bool_score(matched: bool) -> f64 {
    if matched {
        1.0
    } else {
        0.0
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= RELATIVE_EPSILON * a.abs().max(b.abs())
}

fn text_equality(reference: &SpecValue, candidate: &SpecValue) -> f64 {
    bool_score(
        reference
            .as_text()
            .trim()
            .eq_ignore_ascii_case(candidate.as_text().trim()),
    )
}

fn percentage_score(percent: f64, r: f64, c: f64) -> f64 {
    if r == 0.0 {
        return bool_score(c == 0.0);
    }
    let deviation = (c - r).abs() * 100.0 / r.abs();
    if deviation <= percent * (1.0 + RELATIVE_EPSILON) {
        return 1.0;
    }
    let end = percent * PERCENTAGE_DECAY_END;
    if deviation >= end {
        0.0
    } else {
        (end - deviation) / (end - percent)
    }
}

fn minimum_score(r: f64, c: f64) -> f64 {
    if c >= r || approx_eq(r, c) {
        1.0
    } else if r > 0.0 {
        (0.5 * c / r).clamp(0.0, 0.5)
    } else {
        0.0
    }
}

fn maximum_score(multiplier: f64, r: f64, c: f64) -> f64 {
    if c <= r || approx_eq(r, c) {
        return 1.0;
    }
    if r <= 0.0 {
        return 0.0;
    }
    let limit = r * multiplier;
    if c >= limit {
        0.0
    } else {
        (limit - c) / (limit - r)
    }
}

fn range_score(r: f64, lower: f64, upper: f64, c: f64) -> f64 {
    let slack = RELATIVE_EPSILON * r.abs().max(c.abs());
    if c >= lower - slack && c <= upper + slack {
        return 1.0;
    }
    let (distance, width) = if c < lower {
        (lower - c, (r - lower).max(0.0))
    } else {
        (c - upper, (upper - r).max(0.0))
    };
    if width <= 0.0 {
        0.0
    } else {
        (1.0 - distance / width).max(0.0)
    }
}
