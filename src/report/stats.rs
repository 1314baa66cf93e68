//! Descriptive statistics over materialized columns.
//!
//! Percentiles use linear interpolation and the standard deviation uses the
//! n-1 denominator, so results line up with the usual describe() conventions.

use anyhow::Result;
use polars::prelude::*;

/// Extract a column's non-null values as f64, casting numerics as needed.
pub fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast.f64()?.iter().flatten().collect())
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation (n-1 denominator); undefined below 2 values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Linear-interpolation percentile, `q` in [0, 1].
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        Some(sorted[lo])
    } else {
        let frac = pos - lo as f64;
        Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    percentile(values, 0.5)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Count, mean, std, min, quartiles and max of a numeric sample.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryStats {
    pub fn compute(values: &[f64]) -> Self {
        Self {
            count: values.len(),
            mean: mean(values),
            std: sample_std(values),
            min: values.iter().copied().reduce(f64::min),
            q25: percentile(values, 0.25),
            q50: percentile(values, 0.5),
            q75: percentile(values, 0.75),
            max: values.iter().copied().reduce(f64::max),
        }
    }

    /// Interquartile range, the reported dispersion statistic.
    pub fn iqr(&self) -> Option<f64> {
        match (self.q25, self.q75) {
            (Some(q25), Some(q75)) => Some(q75 - q25),
            _ => None,
        }
    }
}

/// Pearson correlation between two columns with pairwise null exclusion.
///
/// Single-pass Welford update for numerical stability. Returns `None` when
/// fewer than two complete pairs exist or either side has zero variance.
pub fn pearson(s1: &Series, s2: &Series) -> Result<Option<f64>> {
    let ca1 = s1.cast(&DataType::Float64)?;
    let ca2 = s2.cast(&DataType::Float64)?;
    let ca1 = ca1.f64()?;
    let ca2 = ca2.f64()?;

    if ca1.len() != ca2.len() {
        return Ok(None);
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in ca1.iter().zip(ca2.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            n += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if n < 2.0 {
        return Ok(None);
    }

    let std_x = (var_x / n).sqrt();
    let std_y = (var_y / n).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return Ok(None);
    }

    Ok(Some(cov_xy / (n * std_x * std_y)))
}
