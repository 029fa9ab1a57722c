//! Change the sample count of a series while keeping its shape.
//!
//! Used to fit a stream of any length into a fixed number of points, e.g.
//! a 120 point preview graph. Extreme ratios are reached in several passes
//! with each pass limited to a 100x change, the usable range of a
//! 3 kHz..300 kHz rate converter.

use super::error::{AnalyticsError, AnalyticsResult};

/// Largest length change a single pass may make, in either direction.
pub const MAX_PASS_RATIO: f64 = 100.0;

/// Resample `input` to exactly `out_len` points.
pub fn resample(input: &[f64], out_len: usize) -> AnalyticsResult<Vec<f64>> {
    if out_len == 0 {
        return Ok(Vec::new());
    }
    if input.is_empty() {
        return Err(AnalyticsError::InvalidInput(
            "cannot resample an empty series".to_string(),
        ));
    }
    if input.len() == out_len {
        return Ok(input.to_vec());
    }

    let mut scratch = input.to_vec();
    let mut passes = 0;
    while scratch.len() != out_len {
        let ratio = out_len as f64 / scratch.len() as f64;
        let pass_len = if ratio > MAX_PASS_RATIO {
            (scratch.len() as f64 * MAX_PASS_RATIO).round() as usize
        } else if ratio < 1.0 / MAX_PASS_RATIO {
            ((scratch.len() as f64 / MAX_PASS_RATIO).round() as usize).max(out_len)
        } else {
            out_len
        };
        scratch = convert(&scratch, pass_len);
        passes += 1;
    }

    tracing::debug!(
        input = input.len(),
        output = out_len,
        passes,
        "resampled series"
    );
    Ok(scratch)
}

/// One resampling pass with a tent kernel.
///
/// Output points are spread evenly from the first input point to the last.
/// Upsampling reduces to linear interpolation; downsampling widens the tent
/// to the step between output points so every input sample contributes and
/// high frequency detail is averaged out rather than aliased.
fn convert(input: &[f64], out_len: usize) -> Vec<f64> {
    let n = input.len();
    if n == 1 {
        return vec![input[0]; out_len];
    }
    if out_len == 1 {
        return vec![input.iter().sum::<f64>() / n as f64];
    }

    let step = (n - 1) as f64 / (out_len - 1) as f64;
    let width = step.max(1.0);

    (0..out_len)
        .map(|i| {
            let center = i as f64 * step;
            let lo = (center - width).floor().max(0.0) as usize;
            let hi = ((center + width).ceil() as usize).min(n - 1);

            let mut acc = 0.0;
            let mut weights = 0.0;
            for (j, &x) in input.iter().enumerate().take(hi + 1).skip(lo) {
                let w = 1.0 - (j as f64 - center).abs() / width;
                if w > 0.0 {
                    acc += w * x;
                    weights += w;
                }
            }
            if weights > 0.0 {
                acc / weights
            } else {
                input[center.round() as usize]
            }
        })
        .collect()
}
