//! AQI sampling along a route.
//!
//! A route is summarized by querying the pollution provider at up to three
//! points (start, middle, end) and averaging whatever readings come back.

use futures::future::join_all;

use crate::models::{AqiSample, Coordinate};
use crate::provider::AqiProvider;

const SAMPLE_POINTS: usize = 3;

/// Indices of the polyline points that get queried.
///
/// Paths with three or more points sample `0`, `n / 2` and `n - 1`; shorter
/// paths sample every point once.
pub fn sample_indices(len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = if len < SAMPLE_POINTS {
        (0..len).collect()
    } else {
        vec![0, len / 2, len - 1]
    };
    indices.dedup();
    indices
}

/// Query the provider at every sample point concurrently and wait for all
/// of them. Failed or unusable readings are kept as `reading: None`.
pub async fn sample_route<P>(provider: &P, polyline: &[Coordinate]) -> Vec<AqiSample>
where
    P: AqiProvider + ?Sized,
{
    let points: Vec<Coordinate> = sample_indices(polyline.len())
        .into_iter()
        .map(|idx| polyline[idx])
        .collect();

    let readings = join_all(points.iter().map(|point| provider.air_quality(*point))).await;

    points
        .into_iter()
        .zip(readings)
        .map(|(coordinate, result)| {
            let reading = match result {
                Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
                Ok(value) => {
                    tracing::debug!("Discarding unusable AQI reading {} at {}", value, coordinate);
                    None
                }
                Err(err) => {
                    tracing::debug!("AQI sample at {} failed: {}", coordinate, err);
                    None
                }
            };
            AqiSample { coordinate, reading }
        })
        .collect()
}

/// Rounded mean of the valid readings, or `None` if there are none.
///
/// Rounding is half away from zero; readings are non-negative so `1.5`
/// becomes `2`.
pub fn aggregate(samples: &[AqiSample]) -> Option<u32> {
    let valid: Vec<f64> = samples.iter().filter_map(|sample| sample.reading).collect();
    if valid.is_empty() {
        return None;
    }
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    Some(mean.round() as u32)
}

/// Sample a polyline and reduce the readings to one score.
pub async fn sample_route_aqi<P>(provider: &P, polyline: &[Coordinate]) -> Option<u32>
where
    P: AqiProvider + ?Sized,
{
    if polyline.is_empty() {
        return None;
    }
    let samples = sample_route(provider, polyline).await;
    aggregate(&samples)
}
