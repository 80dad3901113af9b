//! Turns raw provider routes into candidate routes with an AQI score.

use futures::future::join_all;

use crate::error::EvaluationError;
use crate::models::{CandidateRoute, ProviderRoute, RouteLabel};
use crate::provider::AqiProvider;
use crate::sampler::sample_route_aqi;

/// Routes beyond this many are ignored. Each evaluated route costs up to
/// three AQI provider calls, so this bounds outbound volume per request.
pub const MAX_EVALUATED_ROUTES: usize = 3;

const DEFAULT_SUMMARY: &str = "Route";

/// Validate a provider route and convert units (seconds -> minutes,
/// meters -> kilometers, both rounded). The result has no AQI yet.
pub fn extract_route(raw: ProviderRoute) -> Result<CandidateRoute, &'static str> {
    let duration_s = raw.duration_s.ok_or("missing duration")?;
    let distance_m = raw.distance_m.ok_or("missing distance")?;
    if !duration_s.is_finite() || duration_s < 0.0 {
        return Err("invalid duration");
    }
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err("invalid distance");
    }
    let polyline = raw
        .polyline
        .filter(|polyline| !polyline.is_empty())
        .ok_or("missing polyline")?;

    Ok(CandidateRoute {
        name: RouteLabel::default(),
        eta_minutes: (duration_s / 60.0).round() as u32,
        distance_km: (distance_m / 1000.0).round() as u32,
        aqi: None,
        summary: raw
            .summary
            .filter(|summary| !summary.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
        polyline,
        encoded_polyline: raw.encoded_polyline,
    })
}

/// Evaluate up to [`MAX_EVALUATED_ROUTES`] provider routes concurrently.
///
/// Output order follows provider order. Malformed routes are dropped;
/// if none survive the evaluation fails with [`EvaluationError::Empty`].
pub async fn evaluate<P>(
    provider: &P,
    raw_routes: Vec<ProviderRoute>,
) -> Result<Vec<CandidateRoute>, EvaluationError>
where
    P: AqiProvider + ?Sized,
{
    if raw_routes.len() > MAX_EVALUATED_ROUTES {
        tracing::debug!(
            "Evaluating first {} of {} provider routes",
            MAX_EVALUATED_ROUTES,
            raw_routes.len()
        );
    }

    let routes: Vec<CandidateRoute> = raw_routes
        .into_iter()
        .take(MAX_EVALUATED_ROUTES)
        .enumerate()
        .filter_map(|(idx, raw)| match extract_route(raw) {
            Ok(route) => Some(route),
            Err(reason) => {
                tracing::warn!("Dropping provider route {}: {}", idx, reason);
                None
            }
        })
        .collect();

    if routes.is_empty() {
        return Err(EvaluationError::Empty);
    }

    let scored = join_all(routes.into_iter().map(|route| async move {
        let aqi = sample_route_aqi(provider, &route.polyline).await;
        CandidateRoute { aqi, ..route }
    }))
    .await;

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::models::{Coordinate, Polyline};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Reading is the integer part of the queried longitude; longitude 0 fails.
    struct LonAqi {
        calls: AtomicUsize,
    }

    impl LonAqi {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AqiProvider for LonAqi {
        async fn air_quality(&self, at: Coordinate) -> Result<f64, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if at.lon == 0.0 {
                Err(ProviderError::NoData)
            } else {
                Ok(at.lon.trunc())
            }
        }
    }

    fn path(aqi: f64, len: usize) -> Polyline {
        (0..len)
            .map(|i| Coordinate {
                lat: i as f64 * 0.01,
                lon: aqi,
            })
            .collect()
    }

    fn raw(duration_s: f64, distance_m: f64, aqi: f64) -> ProviderRoute {
        ProviderRoute {
            duration_s: Some(duration_s),
            distance_m: Some(distance_m),
            polyline: Some(path(aqi, 5)),
            encoded_polyline: None,
            summary: Some("via Ring Rd".to_string()),
        }
    }

    #[test]
    fn extract_converts_units_with_rounding() {
        let route = extract_route(raw(629.0, 4_499.0, 1.0)).unwrap();
        assert_eq!(route.eta_minutes, 10);
        assert_eq!(route.distance_km, 4);
        assert_eq!(route.name, RouteLabel::Alternative);
        assert_eq!(route.aqi, None);

        let route = extract_route(raw(630.0, 4_500.0, 1.0)).unwrap();
        assert_eq!(route.eta_minutes, 11);
        assert_eq!(route.distance_km, 5);
    }

    #[test]
    fn extract_rejects_missing_fields() {
        let mut missing = raw(600.0, 1000.0, 1.0);
        missing.duration_s = None;
        assert_eq!(extract_route(missing), Err("missing duration"));

        let mut empty_path = raw(600.0, 1000.0, 1.0);
        empty_path.polyline = Some(Polyline::default());
        assert_eq!(extract_route(empty_path), Err("missing polyline"));

        let negative = raw(-5.0, 1000.0, 1.0);
        assert_eq!(extract_route(negative), Err("invalid duration"));
    }

    #[test]
    fn extract_defaults_blank_summary() {
        let mut route = raw(60.0, 1000.0, 1.0);
        route.summary = Some("  ".to_string());
        assert_eq!(extract_route(route).unwrap().summary, "Route");
    }

    #[tokio::test]
    async fn evaluate_preserves_order_and_attaches_aqi() {
        let provider = LonAqi::new();
        let routes = evaluate(
            &provider,
            vec![raw(600.0, 5_000.0, 3.0), raw(900.0, 4_000.0, 1.0)],
        )
        .await
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!((routes[0].eta_minutes, routes[0].distance_km, routes[0].aqi), (10, 5, Some(3)));
        assert_eq!((routes[1].eta_minutes, routes[1].distance_km, routes[1].aqi), (15, 4, Some(1)));
    }

    #[tokio::test]
    async fn evaluate_caps_route_count() {
        let provider = LonAqi::new();
        let raw_routes = (1..=5).map(|i| raw(60.0 * i as f64, 1000.0, 2.0)).collect();
        let routes = evaluate(&provider, raw_routes).await.unwrap();

        assert_eq!(routes.len(), MAX_EVALUATED_ROUTES);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3 * MAX_EVALUATED_ROUTES);
        assert_eq!(routes[2].eta_minutes, 3);
    }

    #[tokio::test]
    async fn evaluate_drops_malformed_routes() {
        let provider = LonAqi::new();
        let mut broken = raw(600.0, 1000.0, 1.0);
        broken.polyline = None;

        let routes = evaluate(&provider, vec![broken, raw(300.0, 2000.0, 2.0)])
            .await
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].eta_minutes, 5);
    }

    #[tokio::test]
    async fn evaluate_fails_when_every_route_is_malformed() {
        let provider = LonAqi::new();
        let mut broken = raw(600.0, 1000.0, 1.0);
        broken.distance_m = None;

        assert_eq!(evaluate(&provider, vec![broken]).await, Err(EvaluationError::Empty));
        assert_eq!(evaluate(&provider, Vec::new()).await, Err(EvaluationError::Empty));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn evaluate_keeps_routes_without_aqi() {
        let provider = LonAqi::new();
        let routes = evaluate(&provider, vec![raw(600.0, 1000.0, 0.0)]).await.unwrap();
        assert_eq!(routes[0].aqi, None);
    }
}
