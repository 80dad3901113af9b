//! Route ranking and labeling.
//!
//! Labels are assigned in one pass over the routes in provider order:
//! the first route with the lowest ETA is "Fastest Route", routes with the
//! lowest AQI are "Cleanest Air Route", and among the rest the lowest
//! balanced score becomes "Balanced Route".

use crate::models::{CandidateRoute, RouteLabel};

/// Weight of normalized travel time in the balanced score.
pub const ETA_WEIGHT: f64 = 0.6;
/// Weight of normalized air quality in the balanced score.
pub const AQI_WEIGHT: f64 = 0.4;
/// AQI term used for a route whose samples all failed.
pub const MISSING_AQI_SCORE: f64 = 2.0;

/// Label routes in place. Any previous labels are discarded first, so
/// repeated calls give the same result.
pub fn label_routes(routes: &mut [CandidateRoute]) {
    for route in routes.iter_mut() {
        route.name = RouteLabel::Alternative;
    }

    let Some(fastest_eta) = routes.iter().map(|route| route.eta_minutes).min() else {
        return;
    };
    let cleanest_aqi = routes.iter().filter_map(|route| route.aqi).min();

    let mut fastest_assigned = false;
    let mut scored: Vec<(usize, f64)> = Vec::new();

    for (idx, route) in routes.iter_mut().enumerate() {
        if !fastest_assigned && route.eta_minutes == fastest_eta {
            route.name = RouteLabel::Fastest;
            fastest_assigned = true;
        } else if route.aqi.is_some() && route.aqi == cleanest_aqi {
            route.name = RouteLabel::CleanestAir;
        } else if let Some(cleanest) = cleanest_aqi {
            scored.push((idx, balanced_score(route, fastest_eta, cleanest)));
        }
    }

    // min_by keeps the first of equal scores, i.e. provider order.
    let best = scored
        .iter()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(idx, _)| *idx);
    if let Some(idx) = best {
        routes[idx].name = RouteLabel::Balanced;
    }
}

/// Label an owned route list; see [`label_routes`].
pub fn label(mut routes: Vec<CandidateRoute>) -> Vec<CandidateRoute> {
    label_routes(&mut routes);
    routes
}

fn balanced_score(route: &CandidateRoute, fastest_eta: u32, cleanest_aqi: u32) -> f64 {
    let eta_score = if fastest_eta == 0 {
        1.0
    } else {
        f64::from(route.eta_minutes) / f64::from(fastest_eta)
    };
    let aqi_score = match route.aqi {
        Some(aqi) => f64::from(aqi) / f64::from(cleanest_aqi.max(1)),
        None => MISSING_AQI_SCORE,
    };
    eta_score * ETA_WEIGHT + aqi_score * AQI_WEIGHT
}
