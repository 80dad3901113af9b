//! Google encoded polylines, decoded into internal `(lat, lon)` order.

use ecoroute_core::{Coordinate, Polyline, ProviderError};

/// Precision used by Google Directions overview polylines.
pub const GOOGLE_PRECISION: u32 = 5;

pub fn decode(encoded: &str, precision: u32) -> Result<Polyline, ProviderError> {
    let line = ::polyline::decode_polyline(encoded, precision)
        .map_err(|err| ProviderError::Payload(format!("invalid polyline: {:?}", err)))?;

    // geo-types keeps x = lon, y = lat.
    line.0
        .into_iter()
        .map(|point| {
            Coordinate::new(point.y, point.x).ok_or_else(|| {
                ProviderError::Payload("polyline coordinate out of range".to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn decodes_reference_polyline() {
        let polyline = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", GOOGLE_PRECISION).unwrap();
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

        assert_eq!(polyline.len(), expected.len());
        for (point, (lat, lon)) in polyline.iter().zip(expected) {
            assert!(close(point.lat, lat), "lat {} != {}", point.lat, lat);
            assert!(close(point.lon, lon), "lon {} != {}", point.lon, lon);
        }
    }

    #[test]
    fn empty_string_is_empty_polyline() {
        assert!(decode("", GOOGLE_PRECISION).unwrap().is_empty());
    }

    #[test]
    fn truncated_input_is_rejected() {
        assert!(matches!(
            decode("_p~iF~ps|", GOOGLE_PRECISION),
            Err(ProviderError::Payload(_))
        ));
    }

    #[test]
    fn invalid_characters_are_rejected() {
        assert!(decode("_p~iF\u{1}", GOOGLE_PRECISION).is_err());
    }
}
