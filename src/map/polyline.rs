//! Decoder for the encoded-polyline route path the planning service returns
//! (Google polyline algorithm, precision 5).

use thiserror::Error;

use crate::models::LatLng;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid polyline character {0:#x} at byte {1}")]
    InvalidChar(u8, usize),
    #[error("truncated polyline: coordinate ends mid-value at byte {0}")]
    Truncated(usize),
}

const PRECISION: f64 = 1e5;

/// Decodes an encoded polyline into display-order coordinates.
pub fn decode_polyline(encoded: &str) -> Result<Vec<LatLng>, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut coords = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while index < bytes.len() {
        lat += decode_value(bytes, &mut index)?;
        lng += decode_value(bytes, &mut index)?;
        coords.push(LatLng::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(coords)
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated(*index));
        };
        if byte < 63 {
            return Err(PolylineError::InvalidChar(byte, *index));
        }
        *index += 1;

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    // Zig-zag: lowest bit is the sign.
    if result & 1 != 0 {
        Ok(!(result >> 1))
    } else {
        Ok(result >> 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference string from the polyline algorithm documentation.
    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    #[test]
    fn decodes_reference_path() {
        let path = decode_polyline(REFERENCE).unwrap();
        assert_eq!(path.len(), 3);
        assert!((path[0].lat - 38.5).abs() < 1e-9);
        assert!((path[0].lng - -120.2).abs() < 1e-9);
        assert!((path[1].lat - 40.7).abs() < 1e-9);
        assert!((path[1].lng - -120.95).abs() < 1e-9);
        assert!((path[2].lat - 43.252).abs() < 1e-9);
        assert!((path[2].lng - -126.453).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_an_empty_path() {
        assert_eq!(decode_polyline("").unwrap(), vec![]);
    }

    #[test]
    fn truncated_input_errors() {
        // Drop the final byte so the last longitude ends mid-value.
        let truncated = &REFERENCE[..REFERENCE.len() - 1];
        assert!(matches!(
            decode_polyline(truncated),
            Err(PolylineError::Truncated(_))
        ));
    }

    #[test]
    fn out_of_range_byte_errors() {
        assert_eq!(
            decode_polyline("_p~iF~ps|U "),
            Err(PolylineError::InvalidChar(b' ', 10))
        );
    }
}
