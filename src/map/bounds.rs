//! Translation between the routing provider's bounding-box convention and
//! the two-corner, display-order form a viewport fit expects.

use thiserror::Error;

use crate::models::LatLng;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    #[error("bounding box must have 4 or 6 elements, got {0}")]
    MalformedBox(usize),
}

/// Converts a wire bounding box into `(south-west, north-east)` corners in
/// display order. The 4-element form is `[min_lon, min_lat, max_lon,
/// max_lat]`; the 6-element form carries min/max triples with an altitude
/// component, of which only positions 0, 1, 3, 4 are used.
pub fn corner_bounds(bbox: &[f64]) -> Result<(LatLng, LatLng), BoundsError> {
    let (min_lon, min_lat, max_lon, max_lat) = match bbox.len() {
        4 => (bbox[0], bbox[1], bbox[2], bbox[3]),
        6 => (bbox[0], bbox[1], bbox[3], bbox[4]),
        n => return Err(BoundsError::MalformedBox(n)),
    };

    Ok((
        LatLng::new(min_lat, min_lon),
        LatLng::new(max_lat, max_lon),
    ))
}
