//! The map widget contract and the transforms that feed it.
//!
//! The actual tile renderer lives in the embedding shell; this module only
//! knows the capability it exposes ([`MapViewport`]) plus the two transforms
//! the planning payload needs on its way there: bounding-box translation
//! ([`corner_bounds`]) and route-path decoding ([`decode_polyline`]).

mod bounds;
mod polyline;

pub use bounds::{corner_bounds, BoundsError};
pub use polyline::{decode_polyline, PolylineError};

use log::error;

use crate::models::LatLng;

/// Padding passed to every bounds fit, in pixels.
pub const FIT_PADDING_PX: u32 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub popup: String,
}

/// What the map renderer must be able to do. `fit_bounds` may fail on a
/// degenerate box; everything else is fire-and-forget.
pub trait MapViewport {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn fit_bounds(&mut self, corners: (LatLng, LatLng), padding_px: u32) -> anyhow::Result<()>;
    fn set_markers(&mut self, markers: Vec<Marker>);
    fn set_polyline(&mut self, path: Vec<LatLng>);
    /// Forces the widget to re-measure its container, required after
    /// fullscreen transitions.
    fn invalidate_size(&mut self);
}

/// Fits the viewport to a wire-order bounding box. A malformed box or a
/// failing fit is logged and leaves the viewport unchanged.
pub fn fit_viewport(map: &mut dyn MapViewport, bbox: &[f64]) {
    if bbox.len() < 4 {
        return;
    }

    let corners = match corner_bounds(bbox) {
        Ok(corners) => corners,
        Err(err) => {
            error!("Error setting map bounds: {err}");
            return;
        }
    };

    if let Err(err) = map.fit_bounds(corners, FIT_PADDING_PX) {
        error!("Error setting map bounds: {err}");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Recording stand-in for the real renderer.
    #[derive(Default)]
    pub struct FakeViewport {
        pub fitted: Vec<((LatLng, LatLng), u32)>,
        pub markers: Vec<Marker>,
        pub path: Vec<LatLng>,
        pub invalidations: usize,
        pub fail_fit: bool,
    }

    impl MapViewport for FakeViewport {
        fn set_view(&mut self, _center: LatLng, _zoom: u8) {}

        fn fit_bounds(
            &mut self,
            corners: (LatLng, LatLng),
            padding_px: u32,
        ) -> anyhow::Result<()> {
            if self.fail_fit {
                anyhow::bail!("degenerate bounds");
            }
            self.fitted.push((corners, padding_px));
            Ok(())
        }

        fn set_markers(&mut self, markers: Vec<Marker>) {
            self.markers = markers;
        }

        fn set_polyline(&mut self, path: Vec<LatLng>) {
            self.path = path;
        }

        fn invalidate_size(&mut self) {
            self.invalidations += 1;
        }
    }
}
