//! Geographic coordinate type.
//!
//! Coordinates are stored `(lon, lat)` in that order, matching the x/y
//! convention of the road graphs this workspace consumes.  Nearest-node
//! lookups treat them as planar x/y, so no projection happens here.

/// A WGS-84 coordinate, longitude first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `true` if neither component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Shift by a fixed number of degrees in each axis.
    #[inline]
    pub fn offset(self, d_lon: f64, d_lat: f64) -> Self {
        Self::new(self.lon + d_lon, self.lat + d_lat)
    }

    /// Arithmetic mean of a set of points, or `None` for an empty set.
    pub fn centroid<I>(points: I) -> Option<GeoPoint>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let (mut lon, mut lat, mut n) = (0.0, 0.0, 0usize);
        for p in points {
            lon += p.lon;
            lat += p.lat;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(GeoPoint::new(lon / n as f64, lat / n as f64))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}
