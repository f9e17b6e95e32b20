use std::f64::consts::PI;

use geo::Coord;

/// Maps geographic coordinates into a square integer world coordinate space
/// with `2^precision_bits` units per side
pub trait Projection {
    fn project(&self, coord: Coord<f64>, precision_bits: u8) -> Coord<i64>;
}

impl<F> Projection for F
where
    F: Fn(Coord<f64>, u8) -> Coord<i64>,
{
    fn project(&self, coord: Coord<f64>, precision_bits: u8) -> Coord<i64> {
        self(coord, precision_bits)
    }
}

/// Spherical Web Mercator (EPSG:3857) projection of WGS84 longitude/latitude
/// pairs. The origin is at the north-west corner of the world.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebMercator;

impl Projection for WebMercator {
    fn project(&self, coord: Coord<f64>, precision_bits: u8) -> Coord<i64> {
        // place infinite and NaN coordinates off the edge of the plane
        let lon = if coord.x.is_finite() { coord.x } else { 360.0 };
        let lat = if coord.y.is_finite() { coord.y } else { 89.9 };

        // latitude must be limited to prevent overflow near the poles
        let lat = lat.clamp(-89.9, 89.9);
        let lon = lon.clamp(-360.0, 360.0);

        let n = 2f64.powi(i32::from(precision_bits.min(62)));
        let lat_rad = lat.to_radians();
        let x = n * ((lon + 180.0) / 360.0);
        let y = n * (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;

        Coord {
            x: x as i64,
            y: y as i64,
        }
    }
}
