use safety_shared::models::Coordinate;
use std::f64::consts::PI;

/// Web-Mercator tile edge, in CSS pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude beyond which Web-Mercator is undefined.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Meters per pixel at the equator for zoom 0.
const EQUATOR_M_PER_PX: f64 = 156_543.033_92;

const TILE_URL: &str = "https://tile.openstreetmap.org";

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

/// Project a coordinate to world pixels at `zoom` (origin top-left).
pub fn project(coord: Coordinate, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = coord.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (coord.longitude + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    (x, y)
}

/// Inverse of `project`.
pub fn unproject(x: f64, y: f64, zoom: u8) -> Coordinate {
    let size = world_size(zoom);
    let longitude = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    let latitude = n.sinh().atan().to_degrees();
    Coordinate::new(latitude, longitude)
}

/// Pixel offset of `point` from the view center.
pub fn screen_offset(point: Coordinate, center: Coordinate, zoom: u8) -> (f64, f64) {
    let (px, py) = project(point, zoom);
    let (cx, cy) = project(center, zoom);
    (px - cx, py - cy)
}

/// Shift `center` by a screen-space drag of (`dx`, `dy`) pixels.
pub fn pan(center: Coordinate, zoom: u8, dx: f64, dy: f64) -> Coordinate {
    let (cx, cy) = project(center, zoom);
    let size = world_size(zoom);
    let y = (cy - dy).clamp(0.0, size);
    let moved = unproject(cx - dx, y, zoom);
    Coordinate::new(moved.latitude, wrap_longitude(moved.longitude))
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Ground resolution at `latitude`.
pub fn meters_per_pixel(latitude: f64, zoom: u8) -> f64 {
    EQUATOR_M_PER_PX * latitude.to_radians().cos() / 2f64.powi(zoom as i32)
}

/// One map tile, positioned relative to the view center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    pub left: f64,
    pub top: f64,
}

impl Tile {
    pub fn url(&self) -> String {
        format!("{}/{}/{}/{}.png", TILE_URL, self.z, self.x, self.y)
    }
}

/// Tiles covering a `view_w` x `view_h` view centered on `center`.
/// Columns wrap around the antimeridian; rows outside the world are skipped.
pub fn visible_tiles(center: Coordinate, zoom: u8, view_w: f64, view_h: f64) -> Vec<Tile> {
    let (cx, cy) = project(center, zoom);
    let count = 1i64 << zoom;

    let first_col = ((cx - view_w / 2.0) / TILE_SIZE).floor() as i64;
    let last_col = ((cx + view_w / 2.0) / TILE_SIZE).floor() as i64;
    let first_row = (((cy - view_h / 2.0) / TILE_SIZE).floor() as i64).max(0);
    let last_row = (((cy + view_h / 2.0) / TILE_SIZE).floor() as i64).min(count - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            tiles.push(Tile {
                x: col.rem_euclid(count) as u32,
                y: row as u32,
                z: zoom,
                left: col as f64 * TILE_SIZE - cx,
                top: row as f64 * TILE_SIZE - cy,
            });
        }
    }
    tiles
}

/// Center and the closest zoom at which every point fits inside
/// `fill` of the view. `None` for an empty slice.
pub fn fit_bounds(
    points: &[Coordinate],
    view_w: f64,
    view_h: f64,
    min_zoom: u8,
    max_zoom: u8,
) -> Option<(Coordinate, u8)> {
    const FILL: f64 = 0.8;

    let first = points.first()?;
    let (mut south, mut north) = (first.latitude, first.latitude);
    let (mut west, mut east) = (first.longitude, first.longitude);
    for p in &points[1..] {
        south = south.min(p.latitude);
        north = north.max(p.latitude);
        west = west.min(p.longitude);
        east = east.max(p.longitude);
    }

    let sw = Coordinate::new(south, west);
    let ne = Coordinate::new(north, east);
    let zoom = (min_zoom..=max_zoom)
        .rev()
        .find(|&z| {
            let (x0, y0) = project(sw, z);
            let (x1, y1) = project(ne, z);
            (x1 - x0).abs() <= view_w * FILL && (y1 - y0).abs() <= view_h * FILL
        })
        .unwrap_or(min_zoom);

    // Center in projected space so the box is visually centered.
    let (x0, y0) = project(sw, zoom);
    let (x1, y1) = project(ne, zoom);
    let center = unproject((x0 + x1) / 2.0, (y0 + y1) / 2.0, zoom);
    Some((center, zoom))
}
