//! City partitioning into a regular grid of rectangular zones.

use geo::{coord, Point, Polygon, Rect};

use crate::error::ModelError;

/// A rectangular spatial unit of analysis. Immutable once partitioned.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Dense id in `0..rows*cols`, assigned row-major.
    pub id: usize,
    pub boundary: Polygon<f64>,
    pub centroid: Point<f64>,
}

/// Split `extent` into `rows * cols` equal rectangles.
///
/// Zone `row * cols + col` covers the cell in row `row` (counting from the
/// extent minimum) and column `col`; iteration order is row-major, so zone
/// ids match vector positions everywhere downstream.
pub fn partition(extent: Rect<f64>, rows: usize, cols: usize) -> Result<Vec<Zone>, ModelError> {
    if rows == 0 || cols == 0 {
        return Err(ModelError::Config {
            reason: format!("grid dimensions must be positive, got {}x{}", rows, cols),
        });
    }

    let width = extent.width();
    let height = extent.height();
    if !(width > 0.0) || !(height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Err(ModelError::EmptyExtent { width, height });
    }

    let x_step = width / cols as f64;
    let y_step = height / rows as f64;
    let origin = extent.min();

    let mut zones = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            let x = origin.x + col as f64 * x_step;
            let y = origin.y + row as f64 * y_step;
            let cell = Rect::new(
                coord! { x: x, y: y },
                coord! { x: x + x_step, y: y + y_step },
            );
            zones.push(Zone {
                id: row * cols + col,
                boundary: cell.to_polygon(),
                centroid: cell.center().into(),
            });
        }
    }

    Ok(zones)
}
