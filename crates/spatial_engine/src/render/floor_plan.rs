//! ASCII floor plan rasterization

use std::fmt;

use serde::Serialize;

use crate::config::{FloorPlanConfig, MAX_GRID_LIMIT};
use crate::error::{Result, SpatialError};
use crate::foundation::math::Vec2;
use crate::geometry::AABB;
use crate::scene::SceneSnapshot;
use super::legend::{self, LegendEntry, EMPTY_CELL, ROOM_BOUNDARY, WALL_SYMBOL};
use super::view::{View, ViewSelection};

/// One rendered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorPlanGrid {
    /// Projection used
    pub view: View,
    /// Grid rows, top row first
    pub rows: Vec<String>,
    /// Symbol assignments, in snapshot order
    pub legend: Vec<LegendEntry>,
    /// Cell size actually used, in meters
    pub cell_size: f32,
    /// Cell size the caller asked for
    pub requested_cell_size: f32,
    /// Screen-space coordinate of the bottom-left grid corner
    pub origin: Vec2,
    /// Screen-space size covered by the grid, in meters
    pub extent: Vec2,
    /// Whether [`fmt::Display`] prints the legend
    pub include_legend: bool,
}

impl FloorPlanGrid {
    /// Number of columns
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, |row| row.chars().count())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Character at `(col, row)`, row 0 being the top line
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        self.rows.get(row)?.chars().nth(col)
    }

    /// Whether nothing was rendered
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Legend symbol of an object
    pub fn symbol_of(&self, name: &str) -> Option<&str> {
        self.legend.iter().find(|e| e.name == name).map(|e| e.symbol.as_str())
    }
}

impl fmt::Display for FloorPlanGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- {} ---", self.view.label())?;
        if self.is_empty() {
            return write!(f, "(empty scene)");
        }
        writeln!(
            f,
            "Axes: horizontal={}, vertical={} | {:.1}m x {:.1}m (cell: {:.2}m, grid: {}x{})",
            self.view.horizontal().label(),
            self.view.vertical().label(),
            self.extent.x,
            self.extent.y,
            self.cell_size,
            self.cols(),
            self.row_count(),
        )?;
        writeln!(f)?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        if self.include_legend && !self.legend.is_empty() {
            let items: Vec<String> = self.legend.iter().map(|e| format!("{}={}", e.symbol, e.name)).collect();
            write!(f, "\n\nLegend: {}", items.join(", "))?;
        }
        Ok(())
    }
}

/// Grid geometry shared by all boxes of one view
struct Raster {
    origin: Vec2,
    cell: f32,
    cols: usize,
    rows: usize,
}

impl Raster {
    fn index(&self, coordinate: f32, origin: f32, count: usize) -> usize {
        let i = ((coordinate - origin) / self.cell).floor().max(0.0) as usize;
        i.min(count - 1)
    }

    /// Inclusive cell range covered by a half-open interval
    fn span(&self, lo: f32, hi: f32, origin: f32, count: usize) -> (usize, usize) {
        let start = self.index(lo, origin, count);
        let end = ((hi - origin) / self.cell).ceil() as isize - 1;
        let end = (end.max(0) as usize).min(count - 1).max(start);
        (start, end)
    }

    /// Column range and top-first row range of a projected box
    fn cells(&self, h: (f32, f32), v: (f32, f32)) -> ((usize, usize), (usize, usize)) {
        let cols = self.span(h.0, h.1, self.origin.x, self.cols);
        let (bottom, top) = self.span(v.0, v.1, self.origin.y, self.rows);
        (cols, (self.rows - 1 - top, self.rows - 1 - bottom))
    }
}

/// Renders snapshots into [`FloorPlanGrid`]s
#[derive(Debug, Clone, Default)]
pub struct FloorPlanRenderer {
    config: FloorPlanConfig,
}

impl FloorPlanRenderer {
    /// Create a renderer
    pub fn new(config: FloorPlanConfig) -> Self {
        Self { config }
    }

    /// Render one view with the configured cell size and grid cap
    pub fn render(&self, snapshot: &SceneSnapshot, view: View) -> Result<FloorPlanGrid> {
        self.render_with(snapshot, view, self.config.cell_size, self.config.max_grid)
    }

    /// Render one view
    ///
    /// The cell size grows when the scene would need more than
    /// `max_grid` cells on either side; the scene is never cropped.
    /// Overlapping footprints are drawn in snapshot order, last one wins.
    pub fn render_with(&self, snapshot: &SceneSnapshot, view: View, cell_size: f32, max_grid: usize) -> Result<FloorPlanGrid> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::Config(format!("cell_size must be positive, got {cell_size}")));
        }
        if !(1..=MAX_GRID_LIMIT).contains(&max_grid) {
            return Err(SpatialError::Config(format!("max_grid must be between 1 and {MAX_GRID_LIMIT}, got {max_grid}")));
        }

        let horizontal = view.horizontal();
        let vertical = view.vertical();
        let project = |aabb: &AABB| (horizontal.project(aabb), vertical.project(aabb));

        let room = snapshot.room().map(project);
        let boxes: Vec<_> = snapshot.iter().map(|(object, aabb)| (object.name.as_str(), project(aabb))).collect();

        let taken: &[&str] = if room.is_some() { &["W"] } else { &[] };
        let mut legend = legend::assign_symbols(boxes.iter().map(|(name, _)| *name), taken);
        if room.is_some() {
            legend.push(LegendEntry { symbol: WALL_SYMBOL.to_string(), name: ROOM_BOUNDARY.to_string() });
        }

        let Some((lo, hi)) = boxes.iter()
            .map(|(_, b)| *b)
            .chain(room)
            .map(|(h, v)| (Vec2::new(h.0, v.0), Vec2::new(h.1, v.1)))
            .reduce(|(lo, hi), (l, h)| (lo.inf(&l), hi.sup(&h)))
        else {
            return Ok(FloorPlanGrid {
                view,
                rows: Vec::new(),
                legend,
                cell_size,
                requested_cell_size: cell_size,
                origin: Vec2::zeros(),
                extent: Vec2::zeros(),
                include_legend: self.config.include_legend,
            });
        };

        let pad = Vec2::repeat(cell_size);
        let origin = lo - pad;
        let extent = (hi + pad) - origin;
        let cap = max_grid as f32;
        let cell = cell_size.max(extent.x / cap).max(extent.y / cap);
        let count = |span: f32| ((span / cell).ceil() as usize).clamp(1, max_grid);
        let raster = Raster { origin, cell, cols: count(extent.x), rows: count(extent.y) };

        let mut grid = vec![vec![EMPTY_CELL; raster.cols]; raster.rows];

        if let Some((h, v)) = room {
            let ((c0, c1), (r0, r1)) = raster.cells(h, v);
            for c in c0..=c1 {
                grid[r0][c] = WALL_SYMBOL;
                grid[r1][c] = WALL_SYMBOL;
            }
            for row in &mut grid[r0..=r1] {
                row[c0] = WALL_SYMBOL;
                row[c1] = WALL_SYMBOL;
            }
        }

        for ((_, (h, v)), entry) in boxes.iter().zip(&legend) {
            let symbol = entry.display_char();
            let ((c0, c1), (r0, r1)) = raster.cells(*h, *v);
            for row in &mut grid[r0..=r1] {
                row[c0..=c1].fill(symbol);
            }
        }

        log::debug!(
            "Rendered {} view: {}x{} cells of {:.3} m ({} objects)",
            view, raster.cols, raster.rows, cell, boxes.len()
        );

        Ok(FloorPlanGrid {
            view,
            rows: grid.into_iter().map(|row| row.into_iter().collect()).collect(),
            legend,
            cell_size: cell,
            requested_cell_size: cell_size,
            origin,
            extent,
            include_legend: self.config.include_legend,
        })
    }

    /// Render a selection of views
    pub fn render_selection(
        &self,
        snapshot: &SceneSnapshot,
        selection: ViewSelection,
        cell_size: f32,
        max_grid: usize,
    ) -> Result<Vec<FloorPlanGrid>> {
        selection.views()
            .into_iter()
            .map(|view| self.render_with(snapshot, view, cell_size, max_grid))
            .collect()
    }

    /// Render a selection of views as one text block
    pub fn render_text(&self, snapshot: &SceneSnapshot, selection: ViewSelection) -> Result<String> {
        let grids = self.render_selection(snapshot, selection, self.config.cell_size, self.config.max_grid)?;
        Ok(grids.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::SceneObject;

    fn table_and_chair() -> SceneSnapshot {
        SceneSnapshot::new(vec![
            SceneObject::new("Table", Vec3::new(1.0, 1.0, 0.4), Vec3::new(0.5, 0.5, 0.4)),
            SceneObject::new("Chair", Vec3::new(3.0, 1.0, 0.45), Vec3::new(0.25, 0.25, 0.45)),
        ], None).unwrap()
    }

    #[test]
    fn test_top_view_layout() {
        let grid = FloorPlanRenderer::default().render_with(&table_and_chair(), View::Top, 0.25, 120).unwrap();
        // X spans [0.5, 3.25] padded by one cell, Y spans [0.5, 1.5] padded
        assert_eq!(grid.cols(), 13);
        assert_eq!(grid.row_count(), 6);
        assert_eq!(grid.symbol_of("Table"), Some("T"));
        assert_eq!(grid.symbol_of("Chair"), Some("C"));
        assert_eq!(grid.cell(0, 0), Some('.'));
        // Table occupies columns 1..=4, Chair is to its right
        assert_eq!(grid.cell(1, 2), Some('T'));
        assert_eq!(grid.cell(4, 2), Some('T'));
        assert_eq!(grid.cell(5, 2), Some('.'));
        assert_eq!(grid.cell(10, 2), Some('C'));
    }

    #[test]
    fn test_cell_size_grows_to_fit() {
        let grid = FloorPlanRenderer::default().render_with(&table_and_chair(), View::Top, 0.01, 20).unwrap();
        assert!(grid.cols() <= 20 && grid.row_count() <= 20);
        assert!(grid.cell_size > 0.01);
        assert!(grid.rows.iter().any(|row| row.contains('C')));
        assert!(grid.rows.iter().any(|row| row.contains('T')));
    }

    #[test]
    fn test_last_object_wins() {
        let snapshot = SceneSnapshot::new(vec![
            SceneObject::new("Rug", Vec3::new(0.0, 0.0, 0.005), Vec3::new(1.0, 1.0, 0.005)),
            SceneObject::new("Ottoman", Vec3::new(0.0, 0.0, 0.2), Vec3::new(0.2, 0.2, 0.2)),
        ], None).unwrap();
        let grid = FloorPlanRenderer::default().render_with(&snapshot, View::Top, 0.1, 120).unwrap();
        let middle = grid.row_count() / 2;
        assert_eq!(grid.cell(grid.cols() / 2, middle), Some('O'));
        assert_eq!(grid.cell(2, middle), Some('R'));
    }

    #[test]
    fn test_front_view_puts_floor_at_bottom() {
        let snapshot = SceneSnapshot::new(vec![
            SceneObject::new("Crate", Vec3::new(0.0, 0.0, 0.25), Vec3::new(0.5, 0.2, 0.25)),
            SceneObject::new("Lamp", Vec3::new(0.0, 0.0, 1.75), Vec3::new(0.25, 0.2, 0.25)),
        ], None).unwrap();
        let grid = FloorPlanRenderer::default().render_with(&snapshot, View::Front, 0.5, 120).unwrap();
        assert_eq!(grid.rows, vec!["....", ".LL.", "....", "....", ".CC.", "...."]);
    }

    #[test]
    fn test_room_outline() {
        let room = AABB::from_dimensions(2.0, 2.0, 2.5);
        let snapshot = SceneSnapshot::empty(Some(room));
        let grid = FloorPlanRenderer::default().render_with(&snapshot, View::Top, 0.5, 120).unwrap();
        assert_eq!(grid.rows, vec!["......", ".WWWW.", ".W..W.", ".W..W.", ".WWWW.", "......"]);
        assert_eq!(grid.symbol_of(ROOM_BOUNDARY), Some("W"));
    }

    #[test]
    fn test_empty_scene() {
        let grid = FloorPlanRenderer::default().render(&SceneSnapshot::empty(None), View::Top).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.cols(), 0);
        assert!(grid.to_string().contains("empty scene"));
    }

    #[test]
    fn test_text_contains_header_and_legend() {
        let text = FloorPlanRenderer::default().render_text(&table_and_chair(), ViewSelection::All).unwrap();
        assert_eq!(text.matches("--- ").count(), 6);
        assert!(text.contains("Axes: horizontal=+X, vertical=+Y"));
        assert!(text.contains("Legend: T=Table, C=Chair"));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let renderer = FloorPlanRenderer::default();
        assert!(renderer.render_with(&table_and_chair(), View::Top, 0.0, 120).is_err());
        assert!(renderer.render_with(&table_and_chair(), View::Top, 0.25, 0).is_err());
        assert!(matches!(
            renderer.render_with(&table_and_chair(), View::Top, 0.25, MAX_GRID_LIMIT + 1),
            Err(SpatialError::Config(_))
        ));
        assert!(renderer.render_with(&table_and_chair(), View::Top, 0.25, MAX_GRID_LIMIT).is_ok());
    }
}
