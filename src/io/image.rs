//! PNG export of a cell grid with transparent background

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::io::configuration::{
    BACKGROUND, BORDER_PX, MARKED_BORDER, MARKED_FILL, UNMARKED_BORDER, UNMARKED_FILL,
};
use crate::io::error::{Result, ShapeError, create_dir_error, invalid_parameter};
use crate::spatial::{CellGrid, CellState, PixelRect};

/// Render the grid onto a canvas of at least the grid's pixel size
///
/// Boxes are drawn at their grid positions from the top-left corner; any extra
/// canvas area stays background.
pub fn render_grid(grid: &CellGrid, canvas: (u32, u32)) -> RgbaImage {
    let (grid_width, grid_height) = grid.pixel_size();
    let width = canvas.0.max(grid_width).max(1);
    let height = canvas.1.max(grid_height).max(1);
    let mut img = RgbaImage::from_pixel(width, height, Rgba(BACKGROUND));

    for (id, state) in grid.cells() {
        let Some(rect) = grid.cell_rect(id) else {
            continue;
        };
        let (fill, border) = match state {
            CellState::Marked => (MARKED_FILL, MARKED_BORDER),
            CellState::Unmarked | CellState::Absent => (UNMARKED_FILL, UNMARKED_BORDER),
        };
        draw_box(&mut img, rect, fill, border);
    }

    img
}

fn draw_box(img: &mut RgbaImage, rect: PixelRect, fill: [u8; 4], border: [u8; 4]) {
    for dy in 0..rect.size {
        for dx in 0..rect.size {
            let on_border = dx < BORDER_PX
                || dy < BORDER_PX
                || dx + BORDER_PX >= rect.size
                || dy + BORDER_PX >= rect.size;
            let color = if on_border { border } else { fill };
            if let Some(pixel) = img.get_pixel_mut_checked(rect.x + dx, rect.y + dy) {
                *pixel = Rgba(color);
            }
        }
    }
}

/// Export the grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &CellGrid, output_path: &Path) -> Result<()> {
    if grid.cell_count() == 0 {
        return Err(invalid_parameter(
            "grid",
            &"empty",
            &"no cells to render",
        ));
    }

    let img = render_grid(grid, grid.pixel_size());

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| create_dir_error(parent, e))?;
    }

    img.save(output_path)
        .map_err(|e| ShapeError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %output_path.display(), "exported shape image");
    Ok(())
}
