//! Building an [OccupancyGrid] from external data: a matrix of walkability flags, an ASCII map
//! (optionally with a [Moving AI](https://movingai.com/benchmarks/formats.html) `.map` header)
//! or an image in which black pixels mark obstacles.
use std::fs;
use std::path::Path;

use image::DynamicImage;
use log::info;
use thiserror::Error;

use crate::occupancy_grid::OccupancyGrid;

/// Errors raised while loading a map.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read map: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Map contains no cells")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid map header line: {0:?}")]
    Header(String),

    #[error("Header declares a {declared_width}x{declared_height} map but it is {width}x{height}")]
    SizeMismatch {
        declared_width: usize,
        declared_height: usize,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;

/// Builds a grid from rows of walkability flags, `rows[y][x]` being `true` for a passable cell.
pub fn from_walkable_rows<R: AsRef<[bool]>>(
    rows: &[R],
    allow_diagonal_move: bool,
) -> Result<OccupancyGrid> {
    let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
    if width == 0 {
        return Err(LoadError::Empty);
    }
    for (row, r) in rows.iter().enumerate() {
        let found = r.as_ref().len();
        if found != width {
            return Err(LoadError::Ragged {
                row,
                expected: width,
                found,
            });
        }
    }
    Ok(OccupancyGrid::with_movement(
        width,
        rows.len(),
        allow_diagonal_move,
        |x, y| rows[y].as_ref()[x],
    ))
}

fn is_passable_tile(tile: char) -> bool {
    matches!(tile, '.' | 'G' | 'S')
}

fn parse_header_value(line: Option<&str>, key: &str) -> Result<usize> {
    let line = line.ok_or_else(|| LoadError::Header(format!("missing {key}")))?;
    line.split_once(' ')
        .filter(|(k, _)| *k == key)
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .ok_or_else(|| LoadError::Header(line.to_owned()))
}

/// Parses an ASCII map. `.`, `G` and `S` are passable, every other character is an obstacle.
///
/// If the text starts with a `type` line it is read as a Moving AI map: `type`, `height`,
/// `width` and `map` lines precede the tiles, and the declared size has to match them.
pub fn parse_ascii_map(text: &str) -> Result<OccupancyGrid> {
    let mut lines = text.lines().map(str::trim_end).peekable();
    while lines.peek().is_some_and(|l| l.is_empty()) {
        lines.next();
    }
    let mut declared = None;
    if lines.peek().is_some_and(|l| l.starts_with("type")) {
        lines.next();
        let height = parse_header_value(lines.next(), "height")?;
        let width = parse_header_value(lines.next(), "width")?;
        match lines.next() {
            Some("map") => {}
            other => return Err(LoadError::Header(other.unwrap_or_default().to_owned())),
        }
        declared = Some((width, height));
    }
    let rows: Vec<Vec<bool>> = lines
        .filter(|l| !l.is_empty())
        .map(|l| l.chars().map(is_passable_tile).collect())
        .collect();
    let grid = from_walkable_rows(&rows, true)?;
    if let Some((declared_width, declared_height)) = declared {
        if declared_width != grid.width() || declared_height != grid.height() {
            return Err(LoadError::SizeMismatch {
                declared_width,
                declared_height,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }
    info!("Parsed {}x{} ASCII map", grid.width(), grid.height());
    Ok(grid)
}

/// Reads and parses an ASCII map file, see [parse_ascii_map].
pub fn load_ascii_map<P: AsRef<Path>>(path: P) -> Result<OccupancyGrid> {
    parse_ascii_map(&fs::read_to_string(path)?)
}

/// One cell per pixel; a pixel whose color channels are all zero is an obstacle.
pub fn from_image(image: &DynamicImage) -> OccupancyGrid {
    let rgb = image.to_rgb8();
    OccupancyGrid::new(rgb.width() as usize, rgb.height() as usize, |x, y| {
        let [r, g, b] = rgb.get_pixel(x as u32, y as u32).0;
        r as u32 + g as u32 + b as u32 != 0
    })
}

/// Opens an image file and converts it with [from_image].
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<OccupancyGrid> {
    let grid = from_image(&image::open(path.as_ref())?);
    info!(
        "Loaded {}x{} map image from {}",
        grid.width(),
        grid.height(),
        path.as_ref().display()
    );
    Ok(grid)
}
