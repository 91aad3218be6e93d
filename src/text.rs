//! Plain-text maze format.
//!
//! The body is a `(2R+1) x (2C+1)` character grid over space, `-` and `|`:
//! even-row/odd-col slots are horizontal walls, odd-row/even-col slots are
//! vertical walls, everything else (corners, cell interiors) is written as a
//! space. Up to two trailing `row,col` lines name the start and then the end
//! cell. Any other line is ignored.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{ParseError, Result};
use crate::grid::{Direction, Grid, Point, RawCell, RawGrid};

/// Matches an endpoint line. The format carries single-digit coordinates
/// only, so `10,0` is not an endpoint line and gets dropped on load.
fn endpoint(line: &str) -> Option<Point> {
    let bytes = line.as_bytes();
    if bytes.len() == 3
        && bytes[0].is_ascii_digit()
        && bytes[1] == b','
        && bytes[2].is_ascii_digit()
    {
        Some(Point {
            row: (bytes[0] - b'0') as usize,
            col: (bytes[2] - b'0') as usize,
        })
    } else {
        None
    }
}

fn is_body(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c == '-' || c == '|' || c.is_whitespace())
}

/// Decodes the text format into construction data.
///
/// The first endpoint line found names the start, the second the end. Row
/// count comes from the body line count, column count from the number of
/// `-` characters in the first body line (the top boundary is always solid).
pub fn decode(text: &str) -> std::result::Result<RawGrid, ParseError> {
    let mut start = None;
    let mut end = None;
    for line in text.lines() {
        if let Some(point) = endpoint(line) {
            if start.is_none() {
                start = Some(point);
            } else if end.is_none() {
                end = Some(point);
            }
        }
    }

    let body: Vec<&str> = text.lines().filter(|line| is_body(line)).collect();
    if body.is_empty() {
        return Err(ParseError::MissingBody);
    }
    if body.len() < 3 || body.len() % 2 == 0 {
        return Err(ParseError::TruncatedBody(body.len()));
    }

    let rows = (body.len() - 1) / 2;
    let cols = body[0].matches('-').count();
    if cols == 0 {
        return Err(ParseError::MissingColumns);
    }

    let width = 2 * cols + 1;
    let mut lines: Vec<Vec<char>> = Vec::with_capacity(body.len());
    for (index, line) in body.iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != width {
            return Err(ParseError::RaggedLine {
                line: index,
                expected: width,
                found: chars.len(),
            });
        }
        lines.push(chars);
    }

    let mut cells = vec![vec![RawCell::default(); cols]; rows];
    for y in 0..rows * 2 + 1 {
        for x in 0..cols * 2 + 1 {
            let a = x / 2;
            let b = y / 2;

            if y % 2 == 0 && x % 2 != 0 {
                // horizontal wall slot; interior slots feed the two cells
                // they separate, boundary slots only the inner one
                let active = lines[y][x] == '-';
                if b < rows {
                    cells[b][a].up = active;
                    if b > 0 {
                        cells[b - 1][a].down = active;
                    }
                } else {
                    cells[b - 1][a].down = active;
                }
            } else if y % 2 != 0 && x % 2 == 0 {
                // vertical wall slot
                let active = lines[y][x] == '|';
                if a < cols {
                    cells[b][a].left = active;
                    if a > 0 {
                        cells[b][a - 1].right = active;
                    }
                } else {
                    cells[b][a - 1].right = active;
                }
            }
        }
    }

    debug!("decoded {}x{} maze, start={:?} end={:?}", rows, cols, start, end);

    Ok(RawGrid { cells, start, end })
}

/// Renders a grid back into the text format.
///
/// Walks the same `(2R+1) x (2C+1)` index space as the decoder, reading each
/// wall through the clamped cell lookup: the far east/south lines read the
/// edge cells' `Right`/`Down` walls, every other line the `Left`/`Up` walls.
pub fn encode(grid: &Grid) -> String {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut out = String::with_capacity((2 * cols + 2) * (2 * rows + 1) + 8);

    for row in 0..rows * 2 + 1 {
        for col in 0..cols * 2 + 1 {
            let cell = grid.cell_clamped((row / 2) as isize, (col / 2) as isize);

            let slot = if row % 2 != 0 && col % 2 == 0 {
                let id = if col == cols * 2 {
                    cell.wall(Direction::Right)
                } else {
                    cell.wall(Direction::Left)
                };
                if grid.wall(id).activated() {
                    '|'
                } else {
                    ' '
                }
            } else if row % 2 == 0 && col % 2 != 0 {
                let id = if row == rows * 2 {
                    cell.wall(Direction::Down)
                } else {
                    cell.wall(Direction::Up)
                };
                if grid.wall(id).activated() {
                    '-'
                } else {
                    ' '
                }
            } else {
                // cell interiors and corners
                ' '
            };
            out.push(slot);
        }
        out.push('\n');
    }

    if let Some(start) = grid.start() {
        out.push_str(&format!("{},{}\n", start.row, start.col));
    }
    if let Some(end) = grid.end() {
        out.push_str(&format!("{},{}\n", end.row, end.col));
    }
    out
}

/// Loads and builds a grid from a maze text file.
pub fn read_grid(path: impl AsRef<Path>) -> Result<Grid> {
    let text = fs::read_to_string(path)?;
    let raw = decode(&text)?;
    Ok(Grid::build(&raw))
}

/// Writes a grid to a maze text file.
pub fn write_grid(path: impl AsRef<Path>, grid: &Grid) -> Result<()> {
    fs::write(path, encode(grid))?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::CellKind;

    fn sample() -> String {
        [" - - ", "|   |", "     ", "|   |", " - - ", "0,0", "1,1", ""].join("\n")
    }

    #[test]
    fn decode_reads_walls_and_endpoints() {
        let raw = decode(&sample()).unwrap();

        assert_eq!(raw.rows(), 2);
        assert_eq!(raw.cols(), 2);
        assert_eq!(raw.start, Some(Point { row: 0, col: 0 }));
        assert_eq!(raw.end, Some(Point { row: 1, col: 1 }));

        // perimeter active, interior open
        assert_eq!(
            raw.cells[0][0],
            RawCell {
                left: true,
                up: true,
                right: false,
                down: false,
            }
        );
        assert_eq!(
            raw.cells[1][1],
            RawCell {
                left: false,
                up: false,
                right: true,
                down: true,
            }
        );
    }

    #[test]
    fn encode_round_trips_the_sample() {
        let raw = decode(&sample()).unwrap();
        let grid = Grid::build(&raw);

        assert_eq!(encode(&grid), sample());
        assert_eq!(format!("{}", grid), sample());
    }

    #[test]
    fn round_trip_is_stable_for_edited_grids() {
        let mut grid = Grid::blank(3, 3);
        grid.set_start(Some(Point { row: 0, col: 2 }));
        grid.set_end(Some(Point { row: 2, col: 0 }));
        for (point, direction) in [
            (Point { row: 0, col: 0 }, Direction::Right),
            (Point { row: 1, col: 1 }, Direction::Down),
            (Point { row: 2, col: 1 }, Direction::Right),
        ] {
            grid.toggle_wall(grid.cell(point).wall(direction));
        }

        let first = encode(&grid);
        let rebuilt = Grid::build(&decode(&first).unwrap());
        assert_eq!(encode(&rebuilt), first);
    }

    #[test]
    fn decoded_endpoints_become_cell_roles() {
        let grid = Grid::build(&decode(&sample()).unwrap());

        assert_eq!(
            grid.cell(Point { row: 0, col: 0 }).kind(),
            CellKind::Start
        );
        assert_eq!(grid.cell(Point { row: 1, col: 1 }).kind(), CellKind::End);
    }

    #[test]
    fn unrelated_lines_are_ignored() {
        let text = [
            "generated by hand",
            " - ",
            "| |",
            " - ",
            "",
            "0,0",
        ]
        .join("\n");

        let raw = decode(&text).unwrap();
        assert_eq!(raw.rows(), 1);
        assert_eq!(raw.cols(), 1);
        assert_eq!(raw.start, Some(Point { row: 0, col: 0 }));
        assert_eq!(raw.end, None);
    }

    #[test]
    fn multi_digit_endpoints_are_dropped() {
        let text = [" - ", "| |", " - ", "10,0", "3,4"].join("\n");

        let raw = decode(&text).unwrap();
        // the two-digit line does not match the endpoint pattern, so the
        // next line claims the start slot
        assert_eq!(raw.start, Some(Point { row: 3, col: 4 }));
        assert_eq!(raw.end, None);
    }

    #[test]
    fn ragged_body_is_rejected() {
        let text = [" - ", "|  |", " - "].join("\n");

        assert_eq!(
            decode(&text),
            Err(ParseError::RaggedLine {
                line: 1,
                expected: 3,
                found: 4,
            })
        );
    }

    #[test]
    fn truncated_body_is_rejected() {
        let text = [" - ", "| |"].join("\n");
        assert_eq!(decode(&text), Err(ParseError::TruncatedBody(2)));

        assert_eq!(decode("0,0\n"), Err(ParseError::MissingBody));
        assert_eq!(decode(""), Err(ParseError::MissingBody));
    }

    #[test]
    fn body_without_columns_is_rejected() {
        let text = ["   ", "| |", "   "].join("\n");
        assert_eq!(decode(&text), Err(ParseError::MissingColumns));
    }

    #[test]
    fn blank_raw_grid_is_open_with_solid_perimeter() {
        let raw = RawGrid::default();
        assert_eq!(raw.rows(), 8);
        assert_eq!(raw.cols(), 8);

        assert_eq!(
            raw.cells[0][0],
            RawCell {
                left: true,
                up: true,
                right: false,
                down: false,
            }
        );
        assert_eq!(raw.cells[3][4], RawCell::default());
        assert_eq!(
            raw.cells[7][7],
            RawCell {
                left: false,
                up: false,
                right: true,
                down: true,
            }
        );
    }
}
