//! Text rendering of a maze grid with box drawing characters.

use std::fmt;

use crate::cells::{Direction, GridCoordinate};
use crate::grid::MazeGrid;
use crate::pathing::Distances;
use crate::placement::PropLayout;
use crate::utils::FnvHashSet;

/// Fills in the three character wide body of a cell when a grid is drawn as text.
pub trait GridDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String;
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> PathDisplay {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

/// Gems are lettered `a` to `z` in collection order, wrapping after `z`.
pub fn gem_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Marks the ball start `S`, the flag `E` and the gems by their collection order.
/// Cells without a prop fall through to an optional underlying display, e.g. a path.
pub struct PropsDisplay<'a> {
    props: &'a PropLayout,
    underneath: Option<&'a dyn GridDisplay>,
}

impl<'a> PropsDisplay<'a> {
    pub fn new(props: &'a PropLayout) -> PropsDisplay<'a> {
        PropsDisplay {
            props,
            underneath: None,
        }
    }

    pub fn over(mut self, display: &'a dyn GridDisplay) -> PropsDisplay<'a> {
        self.underneath = Some(display);
        self
    }
}

impl<'a> GridDisplay for PropsDisplay<'a> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if coord == self.props.start {
            String::from(" S ")
        } else if coord == self.props.end {
            String::from(" E ")
        } else if let Some(index) = self.props.gems.iter().position(|&g| g == coord) {
            format!(" {} ", gem_label(index))
        } else if let Some(display) = self.underneath {
            display.render_cell_body(coord)
        } else {
            String::from("   ")
        }
    }
}

/// A grid paired with whatever should be drawn inside its cells.
pub struct MazeDisplay<'a> {
    grid: &'a MazeGrid,
    cell_display: Option<&'a dyn GridDisplay>,
}

impl<'a> MazeDisplay<'a> {
    pub fn new(grid: &'a MazeGrid) -> MazeDisplay<'a> {
        MazeDisplay {
            grid,
            cell_display: None,
        }
    }

    pub fn with_cells(mut self, display: &'a dyn GridDisplay) -> MazeDisplay<'a> {
        self.cell_display = Some(display);
        self
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", MazeDisplay::new(self))
    }
}

impl<'a> fmt::Display for MazeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR_3: &str = "───";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";
        const EMPTY_BODY: &str = "   ";

        let grid = self.grid;
        let columns_count = grid.width().0;
        let rows_count = grid.height().0;
        if columns_count == 0 || rows_count == 0 {
            return Ok(());
        }

        // The top boundary; every row below draws only its own bottom boundary.
        let mut output = String::from(WALL_RD);
        for column in 0..columns_count {
            let coord = GridCoordinate::new(column as u32, 0);
            output.push_str(WALL_LR_3);
            if grid.is_neighbour_linked(coord, Direction::Right) {
                output.push_str(WALL_LR);
            } else if column == columns_count - 1 {
                output.push_str(WALL_LD);
            } else {
                output.push_str(WALL_LRD);
            }
        }
        output.push('\n');

        for (index_row, row) in grid.iter_row().enumerate() {
            let is_last_row = index_row == rows_count - 1;

            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell_coord) in row.into_iter().enumerate() {
                let render_cell_side = |direction, passage_clear_text, blocking_wall_text| {
                    if grid.is_neighbour_linked(cell_coord, direction) {
                        passage_clear_text
                    } else {
                        blocking_wall_text
                    }
                };
                let is_first_column = index_column == 0;
                let is_last_column = index_column == columns_count - 1;
                let east_open = grid.is_neighbour_linked(cell_coord, Direction::Right);
                let south_open = grid.is_neighbour_linked(cell_coord, Direction::Bottom);

                match self.cell_display {
                    Some(display) => {
                        row_middle_section_render.push_str(&display.render_cell_body(cell_coord))
                    }
                    None => row_middle_section_render.push_str(EMPTY_BODY),
                }
                row_middle_section_render.push_str(render_cell_side(Direction::Right, " ", WALL_UD));

                if is_first_column {
                    row_bottom_section_render.push_str(if is_last_row {
                        WALL_RU
                    } else if south_open {
                        WALL_UD
                    } else {
                        WALL_RUD
                    });
                }
                row_bottom_section_render.push_str(render_cell_side(Direction::Bottom, "   ", WALL_LR_3));

                let corner = match (is_last_row, is_last_column) {
                    (true, true) => WALL_LU,
                    (true, false) => if east_open { WALL_LR } else { WALL_LRU },
                    (false, true) => if south_open { WALL_UD } else { WALL_LUD },
                    (false, false) => {
                        let access_se_from_east = grid.neighbour_at_direction(cell_coord, Direction::Right)
                            .map_or(false, |c| grid.is_neighbour_linked(c, Direction::Bottom));
                        let access_se_from_south = grid.neighbour_at_direction(cell_coord, Direction::Bottom)
                            .map_or(false, |c| grid.is_neighbour_linked(c, Direction::Right));
                        let show_left_section = !south_open;
                        let show_right_section = !access_se_from_east;
                        let show_up_section = !east_open;
                        let show_down_section = !access_se_from_south;

                        match (show_left_section, show_right_section, show_up_section, show_down_section) {
                            (true, true, true, true) => WALL_LRUD,
                            (true, true, true, false) => WALL_LRU,
                            (true, true, false, true) => WALL_LRD,
                            (true, false, true, true) => WALL_LUD,
                            (false, true, true, true) => WALL_RUD,
                            (true, true, false, false) => WALL_LR,
                            (false, false, true, true) => WALL_UD,
                            (false, true, true, false) => WALL_RU,
                            (true, false, false, true) => WALL_LD,
                            (true, false, true, false) => WALL_LU,
                            (false, true, false, true) => WALL_RD,
                            (true, false, false, false) => WALL_L,
                            (false, true, false, false) => WALL_R,
                            (false, false, true, false) => WALL_U,
                            (false, false, false, true) => WALL_D,
                            (false, false, false, false) => " ",
                        }
                    }
                };
                row_bottom_section_render.push_str(corner);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::small_grid;

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn closed_cells_are_fully_walled() {
        let g = small_grid(2, 1);
        assert_eq!(format!("{}", g), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }

    #[test]
    fn passages_open_the_walls() {
        let mut g = small_grid(2, 1);
        g.link(gc(0, 0), Direction::Right).unwrap();
        assert_eq!(format!("{}", g), "┌───────┐\n│       │\n└───────┘\n");

        let mut g = small_grid(1, 2);
        g.link(gc(0, 0), Direction::Bottom).unwrap();
        assert_eq!(format!("{}", g), "┌───┐\n│   │\n│   │\n│   │\n└───┘\n");
    }

    #[test]
    fn every_row_renders_two_lines() {
        let g = small_grid(4, 3);
        let text = format!("{}", g);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1 + 3 * 2);
        // Each cell is three characters plus one boundary, with the leftmost boundary extra.
        assert!(lines.iter().all(|line| line.chars().count() == 4 * 4 + 1));
    }

    #[test]
    fn props_and_path_in_cell_bodies() {
        let mut g = small_grid(3, 1);
        g.link(gc(0, 0), Direction::Right).unwrap();
        g.link(gc(1, 0), Direction::Right).unwrap();
        let props = PropLayout { start: gc(0, 0), end: gc(2, 0), gems: vec![] };
        let path = PathDisplay::new(&[gc(0, 0), gc(1, 0), gc(2, 0)]);
        let props_display = PropsDisplay::new(&props).over(&path);
        let text = format!("{}", MazeDisplay::new(&g).with_cells(&props_display));
        assert_eq!(text.lines().nth(1), Some("│ S   .   E │"));

        let props = PropLayout { start: gc(0, 0), end: gc(2, 0), gems: vec![gc(1, 0)] };
        let props_display = PropsDisplay::new(&props);
        assert_eq!(props_display.render_cell_body(gc(1, 0)), " a ");
    }

    #[test]
    fn gem_labels_wrap_after_z() {
        assert_eq!(gem_label(0), 'a');
        assert_eq!(gem_label(25), 'z');
        assert_eq!(gem_label(26), 'a');
    }

    #[test]
    fn distances_in_hex() {
        let mut g = small_grid(3, 1);
        g.link(gc(0, 0), Direction::Right).unwrap();
        g.link(gc(1, 0), Direction::Right).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(distances.render_cell_body(gc(0, 0)), " 0 ");
        assert_eq!(distances.render_cell_body(gc(2, 0)), " 2 ");
    }
}
