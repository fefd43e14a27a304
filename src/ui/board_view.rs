//! Board rendering for the Gomoku GUI
//!
//! Row `size` is drawn at the top and row 1 at the bottom, matching the GTP
//! coordinates in the labels.

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::board::{Board, Point, Stone};
use crate::eval::MoveCategory;
use crate::gtp::format_coord;

use super::theme::*;

/// Markers drawn on top of the stones
#[derive(Default)]
pub struct Overlay<'a> {
    pub last_move: Option<Point>,
    pub suggested_move: Option<Point>,
    pub winning_line: Option<&'a [Point]>,
    /// Classifier verdict to mark, if enabled
    pub verdict: Option<(MoveCategory, &'a [Point])>,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Board size of the last frame
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            size: 1,
        }
    }
}

impl BoardView {
    /// Render the board and return the clicked point if any
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        overlay: &Overlay<'_>,
        accept_clicks: bool,
    ) -> Option<Point> {
        let available_size = ui.available_size();
        self.size = board.size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (self.size as f32 - 1.0);

        let (response, painter) =
            ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_point(&painter, board);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, board);

        if let Some((category, moves)) = overlay.verdict {
            self.draw_verdict(&painter, board, category, moves);
        }
        if let Some(p) = overlay.last_move {
            self.draw_last_move_marker(&painter, board, p);
        }
        if let Some(line) = overlay.winning_line {
            self.draw_winning_line(&painter, board, line);
        }
        if let Some(p) = overlay.suggested_move {
            self.draw_suggestion(&painter, board, p, board.current_player());
        }

        // Handle hover preview and click
        let mut clicked = None;
        if accept_clicks {
            if let Some(pointer_pos) = response.hover_pos() {
                if let Some(p) = self.screen_to_board(board, pointer_pos) {
                    let turn = board.current_player();
                    let is_valid = board.is_legal(p, turn);
                    self.draw_hover_preview(&painter, board, p, turn, is_valid);

                    if response.clicked() && is_valid {
                        clicked = Some(p);
                    }
                }
            }
        }

        clicked
    }

    fn line_end(&self) -> f32 {
        BOARD_MARGIN + (self.size as f32 - 1.0) * self.cell_size
    }

    /// Draw the N x N grid lines
    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let end_offset = self.line_end();

        for i in 0..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, end_offset);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(end_offset, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Center point on odd boards
    fn draw_star_point(&self, painter: &Painter, board: &Board) {
        if self.size % 2 == 1 {
            let mid = self.size / 2 + 1;
            let center = self.board_to_screen(board, board.pt(mid, mid));
            painter.circle_filled(center, STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Draw coordinate labels (GTP letters and numbers)
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 1..=self.size {
            let label = format_coord(1, col);
            let letter = label.trim_end_matches(|c: char| c.is_ascii_digit());
            let x = self.board_rect.min.x + BOARD_MARGIN + (col - 1) as f32 * self.cell_size;

            let pos = Pos2::new(x, self.board_rect.min.y + 14.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);

            let pos = Pos2::new(x, self.board_rect.max.y - 14.0);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
        }

        for row in 1..=self.size {
            let y = self.board_rect.min.y + BOARD_MARGIN + (self.size - row) as f32 * self.cell_size;

            let pos = Pos2::new(self.board_rect.min.x + 14.0, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, row.to_string(), font.clone(), GRID_LINE);

            let pos = Pos2::new(self.board_rect.max.x - 14.0, y);
            painter.text(pos, egui::Align2::CENTER_CENTER, row.to_string(), font.clone(), GRID_LINE);
        }
    }

    /// Draw all placed stones
    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for row in 1..=self.size {
            for col in 1..=self.size {
                let p = board.pt(row, col);
                let stone = board.get(p);
                if stone.is_player() {
                    self.draw_stone(painter, board, p, stone);
                }
            }
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, board: &Board, p: Point, stone: Stone) {
        let center = self.board_to_screen(board, p);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                );
                painter.circle_filled(center, radius, BLACK_STONE);

                // Highlight
                let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
                painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(
                    center + shadow_offset,
                    radius,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 40),
                );
                painter.circle_filled(center, radius, WHITE_STONE);

                // Inner shadow for depth
                painter.circle_stroke(
                    center,
                    radius * 0.85,
                    Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
                );
            }
            Stone::Empty | Stone::Border => {}
        }
    }

    /// Small dots on the moves the classifier prefers
    fn draw_verdict(&self, painter: &Painter, board: &Board, category: MoveCategory, moves: &[Point]) {
        if category == MoveCategory::None {
            return;
        }
        let color = category_color(category);
        for &p in moves {
            painter.circle_filled(self.board_to_screen(board, p), VERDICT_MARKER_RADIUS, color);
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, board: &Board, p: Point) {
        let center = self.board_to_screen(board, p);
        painter.circle_filled(center, LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Draw winning line highlight
    fn draw_winning_line(&self, painter: &Painter, board: &Board, line: &[Point]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            let start = self.board_to_screen(board, pair[0]);
            let end = self.board_to_screen(board, pair[1]);
            painter.line_segment([start, end], stroke);
        }

        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &p in line {
            painter.circle_stroke(self.board_to_screen(board, p), radius, stroke);
        }
    }

    /// Draw move suggestion
    fn draw_suggestion(&self, painter: &Painter, board: &Board, p: Point, turn: Stone) {
        let center = self.board_to_screen(board, p);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let (fill, mark) = match turn {
            Stone::Black => (Color32::from_rgba_unmultiplied(20, 20, 20, 100), WHITE_STONE),
            Stone::White => (Color32::from_rgba_unmultiplied(240, 240, 240, 100), BLACK_STONE),
            Stone::Empty | Stone::Border => return,
        };

        painter.circle_filled(center, radius, fill);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            mark,
        );
    }

    /// Draw hover preview
    fn draw_hover_preview(&self, painter: &Painter, board: &Board, p: Point, turn: Stone, is_valid: bool) {
        let center = self.board_to_screen(board, p);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = if is_valid {
            match turn {
                Stone::Black => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
                Stone::White => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
                Stone::Empty | Stone::Border => return,
            }
        } else {
            hover_invalid()
        };

        painter.circle_filled(center, radius, color);
    }

    /// Convert screen coordinates to a board point
    pub fn screen_to_board(&self, board: &Board, screen_pos: Pos2) -> Option<Point> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        let col = x.floor() as i32;
        let from_top = y.floor() as i32;
        let size = self.size as i32;

        if (0..size).contains(&col) && (0..size).contains(&from_top) {
            let row = (size - from_top) as usize;
            Some(board.pt(row, col as usize + 1))
        } else {
            None
        }
    }

    /// Convert a board point to screen coordinates
    pub fn board_to_screen(&self, board: &Board, p: Point) -> Pos2 {
        let (row, col) = board.coord(p);
        let x = self.board_rect.min.x + BOARD_MARGIN + (col - 1) as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (self.size - row) as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}
