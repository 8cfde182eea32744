//! GameView: draws a `GameSnapshot` top-down into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Block, BoardView, GameSnapshot, Motion, PhaseKind};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{BridgeState, Cell, Orientation};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BACKDROP: Rgb = Rgb::new(18, 18, 26);
const FLOOR: Rgb = Rgb::new(150, 150, 160);
const BLOCK: Rgb = Rgb::new(235, 200, 70);
const FALLING: Rgb = Rgb::new(220, 70, 60);
const SINKING: Rgb = Rgb::new(90, 210, 120);

/// Top-down renderer for the puzzle board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares cells on typical terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Frame size (board plus border) for a board view.
    pub fn frame_size(&self, board: &BoardView) -> (u16, u16) {
        (
            board.cols * self.cell_w + 2,
            board.rows * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let (frame_w, frame_h) = self.frame_size(&snap.board);
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        let backdrop = Style::new(Rgb::new(60, 60, 70), BACKDROP);
        fb.fill_rect(
            origin_x + 1,
            origin_y + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            backdrop,
        );
        self.draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for view in snap.board.iter() {
            let (pattern, style) = tile_look(view.cell);
            self.draw_cell(fb, origin_x, origin_y, view.coord.row, view.coord.col, pattern, style);
        }

        if snap.phase != PhaseKind::GameComplete {
            self.draw_block(fb, snap, origin_x, origin_y);
        }

        self.draw_side_panel(fb, snap, viewport, origin_x + frame_w, origin_y);

        let banner = match snap.phase {
            _ if snap.paused => Some("PAUSED"),
            PhaseKind::Falling | PhaseKind::Resetting => Some("FELL!"),
            PhaseKind::Advancing => Some("LEVEL COMPLETE"),
            PhaseKind::GameComplete => Some("ALL LEVELS CLEARED"),
            PhaseKind::Idle | PhaseKind::Rolling => None,
        };
        if let Some(text) = banner {
            self.draw_banner(fb, origin_x, origin_y, frame_w, frame_h, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = Style::new(Rgb::new(190, 190, 200), Rgb::new(0, 0, 0));
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '╭', style);
        fb.put_char(right, y, '╮', style);
        fb.put_char(x, bottom, '╰', style);
        fb.put_char(right, bottom, '╯', style);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, origin_x: u16, origin_y: u16) {
        let view = snap.block;
        let (pose, color, dim): (Block, Rgb, bool) = match view.motion {
            Motion::Resting => (view.block, BLOCK, false),
            // Swap to the landing pose halfway through the tip.
            Motion::Rolling { to, .. } if view.progress >= 0.5 => (to, BLOCK, false),
            Motion::Rolling { .. } => (view.block, BLOCK, false),
            Motion::Falling => (view.block, FALLING.mix(BACKDROP, view.progress), true),
            Motion::Sinking => (view.block, SINKING.mix(BACKDROP, view.progress), false),
        };

        let pattern = match pose.orientation {
            Orientation::Standing => ['▐', '▌'],
            Orientation::LyingX | Orientation::LyingZ => ['█', '█'],
        };
        let mut style = Style::new(color, BACKDROP).bold();
        style.dim = dim;

        for coord in pose.footprint() {
            if snap.board.get(coord).is_some() {
                self.draw_cell(fb, origin_x, origin_y, coord.row, coord.col, pattern, style);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        row: i16,
        col: i16,
        pattern: [char; 2],
        style: Style,
    ) {
        if row < 0 || col < 0 {
            return;
        }
        let px = origin_x + 1 + col as u16 * self.cell_w;
        let py = origin_y + 1 + row as u16 * self.cell_h;
        for dy in 0..self.cell_h {
            for dx in 0..self.cell_w {
                let ch = pattern[(dx as usize).min(1)];
                fb.put_char(px + dx, py + dy, ch, style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame_right: u16,
        top: u16,
    ) {
        let x = frame_right.saturating_add(2);
        if x >= viewport.width || viewport.width - x < 12 {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let rows: [(&str, String); 4] = [
            (
                "LEVEL",
                format!("{}/{} {}", snap.level_index + 1, snap.level_count, snap.level_name),
            ),
            ("MOVES", snap.moves.to_string()),
            ("FALLS", snap.falls.to_string()),
            ("TIME", format_clock(snap.elapsed_ms)),
        ];

        let mut y = top;
        for (name, text) in rows.iter() {
            if y.saturating_add(1) >= viewport.height {
                break;
            }
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, text, value);
            y = y.saturating_add(3);
        }
    }

    fn draw_banner(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
        let len = text.chars().count() as u16;
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x + w.saturating_sub(len) / 2, y + h / 2, text, style);
    }
}

/// Two-column pattern and style for a board tile.
fn tile_look(cell: Cell) -> ([char; 2], Style) {
    let on = |fg: Rgb| Style::new(fg, BACKDROP);
    match cell {
        Cell::Empty => ([' ', ' '], on(BACKDROP)),
        Cell::Floor => (['█', '█'], on(FLOOR)),
        Cell::Target => (['[', ']'], on(Rgb::new(230, 90, 90)).bold()),
        Cell::Fragile => (['░', '░'], on(Rgb::new(230, 150, 60))),
        Cell::Switch(_) => (['(', ')'], Style::new(Rgb::new(80, 200, 230), FLOOR).bold()),
        Cell::Bridge { state, .. } => match state {
            BridgeState::Open => (['═', '═'], on(Rgb::new(170, 120, 70))),
            BridgeState::Closed => (['·', '·'], on(Rgb::new(110, 80, 50)).dim()),
        },
    }
}

/// `mm:ss` clock for the side panel.
pub fn format_clock(elapsed_ms: u64) -> String {
    let secs = elapsed_ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
