/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// The game paints in pixels through the `Surface` trait. `Canvas`
/// rasterises those calls onto terminal cells (one board tile = 2 columns
/// by 1 row), blending by global alpha against what is already there.
///
/// How a frame goes out:
///   1. `begin_frame` clears the front buffer and re-lays out the board
///   2. `draw::draw_frame` paints into the canvas
///   3. `put_status` writes the HUD and help rows
///   4. `present` diffs front against back, emits only changed cells,
///      flushes once, swaps buffers

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::palette::Rgb;
use super::surface::{Align, Surface, TextStyle};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    ch: [u8; 16],
    ch_len: u8,
    fg: Rgb,
    bg: Rgb,
    bold: bool,
    wide: bool,    // true = this char occupies 2 terminal columns
    cont: bool,    // true = continuation of previous wide char (skip render)
}

impl Cell {
    /// Explicit dark background for every cell outside the board.
    const BASE_BG: Rgb = Rgb { r: 22, g: 22, b: 35 };
    const BASE_FG: Rgb = Rgb { r: 230, g: 230, b: 230 };

    const BLANK: Cell = Cell {
        ch: [b' ', 0,0,0, 0,0,0,0, 0,0,0,0, 0,0,0,0],
        ch_len: 1,
        fg: Cell::BASE_FG,
        bg: Cell::BASE_BG,
        bold: false,
        wide: false,
        cont: false,
    };

    /// Sentinel cell used to invalidate the back buffer.
    const INVALID: Cell = Cell {
        ch: [b'?', 0,0,0, 0,0,0,0, 0,0,0,0, 0,0,0,0],
        ch_len: 1,
        fg: Rgb { r: 255, g: 0, b: 255 },
        bg: Rgb { r: 255, g: 0, b: 255 },
        bold: false,
        wide: false,
        cont: false,
    };

    fn blank(bg: Rgb) -> Self {
        Cell { bg, ..Cell::BLANK }
    }

    fn from_char(c: char, fg: Rgb, bg: Rgb, wide: bool) -> Self {
        let mut cell = Self::blank(bg);
        let len = c.encode_utf8(&mut cell.ch).len() as u8;
        cell.ch_len = len;
        cell.fg = fg;
        cell.wide = wide;
        cell
    }

    fn continuation(bg: Rgb) -> Self {
        Cell { ch: [0; 16], ch_len: 0, cont: true, ..Cell::blank(bg) }
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.ch[..self.ch_len as usize]).unwrap_or(" ")
    }
}

/// Terminal column width of a character: emoji and CJK take two.
fn char_width(c: char) -> usize {
    match c as u32 {
        0xFE00..=0xFE0F | 0x200D => 0,
        0x1F000..=0x1FAFF
        | 0x2E80..=0x9FFF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60 => 2,
        _ => 1,
    }
}

fn text_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    fn set_raw(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    /// Write a cell, breaking any wide character it would half-cover.
    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x >= self.width || y >= self.height { return; }
        let old = self.get(x, y);
        if old.cont && x > 0 {
            let left = self.get(x - 1, y);
            self.set_raw(x - 1, y, Cell::blank(left.bg));
        }
        if old.wide {
            let right = self.get(x + 1, y);
            self.set_raw(x + 1, y, Cell::blank(right.bg));
        }
        self.set_raw(x, y, cell);
    }

    /// Write a string at (x, y) with given colors. Plain text, one column per char.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Rgb, bg: Rgb) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width { break; }
            self.set(cx, y, Cell::from_char(ch, fg, bg, false));
            cx += 1;
        }
    }
}

// ── Canvas: pixel-space Surface over a FrameBuffer region ──

/// Vertical layout
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;
const CELL_W: usize = 2;
/// Text at or above this size is drawn bold; cells have no other font size.
const BOLD_PX: f32 = 24.0;

struct Canvas {
    buf: FrameBuffer,
    /// Top-left terminal cell of the board.
    origin_col: usize,
    origin_row: usize,
    /// Board size in terminal cells.
    cols: usize,
    rows: usize,
    /// Pixels per terminal column / row.
    px_col: f32,
    px_row: f32,
    alpha: f32,
}

impl Canvas {
    fn new() -> Self {
        Canvas {
            buf: FrameBuffer::new(0, 0),
            origin_col: 0,
            origin_row: MAP_ROW,
            cols: 0,
            rows: 0,
            px_col: 10.0,
            px_row: 20.0,
            alpha: 1.0,
        }
    }

    /// Lay the board out for `tiles` x `tiles` with `cell_px` pixels per tile.
    fn layout(&mut self, tiles: usize, cell_px: f32) {
        self.cols = tiles * CELL_W;
        self.rows = tiles;
        self.px_col = cell_px / CELL_W as f32;
        self.px_row = cell_px;
        self.origin_col = self.buf.width.saturating_sub(self.cols) / 2;
        self.origin_row = MAP_ROW;
    }

    /// Board-relative cell (col, row) → absolute buffer cell, if on the board.
    fn board_cell(&self, col: i64, row: i64) -> Option<(usize, usize)> {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((self.origin_col + col as usize, self.origin_row + row as usize))
    }

    /// Terminal cell → surface pixel at the centre of that cell.
    fn cell_to_px(&self, col: usize, row: usize) -> Option<(f32, f32)> {
        let bc = col.checked_sub(self.origin_col)?;
        let br = row.checked_sub(self.origin_row)?;
        if bc >= self.cols || br >= self.rows { return None; }
        Some(((bc as f32 + 0.5) * self.px_col, (br as f32 + 0.5) * self.px_row))
    }

    fn cell_at_px(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        self.board_cell((x / self.px_col).floor() as i64, (y / self.px_row).floor() as i64)
    }
}

impl Surface for Canvas {
    fn size(&self) -> (f32, f32) {
        (self.cols as f32 * self.px_col, self.rows as f32 * self.px_row)
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Covers every cell whose centre lies inside the rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let c0 = (x / self.px_col).floor() as i64;
        let c1 = ((x + w) / self.px_col).ceil() as i64;
        let r0 = (y / self.px_row).floor() as i64;
        let r1 = ((y + h) / self.px_row).ceil() as i64;

        for r in r0..r1 {
            let cy = (r as f32 + 0.5) * self.px_row;
            if cy < y || cy >= y + h { continue; }
            for c in c0..c1 {
                let cx = (c as f32 + 0.5) * self.px_col;
                if cx < x || cx >= x + w { continue; }
                if let Some((bx, by)) = self.board_cell(c, r) {
                    let under = self.buf.get(bx, by).bg;
                    self.buf.set(bx, by, Cell::blank(color.blend_over(under, self.alpha)));
                }
            }
        }
    }

    /// One glyph per cell. Large sizes become bold, the only size cue a
    /// terminal cell can give.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let width = text_width(text) as f32;
        let anchor = x / self.px_col;
        let start = match style.align {
            Align::Start => anchor.floor(),
            Align::Center => (anchor - width / 2.0).round(),
        } as i64;
        let row = (y / self.px_row).floor() as i64;
        let alpha = self.alpha * style.alpha;
        let bold = style.size_px >= BOLD_PX;

        let mut col = start;
        for ch in text.chars() {
            let w = char_width(ch);
            if w == 0 { continue; }
            if let Some((bx, by)) = self.board_cell(col, row) {
                let bg = self.buf.get(bx, by).bg;
                let fg = style.color.blend_over(bg, alpha);
                let wide = w == 2;
                let cell = Cell { bold, ..Cell::from_char(ch, fg, bg, wide) };
                if wide {
                    if let Some((nx, ny)) = self.board_cell(col + 1, row) {
                        self.buf.set(bx, by, cell);
                        let nbg = self.buf.get(nx, ny).bg;
                        self.buf.set(nx, ny, Cell::continuation(nbg));
                    }
                } else {
                    self.buf.set(bx, by, cell);
                }
            }
            col += w as i64;
        }
    }

    /// Circles are far smaller than a cell: one dot in the cell holding the centre.
    fn fill_circle(&mut self, x: f32, y: f32, _radius: f32, color: Rgb) {
        if let Some((bx, by)) = self.cell_at_px(x, y) {
            let bg = self.buf.get(bx, by).bg;
            let fg = color.blend_over(bg, self.alpha);
            self.buf.set(bx, by, Cell::from_char('●', fg, bg, false));
        }
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    canvas: Canvas,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            canvas: Canvas::new(),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(to_color(Cell::BASE_BG)),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.canvas.buf.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Start a frame: handle resize, clear, lay out the board.
    pub fn begin_frame(&mut self, tiles: usize, cell_px: f32) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.canvas.buf.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(to_color(Cell::BASE_BG)), Clear(ClearType::All))?;
        }

        self.canvas.buf.clear();
        self.canvas.layout(tiles, cell_px);
        self.canvas.alpha = 1.0;
        Ok(())
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut self.canvas
    }

    /// HUD line above the board, help line below it.
    pub fn put_status(&mut self, hud: &str, help: &str) {
        let c = &mut self.canvas;
        let hud_bg = Rgb { r: 20, g: 60, b: 20 };
        for x in 0..c.buf.width {
            c.buf.set(x, HUD_ROW, Cell::blank(hud_bg));
        }
        c.buf.put_str(c.origin_col, HUD_ROW, hud, Cell::BASE_FG, hud_bg);

        let help_row = c.origin_row + c.rows + 1;
        if help_row < c.buf.height {
            c.buf.put_str(c.origin_col, help_row, help, Rgb { r: 120, g: 120, b: 140 }, Cell::BASE_BG);
        }
    }

    /// Map a terminal click to surface pixels. None when off the board.
    pub fn pointer_to_surface(&self, col: u16, row: u16) -> Option<(f32, f32)> {
        self.canvas.cell_to_px(col as usize, row as usize)
    }

    pub fn present(&mut self) -> io::Result<()> {
        self.flush_diff()?;
        // Swap: current front becomes next back
        std::mem::swap(&mut self.canvas.buf, &mut self.back);
        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let front = &self.canvas.buf;
        let mut last_fg = Cell::BASE_FG;
        let mut last_bg = Cell::BASE_BG;
        let mut last_bold = false;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Explicit base colors at start of frame; never ResetColor here,
        // the terminal default may differ from BASE_BG.
        queue!(self.writer,
            SetForegroundColor(to_color(last_fg)),
            SetBackgroundColor(to_color(last_bg)),
            SetAttribute(Attribute::NormalIntensity),
        )?;

        for y in 0..front.height {
            let mut x = 0;
            while x < front.width {
                let cell = front.get(x, y);
                let prev = self.back.get(x, y);

                // Skip continuation cells (right half of wide emoji)
                if cell.cont {
                    if cell != prev { need_move = true; }
                    x += 1;
                    continue;
                }

                let cont_changed = cell.wide
                    && x + 1 < front.width
                    && front.get(x + 1, y) != self.back.get(x + 1, y);

                if cell == prev && !cont_changed {
                    need_move = true;
                    x += 1;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(to_color(cell.fg)))?;
                    last_fg = cell.fg;
                }
                if cell.bold != last_bold {
                    let attr = if cell.bold { Attribute::Bold } else { Attribute::NormalIntensity };
                    queue!(self.writer, SetAttribute(attr))?;
                    last_bold = cell.bold;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(to_color(cell.bg)))?;
                    last_bg = cell.bg;
                }

                queue!(self.writer, Print(cell.as_str()))?;

                if cell.wide {
                    // Wide char printed: cursor advanced 2 columns
                    last_x = x + 1;
                    x += 2;
                } else {
                    last_x = x;
                    x += 1;
                }
                last_y = y;
            }
        }

        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::palette;
    use crate::sim::world::fixtures::world_with;
    use crate::ui::draw::draw_frame;

    /// 20x20 board of 20px tiles in an 80x26 terminal → board at col 20.
    fn canvas() -> Canvas {
        let mut c = Canvas::new();
        c.buf.resize(80, 26);
        c.layout(20, 20.0);
        c
    }

    fn glyph(c: &Canvas, x: usize, y: usize) -> String {
        c.buf.get(x, y).as_str().to_string()
    }

    #[test]
    fn layout_centres_board() {
        let c = canvas();
        assert_eq!((c.origin_col, c.origin_row), (20, MAP_ROW));
        assert_eq!(c.size(), (400.0, 400.0));
    }

    #[test]
    fn widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('🍎'), 2);
        assert_eq!(char_width('\u{FE0F}'), 0);
        assert_eq!(text_width("Score: 10"), 9);
        assert_eq!(text_width("🍕🍔"), 4);
    }

    #[test]
    fn rect_covers_tile_columns() {
        let mut c = canvas();
        c.fill_rect(100.0, 100.0, 18.0, 18.0, palette::SNAKE_GREEN);
        // tile (5,5) → board cols 10..12, row 5
        assert_eq!(c.buf.get(20 + 10, MAP_ROW + 5).bg, palette::SNAKE_GREEN);
        assert_eq!(c.buf.get(20 + 11, MAP_ROW + 5).bg, palette::SNAKE_GREEN);
        assert_eq!(c.buf.get(20 + 12, MAP_ROW + 5).bg, Cell::BASE_BG);
        assert_eq!(c.buf.get(20 + 10, MAP_ROW + 6).bg, Cell::BASE_BG);
    }

    #[test]
    fn rect_is_clipped_to_board() {
        let mut c = canvas();
        c.fill_rect(-100.0, -100.0, 1000.0, 1000.0, palette::WHITE);
        assert_eq!(c.buf.get(19, MAP_ROW).bg, Cell::BASE_BG);
        assert_eq!(c.buf.get(20, MAP_ROW).bg, palette::WHITE);
        assert_eq!(c.buf.get(59, MAP_ROW + 19).bg, palette::WHITE);
        assert_eq!(c.buf.get(60, MAP_ROW + 19).bg, Cell::BASE_BG);
        assert_eq!(c.buf.get(20, MAP_ROW + 20).bg, Cell::BASE_BG);
    }

    #[test]
    fn centred_emoji_lands_in_its_tile() {
        let mut c = canvas();
        c.fill_text("🍎", 130.0, 110.0, TextStyle::new(20.0, Align::Center, palette::BLACK));
        let cell = c.buf.get(20 + 12, MAP_ROW + 5);
        assert!(cell.wide);
        assert_eq!(glyph(&c, 20 + 12, MAP_ROW + 5), "🍎");
        assert!(c.buf.get(20 + 13, MAP_ROW + 5).cont);
    }

    #[test]
    fn alpha_blends_over_background() {
        let mut c = canvas();
        c.fill_rect(0.0, 0.0, 400.0, 400.0, palette::WHITE);
        c.set_global_alpha(0.5);
        c.fill_circle(5.0, 5.0, 3.0, palette::BLACK);
        let cell = c.buf.get(20, MAP_ROW);
        assert_eq!(glyph(&c, 20, MAP_ROW), "●");
        assert_eq!(cell.fg, Rgb { r: 128, g: 128, b: 128 });
        assert_eq!(cell.bg, palette::WHITE);
    }

    #[test]
    fn off_board_circle_is_dropped() {
        let mut c = canvas();
        c.fill_circle(-5.0, 50.0, 3.0, palette::BLACK);
        c.fill_circle(405.0, 50.0, 3.0, palette::BLACK);
        assert!(c.buf.cells.iter().all(|cell| cell.as_str() != "●"));
    }

    #[test]
    fn overwriting_half_an_emoji_clears_it() {
        let mut c = canvas();
        c.fill_text("🍎", 130.0, 110.0, TextStyle::new(20.0, Align::Center, palette::BLACK));
        c.fill_circle(135.0, 110.0, 3.0, palette::BLACK); // lands on the continuation
        assert_eq!(glyph(&c, 20 + 12, MAP_ROW + 5), " ");
        assert!(!c.buf.get(20 + 12, MAP_ROW + 5).wide);
    }

    #[test]
    fn large_text_is_bold() {
        let mut c = canvas();
        c.fill_text("Game Over!", 200.0, 200.0, TextStyle::new(30.0, Align::Center, palette::BLACK));
        c.fill_text("Press", 200.0, 240.0, TextStyle::new(20.0, Align::Center, palette::BLACK));
        // "Game Over!" is 10 wide, centred on board col 20 → starts at 15
        assert_eq!(glyph(&c, 20 + 15, MAP_ROW + 10), "G");
        assert!(c.buf.get(20 + 15, MAP_ROW + 10).bold);
        assert_eq!(glyph(&c, 20 + 18, MAP_ROW + 12), "P");
        assert!(!c.buf.get(20 + 18, MAP_ROW + 12).bold);
    }

    #[test]
    fn pointer_maps_back_to_pixels() {
        let c = canvas();
        assert_eq!(c.cell_to_px(20, MAP_ROW), Some((5.0, 10.0)));
        assert_eq!(c.cell_to_px(20 + 11, MAP_ROW + 5), Some((115.0, 110.0)));
        assert_eq!(c.cell_to_px(19, MAP_ROW), None);
        assert_eq!(c.cell_to_px(20, 0), None);
    }

    #[test]
    fn full_frame_rasterises() {
        let w = world_with(&[(5, 5), (4, 5)], (6, 5), 10);
        let mut c = canvas();
        draw_frame(&w, &mut c);
        assert_eq!(c.buf.get(20 + 10, MAP_ROW + 5).bg, palette::SNAKE_GREEN);
        assert_eq!(c.buf.get(20 + 8, MAP_ROW + 5).bg, palette::SNAKE_GREEN);
        assert_eq!(c.buf.get(20, MAP_ROW).bg, palette::WHITE);
        assert_eq!(glyph(&c, 20 + 12, MAP_ROW + 5), "🍎");
    }
}
