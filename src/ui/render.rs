use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::BrailleCanvas;
use crate::config::DisplayConfig;
use crate::game::input::key_label;
use crate::game::{self, Keymap, Match};

/// Smallest terminal the field is drawn in
pub const MIN_COLS: u16 = 20;
pub const MIN_ROWS: u16 = 10;

// Field-space layout of the decorations
const DASH_HEIGHT: f32 = 20.0;
const DASH_GAP: f32 = 15.0;
const DASH_WIDTH: f32 = 4.0;
const SCORE_TOP: f32 = 20.0;
const INSTRUCTION_ROWS_Y: [f32; 2] = [530.0, 555.0];

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

/// Maps field coordinates onto Braille pixels
struct Projection {
    scale_x: f32,
    scale_y: f32,
    pixel_width: usize,
    pixel_height: usize,
}

impl Projection {
    fn new(canvas: &BrailleCanvas, field: &game::Rect) -> Self {
        Self {
            scale_x: canvas.pixel_width() as f32 / field.width(),
            scale_y: canvas.pixel_height() as f32 / field.height(),
            pixel_width: canvas.pixel_width(),
            pixel_height: canvas.pixel_height(),
        }
    }

    /// Fill the pixels covered by a field rectangle, at least one pixel
    /// wide and tall while any part of it is on screen
    fn fill(&self, canvas: &mut BrailleCanvas, rect: &game::Rect) {
        let left = rect.left() * self.scale_x;
        let right = rect.right() * self.scale_x;
        let top = rect.top() * self.scale_y;
        let bottom = rect.bottom() * self.scale_y;

        if right <= 0.0 || bottom <= 0.0 {
            return;
        }
        let x0 = left.max(0.0).floor() as usize;
        let y0 = top.max(0.0).floor() as usize;
        if x0 >= self.pixel_width || y0 >= self.pixel_height {
            return;
        }
        let x1 = (right.round() as usize).clamp(x0 + 1, self.pixel_width);
        let y1 = (bottom.round() as usize).clamp(y0 + 1, self.pixel_height);

        canvas.fill_rect(x0, y0, x1 - x0, y1 - y0);
    }
}

/// Draw one frame of the match
pub fn render<R>(frame: &mut Frame, game: &Match<R>, display: &DisplayConfig, keymap: &Keymap) {
    let area = frame.area();

    // Draw background (true black RGB, not terminal default)
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    if area.width < MIN_COLS || area.height < MIN_ROWS {
        draw_too_small(frame, area);
        return;
    }

    let field = game.playfield();
    let mut canvas = BrailleCanvas::new(area.width as usize, area.height as usize);
    let projection = Projection::new(&canvas, &field);

    canvas.set_pen(rgb(display.center_line_color));
    draw_center_line(&mut canvas, &projection, &field);

    canvas.set_pen(rgb(display.paddle_color));
    projection.fill(&mut canvas, &game.player_paddle().rect);
    projection.fill(&mut canvas, &game.ai_paddle().rect);

    canvas.set_pen(rgb(display.ball_color));
    projection.fill(&mut canvas, &game.ball().rect);

    canvas.set_pen(rgb(display.score_color));
    draw_scores(&mut canvas, &projection, game.player_score(), game.ai_score());

    render_braille_canvas(frame, &canvas, area);

    if game.show_instructions() {
        draw_instructions(frame, area, &field, display, keymap);
    }
}

fn draw_center_line(canvas: &mut BrailleCanvas, projection: &Projection, field: &game::Rect) {
    let x = field.center_x() - DASH_WIDTH / 2.0;
    let mut y = field.top();
    while y < field.bottom() {
        projection.fill(canvas, &game::Rect::new(x, y, DASH_WIDTH, DASH_HEIGHT));
        y += DASH_HEIGHT + DASH_GAP;
    }
}

fn draw_scores(canvas: &mut BrailleCanvas, projection: &Projection, player: u32, ai: u32) {
    // Digits are 5 dots tall; grow them with the terminal
    let scale = (projection.pixel_height / 40).max(1);
    let y = (SCORE_TOP * projection.scale_y) as usize;

    canvas.draw_number(player, projection.pixel_width / 4, y, scale);
    canvas.draw_number(ai, projection.pixel_width * 3 / 4, y, scale);
}

/// Emit the canvas row by row, one span per run of same-colored cells
fn render_braille_canvas(frame: &mut Frame, canvas: &BrailleCanvas, area: Rect) {
    let mut lines = Vec::with_capacity(canvas.height());

    for y in 0..canvas.height() {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_color = canvas.color_at(0, y);

        for x in 0..canvas.width() {
            let color = canvas.color_at(x, y);
            if color != run_color && !run.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut run),
                    Style::default().fg(run_color),
                ));
            }
            run_color = color;
            run.push(canvas.to_char(x, y));
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, Style::default().fg(run_color)));
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// Two hint lines near the bottom of the field
pub fn instruction_lines(keymap: &Keymap) -> [String; 2] {
    [
        format!(
            "Move left paddle: {}/{}",
            key_label(keymap.up),
            key_label(keymap.down)
        ),
        "Right paddle (AI) follows the ball".to_string(),
    ]
}

fn draw_instructions(
    frame: &mut Frame,
    area: Rect,
    field: &game::Rect,
    display: &DisplayConfig,
    keymap: &Keymap,
) {
    let style = Style::default().fg(rgb(display.instruction_color));
    let mut last_row = None;

    for (text, field_y) in instruction_lines(keymap).into_iter().zip(INSTRUCTION_ROWS_Y) {
        let mut row = (field_y / field.height() * area.height as f32) as u16;
        // Keep the two lines on separate rows in short terminals
        if let Some(prev) = last_row {
            row = row.max(prev + 1);
        }
        let row = row.min(area.height - 1);
        last_row = Some(row);

        let hint = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center);
        let hint_area = Rect {
            x: area.x,
            y: area.y + row,
            width: area.width,
            height: 1,
        };
        frame.render_widget(hint, hint_area);
    }
}

fn draw_too_small(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let msg = Paragraph::new("Terminal too small")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    let msg_area = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    };
    frame.render_widget(msg, msg_area);
}
