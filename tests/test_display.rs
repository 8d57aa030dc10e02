use alien_invaders::display::*;
use alien_invaders::draw::{Color, Surface};
use alien_invaders::entities::Rect;
use crossterm::style::Color as TermColor;

/// 80 x 30 play-area cells for the default 800 x 700 world.
fn make_surface() -> TerminalSurface {
    TerminalSurface::new(82, 33, 800.0, 700.0)
}

#[test]
fn play_area_excludes_border_and_hint() {
    let s = make_surface();
    assert_eq!(s.columns(), 80);
    assert_eq!(s.rows(), 30);
    assert!(s.cell(0, 0).is_none());
}

#[test]
fn tiny_terminal_has_no_cells() {
    let s = TerminalSurface::new(1, 2, 800.0, 700.0);
    assert_eq!(s.columns(), 0);
    assert_eq!(s.rows(), 0);
}

#[test]
fn world_maps_onto_grid_y_up() {
    let s = make_surface();
    assert_eq!(s.column_of(0.0), 0);
    assert_eq!(s.column_of(400.0), 40);
    assert_eq!(s.row_of(700.0), 0);
    assert_eq!(s.row_of(350.0), 15);
}

#[test]
fn out_of_range_coordinates_clamp() {
    let s = make_surface();
    assert_eq!(s.column_of(-50.0), 0);
    assert_eq!(s.column_of(800.0), 79);
    assert_eq!(s.column_of(5000.0), 79);
    assert_eq!(s.row_of(0.0), 29);
    assert_eq!(s.row_of(-20.0), 29);
    assert_eq!(s.row_of(900.0), 0);
}

#[test]
fn text_is_centered_on_its_cell() {
    let mut s = make_surface();
    s.draw_text(400.0, 350.0, "Hi");
    assert_eq!(s.cell(39, 15).map(|c| c.ch), Some('H'));
    assert_eq!(s.cell(40, 15).map(|c| c.ch), Some('i'));
    assert_eq!(s.cell(39, 15).map(|c| c.color), Some(TermColor::Yellow));
}

#[test]
fn defense_line_spans_the_row() {
    let mut s = make_surface();
    s.draw_line(100.0, Color::Black);
    for column in 0..s.columns() {
        let cell = s.cell(column, 25).unwrap();
        assert_eq!(cell.ch, '─');
        assert_eq!(cell.color, TermColor::DarkGrey);
    }
    assert!(s.cell(0, 24).is_none());
}

#[test]
fn bolt_fills_its_cell() {
    let mut s = make_surface();
    s.fill_rect(Rect { x: 400.0, y: 350.0, width: 4.0, height: 16.0 }, Color::Cyan);
    let cell = s.cell(40, 15).unwrap();
    assert_eq!(cell.color, TermColor::Cyan);
}

#[test]
fn exploding_ship_uses_another_glyph() {
    let ship = Rect { x: 400.0, y: 350.0, width: 44.0, height: 44.0 };
    let mut intact = make_surface();
    intact.draw_sprite(ship, 0);
    let mut exploding = make_surface();
    exploding.draw_sprite(ship, 3);
    assert_ne!(intact.cell(40, 15), exploding.cell(40, 15));
    assert_eq!(intact.cell(40, 15).map(|c| c.ch), Some('▲'));
}

#[test]
fn render_writes_a_frame() {
    let mut s = make_surface();
    s.draw_image(Rect { x: 400.0, y: 600.0, width: 33.0, height: 33.0 }, 1);
    let mut out: Vec<u8> = Vec::new();
    s.render(&mut out).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains('◉'));
    assert!(text.contains('┌'));
}
