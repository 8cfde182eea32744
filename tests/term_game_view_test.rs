use bloxorz::core::{GameSnapshot, LevelCatalog, LevelController, LevelDef};
use bloxorz::term::{FrameBuffer, GameView, Viewport};
use bloxorz::types::{Direction, TICK_MS};

fn game(rows: &[&str]) -> LevelController {
    let catalog = LevelCatalog::from_defs(&[LevelDef::new("test", rows)]).unwrap();
    LevelController::new(catalog, 0).unwrap()
}

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = game(&["S##T"]).snapshot();
    let view = GameView::default();

    // 4 cells * 2 columns + border = 10, 1 row + border = 3.
    let fb = view.render(&snap, Viewport::new(10, 3));

    assert_eq!(fb.get(0, 0).unwrap().ch, '╭');
    assert_eq!(fb.get(9, 0).unwrap().ch, '╮');
    assert_eq!(fb.get(0, 2).unwrap().ch, '╰');
    assert_eq!(fb.get(9, 2).unwrap().ch, '╯');
}

#[test]
fn term_view_draws_tiles_two_columns_wide() {
    let snap = game(&["S#.T"]).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(10, 3));

    assert_eq!(fb.row_text(1), "│▐▌██  []│");
}

#[test]
fn term_view_swaps_to_landing_pose_halfway_through_roll() {
    let mut g = game(&["S###T"]);
    let view = GameView::default();
    let vp = Viewport::new(12, 3);

    g.submit_move(Direction::Right).unwrap();
    g.tick(TICK_MS);
    let early = view.render(&g.snapshot(), vp);
    assert_eq!(early.get(1, 1).unwrap().ch, '▐');

    for _ in 0..4 {
        g.tick(TICK_MS);
    }
    let late = view.render(&g.snapshot(), vp);
    assert_eq!(late.get(1, 1).unwrap().ch, '█');
    // Lying block over columns 1-2, plain floor at column 3.
    let block = late.get(3, 1).unwrap().style;
    assert_eq!(late.get(5, 1).unwrap().style, block);
    assert_ne!(late.get(7, 1).unwrap().style, block);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut g = game(&["S###T"]);
    g.submit_move(Direction::Right).unwrap();
    let snap = g.snapshot();

    let wide = GameView::default().render(&snap, Viewport::new(40, 20));
    let all = screen_text(&wide);
    for label in ["LEVEL", "1/1 test", "MOVES", "FALLS", "TIME", "00:00"] {
        assert!(all.contains(label), "missing {label:?} in\n{all}");
    }

    let narrow = GameView::default().render(&snap, Viewport::new(12, 20));
    assert!(!screen_text(&narrow).contains("MOVES"));
}

#[test]
fn term_view_overlays() {
    let view = GameView::default();
    let vp = Viewport::new(40, 10);

    let mut g = game(&["S##T"]);
    g.toggle_pause();
    assert!(screen_text(&view.render(&g.snapshot(), vp)).contains("PAUSED"));
    g.toggle_pause();

    for _ in 0..2 {
        g.submit_move(Direction::Right).unwrap();
        while !g.is_idle() && !g.is_game_complete() {
            g.tick(TICK_MS);
        }
    }
    assert!(screen_text(&view.render(&g.snapshot(), vp)).contains("ALL LEVELS CLEARED"));
}

#[test]
fn term_view_survives_tiny_and_empty_viewports() {
    let view = GameView::default();
    let snap = game(&["S###T", "#####"]).snapshot();
    let fb = view.render(&snap, Viewport::new(3, 2));
    assert_eq!((fb.width(), fb.height()), (3, 2));

    let fb = view.render(&GameSnapshot::default(), Viewport::new(0, 0));
    assert!(fb.glyphs().is_empty());
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let view = GameView::default();
    let snap = game(&["S##T"]).snapshot();
    let mut fb = FrameBuffer::new(1, 1);
    view.render_into(&snap, Viewport::new(10, 3), &mut fb);
    assert_eq!(fb, view.render(&snap, Viewport::new(10, 3)));
}
