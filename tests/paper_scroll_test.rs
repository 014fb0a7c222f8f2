// Test the paper window's scroll behavior against a growing page

use typewriter_wasm::models::TypingSession;
use typewriter_wasm::SoundCue;

// A deliberately short window: 120 px tall, 24 px lines, so the page
// outgrows it after four lines and scrolls by 48 px at a time
const WIDTH: u32 = 200;
const HEIGHT: u32 = 120;
const LINE_H: f32 = 24.0;

fn make_session() -> TypingSession {
    TypingSession::with_seed(WIDTH, HEIGHT, 12.0, LINE_H, 9)
}

fn ink_in_rows(session: &TypingSession, y0: u32, y1: u32) -> usize {
    let w = WIDTH as usize;
    session.paper().pixels()[y0 as usize * w..y1 as usize * w]
        .iter()
        .filter(|&&p| p > 64)
        .count()
}

/// Type one character per line, ticking the clock past the strike delay
/// so each imprint lands before the next line starts.
fn type_lines(session: &mut TypingSession, count: usize) -> Vec<SoundCue> {
    let mut cues = Vec::new();
    for line in 0..count {
        let t = line as f64 * 1000.0;
        session.add_text("M", t);
        let frame = session.tick(t + 500.0);
        cues.extend(frame.cues);
        session.handle_newline();
    }
    cues
}

#[test]
fn test_page_scrolls_repeatedly_as_lines_accumulate() {
    let mut session = make_session();
    let cues = type_lines(&mut session, 12);

    // Lines land at page y = 24, 48, ... 288; the window scrolls at
    // 120, 168, 216, and 264
    assert_eq!(session.paper().scroll_top(), 192.0);

    let feeds = cues.iter().filter(|c| **c == SoundCue::PaperFeed).count();
    assert_eq!(feeds, 4);
}

#[test]
fn test_recent_lines_survive_every_scroll() {
    let mut session = make_session();
    type_lines(&mut session, 12);

    // The surviving lines sit at window rows 24, 48, 72, and 96
    for row in [24u32, 48, 72, 96] {
        assert!(
            ink_in_rows(&session, row - 16, row + 2) > 0,
            "line at window row {} lost its ink",
            row
        );
    }
}

#[test]
fn test_rows_above_the_shift_are_gone() {
    let mut session = make_session();
    type_lines(&mut session, 12);

    // Everything the shifts discarded mapped above the window top;
    // what remains up there is speckle, never ink
    assert_eq!(ink_in_rows(&session, 0, 6), 0);
}

#[test]
fn test_pen_never_leaves_the_window() {
    let mut session = make_session();
    for line in 0..30 {
        let t = line as f64 * 1000.0;
        session.add_text("W", t);
        session.tick(t + 500.0);
        session.handle_newline();

        let pen_y = session.paper().pen().y;
        assert!(pen_y >= 0.0 && pen_y <= HEIGHT as f32);
    }
}

#[test]
fn test_clear_returns_to_an_unscrolled_page() {
    let mut session = make_session();
    type_lines(&mut session, 12);
    assert!(session.paper().scroll_top() > 0.0);

    session.reset();
    assert_eq!(session.paper().scroll_top(), 0.0);
    assert_eq!(ink_in_rows(&session, 0, HEIGHT), 0);
}
