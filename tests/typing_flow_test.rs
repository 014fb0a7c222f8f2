// Test cursor movement, margins, and direction switching end to end

use typewriter_wasm::models::position::Direction;
use typewriter_wasm::models::TypingSession;
use typewriter_wasm::SoundCue;

const CHAR_W: f32 = 12.0;
const LEFT: f32 = 60.0;
const RIGHT: f32 = 740.0;

fn make_session() -> TypingSession {
    TypingSession::with_seed(800, 600, CHAR_W, 24.0, 17)
}

fn assert_within_margins(session: &TypingSession) {
    let x = session.cursor().position().x;
    assert!(
        (LEFT..=RIGHT).contains(&x),
        "cursor x {} escaped the margins",
        x
    );
}

#[test]
fn test_directional_seam_snap_fires_both_ways() {
    let mut session = make_session();
    session.add_text("a", 0.0);
    session.add_text("א", 0.0);
    session.add_text("b", 0.0);

    let chars = &session.document().chars;
    // The Hebrew character snapped to the right margin, the Latin one
    // that follows snapped back to the left margin
    assert!((chars[1].x - RIGHT).abs() <= CHAR_W);
    assert!((chars[2].x - LEFT).abs() <= CHAR_W);
}

#[test]
fn test_margin_invariant_over_mixed_input() {
    let mut session = make_session();
    let bursts = [
        "hello world",
        "שלום עולם",
        "mixed אב latin",
        "0123456789!?",
    ];
    for _ in 0..8 {
        for burst in bursts {
            session.add_text(burst, 0.0);
            assert_within_margins(&session);
        }
        session.handle_newline();
        assert_within_margins(&session);
    }
}

#[test]
fn test_hebrew_run_advances_leftward() {
    let mut session = make_session();
    session.add_text("שלום", 0.0);

    let chars = &session.document().chars;
    for pair in chars.windows(2) {
        assert_eq!(pair[1].x, pair[0].x - CHAR_W);
    }
    assert_eq!(session.cursor().direction(), Direction::Rtl);
}

#[test]
fn test_newline_homes_to_the_direction_margin() {
    let mut session = make_session();
    session.add_text("abc", 0.0);
    session.handle_newline();
    assert_eq!(session.cursor().position().x, LEFT);

    session.add_text("א", 0.0);
    session.handle_newline();
    assert_eq!(session.cursor().position().x, RIGHT);
}

#[test]
fn test_long_line_wraps_and_returns_the_carriage() {
    let mut session = make_session();
    // 60 characters outruns the 56-step line
    session.add_text(&"m".repeat(60), 0.0);

    let frame = session.tick(1.0);
    assert!(frame.cues.contains(&SoundCue::CarriageReturn));
    assert!(frame.cues.contains(&SoundCue::Bell));

    // The wrapped tail sits on the second line
    let last = session.document().chars.last().unwrap();
    assert_eq!(last.y, 48.0);
    assert_within_margins(&session);
}

#[test]
fn test_combining_cluster_is_one_strike() {
    let mut session = make_session();
    // Base letter plus combining point: one cluster, one record
    session.add_text("בְ", 0.0);
    assert_eq!(session.document().len(), 1);
    assert_eq!(session.document().chars[0].s, "בְ");
}

#[test]
fn test_carriage_tracks_typing_and_newline() {
    let mut session = make_session();
    session.add_text("abc", 0.0);
    assert_eq!(session.sequencer().carriage().target(), -3.0 * CHAR_W);

    session.handle_newline();
    assert_eq!(session.sequencer().carriage().target(), 0.0);
}

#[test]
fn test_backspace_stops_at_the_margin() {
    let mut session = make_session();
    session.add_text("a", 0.0);
    for _ in 0..5 {
        session.backspace();
    }
    assert_eq!(session.cursor().position().x, LEFT);
    assert_within_margins(&session);
}
