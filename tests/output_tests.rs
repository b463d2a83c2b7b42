// tests for terminal output helpers

use modchat::output::truncate;

#[test]
fn test_short_text_untouched() {
    assert_eq!(truncate("Paris.", 100), "Paris.");
}

#[test]
fn test_exact_length_untouched() {
    let text = "a".repeat(100);
    assert_eq!(truncate(&text, 100), text);
}

#[test]
fn test_long_text_cut() {
    let text = "b".repeat(150);
    let cut = truncate(&text, 100);
    assert_eq!(cut.len(), 103);
    assert!(cut.ends_with("..."));
}

#[test]
fn test_cut_respects_char_boundaries() {
    let text = "é".repeat(5);
    assert_eq!(truncate(&text, 3), "ééé...");
}
