use recap_core::{HeuristicTokenCounter, Message, TokenCounter};

#[test]
fn heuristic_counts_empty_as_zero() {
    let counter = HeuristicTokenCounter;
    assert_eq!(counter.count_text(""), 0);
}

#[test]
fn heuristic_rounds_up_short_text() {
    let counter = HeuristicTokenCounter;
    // Non-empty text is always at least one token
    assert_eq!(counter.count_text("hi"), 1);
    assert_eq!(counter.count_text("abcdefgh"), 2);
}

#[test]
fn message_counting_adds_framing_overhead() {
    let counter = HeuristicTokenCounter;
    let messages = vec![Message::system("abcdefgh"), Message::human("abcd")];
    // 2 + 4 framing for the first, 1 + 4 for the second
    assert_eq!(counter.count_messages(&messages), 11);
}

#[test]
fn roles_render_as_wire_names() {
    assert_eq!(Message::system("x").role().to_string(), "system");
    assert_eq!(Message::human("x").role().to_string(), "user");
    assert_eq!(Message::ai("x").role().to_string(), "assistant");
}
