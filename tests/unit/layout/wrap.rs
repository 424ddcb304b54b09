use super::*;

/// 10 px per char, spaces included.
fn mono(s: &str) -> PosterResult<f32> {
    Ok(s.chars().count() as f32 * 10.0)
}

#[test]
fn short_text_stays_on_one_line() {
    let lines = wrap_paragraphs("HELLO WORLD", 900.0, mono).unwrap();
    assert_eq!(lines, vec!["HELLO WORLD"]);
}

#[test]
fn long_text_wraps_and_lines_fit() {
    let text = "the quick brown fox jumps over the lazy dog";
    let lines = wrap_paragraphs(text, 100.0, mono).unwrap();
    assert_eq!(
        lines,
        vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
    );
    for l in &lines {
        assert!(mono(l).unwrap() <= 100.0, "{l:?} too wide");
    }
    assert_eq!(lines.join(" "), text);
}

#[test]
fn exact_fit_does_not_wrap() {
    // "abcd efgh" is 9 chars = 90 px.
    let lines = wrap_paragraphs("abcd efgh", 90.0, mono).unwrap();
    assert_eq!(lines, vec!["abcd efgh"]);
}

#[test]
fn explicit_breaks_always_start_a_new_line() {
    let lines = wrap_paragraphs("A\nB", 1000.0, mono).unwrap();
    assert_eq!(lines, vec!["A", "B"]);

    let lines = wrap_paragraphs("top\n\nbottom", 1000.0, mono).unwrap();
    assert_eq!(lines, vec!["top", "", "bottom"]);
}

#[test]
fn overlong_word_is_kept_whole_on_its_own_line() {
    let lines = wrap_paragraphs("a supercalifragilistic b", 50.0, mono).unwrap();
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);

    let lines = wrap_paragraphs("supercalifragilistic", 50.0, mono).unwrap();
    assert_eq!(lines, vec!["supercalifragilistic"]);
}

#[test]
fn runs_of_whitespace_collapse() {
    let lines = wrap_paragraphs("  two   spaced\r\nwords ", 1000.0, mono).unwrap();
    assert_eq!(lines, vec!["two spaced", "words"]);
}

#[test]
fn empty_text_is_one_empty_line() {
    assert_eq!(wrap_paragraphs("", 10.0, mono).unwrap(), vec![""]);
}

#[test]
fn first_word_of_a_line_is_not_measured() {
    let mut calls = Vec::new();
    wrap_paragraphs("one two\nthree", 1000.0, |s| {
        calls.push(s.to_owned());
        mono(s)
    })
    .unwrap();
    assert_eq!(calls, vec!["one two"]);
}

#[test]
fn measurement_errors_propagate() {
    let err = wrap_paragraphs("a b", 10.0, |_| {
        Err(crate::foundation::error::PosterError::render("no font"))
    })
    .unwrap_err();
    assert!(err.to_string().contains("no font"));
}

#[test]
fn candidates_and_lines_carry_no_trailing_space() {
    let mut calls = Vec::new();
    let lines = wrap_paragraphs("ab cd ef", 50.0, |s| {
        calls.push(s.to_owned());
        mono(s)
    })
    .unwrap();
    // "ab cd" is 50 px and fits exactly; a trailing space would have pushed it to 60.
    assert_eq!(calls, vec!["ab cd", "ab cd ef"]);
    assert_eq!(lines, vec!["ab cd", "ef"]);
    assert!(lines.iter().all(|l| !l.ends_with(' ')));
}
