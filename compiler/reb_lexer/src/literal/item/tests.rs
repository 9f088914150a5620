use super::*;
use pretty_assertions::assert_eq;

#[test]
fn chars() {
    assert_eq!(parse_char(b"#\"a\""), Some('a'));
    assert_eq!(parse_char(b"#\"^/\""), Some('\n'));
    assert_eq!(parse_char(b"#\"^(41)\""), Some('A'));
    assert_eq!(parse_char(b"#\"^\"\""), Some('"'));
    assert_eq!(parse_char("#\"é\"".as_bytes()), Some('é'));
}

#[test]
fn char_rejects() {
    assert_eq!(parse_char(b"#\"\""), None);
    assert_eq!(parse_char(b"#\"ab\""), None);
    assert_eq!(parse_char(b"#\"a"), None);
}

#[test]
fn files() {
    assert_eq!(parse_file(b"%foo.txt").as_deref(), Some("foo.txt"));
    assert_eq!(parse_file(b"%dir/sub/file.r").as_deref(), Some("dir/sub/file.r"));
    assert_eq!(parse_file(b"%dir\\file").as_deref(), Some("dir/file"));
    assert_eq!(parse_file(b"%a%20b").as_deref(), Some("a b"));
    assert_eq!(parse_file(b"%\"my file.txt\"").as_deref(), Some("my file.txt"));
}

#[test]
fn file_rejects() {
    assert_eq!(parse_file(b"%c:/x"), None);
    assert_eq!(parse_file(b"%a%2"), None);
    assert_eq!(parse_file(b"foo"), None);
}

#[test]
fn emails() {
    assert_eq!(parse_email(b"user@example.com").as_deref(), Some("user@example.com"));
    assert_eq!(parse_email(b"a%2Eb@host").as_deref(), Some("a.b@host"));
    assert_eq!(parse_email(b"a@b@c"), None);
    assert_eq!(parse_email(b"nobody"), None);
    assert_eq!(parse_email(b"a%zz@b"), None);
}

#[test]
fn urls() {
    assert_eq!(
        parse_url(b"http://example.com/a%20b").as_deref(),
        Some("http://example.com/a b")
    );
    // A `%` without two hex digits is kept as written.
    assert_eq!(parse_url(b"http://x/100%").as_deref(), Some("http://x/100%"));
}

#[test]
fn tags() {
    assert_eq!(parse_tag(b"<b>").as_deref(), Some("b"));
    assert_eq!(
        parse_tag(b"<a href=\"x/y\">").as_deref(),
        Some("a href=\"x/y\"")
    );
    assert_eq!(parse_tag(b"<b"), None);
}

#[test]
fn issue_text() {
    assert!(is_issue_text(b"abc"));
    assert!(is_issue_text(b"555-1234"));
    assert!(is_issue_text(b"1.2,3+4~5'6"));
    assert!(!is_issue_text(b""));
    assert!(!is_issue_text(b"a:b"));
    assert!(!is_issue_text(b"a@b"));
    assert!(!is_issue_text(b"a b"));
}
