use super::*;

#[test]
fn ascii_width_samples() {
    assert_eq!(byte_width(b' '), 278);
    assert_eq!(byte_width(b'\''), 191);
    assert_eq!(byte_width(b'0'), 556);
    assert_eq!(byte_width(b'@'), 1015);
    assert_eq!(byte_width(b'M'), 833);
    assert_eq!(byte_width(b'W'), 944);
    assert_eq!(byte_width(b'i'), 222);
    assert_eq!(byte_width(b'm'), 833);
    assert_eq!(byte_width(b'z'), 500);
    assert_eq!(byte_width(b'~'), 584);
}

#[test]
fn run_width_sums() {
    assert_eq!(run_width(b"Hi"), 722 + 222);
    assert_eq!(run_width(b""), 0);
}

#[test]
fn encode_maps_typographic_punctuation() {
    assert_eq!(encode("\u{2019}\u{201c}\u{201d}\u{2013}\u{2014}\u{2026}\u{2022}"), vec![
        0x92, 0x93, 0x94, 0x96, 0x97, 0x85, 0x95
    ]);
}

#[test]
fn encode_keeps_latin1_and_replaces_the_rest() {
    assert_eq!(encode("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    assert_eq!(encode("\u{1F4C8} up"), b"? up".to_vec());
}

#[test]
fn encode_drops_controls_and_expands_tabs() {
    assert_eq!(encode("a\r\u{7}\tb"), b"a b".to_vec());
}
