/*!
 * Tests for timecode and markup conversion
 */

use easysubs::errors::FormatError;
use easysubs::markup::MarkupTranslator;
use easysubs::timecode;

#[test]
fn test_timecode_parse_withReferenceValue_shouldBeExact() {
    assert_eq!(timecode::parse("01:02:03,456").unwrap(), 3723.456);
}

#[test]
fn test_timecode_parse_acrossRange_shouldBeMillisecondExact() {
    for (text, expected_ms) in [
        ("00:00:00,000", 0u64),
        ("00:00:00,001", 1),
        ("00:59:59,999", 3_599_999),
        ("12:34:56,789", 45_296_789),
        ("99:59:59,999", 359_999_999),
    ] {
        assert_eq!(timecode::parse_millis(text).unwrap(), expected_ms);
        assert_eq!(timecode::parse(text).unwrap(), expected_ms as f64 / 1000.0);
    }
}

#[test]
fn test_timecode_parse_withDotSeparator_shouldFail() {
    let result = timecode::parse("00:00:01.000");
    assert_eq!(result, Err(FormatError::InvalidTimecode("00:00:01.000".to_string())));
}

#[test]
fn test_timecode_format_shouldMatchSrtLayout() {
    assert_eq!(timecode::format(3723.456), "01:02:03,456");
    assert_eq!(timecode::format(360_000.0), "100:00:00,000");
}

#[test]
fn test_markup_translate_withBraceTags_shouldRewrite() {
    assert_eq!(MarkupTranslator::translate("{b}hi{/b}"), "<b>hi</b>");
}

#[test]
fn test_markup_translate_withFontColor_shouldRewrite() {
    assert_eq!(
        MarkupTranslator::translate("<font color=\"red\">hi</font>"),
        "<color=red>hi</color>"
    );
}

#[test]
fn test_markup_translate_withUppercaseFont_shouldKeepColorVerbatim() {
    assert_eq!(
        MarkupTranslator::translate("<FONT COLOR=\"Red\">Hi</FONT>"),
        "<color=Red>Hi</color>"
    );
}

#[test]
fn test_markup_translate_withSeveralFonts_shouldRewriteEach() {
    assert_eq!(
        MarkupTranslator::translate("<font color=\"a\">x</font> and <font color=\"b\">y</font>"),
        "<color=a>x</color> and <color=b>y</color>"
    );
}
