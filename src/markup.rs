/*!
 * Markup translation for cue text.
 *
 * Legacy SRT styling is rewritten into the rich-text dialect used by the
 * display layer:
 * - `{b}` / `{/b}` brace tags become `<b>` / `</b>`
 * - `<font color="red">text</font>` becomes `<color=red>text</color>`
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Single word-character brace tags, opening or closing
static BRACE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(/?)(\w)\}").expect("Invalid brace tag regex")
});

/// Opening half of the font color idiom
static FONT_OPEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<font\s+color="([^"]*)">"#).expect("Invalid font open regex")
});

static FONT_CLOSE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</font>").expect("Invalid font close regex")
});

/// Stateless rewriter for cue markup
pub struct MarkupTranslator;

impl MarkupTranslator {
    /// Translate source markup into the target dialect.
    ///
    /// Applied once per cue while parsing; running it again on already
    /// translated text leaves the text unchanged.
    pub fn translate(text: &str) -> String {
        let braced = BRACE_TAG_REGEX.replace_all(text, "<$1$2>");
        Self::translate_font_colors(braced.into_owned())
    }

    // Pairs each </font> with the nearest opener before it, so nested
    // elements are rewritten innermost first. Unpaired tags stay as written.
    fn translate_font_colors(mut text: String) -> String {
        let mut from = 0;

        while let Some(close) = FONT_CLOSE_REGEX.find_at(&text, from) {
            let close_range = close.range();
            let opener = FONT_OPEN_REGEX
                .captures_iter(&text[..close_range.start])
                .last()
                .and_then(|caps| Some((caps.get(0)?.range(), caps.get(1)?.as_str().to_string())));

            let Some((open_range, color)) = opener else {
                from = close_range.end;
                continue;
            };

            let replacement = format!(
                "<color={}>{}</color>",
                color,
                &text[open_range.end..close_range.start]
            );
            text.replace_range(open_range.start..close_range.end, &replacement);
            from = open_range.start + replacement.len();
        }

        text
    }
}
