//! The transcoding pipeline: extract, register, escape, reassemble.

use chatmark_types::{Dialect, Result, TranscodeError, TranscodeOptions};
use tracing::{debug, error};

use crate::escape::escape_placeholder_text;
use crate::extract::{Piece, extract};
use crate::placeholder::PlaceholderRegistry;
use crate::reassemble::substitute;

/// Rewrite common markdown into `dialect` using default options.
///
/// Empty input yields empty output. On error the message should not be
/// sent; see [`TranscodeError`].
pub fn transcode(text: &str, dialect: Dialect) -> Result<String> {
    transcode_with(text, dialect, &TranscodeOptions::default())
}

/// Rewrite common markdown into `dialect`.
pub fn transcode_with(text: &str, dialect: Dialect, options: &TranscodeOptions) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let result = run(text, dialect, options);
    match &result {
        Ok(output) => debug!(
            %dialect,
            input_len = text.len(),
            output_len = output.len(),
            "transcoded message"
        ),
        Err(err @ TranscodeError::Internal { .. }) => error!(
            %dialect,
            input_len = text.len(),
            error = %err,
            "transcoder invariant violated"
        ),
        Err(err) => debug!(%dialect, error = %err, "transcoding rejected input"),
    }
    result
}

fn run(text: &str, dialect: Dialect, options: &TranscodeOptions) -> Result<String> {
    let extraction = extract(text);
    let mut registry = PlaceholderRegistry::for_input(text)?;
    let placeholders: Vec<_> = extraction
        .spans()
        .iter()
        .map(|span| registry.register(*span))
        .collect();

    let mut marked = String::with_capacity(text.len() + placeholders.len() * 4);
    for piece in extraction.pieces() {
        match piece {
            Piece::Text(plain) => marked.push_str(plain),
            Piece::Span(idx) => marked.push_str(placeholders[*idx].as_str()),
        }
    }
    debug!(
        %dialect,
        spans = registry.len(),
        sentinel = registry.sentinel() as u32,
        "spans extracted"
    );

    let escaped = escape_placeholder_text(&marked, dialect, registry.sentinel())?;
    let replacements = registry.resolve(dialect, options);
    substitute(&escaped, registry.sentinel(), &replacements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_types::UrlEscaping;

    fn strict(text: &str) -> String {
        transcode(text, Dialect::Strict).unwrap()
    }

    fn slack(text: &str) -> String {
        transcode(text, Dialect::Slack).unwrap()
    }

    #[test]
    fn empty_input() {
        assert_eq!(strict(""), "");
        assert_eq!(slack(""), "");
    }

    #[test]
    fn plain_text_strict() {
        assert_eq!(strict("Version 1.2-beta!"), r"Version 1\.2\-beta\!");
    }

    #[test]
    fn plain_text_slack() {
        assert_eq!(slack("Version 1.2-beta!"), "Version 1.2-beta!");
    }

    #[test]
    fn bold() {
        assert_eq!(slack("**bold**"), "*bold*");
        assert_eq!(strict("**bold**"), "*bold*");
        assert_eq!(strict("**v1.0**"), r"*v1\.0*");
    }

    #[test]
    fn italic_both_delimiters() {
        assert_eq!(slack("*italic*"), "_italic_");
        assert_eq!(slack("_italic_"), "_italic_");
        assert_eq!(strict("*it.alic*"), r"_it\.alic_");
        assert_eq!(strict("_it.alic_"), r"_it\.alic_");
    }

    #[test]
    fn links() {
        let input = "[Example](http://x.test/a.b)";
        assert_eq!(slack(input), "<http://x.test/a.b|Example>");
        assert_eq!(strict(input), r"[Example](http://x\.test/a\.b)");
    }

    #[test]
    fn raw_link_urls() {
        let options = TranscodeOptions {
            link_urls: UrlEscaping::Raw,
        };
        let out =
            transcode_with("see [docs](http://x.test/a.b).", Dialect::Strict, &options).unwrap();
        assert_eq!(out, r"see [docs](http://x.test/a.b)\.");
    }

    #[test]
    fn unterminated_asterisk() {
        assert_eq!(strict("Hello *world"), r"Hello \*world");
        assert_eq!(slack("Hello *world"), "Hello *world");
    }

    #[test]
    fn pure_inline_code() {
        assert_eq!(strict("`x=1`"), "`x=1`");
    }

    #[test]
    fn code_block_content_untouched() {
        let input = "Run:\n```sh\nls -la *.rs | grep [a-z]\n```\nDone.";
        assert_eq!(
            strict(input),
            "Run:\n```sh\nls -la *.rs | grep [a-z]\n```\nDone\\."
        );
    }

    #[test]
    fn adjacent_bold() {
        assert_eq!(slack("**a** **b**"), "*a* *b*");
        assert_eq!(strict("**a** **b**"), "*a* *b*");
    }

    #[test]
    fn repeated_identical_spans() {
        assert_eq!(slack("*note* and *note*"), "_note_ and _note_");
        assert_eq!(strict("*note* - *note*"), r"_note_ \- _note_");
    }

    #[test]
    fn mixed_message() {
        let input = "**Deploy** of `api-v2` to [prod](https://ex.test) done (took 3.5s)!";
        assert_eq!(
            slack(input),
            "*Deploy* of `api-v2` to <https://ex.test|prod> done (took 3.5s)!"
        );
        assert_eq!(
            strict(input),
            r"*Deploy* of `api-v2` to [prod](https://ex\.test) done \(took 3\.5s\)\!"
        );
    }

    #[test]
    fn input_with_nul_still_transcodes() {
        assert_eq!(strict("a\0b."), "a\0b\\.");
        assert_eq!(strict("\0 **x.y** \u{1}"), "\0 *x\\.y* \u{1}");
    }

    #[test]
    fn saturated_input_is_rejected() {
        let input: String = (0u8..0x20)
            .filter(|&b| !matches!(b, b'\t' | b'\n' | b'\r'))
            .map(char::from)
            .collect();
        let err = transcode(&input, Dialect::Strict).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn backslash_before_reserved_char() {
        assert_eq!(strict(r"a\."), r"a\\\.");
        assert_eq!(strict(r"path\_x"), r"path\\\_x");
        assert_eq!(strict(r"\*star"), r"\\\*star");
        assert_eq!(strict(r"C:\temp"), r"C:\\temp");
        assert_eq!(slack(r"C:\temp"), r"C:\temp");
    }

    #[test]
    fn backslash_inside_spans() {
        assert_eq!(strict(r"**a\b**"), r"*a\\b*");
        assert_eq!(strict(r"[x\y](http://h/z)"), r"[x\\y](http://h/z)");
        assert_eq!(strict(r"[x](http://h/a\b)"), r"[x](http://h/a\\b)");
        assert_eq!(strict(r"`a\.b`"), r"`a\.b`");
        assert_eq!(strict("```\nC:\\dir\n```"), "```\nC:\\dir\n```");
    }

    #[test]
    fn raw_link_urls_keep_backslashes() {
        let options = TranscodeOptions {
            link_urls: UrlEscaping::Raw,
        };
        let out = transcode_with(r"[x\y](http://h/a\b)", Dialect::Strict, &options).unwrap();
        assert_eq!(out, r"[x\\y](http://h/a\b)");
    }

    #[test]
    fn escaped_bracket_in_label_is_plain_text() {
        assert_eq!(strict(r"[a\]b](u)"), r"\[a\\\]b\]\(u\)");
        assert_eq!(slack(r"[a\]b](u)"), r"[a\]b](u)");
    }
}
