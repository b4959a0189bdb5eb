//! Syntax highlighting for code blocks, backed by syntect.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, highlighted_html_for_string};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::{ConfigError, HighlightError};

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// How highlighted tokens are styled in the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightFormat {
    /// Inline `style="..."` attributes; self-contained output.
    #[default]
    InlineStyles,
    /// CSS classes per token kind; the page supplies the stylesheet.
    CssClasses,
}

/// Options for code block highlighting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Name of the visual theme, resolved against syntect's bundled theme
    /// set when the renderer is built. Only used with
    /// [`HighlightFormat::InlineStyles`]. Default: [`DEFAULT_THEME`].
    pub theme: String,
    /// Infer the language from the source when no language is declared.
    /// When disabled, undeclared blocks use the plain-text syntax directly.
    /// Default: `true`.
    pub autodetect: bool,
    /// Output styling mode. Default: [`HighlightFormat::InlineStyles`].
    pub format: HighlightFormat,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            autodetect: true,
            format: HighlightFormat::InlineStyles,
        }
    }
}

/// Renders code blocks as highlighted HTML.
///
/// Syntax resolution per block, in priority order: declared language token,
/// first-line autodetection (if enabled), plain-text fallback. The syntax and
/// theme sets are loaded once at construction; selection objects are
/// transient per block.
#[derive(Debug)]
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
    autodetect: bool,
    format: HighlightFormat,
}

impl CodeHighlighter {
    /// Build a highlighter, resolving the theme name eagerly so a bad name
    /// fails configuration instead of a render.
    pub fn new(options: HighlightOptions) -> Result<Self, ConfigError> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(&options.theme)
            .ok_or(ConfigError::UnknownTheme(options.theme))?;
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
            autodetect: options.autodetect,
            format: options.format,
        })
    }

    /// Highlight `source` and return the formatted markup.
    ///
    /// `info` is the declared language from the fence info string; empty
    /// means undeclared. Tokenization failure is recoverable: the caller
    /// falls back to unhighlighted rendering.
    pub fn render(&self, source: &str, info: &str) -> Result<String, HighlightError> {
        let syntax = self.select_syntax(source, info);
        match self.format {
            HighlightFormat::InlineStyles => Ok(highlighted_html_for_string(
                source,
                &self.syntaxes,
                syntax,
                &self.theme,
            )?),
            HighlightFormat::CssClasses => {
                let mut generator = ClassedHTMLGenerator::new_with_class_style(
                    syntax,
                    &self.syntaxes,
                    ClassStyle::Spaced,
                );
                for line in LinesWithEndings::from(source) {
                    generator.parse_html_for_line_which_includes_newline(line)?;
                }
                Ok(format!(
                    "<pre class=\"code\">{}</pre>\n",
                    generator.finalize()
                ))
            }
        }
    }

    /// A declared-but-unknown language falls straight through to plain text;
    /// autodetection only runs for undeclared blocks.
    fn select_syntax(&self, source: &str, info: &str) -> &SyntaxReference {
        if !info.is_empty() {
            return self
                .syntaxes
                .find_syntax_by_token(info)
                .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        }
        if self.autodetect
            && let Some(first_line) = source.lines().next()
            && let Some(syntax) = self.syntaxes.find_syntax_by_first_line(first_line)
        {
            return syntax;
        }
        self.syntaxes.find_syntax_plain_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter(options: HighlightOptions) -> CodeHighlighter {
        CodeHighlighter::new(options).expect("bundled theme")
    }

    #[test]
    fn test_declared_language_is_highlighted() {
        let hl = highlighter(HighlightOptions::default());
        let html = hl.render("fn main() {}\n", "rust").unwrap();
        assert!(html.contains("<pre"));
        assert!(html.contains("<span"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_unknown_language_still_produces_output() {
        let hl = highlighter(HighlightOptions::default());
        let html = hl.render("?? not ?? a ?? language\n", "no-such-lang").unwrap();
        assert!(html.contains("<pre"));
        assert!(html.contains("language"));
    }

    #[test]
    fn test_autodetect_by_first_line() {
        let hl = highlighter(HighlightOptions::default());
        let html = hl.render("#!/usr/bin/env bash\necho hi\n", "").unwrap();
        assert!(html.contains("<span"));
        assert!(html.contains("echo"));
    }

    #[test]
    fn test_autodetect_disabled_falls_back_to_plain() {
        let hl = highlighter(HighlightOptions {
            autodetect: false,
            ..HighlightOptions::default()
        });
        let html = hl.render("#!/usr/bin/env bash\necho hi\n", "").unwrap();
        assert!(html.contains("echo hi"));
    }

    #[test]
    fn test_css_classes_format() {
        let hl = highlighter(HighlightOptions {
            format: HighlightFormat::CssClasses,
            ..HighlightOptions::default()
        });
        let html = hl.render("fn main() {}\n", "rust").unwrap();
        assert!(html.starts_with("<pre class=\"code\">"));
        assert!(html.contains("class=\""));
        assert!(!html.contains("style=\""));
    }

    #[test]
    fn test_unknown_theme_is_a_config_error() {
        let err = CodeHighlighter::new(HighlightOptions {
            theme: "no-such-theme".to_owned(),
            ..HighlightOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTheme(name) if name == "no-such-theme"));
    }
}
