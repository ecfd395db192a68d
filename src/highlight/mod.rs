//! Syntax highlighting for buffer text.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions.
//! Highlighting is stateless per call: the editor re-highlights the whole
//! text after every change and keeps no cache of its own.

use std::sync::{Mutex, OnceLock};

use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::debug_span;

/// A 24-bit foreground colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Style class of one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenStyle {
    /// `None` for unhighlighted (plain) text.
    pub fg: Option<Rgb>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: TokenStyle,
}

impl StyledSpan {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TokenStyle::default(),
        }
    }
}

/// Highlighter output: one entry per `\n`-separated line of the input.
///
/// The spans of a line cover its full text without gaps or overlaps and
/// never contain the newline itself. Iterating with [`Self::lines`] can be
/// repeated any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
    lines: Vec<Vec<StyledSpan>>,
}

impl Highlighted {
    pub fn lines(&self) -> impl Iterator<Item = &[StyledSpan]> + '_ {
        self.lines.iter().map(Vec::as_slice)
    }

    pub fn line(&self, idx: usize) -> Option<&[StyledSpan]> {
        self.lines.get(idx).map(Vec::as_slice)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Highlight `text` using the grammar for `language_id`.
///
/// Unknown languages produce a single unstyled span per line.
pub fn highlight(text: &str, language_id: &str) -> Highlighted {
    let syntax_set = syntax_set();
    let mode = background_mode();

    let Some(syntax) = find_syntax(syntax_set, language_id) else {
        let lines = text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![StyledSpan::plain(line)]
                }
            })
            .collect();
        return Highlighted { lines };
    };

    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut lines = Vec::new();
    let mut with_newline = String::new();
    for line in text.split('\n') {
        // The newline-aware syntax set expects each line to end with '\n'.
        with_newline.clear();
        with_newline.push_str(line);
        with_newline.push('\n');

        let ranges = highlighter
            .highlight_line(&with_newline, syntax_set)
            .unwrap_or_default();
        let spans = if ranges.is_empty() {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![StyledSpan::plain(line)]
            }
        } else {
            ranges
                .into_iter()
                .filter_map(|(style, piece)| {
                    let piece = piece.strip_suffix('\n').unwrap_or(piece);
                    (!piece.is_empty()).then(|| StyledSpan {
                        text: piece.to_string(),
                        style: token_style(style, mode),
                    })
                })
                .collect()
        };
        lines.push(spans);
    }

    Highlighted { lines }
}

/// Whether a grammar exists for `language_id`.
pub fn is_supported(language_id: &str) -> bool {
    find_syntax(syntax_set(), language_id).is_some()
}

fn token_style(style: Style, mode: BackgroundMode) -> TokenStyle {
    let fg = Rgb {
        r: style.foreground.r,
        g: style.foreground.g,
        b: style.foreground.b,
    };
    TokenStyle {
        fg: Some(adjust_fg_for_background(fg, mode)),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

/// Grammar token to try for ids syntect does not know directly.
fn language_alias(id: &str) -> Option<&'static str> {
    match id {
        "ts" | "tsx" | "jsx" | "mjs" | "cjs" => Some("js"),
        "jsonc" | "json5" => Some("json"),
        "yml" => Some("yaml"),
        "bash" | "zsh" => Some("sh"),
        "htm" => Some("html"),
        _ => None,
    }
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, language_id: &str) -> Option<&'a SyntaxReference> {
    if language_id.is_empty() {
        return None;
    }
    let last_segment = language_id.rsplit('.').next().unwrap_or(language_id);
    [language_id, last_segment]
        .into_iter()
        .flat_map(|id| [Some(id), language_alias(id)])
        .flatten()
        .find_map(|token| syntax_set.find_syntax_by_token(token))
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _span = debug_span!("highlight.syntax_set.load_defaults").entered();
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let _span = debug_span!("highlight.theme.load_defaults").entered();
        let theme_set = ThemeSet::load_defaults();
        let preferred = match background_mode() {
            BackgroundMode::Dark => [
                "base16-ocean.dark",
                "base16-eighties.dark",
                "base16-mocha.dark",
                "Solarized (dark)",
            ]
            .as_slice(),
            BackgroundMode::Light => [
                "InspiredGitHub",
                "Solarized (light)",
                "base16-ocean.light",
            ]
            .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

/// Terminal background the colours are tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// Force a background, or `None` to detect it from `COLORFGBG`.
///
/// Must be called before the first [`highlight`] to affect theme choice.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

fn background_mode() -> BackgroundMode {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return match mode {
            HighlightBackground::Light => BackgroundMode::Light,
            HighlightBackground::Dark => BackgroundMode::Dark,
        };
    }
    background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

fn adjust_fg_for_background(color: Rgb, mode: BackgroundMode) -> Rgb {
    match mode {
        BackgroundMode::Dark => color,
        BackgroundMode::Light => {
            let luma = 0.0722_f32.mul_add(
                f32::from(color.b),
                0.2126_f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)),
            );
            if luma < 155.0 {
                return color;
            }
            let darken = |c: u8| (f32::from(c) * 0.42).round().clamp(0.0, 255.0) as u8;
            Rgb {
                r: darken(color.r),
                g: darken(color.g),
                b: darken(color.b),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(spans: &[StyledSpan]) -> String {
        spans.iter().map(|span| span.text.as_str()).collect()
    }

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let code = "fn main() {\n    let x = 1;\n}";
        let out = highlight(code, "rs");

        assert_eq!(out.line_count(), 3);
        let has_color = out.lines().flatten().any(|span| span.style.fg.is_some());
        assert!(has_color, "Expected at least one colored span for Rust");
    }

    #[test]
    fn test_spans_cover_each_line_exactly() {
        let code = "fn main() {\n    let s = \"(x)\";\n}\n";
        let out = highlight(code, "rs");
        let rebuilt: Vec<String> = out.lines().map(line_text).collect();
        let expected: Vec<String> = code.split('\n').map(str::to_string).collect();
        assert_eq!(rebuilt, expected);
    }

    #[test]
    fn test_trailing_newline_yields_trailing_empty_line() {
        let out = highlight("x\n", "rs");
        assert_eq!(out.line_count(), 2);
        assert!(out.line(1).unwrap().is_empty());
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let out = highlight("", "rs");
        assert_eq!(out.line_count(), 1);
        assert!(out.line(0).unwrap().is_empty());
    }

    #[test]
    fn test_highlight_is_restartable() {
        let out = highlight("a\nb", "txt");
        let first: Vec<_> = out.lines().map(line_text).collect();
        let second: Vec<_> = out.lines().map(line_text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let out = highlight("just text", "nope");
        assert_eq!(out.line_count(), 1);
        assert!(out.lines().flatten().all(|span| span.style.fg.is_none()));
        assert_eq!(line_text(out.line(0).unwrap()), "just text");
    }

    #[test]
    fn test_empty_language_id_is_plain() {
        assert!(!is_supported(""));
        let out = highlight("x", "");
        assert_eq!(out.line(0).unwrap()[0].style, TokenStyle::default());
    }

    #[test]
    fn test_typescript_ids_resolve_through_alias() {
        assert!(is_supported("tsx"));
        assert!(is_supported("ts"));
        let out = highlight("const x = 1;", "tsx");
        assert!(out.lines().flatten().any(|span| span.style.fg.is_some()));
    }

    #[test]
    fn test_compound_id_uses_last_segment() {
        assert!(is_supported("test.tsx"));
        assert!(is_supported("min.js"));
    }

    #[test]
    fn test_colorfgbg_dark_background() {
        assert_eq!(background_mode_from_colorfgbg(Some("15;0")), BackgroundMode::Dark);
        assert_eq!(background_mode_from_colorfgbg(None), BackgroundMode::Dark);
    }

    #[test]
    fn test_colorfgbg_light_background() {
        assert_eq!(background_mode_from_colorfgbg(Some("0;15")), BackgroundMode::Light);
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let bright = Rgb {
            r: 240,
            g: 230,
            b: 120,
        };
        let adjusted = adjust_fg_for_background(bright, BackgroundMode::Light);
        assert!(adjusted.r < bright.r);
        assert!(adjusted.g < bright.g);
        assert!(adjusted.b < bright.b);
        assert_eq!(adjust_fg_for_background(bright, BackgroundMode::Dark), bright);
    }
}
