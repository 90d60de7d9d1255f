//! Wikitext to plain text.
//!
//! Handles the constructs that show up in article bodies: templates, template
//! arguments, internal and external links, quote formatting, headings, lists,
//! tables, HTML tags, comments and entities. Unbalanced markup is left in the
//! output as literal text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|$)").unwrap());
static SWITCH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__[A-Z]+__").unwrap());
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9]*\b[^<>]*>").unwrap());
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^={1,6}\s*(.+?)\s*={1,6}$").unwrap());
static LIST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[*#:;]+\s*").unwrap());
static RULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-{4,}\s*$").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});").unwrap());

/// Tags whose contents never render as article prose.
const INVISIBLE_TAGS: &[&str] = &[
    "categorytree",
    "charinsert",
    "gallery",
    "graph",
    "imagemap",
    "inputbox",
    "math",
    "nowiki",
    "pre",
    "score",
    "section",
    "source",
    "syntaxhighlight",
    "templatedata",
    "timeline",
];

static INVISIBLE_TAG_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    INVISIBLE_TAGS
        .iter()
        .map(|tag| {
            Regex::new(&format!(
                r"(?is)<{tag}\b[^<>]*/>|<{tag}\b[^<>]*>.*?</{tag}\s*>",
                tag = tag
            ))
            .unwrap()
        })
        .collect()
});

const URL_SCHEMES: &[&str] = &["http://", "https://", "ftp://", "//", "mailto:"];

/// Strips wikitext markup and returns readable text.
///
/// With `keep_template_params` the parameter values of every template are
/// kept (space separated); otherwise templates vanish entirely.
pub fn strip_code(wikitext: &str, keep_template_params: bool) -> String {
    let text = COMMENT_RE.replace_all(wikitext, "");
    let mut text = text.into_owned();
    for re in INVISIBLE_TAG_RES.iter() {
        text = re.replace_all(&text, "").into_owned();
    }
    let text = SWITCH_RE.replace_all(&text, "");

    let text = Stripper {
        keep_template_params,
    }
    .strip(&text);

    let text = BR_RE.replace_all(&text, "\n");
    let text = TAG_RE.replace_all(&text, "");
    let text = strip_lines(&text);
    let text = decode_entities(&text);
    BLANK_RUN_RE.replace_all(&text, "\n\n").trim().to_string()
}

struct Stripper {
    keep_template_params: bool,
}

impl Stripper {
    /// Inline pass: templates, arguments, links and quote runs.
    fn strip(&self, text: &str) -> String {
        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut i = 0;

        while i < bytes.len() {
            let replacement = match bytes[i] {
                b'{' => self.braces(&text[i..]),
                b'[' => self.brackets(&text[i..]),
                b'\'' => quote_run(&text[i..]),
                _ => None,
            };
            match replacement {
                Some((len, replaced)) => {
                    out.push_str(&text[copied..i]);
                    out.push_str(&replaced);
                    i += len;
                    copied = i;
                }
                None => i += 1,
            }
        }
        out.push_str(&text[copied..]);
        out
    }

    fn braces(&self, s: &str) -> Option<(usize, String)> {
        if !s.starts_with("{{") {
            return None;
        }
        let end = matching_close(s, b'{', b'}')?;
        let whole = &s[..end];

        if whole.starts_with("{{{") && whole.ends_with("}}}") && end >= 6 {
            // Template argument: only the default value renders.
            let parts = split_top_level(&whole[3..end - 3]);
            let default = parts[1..].join("|");
            return Some((end, self.strip(&default)));
        }

        if !whole.ends_with("}}") || end < 4 {
            return None;
        }
        let parts = split_top_level(&whole[2..end - 2]);
        if !self.keep_template_params {
            return Some((end, String::new()));
        }
        let values: Vec<String> = parts[1..]
            .iter()
            .map(|&param| {
                let value = match find_top_level(param, b'=') {
                    Some(eq) => &param[eq + 1..],
                    None => param,
                };
                self.strip(value).trim().to_string()
            })
            .filter(|v| !v.is_empty())
            .collect();
        Some((end, values.join(" ")))
    }

    fn brackets(&self, s: &str) -> Option<(usize, String)> {
        if s.starts_with("[[") {
            let end = matching_close(s, b'[', b']')?;
            if end < 4 || !s[..end].ends_with("]]") {
                return None;
            }
            return Some((end, self.wikilink(&s[2..end - 2])));
        }

        let rest = &s[1..];
        if !URL_SCHEMES.iter().any(|scheme| rest.starts_with(scheme)) {
            return None;
        }
        let close = rest.find(|c: char| c == ']' || c == '\n')?;
        if rest.as_bytes()[close] != b']' {
            return None;
        }
        let inner = &rest[..close];
        let label = inner
            .split_once(char::is_whitespace)
            .map(|(_, label)| self.strip(label.trim()))
            .unwrap_or_default();
        Some((close + 2, label))
    }

    fn wikilink(&self, inner: &str) -> String {
        let (target, label) = match find_top_level(inner, b'|') {
            Some(pipe) => (inner[..pipe].trim(), Some(&inner[pipe + 1..])),
            None => (inner.trim(), None),
        };

        // File and category links render like any other link.
        let target = target.strip_prefix(':').map(str::trim).unwrap_or(target);

        match label {
            Some(label) if !label.trim().is_empty() => self.strip(label),
            _ => self.strip(target),
        }
    }
}

fn quote_run(s: &str) -> Option<(usize, String)> {
    let run = s.bytes().take_while(|b| *b == b'\'').count();
    if run >= 2 {
        Some((run, String::new()))
    } else {
        None
    }
}

/// Byte length of the balanced `open`/`close` run starting at `s[0]`.
fn matching_close(s: &str, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i + 1);
            }
        }
    }
    None
}

/// Position of the first `needle` not nested inside braces or brackets.
fn find_top_level(s: &str, needle: u8) -> Option<usize> {
    let mut braces = 0i32;
    let mut brackets = 0i32;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'{' => braces += 1,
            b'}' => braces -= 1,
            b'[' => brackets += 1,
            b']' => brackets -= 1,
            _ if b == needle && braces <= 0 && brackets <= 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = s;
    while let Some(pipe) = find_top_level(rest, b'|') {
        parts.push(&rest[..pipe]);
        rest = &rest[pipe + 1..];
    }
    parts.push(rest);
    parts
}

/// Line pass: headings, tables, lists and horizontal rules.
fn strip_lines(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if let Some(caps) = HEADING_RE.captures(line) {
            lines.push(caps[1].to_string());
            continue;
        }
        if line.starts_with("{|")
            || line.starts_with("|}")
            || line.starts_with("|-")
            || RULE_RE.is_match(line)
        {
            continue;
        }
        if let Some(caption) = line.strip_prefix("|+") {
            lines.push(table_cell(caption).to_string());
            continue;
        }
        if let Some(cells) = line.strip_prefix('|').or_else(|| line.strip_prefix('!')) {
            let row: Vec<&str> = cells
                .split("||")
                .flat_map(|c| c.split("!!"))
                .map(table_cell)
                .filter(|c| !c.is_empty())
                .collect();
            lines.push(row.join(" "));
            continue;
        }
        lines.push(LIST_RE.replace(line, "").into_owned());
    }
    lines.join("\n")
}

/// Drops a leading `attr="..." |` prefix from a table cell.
fn table_cell(cell: &str) -> &str {
    match cell.split_once('|') {
        Some((attrs, value)) if attrs.contains('=') => value.trim(),
        _ => cell.trim(),
    }
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        let code = u32::from_str_radix(hex, 16).ok()?;
        return char::from_u32(code).map(String::from);
    }
    if let Some(dec) = name.strip_prefix('#') {
        let code: u32 = dec.parse().ok()?;
        return char::from_u32(code).map(String::from);
    }
    let decoded = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" | "ensp" | "emsp" | "thinsp" => " ",
        "shy" => "",
        "ndash" => "–",
        "mdash" => "—",
        "minus" => "−",
        "hellip" => "…",
        "laquo" => "«",
        "raquo" => "»",
        "bdquo" => "„",
        "ldquo" => "“",
        "rdquo" => "”",
        "lsquo" => "‘",
        "rsquo" => "’",
        "times" => "×",
        "deg" => "°",
        "middot" => "·",
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(s: &str) -> String {
        strip_code(s, false)
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip("Kot domowy"), "Kot domowy");
    }

    #[test]
    fn internal_links() {
        assert_eq!(strip("[[Kot domowy]]"), "Kot domowy");
        assert_eq!(strip("[[Kot domowy|kot]]"), "kot");
        assert_eq!(strip("[[kot]]y"), "koty");
        assert_eq!(strip("[[Kot|]]"), "Kot");
        assert_eq!(strip("[[:Kategoria:Koty|koty]]"), "koty");
    }

    #[test]
    fn file_and_category_links_render_as_text() {
        assert_eq!(
            strip("A [[Plik:Kot.jpg|thumb|Kot na [[dach|dachu]]]] B"),
            "A thumb|Kot na dachu B"
        );
        assert_eq!(strip("[[Kategoria:Koty]]"), "Kategoria:Koty");
        assert_eq!(strip("[[File:Cat.png|200px]]x"), "200pxx");
    }

    #[test]
    fn wiki_boilerplate_reaches_cleaned_text() {
        let src = "Kot<ref>Źródło: Atlas</ref> mruczy. \
                   [[Plik:Kot.jpg|thumb|200px|Kot na dachu]] [[Kategoria:Ssaki]]";
        assert_eq!(
            strip(src),
            "KotŹródło: Atlas mruczy. thumb|200px|Kot na dachu Kategoria:Ssaki"
        );
        let words: Vec<String> = crate::clean::clean_text(&strip(src), false)
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let stop_words = crate::stopwords::polish();
        for boilerplate in ["thumb", "px", "plik", "kategoria"] {
            assert!(stop_words.contains(boilerplate));
        }
        assert!(words.contains(&"thumb".to_string()));
        assert!(words.contains(&"px".to_string()));
        assert!(words.contains(&"kategoria".to_string()));
        assert!(words.contains(&"ssaki".to_string()));
    }

    #[test]
    fn templates_dropped_or_kept() {
        let src = "Przed {{Cytat|autor=Jan|Ala ma [[kot]]a}} po";
        assert_eq!(strip_code(src, false), "Przed  po");
        assert_eq!(strip_code(src, true), "Przed Jan Ala ma kota po");
        assert_eq!(strip_code("{{a|{{b|c}}|d}}", true), "c d");
        assert_eq!(strip("{{#if: x | y | z }}tekst"), "tekst");
    }

    #[test]
    fn template_arguments_keep_default() {
        assert_eq!(strip("{{{1|domyślny}}}"), "domyślny");
        assert_eq!(strip("a{{{nazwa}}}b"), "ab");
    }

    #[test]
    fn external_links() {
        assert_eq!(strip("[https://pl.wikipedia.org Wikipedia]"), "Wikipedia");
        assert_eq!(strip("zob. [http://example.com]"), "zob.");
        assert_eq!(strip("https://example.com"), "https://example.com");
        assert_eq!(strip("[nie link]"), "[nie link]");
    }

    #[test]
    fn formatting_and_headings() {
        assert_eq!(strip("'''Kot''' to ''ssak''"), "Kot to ssak");
        assert_eq!(strip("== Historia ==\ntekst"), "Historia\ntekst");
        assert_eq!(strip("* jeden\n# dwa\n: trzy"), "jeden\ndwa\ntrzy");
        assert_eq!(strip("a\n----\nb"), "a\nb");
    }

    #[test]
    fn tags_and_comments() {
        assert_eq!(strip("Kot<ref name=\"a\">Źródło</ref> mruczy"), "KotŹródło mruczy");
        assert_eq!(strip("Kot<ref name=\"a\" /> mruczy"), "Kot mruczy");
        assert_eq!(strip("Kot<references /> mruczy"), "Kot mruczy");
        assert_eq!(strip("<small>mały</small> tekst"), "mały tekst");
        assert_eq!(strip("a<!-- ukryte -->b"), "ab");
        assert_eq!(strip("a<br />b"), "a\nb");
        assert_eq!(strip("__NOTOC__tekst"), "tekst");
        assert_eq!(strip("<math>x^2</math>wzór"), "wzór");
    }

    #[test]
    fn entities() {
        assert_eq!(strip("a&nbsp;b &amp; c&#8211;d&#x41;"), "a b & c–dA");
        assert_eq!(strip("&bogus;"), "&bogus;");
    }

    #[test]
    fn tables_keep_cell_text() {
        let src = "{| class=\"wikitable\"\n|+ Tytuł\n|-\n! Nazwa !! Wartość\n|-\n| style=\"x\" | jeden || dwa\n|}";
        assert_eq!(strip(src), "Tytuł\nNazwa Wartość\njeden dwa");
    }

    #[test]
    fn unbalanced_markup_is_literal() {
        assert_eq!(strip("{{niedomknięty"), "{{niedomknięty");
        assert_eq!(strip("[[link bez końca"), "[[link bez końca");
    }

    #[test]
    fn article_fixture() {
        let src = std::fs::read_to_string("tests/fixtures/kot_domowy.wiki").unwrap();
        let text = strip_code(&src, false);
        assert!(text.starts_with("Kot domowy (Felis catus) – udomowiony gatunek ssaka"));
        assert!(text.contains("Historia udomowienia"));
        assert!(text.contains("W starożytnym Egipcie koty"));
        assert!(!text.contains("{{"));
        assert!(!text.contains("[["));
        assert!(!text.contains("<ref"));
        assert!(!text.contains("Takson infobox"));
        assert!(text.contains("Kategoria:Kotowate"));
        assert!(text.contains("thumb|200px|Kot domowy"));

        let with_params = strip_code(&src, true);
        assert!(with_params.contains("Felis catus"));
        assert!(with_params.contains("Carl Linnaeus"));
        assert!(with_params.contains("Mammal Species of the World"));
        assert!(with_params.contains("Domestykacja"));
    }
}
