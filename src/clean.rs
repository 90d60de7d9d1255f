use std::sync::LazyLock;

use regex::Regex;

use crate::db::Article;
use crate::markup;

static NONLETTERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"[0-9’“„”«»…–—!"#$%&'()*+,\-./:;?@\[\\\]^_`{|}~<=>]"##).unwrap()
});
static NONLETTERS_KEEP_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"[’“„”«»…–—!"#$%&'()*+,\-./:;?@\[\\\]^_`{|}~<=>]"##).unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    pub keep_template_params: bool,
    pub keep_numbers: bool,
}

/// Replaces each punctuation, quotation mark or (unless kept) digit with a
/// single space.
pub fn clean_text(text: &str, keep_numbers: bool) -> String {
    let re = if keep_numbers {
        &NONLETTERS_KEEP_DIGITS_RE
    } else {
        &NONLETTERS_RE
    };
    re.replace_all(text, " ").into_owned()
}

pub fn clean_article(raw: &str, options: CleanOptions) -> String {
    let plain = markup::strip_code(raw, options.keep_template_params);
    clean_text(&plain, options.keep_numbers)
}

/// Cleans every article body; output order matches `articles`.
#[cfg(feature = "rayon")]
pub fn clean_corpus(articles: &[Article], options: CleanOptions) -> Vec<String> {
    use rayon::prelude::*;

    articles
        .par_iter()
        .map(|a| clean_article(&a.text, options))
        .collect()
}

#[cfg(not(feature = "rayon"))]
pub fn clean_corpus(articles: &[Article], options: CleanOptions) -> Vec<String> {
    articles
        .iter()
        .map(|a| clean_article(&a.text, options))
        .collect()
}

pub fn total_chars(texts: &[String]) -> usize {
    texts.iter().map(|t| t.chars().count()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMOVED: &str = "0123456789’“„”«»…–—!\"#$%&'()*+,-./:;?@[\\]^_`{|}~<=>";

    #[test]
    fn removes_every_listed_character() {
        let cleaned = clean_text(&format!("a{}b", REMOVED), false);
        assert!(cleaned.chars().all(|c| c == 'a' || c == 'b' || c == ' '));
        assert_eq!(cleaned.chars().count(), REMOVED.chars().count() + 2);
    }

    #[test]
    fn keeps_digits_when_asked() {
        assert_eq!(clean_text("rok 1758.", true), "rok 1758 ");
        assert_eq!(clean_text("rok 1758.", false), "rok      ");
    }

    #[test]
    fn letters_and_diacritics_survive() {
        assert_eq!(clean_text("Żółć, gęś!", false), "Żółć  gęś ");
    }

    #[test]
    fn article_is_stripped_then_cleaned() {
        let cleaned = clean_article(
            "'''Kot''' ({{lang|la|Felis}}) – [[ssaki|ssak]], 2 uszy.",
            CleanOptions::default(),
        );
        assert_eq!(cleaned.split_whitespace().collect::<Vec<_>>(), vec!["Kot", "ssak", "uszy"]);

        let cleaned = clean_article(
            "'''Kot''' ({{lang|la|Felis}}) – [[ssaki|ssak]], 2 uszy.",
            CleanOptions {
                keep_template_params: true,
                keep_numbers: true,
            },
        );
        assert_eq!(
            cleaned.split_whitespace().collect::<Vec<_>>(),
            vec!["Kot", "la", "Felis", "ssak", "2", "uszy"]
        );
    }

    #[test]
    fn corpus_order_is_preserved() {
        let articles: Vec<Article> = (0..50)
            .map(|i| Article {
                title: format!("t{}", i),
                text: format!("[[a|słowo{}]]", i),
            })
            .collect();
        let cleaned = clean_corpus(&articles, CleanOptions::default());
        assert_eq!(cleaned.len(), 50);
        assert_eq!(cleaned[7], "słowo ");
        assert_eq!(
            clean_corpus(&articles, CleanOptions { keep_numbers: true, ..Default::default() })[7],
            "słowo7"
        );
    }
}
