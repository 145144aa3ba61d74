//! Human-readable run output on stdout.

use crate::results::Article;
use crate::utils::preview;
use std::fmt::Write;

/// Scraped articles with their source-language fields
pub fn articles(articles: &[Article]) -> String {
    let mut out = String::from("\nScraped Articles:\n");
    for (i, article) in articles.iter().enumerate() {
        let _ = writeln!(out, "\nArticle {}:", i + 1);
        let _ = writeln!(out, "Title (Spanish): {}", article.title);
        let _ = writeln!(out, "Content: {}...", preview(&article.content, 100));
        if let Some(url) = &article.image_url {
            let _ = writeln!(out, "Image URL: {}", url);
        }
    }
    out
}

/// Original and translated title of every article
pub fn translations(articles: &[Article]) -> String {
    let mut out = String::from("\nTranslated Titles:\n");
    for (i, article) in articles.iter().enumerate() {
        let translated = article.translated_title.as_deref().unwrap_or("-");
        let _ = writeln!(out, "Article {}: {}", i + 1, translated);
        let _ = writeln!(out, "  Original: {}", article.title);
    }
    out
}

/// Repeated words, or a single line saying there are none
pub fn repeated_words(repeats: &[(String, usize)], threshold: usize) -> String {
    let times = match threshold {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{} times", n),
    };

    if repeats.is_empty() {
        return format!(
            "\nNo words repeated more than {} in translated headers.\n",
            times
        );
    }

    let mut out = format!("\nWords repeated more than {} in translated headers:\n", times);
    for (word, count) in repeats {
        let _ = writeln!(out, "'{}': {} times", word, count);
    }
    out
}
