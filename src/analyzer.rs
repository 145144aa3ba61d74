use crate::results::Article;
use std::collections::HashMap;

/// Occurrences of each lowercase word across translated titles, in order of
/// first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCount {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl WordCount {
    /// Counts the whitespace-separated words of every successfully translated
    /// title. Titles still carrying the failure placeholder are ignored.
    pub fn from_articles(articles: &[Article]) -> Self {
        let mut count = Self::default();
        for title in articles.iter().filter_map(Article::successful_translation) {
            for word in title.to_lowercase().split_whitespace() {
                count.add(word);
            }
        }
        count
    }

    fn add(&mut self, word: &str) {
        match self.counts.get_mut(word) {
            Some(n) => *n += 1,
            None => {
                self.order.push(word.to_string());
                self.counts.insert(word.to_string(), 1);
            }
        }
    }

    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Words occurring strictly more than `threshold` times
    pub fn above(&self, threshold: usize) -> Vec<(String, usize)> {
        self.order
            .iter()
            .map(|word| (word.clone(), self.get(word)))
            .filter(|(_, n)| *n > threshold)
            .collect()
    }
}

/// Words repeated more than `threshold` times across the translated titles
pub fn repeated_words(articles: &[Article], threshold: usize) -> Vec<(String, usize)> {
    WordCount::from_articles(articles).above(threshold)
}
