//! Bag-of-words vectorizing and cosine similarity over movie tags.
//!
//! Tokens are runs of two or more word characters, lowercased, with English
//! stop words removed. The vocabulary keeps the most frequent terms across
//! the corpus, ties broken alphabetically.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

/// Default vocabulary size
pub const DEFAULT_MAX_FEATURES: usize = 5000;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// English stop words, as used by scikit-learn
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie",
    "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no",
    "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often",
    "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re",
    "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should",
    "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten",
    "than", "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third",
    "this", "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Sparse term-count vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }
}

/// Cosine similarity; a zero vector is dissimilar to everything, itself included.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm = a.norm() * b.norm();
    if norm == 0.0 {
        return 0.0;
    }
    a.dot(b) / norm
}

/// Term-count vectorizer with a capped vocabulary
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    vocabulary: HashMap<String, usize>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl CountVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            vocabulary: HashMap::new(),
        }
    }

    pub fn tokenize(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !STOP_WORDS.contains(*token))
            .map(str::to_string)
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Learns the vocabulary from `documents`.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> AppResult<()> {
        if documents.is_empty() {
            return Err(AppError::Model(
                "Cannot fit vectorizer on an empty corpus".to_string(),
            ));
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            for token in Self::tokenize(doc.as_ref()) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<(String, usize)> = counts.into_iter().collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(self.max_features);

        // Index terms alphabetically, like a sorted feature list
        let mut kept: Vec<String> = terms.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Ok(())
    }

    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Vec<SparseVector> {
        documents
            .iter()
            .map(|doc| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in Self::tokenize(doc.as_ref()) {
                    if let Some(&idx) = self.vocabulary.get(&token) {
                        *counts.entry(idx).or_insert(0.0) += 1.0;
                    }
                }
                let mut entries: Vec<(usize, f64)> = counts.into_iter().collect();
                entries.sort_by_key(|(idx, _)| *idx);
                SparseVector { entries }
            })
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> AppResult<Vec<SparseVector>> {
        self.fit(documents)?;
        Ok(self.transform(documents))
    }
}

/// Dense, symmetric `n x n` cosine similarity matrix in row-major order.
///
/// Rows are accumulated through an inverted index so that only documents
/// sharing a term are ever multiplied.
pub fn similarity_matrix(vectors: &[SparseVector]) -> Vec<f32> {
    let n = vectors.len();

    let normalized: Vec<Vec<(usize, f64)>> = vectors
        .iter()
        .map(|v| {
            let norm = v.norm();
            if norm == 0.0 {
                Vec::new()
            } else {
                v.entries().iter().map(|&(t, c)| (t, c / norm)).collect()
            }
        })
        .collect();

    let mut postings: HashMap<usize, Vec<(usize, f64)>> = HashMap::new();
    for (doc, entries) in normalized.iter().enumerate() {
        for &(term, weight) in entries {
            postings.entry(term).or_default().push((doc, weight));
        }
    }

    let mut matrix = vec![0f32; n * n];
    let mut row = vec![0f64; n];

    for (i, entries) in normalized.iter().enumerate() {
        row.iter_mut().for_each(|v| *v = 0.0);

        for &(term, weight) in entries {
            if let Some(docs) = postings.get(&term) {
                for &(j, other) in docs {
                    row[j] += weight * other;
                }
            }
        }

        for (j, score) in row.iter().enumerate() {
            matrix[i * n + j] = *score as f32;
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = CountVectorizer::tokenize("The Batman, in Gotham: a hero's origin!");
        assert_eq!(tokens, vec!["batman", "gotham", "hero", "origin"]);
    }

    #[test]
    fn test_fit_caps_vocabulary() {
        let docs = ["crime crime heist", "crime heist action", "space"];
        let mut vectorizer = CountVectorizer::new(2);
        vectorizer.fit(&docs).unwrap();

        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert!(vectorizer.contains("crime"));
        assert!(vectorizer.contains("heist"));
        assert!(!vectorizer.contains("space"));
    }

    #[test]
    fn test_fit_tie_break_is_alphabetical() {
        let docs = ["zebra apple mango"];
        let mut vectorizer = CountVectorizer::new(2);
        vectorizer.fit(&docs).unwrap();

        assert!(vectorizer.contains("apple"));
        assert!(vectorizer.contains("mango"));
        assert!(!vectorizer.contains("zebra"));
    }

    #[test]
    fn test_fit_empty_corpus() {
        let mut vectorizer = CountVectorizer::default();
        assert!(vectorizer.fit::<&str>(&[]).is_err());
    }

    #[test]
    fn test_cosine_similarity() {
        let mut vectorizer = CountVectorizer::default();
        let vectors = vectorizer
            .fit_transform(&["batman gotham", "batman joker", "toys"])
            .unwrap();

        assert!((cosine_similarity(&vectors[0], &vectors[1]) - 0.5).abs() < 1e-9);
        assert_eq!(cosine_similarity(&vectors[0], &vectors[2]), 0.0);
    }

    #[test]
    fn test_similarity_matrix() {
        let mut vectorizer = CountVectorizer::default();
        let vectors = vectorizer
            .fit_transform(&["batman gotham", "batman joker", "the and of"])
            .unwrap();
        let matrix = similarity_matrix(&vectors);

        assert_eq!(matrix.len(), 9);
        assert!((matrix[0] - 1.0).abs() < 1e-6);
        assert!((matrix[1] - 0.5).abs() < 1e-6);
        assert_eq!(matrix[1], matrix[3]);
        // all-stop-word document has no features
        assert_eq!(matrix[8], 0.0);
    }
}
