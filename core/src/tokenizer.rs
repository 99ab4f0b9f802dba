use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// English stopwords as shipped with NLTK.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd",
    "your","yours","yourself","yourselves","he","him","his","himself","she","she's","her","hers",
    "herself","it","it's","its","itself","they","them","their","theirs","themselves",
    "what","which","who","whom","this","that","that'll","these","those",
    "am","is","are","was","were","be","been","being","have","has","had","having","do","does","did","doing",
    "a","an","the","and","but","if","or","because","as","until","while",
    "of","at","by","for","with","about","against","between","into","through","during","before","after",
    "above","below","to","from","up","down","in","out","on","off","over","under",
    "again","further","then","once","here","there","when","where","why","how",
    "all","any","both","each","few","more","most","other","some","such",
    "no","nor","not","only","own","same","so","than","too","very",
    "s","t","can","will","just","don","don't","should","should've","now",
    "d","ll","m","o","re","ve","y","ain","aren","aren't","couldn","couldn't","didn","didn't",
    "doesn","doesn't","hadn","hadn't","hasn","hasn't","haven","haven't","isn","isn't","ma",
    "mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't","shouldn","shouldn't",
    "wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't",
];

/// Stopword set and stemmer, created once at startup and shared read-only.
pub struct LinguisticResources {
    stopwords: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl LinguisticResources {
    pub fn english() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    pub fn is_stopword(&self, token: &str) -> bool { self.stopwords.contains(token) }

    /// Stem until the token stops changing. A single pass is not always a fixpoint.
    pub fn stem(&self, token: &str) -> String {
        let mut current = self.stemmer.stem(token).into_owned();
        for _ in 0..token.len() {
            let next = self.stemmer.stem(&current).into_owned();
            if next == current { break; }
            current = next;
        }
        current
    }

    /// Lowercase, drop ASCII punctuation, split on whitespace, remove stopwords and stem.
    /// Surviving stems are joined with single spaces.
    pub fn normalize(&self, text: &str) -> String {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();
        let mut stems: Vec<String> = Vec::new();
        for token in cleaned.split_whitespace() {
            if self.is_stopword(token) { continue; }
            let stem = self.stem(token);
            // "wills" stems to "will", which is itself a stopword
            if stem.is_empty() || self.is_stopword(&stem) { continue; }
            stems.push(stem);
        }
        stems.join(" ")
    }
}

impl Default for LinguisticResources {
    fn default() -> Self { Self::english() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let res = LinguisticResources::english();
        let out = res.normalize("Running, runner's run!");
        assert!(out.split(' ').any(|w| w == "run"));
    }

    #[test]
    fn stopword_list_is_complete() {
        assert_eq!(ENGLISH_STOPWORDS.len(), 179);
    }

    #[test]
    fn stems_that_are_stopwords_are_dropped() {
        let res = LinguisticResources::english();
        assert_eq!(res.normalize("wills"), "");
    }
}
