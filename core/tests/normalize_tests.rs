use recommender_core::tokenizer::LinguisticResources;

#[test]
fn it_lowercases_and_stems() {
    let res = LinguisticResources::english();
    let out = res.normalize("Running Runners RUN!");
    let words: Vec<&str> = out.split(' ').collect();
    assert_eq!(words[0], "run");
    assert_eq!(words[2], "run");
    assert_eq!(res.normalize("Learn Python basics"), "learn python basic");
}

#[test]
fn it_filters_stopwords() {
    let res = LinguisticResources::english();
    let out = res.normalize("The quick brown fox and the lazy dog");
    let words: Vec<&str> = out.split(' ').collect();
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"and"));
    assert!(words.contains(&"fox"));
}

#[test]
fn it_strips_ascii_punctuation_inside_tokens() {
    let res = LinguisticResources::english();
    // "don't" loses its apostrophe first, then no longer matches the stopword list
    assert_eq!(res.normalize("don't"), "dont");
    assert_eq!(res.normalize("Rust... (intro)!"), res.normalize("rust intro"));
}

#[test]
fn blank_input_normalizes_to_empty() {
    let res = LinguisticResources::english();
    assert_eq!(res.normalize(""), "");
    assert_eq!(res.normalize("  \t\n "), "");
    assert_eq!(res.normalize("!!! ... ???"), "");
    assert_eq!(res.normalize("the of and is"), "");
}

#[test]
fn normalization_is_idempotent() {
    let res = LinguisticResources::english();
    let samples = [
        "Learn python basics",
        "Deep dive into Python: generators, decorators & context-managers!",
        "An introduction to cooking: knives, sauces, and the art of seasoning.",
        "Relational databases, normalization and transactional guarantees",
        "Happily running runners ran generously over agreed-upon hills",
        "wills willed ours hers",
        "",
    ];
    for s in samples {
        let once = res.normalize(s);
        assert_eq!(res.normalize(&once), once, "input: {s:?}");
    }
}
