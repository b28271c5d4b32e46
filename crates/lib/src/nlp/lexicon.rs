//! Closed-class English lexicon for the chunker.
//!
//! Anything not listed here (and not recognized as a verb form or adverb) is treated
//! as content, i.e. a candidate noun-phrase word.

use std::collections::{HashMap, HashSet};

/// Coarse part of speech. Only `Content` words end up inside chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Determiner,
    Pronoun,
    Preposition,
    Conjunction,
    Auxiliary,
    Verb,
    Adverb,
    Question,
    Filler,
    /// The infinitive marker "to"; the word after it is read as a verb.
    Infinitive,
    Content,
}

// ---------------------------------------------------------------------------
// Word lists
// ---------------------------------------------------------------------------

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each", "every", "all",
    "both", "either", "neither", "another", "other", "such", "no", "my", "your", "his", "her",
    "its", "our", "their", "more", "most", "many", "much", "few", "less", "least", "several",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "it", "we", "us", "they", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "mine", "yours",
    "ours", "theirs", "something", "anything", "everything", "nothing", "someone", "anyone",
    "everyone", "somebody", "anybody", "one", "i'm", "i've", "i'll", "i'd", "you're", "you've",
    "you'll", "you'd", "we're", "we've", "we'll", "we'd", "they're", "they've", "they'll",
    "they'd", "he's", "she's", "it's", "that's", "there's",
];

const PREPOSITIONS: &[&str] = &[
    "about", "on", "in", "at", "for", "of", "with", "by", "from", "into", "onto", "over",
    "under", "after", "before", "between", "through", "during", "without", "within", "around",
    "across", "against", "among", "toward", "towards", "upon", "near", "than", "via", "per",
    "regarding", "concerning", "up", "down", "out", "off",
];

const INFINITIVE_MARKERS: &[&str] = &["to"];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "though", "while", "if",
    "unless", "since", "whereas", "as", "whether",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must", "don't",
    "doesn't", "didn't", "can't", "cannot", "won't", "wouldn't", "couldn't", "shouldn't",
    "isn't", "aren't", "wasn't", "weren't", "haven't", "hasn't", "hadn't", "mustn't",
];

const QUESTION_WORDS: &[&str] = &[
    "what", "which", "who", "whom", "whose", "where", "when", "why", "how", "what's", "who's",
    "where's", "how's",
];

const ADVERBS: &[&str] = &[
    "very", "really", "quite", "just", "also", "too", "not", "never", "always", "often",
    "sometimes", "maybe", "perhaps", "here", "there", "now", "then", "again", "even", "still",
    "already", "only", "soon", "well", "ever", "rather", "almost", "enough", "instead",
    "especially", "mostly",
];

const FILLERS: &[&str] = &[
    "hi", "hello", "hey", "thanks", "thank", "please", "ok", "okay", "yes", "yeah", "sorry",
    "interested", "curious", "keen", "fond", "lot", "lots",
];

/// Verb stems whose regular inflections (-s, -es, -ed, -d, -ing, -ies, -ied) are verbs.
const VERB_STEMS: &[&str] = &[
    "want", "like", "love", "enjoy", "need", "recommend", "suggest", "look", "search", "help",
    "try", "prefer", "learn", "use", "explore", "discover", "understand", "wish", "hope", "seem",
    "start", "talk", "ask", "share", "send", "show", "give", "tell", "find", "read", "write",
    "get", "make", "know", "think", "see", "say", "take", "go", "come", "buy", "hear", "feel",
    "mean", "keep", "let", "put", "become", "believe", "remember", "recall",
];

/// Irregular verb forms not reachable by suffix stripping.
const IRREGULAR_VERBS: &[&str] = &[
    "wrote", "written", "found", "got", "gotten", "gave", "given", "made", "thought", "knew",
    "known", "saw", "seen", "said", "told", "took", "taken", "went", "gone", "came", "bought",
    "heard", "felt", "meant", "kept", "became", "let's",
];

/// -ing words that usually name a topic. They stay content unless they follow an auxiliary or pronoun.
const NOUN_GERUNDS: &[&str] = &[
    "learning", "reading", "writing", "cooking", "programming", "painting", "building",
    "gardening", "running", "training", "computing", "marketing", "engineering", "banking",
    "parenting", "knitting", "hiking", "fishing", "sailing", "meeting", "spelling", "baking",
    "farming", "mining", "investing", "trading", "nursing", "acting", "drawing", "singing",
];

/// Words ending in "ly" that are not adverbs.
const LY_NOUNS: &[&str] = &[
    "family", "supply", "assembly", "italy", "july", "butterfly", "ally", "reply", "monopoly",
    "anomaly", "rally", "jelly", "belly", "holly", "lily", "emily", "bully", "melancholy",
    "fly", "ugly", "holy", "early", "only", "daily", "weekly", "monthly", "friendly", "lonely",
    "lovely", "elderly", "silly",
];

const SUFFIXES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("ing", "e"),
    ("ing", ""),
    ("es", ""),
    ("ed", ""),
    ("s", ""),
    ("d", ""),
];

/// Closed-class word table plus verb morphology. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Lexicon {
    classes: HashMap<&'static str, WordClass>,
    verb_stems: HashSet<&'static str>,
    ly_nouns: HashSet<&'static str>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    pub fn english() -> Self {
        let mut classes = HashMap::new();
        // Later lists win on overlap, so the most specific lists go last.
        let tables: &[(&[&str], WordClass)] = &[
            (PREPOSITIONS, WordClass::Preposition),
            (CONJUNCTIONS, WordClass::Conjunction),
            (ADVERBS, WordClass::Adverb),
            (DETERMINERS, WordClass::Determiner),
            (PRONOUNS, WordClass::Pronoun),
            (AUXILIARIES, WordClass::Auxiliary),
            (QUESTION_WORDS, WordClass::Question),
            (FILLERS, WordClass::Filler),
            (INFINITIVE_MARKERS, WordClass::Infinitive),
            (IRREGULAR_VERBS, WordClass::Verb),
            (NOUN_GERUNDS, WordClass::Content),
        ];
        for (words, class) in tables {
            for w in *words {
                classes.insert(*w, *class);
            }
        }
        Self {
            classes,
            verb_stems: VERB_STEMS.iter().copied().collect(),
            ly_nouns: LY_NOUNS.iter().copied().collect(),
        }
    }

    /// Classify one word. `prev` is the class of the preceding word in the same clause, if any.
    pub fn classify(&self, word: &str, prev: Option<WordClass>) -> WordClass {
        let lower = normalize(word);
        if lower.len() > 4
            && lower.ends_with("ing")
            && matches!(prev, Some(WordClass::Auxiliary) | Some(WordClass::Pronoun))
        {
            return WordClass::Verb;
        }
        if let Some(class) = self.classes.get(lower.as_str()) {
            return *class;
        }
        if self.is_verb_form(&lower) {
            // After a determiner or preposition the same spelling is a noun ("a love story", "about hope").
            if matches!(prev, Some(WordClass::Determiner) | Some(WordClass::Preposition)) {
                return WordClass::Content;
            }
            return WordClass::Verb;
        }
        if lower.len() > 4 && lower.ends_with("ly") && !self.ly_nouns.contains(lower.as_str()) {
            return WordClass::Adverb;
        }
        WordClass::Content
    }

    fn is_verb_form(&self, lower: &str) -> bool {
        if self.verb_stems.contains(lower) {
            return true;
        }
        SUFFIXES.iter().any(|(suffix, replacement)| {
            lower
                .strip_suffix(suffix)
                .filter(|stem| !stem.is_empty())
                // Bare -d only follows a silent e ("loved"), never "god" -> "go".
                .filter(|stem| *suffix != "d" || stem.ends_with('e'))
                .map(|stem| {
                    let candidate = format!("{}{}", stem, replacement);
                    self.verb_stems.contains(candidate.as_str())
                })
                .unwrap_or(false)
        })
    }
}

/// Lowercase and fold typographic apostrophes.
fn normalize(word: &str) -> String {
    word.chars()
        .map(|c| if c == '\u{2019}' { '\'' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}
