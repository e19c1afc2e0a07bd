//! Wording helpers for narration.
//!
//! ## Scales
//!
//! Stat deltas are described with graded wording. Each scale maps a value
//! onto an adjective/adverb pair:
//!
//! | value  | severity            | degree                   |
//! |--------|---------------------|--------------------------|
//! | ≤ 5    | trivial / trivially | somewhat / somewhat      |
//! | ≤ 15   | slight / slightly   | slight / slightly        |
//! | ≤ 25   | modest / modestly   | modest / modestly        |
//! | ≤ 35   | moderate            | moderate                 |
//! | ≤ 50   | severe / severely   | great / greatly          |
//! | above  | serious / seriously | exceptional              |
//!
//! Advantage (used for shields) has its own thresholds at 105, 120, 130
//! and 145.

/// Adjective and adverb for one step of a scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Wording {
    pub adjective: &'static str,
    pub adverb: &'static str,
}

const fn wording(adjective: &'static str, adverb: &'static str) -> Wording {
    Wording { adjective, adverb }
}

const SEVERITY: [Wording; 6] = [
    wording("trivial", "trivially"),
    wording("slight", "slightly"),
    wording("modest", "modestly"),
    wording("moderate", "moderately"),
    wording("severe", "severely"),
    wording("serious", "seriously"),
];

const DEGREE: [Wording; 6] = [
    wording("somewhat", "somewhat"),
    wording("slight", "slightly"),
    wording("modest", "modestly"),
    wording("moderate", "moderately"),
    wording("great", "greatly"),
    wording("exceptional", "exceptionally"),
];

const ADVANTAGE: [Wording; 5] = [
    wording("pretty good", "pretty well"),
    wording("good", "well"),
    wording("really good", "really well"),
    wording("great", "great"),
    wording("outstanding", "outstanding"),
];

const GRADE_THRESHOLDS: [f64; 5] = [5.0, 15.0, 25.0, 35.0, 50.0];
const ADVANTAGE_THRESHOLDS: [f64; 4] = [105.0, 120.0, 130.0, 145.0];

fn step(value: f64, thresholds: &[f64]) -> usize {
    thresholds
        .iter()
        .position(|&limit| value <= limit)
        .unwrap_or(thresholds.len())
}

/// How bad a penalty is.
#[must_use]
pub fn severity(value: f64) -> Wording {
    SEVERITY[step(value, &GRADE_THRESHOLDS)]
}

/// How large an improvement is.
#[must_use]
pub fn degree(value: f64) -> Wording {
    DEGREE[step(value, &GRADE_THRESHOLDS)]
}

/// How good an advantage is.
#[must_use]
pub fn advantage(value: f64) -> Wording {
    ADVANTAGE[step(value, &ADVANTAGE_THRESHOLDS)]
}

/// Join items as an English list: "a", "a and b", "a, b, and c".
pub fn oxford_join<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(|s| s.as_ref()).collect();
            format!("{}, and {}", head.join(", "), last.as_ref())
        }
    }
}

const NUMBER_WORDS: [&str; 11] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// Spell out small counts ("five"); larger ones stay numeric.
#[must_use]
pub fn number_word(count: u32) -> String {
    usize::try_from(count)
        .ok()
        .and_then(|index| NUMBER_WORDS.get(index))
        .map_or_else(|| count.to_string(), |word| (*word).to_string())
}

/// Upper-case the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn onset_len(word: &str) -> usize {
    word.char_indices()
        .find(|(_, c)| "aeiouAEIOU".contains(*c))
        .map_or(word.len(), |(index, _)| index)
}

/// Swap the leading consonants of the first two words.
///
/// "caseum foetidum" becomes "faseum coetidum". Fewer than two words are
/// returned unchanged.
pub fn spoonerize<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    let mut out: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
    if out.len() < 2 {
        return out;
    }

    let (first, second) = (words[0].as_ref(), words[1].as_ref());
    let (first_onset, first_rest) = first.split_at(onset_len(first));
    let (second_onset, second_rest) = second.split_at(onset_len(second));

    out[0] = format!("{second_onset}{first_rest}");
    out[1] = format!("{first_onset}{second_rest}");
    out
}
