//! Handle candidate generation
//!
//! Turns a display name into an ordered list of plausible handles. Order
//! matters: probing is rate limited and stops at the first verified match,
//! so the cheap, likely guesses come first and decorated vanity variants
//! come last.
//!
//! Priority groups, for `"Artem Chigvintsev"`:
//!
//! 1. `artemchigvintsev` (plus a punctuation-free form if the name has any)
//! 2. `artem.chigvintsev`, `artem_chigvintsev`, `artem-chigvintsev`
//! 3. first+last forms (middle names dropped)
//! 4. decorated forms: `theartemchigvintsev`, `the_artem_chigvintsev`,
//!    `artemchigvintsev_official`, ...
//! 5. reversed: `chigvintsevartem`, `chigvintsev_artem`
//!
//! Groups 3-5 need at least two words.

use std::collections::HashSet;

/// Separators substituted for whitespace
pub const SEPARATORS: [&str; 3] = [".", "_", "-"];

/// Vanity prefixes, most common first
pub const PREFIXES: [&str; 4] = ["the", "thereal", "theofficial", "official"];

/// Vanity suffixes, most common first
pub const SUFFIXES: [&str; 7] = ["official", "tv", "world", "fan", "page", "1", "2"];

/// Joiners used between a decoration and the base
const JOINERS: [&str; 3] = ["", "_", "-"];

/// Ordered set that keeps the first occurrence of each candidate
#[derive(Debug, Default)]
struct CandidateList {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl CandidateList {
    fn push(&mut self, candidate: String) {
        if candidate.is_empty() || self.seen.contains(&candidate) {
            return;
        }
        self.seen.insert(candidate.clone());
        self.ordered.push(candidate);
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Keeps only characters a handle word may contain
///
/// Separators are dropped too; they are added back between words.
fn sanitize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Generate handle candidates for a name
///
/// Returns an empty list for a blank name; any other name yields at least
/// the whitespace-stripped baseline. Punctuation such as `.` or `'` stays in
/// that first baseline only. Every later candidate is built from words with
/// punctuation removed, and words left empty are skipped.
///
/// # Examples
///
/// ```
/// use follower_resolver::core::generator::generate;
///
/// let candidates = generate("Zendaya");
/// assert_eq!(candidates[0], "zendaya");
///
/// let candidates = generate("Artem Chigvintsev");
/// assert_eq!(&candidates[..4], ["artemchigvintsev", "artem.chigvintsev", "artem_chigvintsev", "artem-chigvintsev"]);
///
/// let candidates = generate("Jake T. Austin");
/// assert_eq!(&candidates[..3], ["jaket.austin", "jaketaustin", "jake.t.austin"]);
/// ```
pub fn generate(name: &str) -> Vec<String> {
    let raw: Vec<String> = name.split_whitespace().map(str::to_lowercase).collect();
    if raw.is_empty() {
        return Vec::new();
    }

    let mut list = CandidateList::default();

    // Rule 1: baseline, raw then sanitized
    list.push(raw.concat());

    let tokens: Vec<String> = raw
        .iter()
        .map(|token| sanitize_token(token))
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.is_empty() {
        return list.into_vec();
    }

    let basic = tokens.concat();
    list.push(basic.clone());

    // Rule 2: separators in place of whitespace
    for sep in SEPARATORS {
        list.push(tokens.join(sep));
    }

    if tokens.len() < 2 {
        return list.into_vec();
    }

    let first = tokens[0].as_str();
    let last = tokens[tokens.len() - 1].as_str();

    // Rule 3: first + last, middle names dropped
    list.push(format!("{}{}", first, last));
    for sep in SEPARATORS {
        list.push(format!("{}{}{}", first, sep, last));
    }

    // Rule 4: decorated variants over both bases
    let concatenated = [basic.as_str()];
    let first_last = [first, last];
    for base in [&concatenated[..], &first_last[..]] {
        decorate(&mut list, base);
    }

    // Rule 5: reversed order
    list.push(format!("{}{}", last, first));
    list.push(format!("{}_{}", last, first));

    list.into_vec()
}

/// Push prefix and suffix decorations of `base`
///
/// The joiner goes between the decoration and the base, and between the
/// base's own parts.
fn decorate(list: &mut CandidateList, base: &[&str]) {
    for prefix in PREFIXES {
        for joiner in JOINERS {
            list.push(format!("{}{}{}", prefix, joiner, base.join(joiner)));
        }
    }
    for suffix in SUFFIXES {
        for joiner in JOINERS {
            list.push(format!("{}{}{}", base.join(joiner), joiner, suffix));
        }
    }
}

/// Generate candidates, keeping at most `limit` of the highest-priority ones
pub fn generate_capped(name: &str, limit: Option<usize>) -> Vec<String> {
    let mut candidates = generate(name);
    if let Some(limit) = limit {
        candidates.truncate(limit);
    }
    candidates
}
