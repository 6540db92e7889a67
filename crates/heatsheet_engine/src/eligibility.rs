//! Age and gender bands derived from event names.
//!
//! Event names are free text ("Girls 9-10 50m Freestyle", "Boys 6 & Under
//! 25m Backstroke", "Mixed 15 & Over 200m Medley Relay"). The classifier
//! tokenizes the name, reads the gender from the leading word and the age
//! band from the first number that is not a distance.
//!
//! Eligibility is a filter for pickers. Entering an ineligible competitor is
//! never an error.

use heatsheet_foundation::{Competitor, Gender};
use heatsheet_storage::EventState;

/// Upper age bound for open events.
pub const MAX_AGE: u32 = 100;

/// Gender restriction of an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GenderClass {
    /// Boys only.
    Male,
    /// Girls only.
    Female,
    /// Anyone.
    Mixed,
}

impl GenderClass {
    fn from_leading_word(word: &str) -> Self {
        match word {
            "boys" | "boy" | "men" | "mens" | "men's" | "male" => Self::Male,
            "girls" | "girl" | "women" | "womens" | "women's" | "female" | "ladies" => Self::Female,
            _ => Self::Mixed,
        }
    }

    /// Returns true if a competitor of `gender` may swim.
    #[must_use]
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            Self::Mixed => true,
            Self::Male => gender == Gender::Male,
            Self::Female => gender == Gender::Female,
        }
    }
}

/// Who may swim an event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Eligibility {
    /// Youngest eligible age.
    pub min_age: u32,
    /// Oldest eligible age.
    pub max_age: u32,
    /// Gender restriction.
    pub gender: GenderClass,
}

impl Eligibility {
    /// Open to everyone.
    pub const OPEN: Self = Self {
        min_age: 0,
        max_age: MAX_AGE,
        gender: GenderClass::Mixed,
    };

    /// Returns true if the competitor's age and gender fit this band.
    #[must_use]
    pub fn admits(&self, competitor: &Competitor) -> bool {
        (self.min_age..=self.max_age).contains(&competitor.age)
            && self.gender.admits(competitor.gender)
    }
}

impl Default for Eligibility {
    fn default() -> Self {
        Self::OPEN
    }
}

/// Derives the eligibility band from an event name.
///
/// Unrecognized names are open to everyone.
#[must_use]
pub fn classify(name: &str) -> Eligibility {
    let tokens = NameTokenizer::tokenize(name);
    let gender = match tokens.first() {
        Some(NameToken::Word(word)) => GenderClass::from_leading_word(word),
        _ => GenderClass::Mixed,
    };
    let (min_age, max_age) = age_band(&tokens).unwrap_or((0, MAX_AGE));
    Eligibility {
        min_age,
        max_age,
        gender,
    }
}

/// Returns the events a competitor may swim, in the order given.
pub fn eligible_events<'a>(
    competitor: &Competitor,
    events: impl IntoIterator<Item = &'a EventState>,
) -> Vec<&'a EventState> {
    events
        .into_iter()
        .filter(|event| classify(&event.name).admits(competitor))
        .collect()
}

fn age_band(tokens: &[NameToken]) -> Option<(u32, u32)> {
    let start = tokens
        .iter()
        .position(|t| matches!(t, NameToken::Number(n) if *n < MAX_AGE))?;
    let NameToken::Number(first) = tokens[start] else {
        return None;
    };
    let rest = &tokens[start + 1..];

    let band = match rest {
        [NameToken::Dash, NameToken::Number(second), ..] if *second < MAX_AGE => {
            (first.min(*second), first.max(*second))
        }
        [NameToken::And, NameToken::Under, ..] | [NameToken::Under, ..] => (0, first),
        [NameToken::And, NameToken::Over, ..] | [NameToken::Over, ..] => (first, MAX_AGE),
        _ => (first, first),
    };
    Some(band)
}

// =============================================================================
// Name tokenizer
// =============================================================================

/// A token of an event name.
#[derive(Clone, Debug, PartialEq, Eq)]
enum NameToken {
    /// A bare number that may be an age
    Number(u32),
    /// A number carrying a distance unit ("50m", "100 yard")
    Distance,
    /// "-" or a dash
    Dash,
    /// "&" or "and"
    And,
    /// "under", "u"
    Under,
    /// "over", "up", "older", "+"
    Over,
    /// Any other lowercase word
    Word(String),
}

struct NameTokenizer;

impl NameTokenizer {
    fn tokenize(input: &str) -> Vec<NameToken> {
        let mut tokens = Vec::new();
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '0'..='9' => {
                    let mut digits = String::from(ch);
                    while let Some(&c) = chars.peek() {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        digits.push(c);
                        chars.next();
                    }
                    // Too large for an age either way.
                    tokens.push(digits.parse().map_or(NameToken::Distance, NameToken::Number));
                }
                '-' | '\u{2013}' | '\u{2014}' => tokens.push(NameToken::Dash),
                '&' => tokens.push(NameToken::And),
                '+' => tokens.push(NameToken::Over),
                c if c.is_alphabetic() => {
                    let mut word = String::from(c);
                    while let Some(&c) = chars.peek() {
                        if !(c.is_alphabetic() || c == '\'') {
                            break;
                        }
                        word.push(c);
                        chars.next();
                    }
                    Self::push_word(&mut tokens, &word.to_lowercase());
                }
                _ => {}
            }
        }

        tokens
    }

    fn push_word(tokens: &mut Vec<NameToken>, word: &str) {
        if is_unit(word) {
            if let Some(last) = tokens.last_mut() {
                if matches!(last, NameToken::Number(_)) {
                    *last = NameToken::Distance;
                    return;
                }
            }
        }
        tokens.push(match word {
            "and" => NameToken::And,
            "under" | "u" => NameToken::Under,
            "over" | "up" | "older" => NameToken::Over,
            _ => NameToken::Word(word.to_string()),
        });
    }
}

fn is_unit(word: &str) -> bool {
    matches!(
        word,
        "m" | "y"
            | "yd"
            | "yds"
            | "yard"
            | "yards"
            | "meter"
            | "meters"
            | "metre"
            | "metres"
            | "k"
            | "km"
            | "mile"
            | "miles"
    )
}
