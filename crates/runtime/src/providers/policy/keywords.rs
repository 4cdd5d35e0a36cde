//! Story-positive keyword scoring for menu choices.

/// Keywords that tend to advance the story, in English, Japanese, French
/// and Spanish. Matched case-insensitively as substrings.
const STORY_POSITIVE: &[&str] = &[
    // en
    "yes", "ok", "proceed", "next", "continue", "enter", "investigate", "talk", "agree",
    "story", "start", "accept",
    // ja
    "はい", "進む", "続ける", "調べる", "話す", "始める",
    // fr
    "oui", "continuer", "suivant", "parler", "commencer", "accepter",
    // es
    "sí", "continuar", "siguiente", "hablar", "empezar", "aceptar",
];

/// Prefixes the game draws in front of the highlighted choice.
const CURSOR_MARKERS: &[char] = &['>', '▶'];

/// Scores choice lines against a keyword set.
#[derive(Clone, Debug)]
pub struct ChoiceKeywords {
    keywords: Vec<String>,
}

impl Default for ChoiceKeywords {
    fn default() -> Self {
        Self::new(STORY_POSITIVE.iter().copied())
    }
}

impl ChoiceKeywords {
    pub fn new<S: AsRef<str>>(keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Number of keywords contained in `choice`, plus one when the line
    /// carries the cursor marker.
    pub fn score(&self, choice: &str) -> u32 {
        let trimmed = choice.trim_start();
        let lowered = trimmed.to_lowercase();
        let matches = self
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .count() as u32;
        let cursor = u32::from(trimmed.starts_with(CURSOR_MARKERS));
        matches + cursor
    }

    /// Index of the highest-scoring choice; the earliest wins ties.
    pub fn best_choice<S: AsRef<str>>(&self, choices: &[S]) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (index, choice) in choices.iter().enumerate() {
            let score = self.score(choice.as_ref());
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_are_case_insensitive() {
        let keywords = ChoiceKeywords::default();
        assert_eq!(keywords.score("Cancel"), 0);
        assert_eq!(keywords.score("Yes, continue"), 2);
        assert_eq!(keywords.score("YES"), 1);
    }

    #[test]
    fn covers_several_languages() {
        let keywords = ChoiceKeywords::default();
        assert!(keywords.score("はい") > 0);
        assert!(keywords.score("Oui") > 0);
        assert!(keywords.score("Continuar") > 0);
        assert_eq!(keywords.score("いいえ"), 0);
    }

    #[test]
    fn prefers_higher_score() {
        let keywords = ChoiceKeywords::default();
        assert_eq!(keywords.best_choice(&["Cancel", "Yes, continue"]), Some(1));
    }

    #[test]
    fn ties_resolve_to_earliest() {
        let keywords = ChoiceKeywords::default();
        assert_eq!(keywords.best_choice(&["Save", "Load", "Quit"]), Some(0));
        assert_eq!(keywords.best_choice(&["Next", "Start"]), Some(0));
    }

    #[test]
    fn cursor_marker_adds_a_point() {
        let keywords = ChoiceKeywords::default();
        assert_eq!(keywords.score("> Back"), 1);
        assert_eq!(keywords.best_choice(&["Back", "▶ Title"]), Some(1));
    }

    #[test]
    fn empty_choices_have_no_best() {
        let keywords = ChoiceKeywords::default();
        assert_eq!(keywords.best_choice::<&str>(&[]), None);
    }
}
