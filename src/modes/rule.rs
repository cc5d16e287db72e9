use tracing::debug;

/// Ordered keyword rules. Earlier entries take priority.
pub const RULES: &[(&str, &str)] = &[
    (
        "fever",
        "You might have an infection. Please monitor your temperature and consult a doctor.",
    ),
    (
        "cough",
        "For cough, stay hydrated and consult a physician if it persists.",
    ),
    (
        "sore throat",
        "A sore throat could be caused by a viral infection, strep throat, or allergies. \
         Please consult a healthcare provider for a diagnosis.",
    ),
    (
        "symptom",
        "It seems like you're experiencing symptoms. Please consult a doctor for accurate advice.",
    ),
    (
        "appointment",
        "Would you like me to schedule an appointment with a doctor?",
    ),
    (
        "medication",
        "Take your prescribed medications regularly. If you have concerns, consult your doctor.",
    ),
];

/// Keyword-to-canned-response lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleMatcher;

impl RuleMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Return the response for the first rule keyword contained in `text`.
    ///
    /// `text` is expected to be lower-cased already; no normalization is
    /// applied here.
    pub fn find(&self, text: &str) -> Option<&'static str> {
        let hit = RULES
            .iter()
            .find(|(keyword, _)| text.contains(keyword));

        match hit {
            Some((keyword, response)) => {
                debug!(keyword = %keyword, "Rule matched");
                Some(*response)
            }
            None => {
                debug!("No rule matched");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_for(keyword: &str) -> &'static str {
        RULES
            .iter()
            .find(|(k, _)| *k == keyword)
            .map(|(_, r)| *r)
            .unwrap()
    }

    #[test]
    fn test_each_keyword_matches() {
        let matcher = RuleMatcher::new();
        for (keyword, response) in RULES {
            let input = format!("i have a question about {}", keyword);
            assert_eq!(matcher.find(&input), Some(*response));
        }
    }

    #[test]
    fn test_priority_order() {
        let matcher = RuleMatcher::new();
        assert_eq!(
            matcher.find("fever and cough"),
            Some(response_for("fever"))
        );
        assert_eq!(
            matcher.find("cough with a bad fever"),
            Some(response_for("fever"))
        );
        assert_eq!(
            matcher.find("need an appointment for my medication"),
            Some(response_for("appointment"))
        );
    }

    #[test]
    fn test_substring_containment() {
        let matcher = RuleMatcher::new();
        assert_eq!(matcher.find("feverish since monday"), Some(response_for("fever")));
        assert_eq!(matcher.find("symptoms of flu"), Some(response_for("symptom")));
    }

    #[test]
    fn test_no_match() {
        let matcher = RuleMatcher::new();
        assert_eq!(matcher.find("what should i eat today"), None);
        assert_eq!(matcher.find(""), None);
    }

    #[test]
    fn test_expects_normalized_input() {
        let matcher = RuleMatcher::new();
        assert_eq!(matcher.find("FEVER"), None);
        assert_eq!(matcher.find(&"FEVER".to_lowercase()), Some(response_for("fever")));
    }

    #[test]
    fn test_idempotent() {
        let matcher = RuleMatcher::new();
        let first = matcher.find("my sore throat hurts");
        let second = matcher.find("my sore throat hurts");
        assert_eq!(first, second);
        assert_eq!(first, Some(response_for("sore throat")));
    }
}
