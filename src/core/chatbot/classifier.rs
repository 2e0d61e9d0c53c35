//! Keyword scoring of user input against the knowledge base.

use super::knowledge::{ChatResponse, FALLBACK, Topic};

/// A topic must score strictly above this to be answered
pub const MATCH_THRESHOLD: f64 = 0.3;

/// Best-scoring topic for one input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Winning topic, `None` when nothing cleared [`MATCH_THRESHOLD`]
    pub topic: Option<Topic>,
    /// Score of the best topic, even when below the threshold
    pub score: f64,
}

/// Scores `input` (already lowercased) against one keyword list.
///
/// Each keyword contributes 1 when it occurs anywhere in the input, plus 0.5
/// for every whitespace-separated token that is contained in the keyword or
/// contains it. The sum is divided by the larger of the keyword count and the
/// token count.
#[must_use]
pub fn match_score(input: &str, keywords: &[&str]) -> f64 {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let denominator = keywords.len().max(tokens.len());
    if denominator == 0 {
        return 0.0;
    }

    let mut matches = 0.0;
    for keyword in keywords {
        if input.contains(keyword) {
            matches += 1.0;
        }
        for token in &tokens {
            if token.contains(keyword) || keyword.contains(token) {
                matches += 0.5;
            }
        }
    }

    // Keyword and token counts are tiny, so the conversion is exact.
    #[allow(clippy::cast_precision_loss)]
    let denominator = denominator as f64;
    matches / denominator
}

/// Picks the strictly highest-scoring topic. Earlier topics win ties.
#[must_use]
pub fn classify(input: &str) -> Classification {
    let input = input.trim().to_lowercase();

    let mut best: Option<Topic> = None;
    let mut highest = 0.0;
    for topic in Topic::ALL {
        let score = match_score(&input, topic.keywords());
        if score > highest {
            highest = score;
            best = Some(topic);
        }
    }

    Classification {
        topic: best.filter(|_| highest > MATCH_THRESHOLD),
        score: highest,
    }
}

/// Reply to free text: the winning topic's response, or the fallback.
#[must_use]
pub fn respond(input: &str) -> &'static ChatResponse {
    classify(input).topic.map_or(&FALLBACK, Topic::response)
}

/// Reply to a picked quick action. Ids naming a topic answer with that topic
/// directly; any other id is scored like typed text.
#[must_use]
pub fn respond_to_action(action_id: &str) -> &'static ChatResponse {
    Topic::from_id(action_id.trim()).map_or_else(|| respond(action_id), Topic::response)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_payment_question() {
        let result = classify("How do I pay");
        assert_eq!(result.topic, Some(Topic::Payments));
        assert_eq!(result.score, 0.5);
        assert_eq!(respond("how do i pay"), Topic::Payments.response());
    }

    #[test]
    fn test_match_score_formula() {
        // "fees" occurs (+1) and the single token equals the keyword (+0.5);
        // six keywords outnumber one token.
        assert_eq!(match_score("fees", Topic::Fees.keywords()), 0.25);
        assert_eq!(match_score("", Topic::Fees.keywords()), 0.0);
        assert_eq!(match_score("anything", &[]), 0.0);
    }

    #[test]
    fn test_gibberish_falls_back() {
        let result = classify("qwzx vbnm");
        assert_eq!(result.topic, None);
        assert_eq!(respond("qwzx vbnm"), &FALLBACK);

        let result = classify("xyzxyz unrelated gibberish");
        assert_eq!(result.topic, None);
        assert!(result.score <= MATCH_THRESHOLD);
        assert_eq!(respond("xyzxyz unrelated gibberish"), &FALLBACK);
    }

    #[test]
    fn test_blank_input_falls_back() {
        assert_eq!(classify("   ").topic, None);
        assert_eq!(classify("   ").score, 0.0);
    }

    #[test]
    fn test_classification_is_deterministic() {
        for input in ["where is your office", "renew my permit", "hello there"] {
            assert_eq!(classify(input), classify(input));
        }
        assert_eq!(classify("where is your office").topic, Some(Topic::Office));
    }

    #[test]
    fn test_quick_action_ids_resolve_directly() {
        for topic in Topic::ALL {
            assert_eq!(respond_to_action(topic.id()), topic.response());
        }
        // "fees" alone scores below the threshold as text.
        assert_eq!(respond("fees"), &FALLBACK);
    }

    #[test]
    fn test_unknown_action_id_is_scored() {
        assert_eq!(respond_to_action("directions"), respond("directions"));
    }
}
