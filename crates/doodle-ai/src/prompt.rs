//! Prompt construction for the guess pipeline.

use doodle_models::{similar_words, supplied_target, WORD_CATEGORIES};

const DRAWING_RULES: &str = r#"STRICT RULES:
1. SHAPE INTERPRETATION:
   - Circle + lines = "sun"
   - Square + triangle = "house"
   - Oval + 4 lines = "dog"
   - Green triangle + brown line = "tree"
   - Circle + stem = "apple"

2. COLOR GUIDANCE:
   - Yellow = sun, duck
   - Green = tree, leaf
   - Red = apple, rose
   - Blue = water, sky

3. CHILD DRAWING PATTERNS:
   - Animals: Round head + stick legs
   - Faces: Circle + dot eyes
   - Vehicles: Box + circle wheels
   - Plants: Straight line + oval top

4. RESPONSE RULES:
   - Only respond with ONE lowercase word from the lists above
   - If unsure between similar options, choose the simpler one
   - Only say "unknown" if completely unrecognizable"#;

const EXAMPLE_INTERPRETATIONS: &str = r#"EXAMPLE INTERPRETATIONS:
- 🟡 + ☀️ lines = "sun"
- 🟫⬜ + 🟩🔺 = "tree"
- ⚪ + 👀 + 👄 = "face"
- 🟥 + stem = "apple""#;

/// One `category: w1, w2, ...` line per category, in table order.
pub fn category_hints() -> String {
    WORD_CATEGORIES
        .iter()
        .map(|category| format!("{}: {}", category.name, category.words.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the initial-guess prompt.
///
/// With a target word a context block lists every word of the target's
/// category, the target itself included. A blank target adds no context.
pub fn build_prompt(target: Option<&str>) -> String {
    let context = match supplied_target(target) {
        Some(target) => format!(
            "\n\n5. CONTEXT CLUES:\n   - Related to: {target} (but don't say this word)\n   - Consider: {}",
            similar_words(target).join(", ")
        ),
        None => String::new(),
    };

    format!(
        "Analyze this children's drawing (ages 5-8) and respond with ONLY ONE word from these categories:\n\n\
         {hints}\n\n\
         {DRAWING_RULES}{context}\n\n\
         {EXAMPLE_INTERPRETATIONS}\n",
        hints = category_hints(),
    )
}

/// Build the yes/no verification prompt for a candidate guess.
pub fn build_verification_prompt(candidate: &str, target: Option<&str>) -> String {
    let target_line = supplied_target(target)
        .map(|t| format!("\n(Target word relates to: {t})"))
        .unwrap_or_default();

    format!(
        "Is \"{candidate}\" absolutely correct for this drawing?{target_line}\n\
         Consider these aspects:\n\
         1. Does the main shape match?\n\
         2. Are key features present?\n\
         3. Is it the simplest possible match?\n\n\
         Respond ONLY: \"yes\" or \"no\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodle_models::all_words;

    fn context_words(prompt: &str) -> Vec<&str> {
        prompt
            .lines()
            .find_map(|line| line.trim().strip_prefix("- Consider:"))
            .map(|rest| rest.split(',').map(str::trim).filter(|w| !w.is_empty()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_prompt_lists_full_vocabulary() {
        let prompt = build_prompt(None);
        assert!(prompt.contains("animals: cat, dog, fish, lion, owl, pig, duck, ant"));
        assert!(prompt.contains("other: house, ice, juice, milk, pen, shoe, table, window"));
        for word in all_words() {
            assert!(prompt.contains(word), "missing {word}");
        }
        assert!(!prompt.contains("CONTEXT CLUES"));
    }

    #[test]
    fn test_context_for_target_is_its_category() {
        let prompt = build_prompt(Some("cat"));
        assert!(prompt.contains("Related to: cat"));
        assert_eq!(
            context_words(&prompt),
            vec!["cat", "dog", "fish", "lion", "owl", "pig", "duck", "ant"]
        );
    }

    #[test]
    fn test_context_is_deterministic() {
        assert_eq!(build_prompt(Some("sun")), build_prompt(Some("sun")));
        assert_eq!(
            context_words(&build_prompt(Some("sun"))),
            similar_words("sun").to_vec()
        );
    }

    #[test]
    fn test_context_for_unlisted_target_is_empty() {
        let prompt = build_prompt(Some("dragon"));
        assert!(prompt.contains("Related to: dragon"));
        assert!(context_words(&prompt).is_empty());
    }

    #[test]
    fn test_blank_target_adds_no_context() {
        assert_eq!(build_prompt(Some("")), build_prompt(None));
        assert!(!build_prompt(Some("  ")).contains("CONTEXT CLUES"));
        assert!(!build_verification_prompt("sun", Some("")).contains("Target word"));
    }

    #[test]
    fn test_verification_prompt() {
        let prompt = build_verification_prompt("sun", Some("moon"));
        assert!(prompt.contains("Is \"sun\" absolutely correct"));
        assert!(prompt.contains("(Target word relates to: moon)"));
        assert!(prompt.ends_with("Respond ONLY: \"yes\" or \"no\""));

        let prompt = build_verification_prompt("sun", None);
        assert!(!prompt.contains("Target word"));
    }
}
