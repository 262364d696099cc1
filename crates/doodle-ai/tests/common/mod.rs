//! Helpers shared by the guess pipeline integration tests.

/// Words listed after `Consider:` in a prompt, if any.
pub fn context_words(prompt: &str) -> Vec<&str> {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix("- Consider:"))
        .map(|rest| {
            rest.split(',')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
