/// Cap on how much README text goes into the prompt, to bound request cost.
pub const README_BUDGET: usize = 5000;

pub fn build_prompt(description: &str, readme: &str) -> String {
    format!(
        "Analyze this GitHub repository and provide a summary in STRICT JSON format.\n\
         Required keys: 'what_it_does', 'how_to_use', 'repo_type'.\n\
         'repo_type' must be exactly either 'Library/Module' or 'Application/Bot'.\n\
         Keep the values concise but informative.\n\n\
         Description: {}\n\n\
         README Snippet:\n{}",
        description,
        truncate_on_boundary(readme, README_BUDGET)
    )
}

fn truncate_on_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_caps_readme_length() {
        let readme = "x".repeat(README_BUDGET * 2);
        let prompt = build_prompt("desc", &readme);
        assert!(prompt.len() < README_BUDGET + 500);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(3000); // 2 bytes each
        let cut = truncate_on_boundary(&text, 5001);
        assert_eq!(cut.len(), 5000);
    }
}
