use crate::error::{Error, Result};
use crate::models::Classification;

/// Pulls a `Classification` out of model output. The text may wrap the JSON
/// in Markdown fences or surround it with prose; both are tolerated.
pub fn parse_classification(response: &str) -> Result<Classification> {
    let json_str = extract_json(response)?;

    serde_json::from_str(&json_str)
        .map_err(|e| Error::ParseError(format!("Classification JSON did not decode: {}", e)))
}

fn extract_json(text: &str) -> Result<String> {
    let text = strip_fences(text.trim());

    // Non-greedy matching is not enough with prose around the object, so
    // scan for the first balanced top-level object instead.
    if let Some(start) = text.find('{') {
        let mut depth = 0;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in text[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text[start..start + i + 1].to_string());
                    }
                }
                _ => {}
            }
        }
    }

    Err(Error::ParseError(
        "No JSON object found in model response".to_string(),
    ))
}

fn strip_fences(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the optional language tag on the fence line.
    let rest = rest
        .find('\n')
        .map(|i| &rest[i + 1..])
        .unwrap_or(rest);
    rest.strip_suffix("```").map(str::trim_end).unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoType;

    #[test]
    fn parses_fenced_json() {
        let input = "```json\n{\"what_it_does\": \"Sends alerts\", \"how_to_use\": \"pip install\", \"repo_type\": \"Library/Module\"}\n```";
        let c = parse_classification(input).unwrap();
        assert_eq!(c.what_it_does, "Sends alerts");
        assert_eq!(c.repo_type, RepoType::Library);
    }

    #[test]
    fn parses_json_buried_in_prose() {
        let input = r#"Sure! Here is the summary you asked for:
{"what_it_does": "A {nested} thing", "how_to_use": "docker compose up", "repo_type": "Application/Bot"}
Let me know if you need anything else."#;
        let c = parse_classification(input).unwrap();
        assert_eq!(c.what_it_does, "A {nested} thing");
        assert_eq!(c.repo_type, RepoType::Application);
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scan() {
        let input = r#"{"what_it_does": "prints \"{\" a lot", "how_to_use": "run it", "repo_type": "Application/Bot"}"#;
        let c = parse_classification(input).unwrap();
        assert_eq!(c.what_it_does, "prints \"{\" a lot");
    }

    #[test]
    fn missing_keys_default_instead_of_failing() {
        let c = parse_classification(r#"{"what_it_does": "x"}"#).unwrap();
        assert_eq!(c.how_to_use, "");
        assert_eq!(c.repo_type, RepoType::Unknown);
    }

    #[test]
    fn prose_without_json_is_an_error() {
        assert!(parse_classification("I could not analyze this repository.").is_err());
        assert!(parse_classification("").is_err());
    }

    #[test]
    fn unbalanced_object_is_an_error() {
        assert!(parse_classification(r#"{"what_it_does": "trunc"#).is_err());
    }
}
