// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Rejects blank or multi-word command overrides at parse time.

use serde::Deserialize;

/// Check that `value` is a single word (an executable or subcommand name).
pub(crate) fn check_command_word(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("command override cannot be empty".to_string());
    }
    if value.chars().any(char::is_whitespace) {
        return Err(format!(
            "command override must be a single word, got '{value}'"
        ));
    }
    Ok(())
}

/// Optional single word, validated with [`check_command_word`].
pub fn deserialize_command_word<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) => {
            check_command_word(&s).map_err(serde::de::Error::custom)?;
            Ok(Some(s))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_words() {
        assert!(check_command_word("pnpm").is_ok());
        assert!(check_command_word("build:cf").is_ok());
    }

    #[test]
    fn rejects_blank_and_multi_word() {
        assert!(check_command_word("  ").unwrap_err().contains("empty"));
        assert!(
            check_command_word("pnpm --silent")
                .unwrap_err()
                .contains("single word")
        );
    }
}
