// ABOUTME: Presence check for deploy platform credentials.
// ABOUTME: Missing credentials warn; the deploy tool decides whether they are fatal.

pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";
pub const ACCOUNT_ID_VAR: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Which credential variables were set when the run started.
///
/// Only presence is recorded; values are never read into the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Credentials {
    pub api_token: bool,
    pub account_id: bool,
}

impl Credentials {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |var: &str| lookup(var).is_some_and(|v| !v.is_empty());
        Self {
            api_token: present(API_TOKEN_VAR),
            account_id: present(ACCOUNT_ID_VAR),
        }
    }

    /// Names of unset credential variables, in a stable order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.api_token {
            missing.push(API_TOKEN_VAR);
        }
        if !self.account_id {
            missing.push(ACCOUNT_ID_VAR);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_set_reports_both() {
        let creds = Credentials::from_lookup(|_| None);
        assert_eq!(creds.missing(), vec![API_TOKEN_VAR, ACCOUNT_ID_VAR]);
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let creds = Credentials::from_lookup(|var| match var {
            API_TOKEN_VAR => Some(String::new()),
            ACCOUNT_ID_VAR => Some("abc123".to_string()),
            _ => None,
        });
        assert!(!creds.api_token);
        assert!(creds.account_id);
        assert_eq!(creds.missing(), vec![API_TOKEN_VAR]);
    }

    #[test]
    fn all_set_reports_none() {
        let creds = Credentials::from_lookup(|_| Some("x".to_string()));
        assert!(creds.missing().is_empty());
    }
}
