//! Admin console defaults.

use serde::{Deserialize, Serialize};

fn default_author() -> String {
    "Your Name".to_string()
}

const fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    /// Author pre-filled in a blank blog post form.
    #[serde(default = "default_author")]
    pub default_author: String,

    /// Blog posts fetched per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            default_author: default_author(),
            page_size: default_page_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = AdminConfig::default();
        assert_eq!(config.default_author, "Your Name");
        assert_eq!(config.page_size, 10);
    }
}
