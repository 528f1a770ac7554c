//! Sandbox link construction.

use agentforge_types::menu::MenuCategory;

/// `{base_url}{percent-encoded menu JSON}`.
pub fn sandbox_url(base_url: &str, menu: &[MenuCategory]) -> String {
    let json = serde_json::to_string(menu).unwrap_or_else(|_| "[]".to_string());
    format!("{base_url}{}", urlencoding::encode(&json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentforge_types::config::DEFAULT_SANDBOX_BASE_URL;

    #[test]
    fn test_menu_json_is_percent_encoded() {
        let menu = vec![MenuCategory {
            name: "Core Settings".into(),
            items: vec!["Temperature".into()],
        }];
        let url = sandbox_url(DEFAULT_SANDBOX_BASE_URL, &menu);
        assert!(url.starts_with(DEFAULT_SANDBOX_BASE_URL));

        let encoded = &url[DEFAULT_SANDBOX_BASE_URL.len()..];
        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('"'));
        assert_eq!(
            urlencoding::decode(encoded).unwrap(),
            r#"[{"name":"Core Settings","items":["Temperature"]}]"#
        );
    }
}
