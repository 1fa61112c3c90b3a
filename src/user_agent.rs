//! User-Agent string for crawler traffic.

/// Project URL for User-Agent identification (RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/OPEN-NEXT/OKH-krawl";

/// User-Agent sent with every platform request.
#[must_use]
pub(crate) fn crawler_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("krawl/{version} (open-hardware-crawler; +{PROJECT_UA_URL})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_tool_version_and_url() {
        let ua = crawler_user_agent();
        assert_eq!(
            Some(env!("CARGO_PKG_VERSION")),
            ua.strip_prefix("krawl/").and_then(|s| s.split(' ').next()),
        );
        assert!(ua.contains(PROJECT_UA_URL));
        assert!(ua.contains("open-hardware-crawler"));
    }
}
