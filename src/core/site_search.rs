//! Page finder for the portal navigation.

/// A navigable page of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePage {
    /// Page name as shown in the menu
    pub name: &'static str,
    /// Route path
    pub path: &'static str,
}

/// Every searchable page
pub const SITE_PAGES: [SitePage; 8] = [
    SitePage { name: "Home", path: "/" },
    SitePage { name: "About", path: "/about" },
    SitePage { name: "Departments", path: "/departments" },
    SitePage { name: "Services", path: "/services" },
    SitePage { name: "News", path: "/news" },
    SitePage { name: "Tenders", path: "/tenders" },
    SitePage { name: "Downloads", path: "/downloads" },
    SitePage { name: "Contact", path: "/contact" },
];

/// Pages whose name contains `query`, ignoring case. A blank query finds nothing.
#[must_use]
pub fn search_pages(query: &str) -> Vec<SitePage> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    SITE_PAGES
        .into_iter()
        .filter(|page| page.name.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_is_case_insensitive() {
        let hits = search_pages("NEWS");
        assert_eq!(hits, vec![SitePage { name: "News", path: "/news" }]);
    }

    #[test]
    fn test_partial_match_returns_several_pages() {
        let names: Vec<&str> = search_pages("o").iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Home", "About", "Downloads", "Contact"]);
    }

    #[test]
    fn test_blank_query_finds_nothing() {
        assert!(search_pages("").is_empty());
        assert!(search_pages("   ").is_empty());
        assert!(search_pages("payroll").is_empty());
    }
}
