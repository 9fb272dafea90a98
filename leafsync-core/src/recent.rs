use crate::pathset::PathSet;

/// Link prefix for generated post pages.
const POST_PREFIX: &str = "/post/";

/// One entry on the Recent dropdown menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentItem {
    pub label: String,
    pub link: String,
}

/// The last `max` source entries in sort order, kept in ascending order.
///
/// Recency is approximated by lexicographic path order, which works
/// because post paths start with a `yyyy/mm/yyyymmdd-` date prefix. True
/// modification time is not consulted.
pub fn recent_items(sources: &PathSet, max: usize) -> Vec<RecentItem> {
    let entries = sources.entries();
    let count = entries.len().min(max);

    entries[entries.len() - count..]
        .iter()
        .map(|entry| {
            let parts: Vec<&str> = entry.rel_path().split('/').collect();
            let label = if parts.len() >= 3 {
                format!("{}-{} {}", parts[0], parts[1], entry.file_stem())
            } else {
                entry.file_stem().to_string()
            };
            RecentItem {
                label,
                link: format!("{}{}", POST_PREFIX, entry.identity_key()),
            }
        })
        .collect()
}

/// Render the Bootstrap dropdown fragment for the Recent menu. Writing
/// it anywhere is the caller's job.
pub fn render_recent_fragment(items: &[RecentItem]) -> String {
    let mut out = String::new();
    out.push_str("<h6 class=\"dropdown-header\"><em>New</em></h6>\n");
    for item in items {
        out.push_str(&format!(
            "<a class=\"dropdown-item\" href=\"{}\">{}</a>\n",
            item.link, item.label
        ));
    }
    out.push_str("<h6 class=\"dropdown-header\"><em>Updated</em></h6>\n");
    out.push_str("<div class=\"dropdown-divider\"></div>\n");
    out.push_str("<a class=\"dropdown-item\" href=\"/archives\">Archives</a>\n");
    out
}
