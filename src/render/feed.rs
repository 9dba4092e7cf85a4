// Feed renderer.
// Wraps formatted events in the list markup embedding pages style against.

use crate::github::RawEvent;

use super::format::EventFormatter;

const LIST_OPEN: &str = r#"<ul class="github_activities">"#;
const LIST_CLOSE: &str = "</ul>";
const ITEM_OPEN: &str = r#"<li class="activity">"#;
const ITEM_CLOSE: &str = "</li>";

/// Render at most `limit` events, in the order given.
///
/// Every rendered event gets an item wrapper, including events whose
/// fragment is empty.
pub fn render(formatter: &EventFormatter, events: &[RawEvent], limit: usize) -> String {
    let mut html = String::from(LIST_OPEN);
    for event in events.iter().take(limit) {
        html.push_str(ITEM_OPEN);
        html.push_str(&formatter.format(event));
        html.push_str(ITEM_CLOSE);
    }
    html.push_str(LIST_CLOSE);
    html
}
