//! HTML rendering of a [`MemoryPage`].
//!
//! All text is escaped; controls carry a `data-item` attribute and the single
//! static script below forwards clicks as IPC messages. No handler code is
//! generated from page data.

use crate::types::view::View;
use crate::ui::page::MemoryPage;
use crate::ui::view_model::{ContentBlock, ItemControl, ListItem};

const PAGE_SCRIPT: &str = r#"
function post(msg){ if (window.ipc) { window.ipc.postMessage(JSON.stringify(msg)); } }
document.addEventListener('click', function(e){
  var el = e.target.closest('[data-item]');
  if (el && !el.disabled) { e.preventDefault(); post({item: el.dataset.item}); }
});
document.getElementById('search-form').addEventListener('submit', function(e){
  e.preventDefault(); post({search: document.getElementById('search').value});
});
document.getElementById('view-apply').addEventListener('click', function(){
  var checked = document.querySelector('input[name=view-option]:checked');
  post({view: checked ? checked.value : ''});
});
"#;

const PAGE_STYLE: &str = "body{font-family:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Helvetica,Arial,sans-serif;margin:24px}\
ul{list-style:none;padding:0;margin-top:15px}li{margin-bottom:12px;display:flex;justify-content:space-between}\
.url{font-size:10px}.detail{font-size:12px}.center-align{text-align:center}a{text-decoration:none}";

/// Escapes text for element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_item(item: &ListItem, html: &mut String) {
    html.push_str(&format!("<li id=\"{}\"><div>", item.id));
    html.push_str(&format!("<div class=\"url\">{}</div>", escape(&item.url)));
    let marker = if item.favorited { " ⭐" } else { "" };
    match &item.control {
        ItemControl::Visit { .. } => html.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" data-item=\"{}\">{}</a>",
            escape(&item.url),
            item.id,
            escape(&item.title)
        )),
        _ => html.push_str(&format!(
            "<a href=\"{}\">{}</a>{}",
            escape(&item.url),
            escape(&item.title),
            marker
        )),
    }
    html.push_str(&format!("<div class=\"detail\">{}</div></div>", escape(&item.detail)));
    if let Some(label) = item.control.label() {
        let disabled = if item.control.is_enabled() { "" } else { " disabled" };
        html.push_str(&format!(
            "<div><button type=\"button\" data-item=\"{}\"{}>{}</button></div>",
            item.id, disabled, label
        ));
    }
    html.push_str("</li>");
}

fn render_block(block: &ContentBlock, html: &mut String) {
    match block {
        ContentBlock::Header(text) => html.push_str(&format!("<h4>{}</h4>", escape(text))),
        ContentBlock::EmptyState(text) => html.push_str(&format!(
            "<br><div class=\"center-align\">{}</div>",
            escape(text)
        )),
        ContentBlock::NoResults { query } => html.push_str(&format!(
            "<div class=\"center-align\"><br><br><br><div>No results found for <strong>'{}'</strong></div></div>",
            escape(query)
        )),
        ContentBlock::List(items) => {
            html.push_str("<ul>");
            for item in items {
                render_item(item, html);
            }
            html.push_str("</ul>");
        }
    }
}

fn render_options(page: &MemoryPage, html: &mut String) {
    html.push_str("<div id=\"view-options\">");
    for view in View::ALL {
        let id = view.option_id();
        if !page.options.contains(&id) {
            continue;
        }
        let checked = if page.selected_option.as_deref() == Some(id.as_str()) {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"view-option\" id=\"{id}\" value=\"{name}\"{checked}> {name}</label> ",
            id = id,
            name = view.as_str(),
            checked = checked
        ));
    }
    html.push_str("<button type=\"button\" id=\"view-apply\">Apply</button></div>");
}

/// Renders the whole page as an HTML document.
pub fn render_html(page: &MemoryPage) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>Search</title><style>");
    html.push_str(PAGE_STYLE);
    html.push_str("</style></head><body>");

    html.push_str(&format!(
        "<form id=\"search-form\"><input id=\"search\" type=\"text\" value=\"{}\"></form>",
        escape(page.search_value.as_deref().unwrap_or_default())
    ));
    render_options(page, &mut html);
    html.push_str(&format!(
        "<div id=\"execution-stats\">{}</div>",
        escape(page.execution_stats.as_deref().unwrap_or_default())
    ));

    html.push_str("<div id=\"search-list-container\">");
    for block in &page.blocks {
        render_block(block, &mut html);
    }
    html.push_str("</div><script>");
    html.push_str(PAGE_SCRIPT);
    html.push_str("</script></body></html>");
    html
}

/// Plain-text rendering for terminals.
pub fn render_text(page: &MemoryPage) -> String {
    let mut out = String::new();
    if let Some(value) = &page.search_value {
        out.push_str(&format!("Search: {}\n", value));
    }
    if let Some(stats) = &page.execution_stats {
        out.push_str(&format!("{}\n", stats));
    }
    for block in &page.blocks {
        match block {
            ContentBlock::Header(text) => out.push_str(&format!("\n{}\n", text)),
            ContentBlock::EmptyState(text) => out.push_str(&format!("  {}\n", text)),
            ContentBlock::NoResults { query } => {
                out.push_str(&format!("  No results found for '{}'\n", query))
            }
            ContentBlock::List(items) => {
                for item in items {
                    out.push_str(&format!("  [{}] {}\n", item.id, item.title));
                    out.push_str(&format!("      {}\n", item.url));
                    out.push_str(&format!("      {}", item.detail));
                    if let Some(label) = item.control.label() {
                        let state = if item.control.is_enabled() { "" } else { " (disabled)" };
                        out.push_str(&format!("  <{}{}>", label, state));
                    }
                    out.push('\n');
                }
            }
        }
    }
    for alert in &page.alerts {
        out.push_str(&format!("! {}\n", alert));
    }
    out
}
