//! HTML Views
//!
//! The upload form and the grouped roster page, assembled as plain
//! strings. Thumbnails are loaded by the browser straight from the
//! uploaded URL (fixed 100px box, alt-text fallback on a broken link);
//! only the PDF path fetches image bytes server-side.

use dossier::{Roster, RosterRow};

/// Escape text for HTML body and attribute positions
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// The upload form: persona + permissions sheets, optional credentials
/// sheet, permission filter, tear-sheet toggle, and one submit per output.
pub fn index_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Persona and Permissions Matcher</title>{style}</head>
<body>
<h1>Persona and Permissions Matcher</h1>
<form method="post" enctype="multipart/form-data">
  <p><label>Persona sheet (xlsx/csv) <input type="file" name="personas" required></label></p>
  <p><label>Permissions sheet (xlsx/csv) <input type="file" name="permissions" required></label></p>
  <p><label>Credentials sheet (tear-sheet mode) <input type="file" name="credentials"></label></p>
  <p><label>Filter permissions (comma-separated) <input type="text" name="filter"></label></p>
  <p><label><input type="checkbox" name="tear_sheet"> Tear sheet (include Email/Password)</label></p>
  <p>
    <button formaction="/match">Match</button>
    <button formaction="/match/export/csv">Download CSV</button>
    <button formaction="/match/export/pdf">Download PDF</button>
  </p>
</form>
</body>
</html>
"#,
        style = STYLE
    )
}

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 2em auto; max-width: 60em; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
.record { display: flex; gap: 1em; margin: 1em 0; }
.record img { width: 100px; height: 100px; object-fit: cover; }
.placeholder { width: 100px; height: 100px; background: #eee; display: flex;
  align-items: center; justify-content: center; color: #999; }
hr { margin: 2em 0; }
</style>"#;

/// The grouped roster page: the expanded table up top, then one section
/// per permission with image + bio per record.
pub fn roster_page(roster: &Roster) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\">");
    html.push_str("<title>Matched Personas</title>");
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n<h1>Matched Personas</h1>\n");

    expanded_table(&mut html, roster);

    for (permission, rows) in roster.grouped() {
        html.push_str(&format!("<h2>{}</h2>\n", escape(&permission)));
        for row in rows {
            record_block(&mut html, roster, row);
        }
        html.push_str("<hr>\n");
    }

    html.push_str("<p><a href=\"/\">Upload again</a></p>\n</body>\n</html>\n");
    html
}

fn expanded_table(html: &mut String, roster: &Roster) {
    html.push_str("<h2>Expanded records</h2>\n<table>\n<tr>");
    for column in roster.columns() {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr>\n");
    for row in &roster.rows {
        html.push_str("<tr>");
        for value in roster.values(row) {
            html.push_str(&format!("<td>{}</td>", escape(value)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn record_block(html: &mut String, roster: &Roster, row: &RosterRow) {
    html.push_str("<div class=\"record\">\n");

    if row.image.is_empty() {
        html.push_str("<div class=\"placeholder\">No image</div>\n");
    } else {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            escape(&row.image),
            escape(&row.handle)
        ));
    }

    html.push_str("<div>\n");
    html.push_str(&format!("<p><strong>Name:</strong> {}<br>", escape(&row.name)));
    html.push_str(&format!("<strong>Handle:</strong> {}<br>", escape(&row.handle)));
    html.push_str(&format!("<strong>Faction:</strong> {}<br>", escape(&row.faction)));
    html.push_str(&format!("<strong>Beliefs:</strong> {}<br>", escape(&row.beliefs)));
    html.push_str(&format!("<strong>Tags:</strong> {}</p>", escape(&row.tags)));
    if roster.tear_sheet {
        html.push_str(&format!(
            "<p><strong>Email:</strong> {}<br><strong>Password:</strong> {}</p>",
            escape(&row.email),
            escape(&row.password)
        ));
    }
    html.push_str(&format!("<p>{}</p>\n", escape(&row.bio)));
    html.push_str("</div>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster {
            rows: vec![RosterRow {
                handle: "alice <admin>".into(),
                permission: "read".into(),
                bio: "hi".into(),
                image: "https://example.com/a.png".into(),
                password: "s3cret".into(),
                ..Default::default()
            }],
            tear_sheet: false,
        }
    }

    #[test]
    fn test_roster_page_groups_and_escapes() {
        let html = roster_page(&roster());
        assert!(html.contains("<h2>read</h2>"));
        assert!(html.contains("alice &lt;admin&gt;"));
        assert!(!html.contains("alice <admin>"));
    }

    #[test]
    fn test_plain_page_omits_credentials() {
        let html = roster_page(&roster());
        assert!(!html.contains("s3cret"));
    }

    #[test]
    fn test_tear_sheet_page_shows_credentials() {
        let mut r = roster();
        r.tear_sheet = true;
        let html = roster_page(&r);
        assert!(html.contains("s3cret"));
    }

    #[test]
    fn test_missing_image_renders_placeholder() {
        let mut r = roster();
        r.rows[0].image.clear();
        let html = roster_page(&r);
        assert!(html.contains("No image"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_index_page_has_all_inputs() {
        let html = index_page();
        for name in ["personas", "permissions", "credentials", "filter", "tear_sheet"] {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
    }
}
