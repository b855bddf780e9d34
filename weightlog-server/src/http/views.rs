//! Server-rendered HTML pages
//!
//! Plain string rendering. Everything user-supplied goes through [`escape`];
//! chart data is embedded as JSON.

use axum::response::Html;

use crate::models::{ChartSeries, DailyRecord, DATE_FORMAT};

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Values shown in the create/edit form
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    pub date: String,
    pub weight: String,
    pub memo: String,
}

impl From<&DailyRecord> for FormValues {
    fn from(rec: &DailyRecord) -> Self {
        Self {
            date: rec.date.format(DATE_FORMAT).to_string(),
            weight: rec.weight.to_string(),
            memo: rec.memo.clone(),
        }
    }
}

/// Create or edit form page
#[derive(Debug, Clone)]
pub struct FormPage<'a> {
    pub title: &'static str,
    pub action: String,
    pub values: FormValues,
    /// Stored record being edited; `None` on the create form
    pub original: Option<&'a DailyRecord>,
    pub error: Option<String>,
}

impl<'a> FormPage<'a> {
    pub fn create(values: FormValues) -> Self {
        Self {
            title: "Add entry",
            action: "/input".to_owned(),
            values,
            original: None,
            error: None,
        }
    }

    pub fn edit(original: &'a DailyRecord, values: FormValues) -> Self {
        Self {
            title: "Edit entry",
            action: format!("/edit/{}", original.id),
            values,
            original: Some(original),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// Escape text for HTML element and attribute content.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Weight log</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">List</a> | <a href=\"/input\">Add entry</a></nav>\n\
         <h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
        body = body,
    ))
}

/// List page: chart plus table of every record.
pub fn list_page(records: &[DailyRecord], series: &ChartSeries) -> Result<Html<String>, serde_json::Error> {
    // `<` is escaped so memo text can't close the script element.
    let chart_json = serde_json::to_string(series)?.replace('<', "\\u003c");

    let mut body = String::new();
    if records.is_empty() {
        body.push_str("<p>No entries yet.</p>\n");
    } else {
        body.push_str("<canvas id=\"weight-chart\"></canvas>\n");
        body.push_str(&format!("<script src=\"{}\"></script>\n", CHART_JS));
        body.push_str(&format!(
            "<script>\nconst series = {chart_json};\n\
             new Chart(document.getElementById('weight-chart'), {{\n\
             type: 'line',\n\
             data: {{ labels: series.dates, datasets: [{{ label: 'Weight', data: series.weights }}] }},\n\
             options: {{ plugins: {{ tooltip: {{ callbacks: {{ afterLabel: (ctx) => series.memos[ctx.dataIndex] }} }} }} }}\n\
             }});\n</script>\n"
        ));
    }

    body.push_str("<table>\n<thead><tr><th>Date</th><th>Weight</th><th>Memo</th><th></th></tr></thead>\n<tbody>\n");
    for rec in records {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/edit/{}\">Edit</a></td></tr>\n",
            rec.date.format(DATE_FORMAT),
            rec.weight,
            escape(&rec.memo),
            rec.id,
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    Ok(layout("Weight log", &body))
}

/// Create/edit form page.
pub fn record_form(page: &FormPage<'_>) -> Html<String> {
    let mut body = String::new();

    if let Some(original) = page.original {
        body.push_str(&format!(
            "<p class=\"original\">Entry #{}: {} / {} / {}</p>\n",
            original.id,
            original.date.format(DATE_FORMAT),
            original.weight,
            escape(&original.memo),
        ));
    }
    if let Some(error) = &page.error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Date <input type=\"date\" name=\"date\" value=\"{date}\" required></label>\n\
         <label>Weight <input type=\"number\" step=\"any\" name=\"weight\" value=\"{weight}\" required></label>\n\
         <label>Memo <input type=\"text\" name=\"memo\" value=\"{memo}\"></label>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n",
        action = escape(&page.action),
        date = escape(&page.values.date),
        weight = escape(&page.values.weight),
        memo = escape(&page.values.memo),
    ));

    layout(page.title, &body)
}

/// Minimal page for request-terminating errors.
pub fn error_page(title: &str, message: &str) -> Html<String> {
    layout(title, &format!("<p>{}</p>\n", escape(message)))
}
