//! Server-rendered HTML pages
//!
//! Pages are plain strings: a shared layout, the upload form, and the result
//! sections. Every user-supplied string goes through `escape_xml`.

use std::fmt::Write;

use monthcast_core::chart::escape_xml;
use monthcast_core::{Analysis, Config, Extremum, TrendChart};

const TITLE: &str = "📊 Monthcast: Income &amp; Expense Predictor";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #222; }
h1 { font-size: 1.6rem; }
h2 { font-size: 1.2rem; margin-top: 2rem; border-bottom: 1px solid #ddd; padding-bottom: .25rem; }
table { border-collapse: collapse; width: 100%; }
th, td { padding: .35rem .6rem; border-bottom: 1px solid #eee; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.info { background: #eef5ff; padding: .75rem 1rem; border-radius: 6px; }
.error { background: #fdecea; color: #8a1c12; padding: .75rem 1rem; border-radius: 6px; }
.negative { color: #b00020; }
svg { max-width: 100%; height: auto; }
"#;

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Monthcast</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        style = STYLE,
        title = TITLE,
        body = body
    )
}

fn upload_form(config: &Config) -> String {
    format!(
        r#"<form method="post" action="/analyze" enctype="multipart/form-data">
<label for="file">Upload your income/expense CSV (columns: {period}, {income}, {expense})</label><br>
<input type="file" id="file" name="file" accept=".csv,text/csv" required>
<button type="submit">Analyze</button>
</form>
"#,
        period = escape_xml(&config.columns.period),
        income = escape_xml(&config.columns.income),
        expense = escape_xml(&config.columns.expense),
    )
}

/// Landing page, optionally showing why the last upload failed
pub fn render_index(config: &Config, error: Option<&str>) -> String {
    let mut body = upload_form(config);
    match error {
        Some(message) => {
            let _ = writeln!(body, r#"<p class="error">⚠️ {}</p>"#, escape_xml(message));
        }
        None => {
            body.push_str(r#"<p class="info">📁 Please upload a CSV file to begin.</p>"#);
            body.push('\n');
        }
    }
    layout(&body)
}

/// Result page for one analysis pass
pub fn render_results(config: &Config, analysis: &Analysis) -> String {
    let display = &config.display;
    let mut body = upload_form(config);

    // Uploaded data
    body.push_str("<h2>🔍 Uploaded Data</h2>\n<table>\n");
    let _ = writeln!(
        body,
        "<tr><th>{}</th><th>{}</th><th>{}</th><th>Balance</th></tr>",
        escape_xml(&config.columns.period),
        escape_xml(&config.columns.income),
        escape_xml(&config.columns.expense),
    );
    for (obs, balance) in analysis
        .series
        .observations()
        .iter()
        .zip(&analysis.balances)
    {
        let class = if *balance < 0.0 { r#" class="negative""# } else { "" };
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td{}>{}</td></tr>",
            escape_xml(&obs.period),
            display.money(obs.income),
            display.money(obs.expense),
            class,
            display.money(*balance),
        );
    }
    body.push_str("</table>\n");

    // Insights
    let extrema = &analysis.extrema;
    body.push_str("<h2>📈 Spending Insights</h2>\n");
    push_extremum(&mut body, "Highest Spending", &extrema.max_expense, config);
    push_extremum(&mut body, "Lowest Spending", &extrema.min_expense, config);

    body.push_str("<h2>📥 Income Insights</h2>\n");
    push_extremum(&mut body, "Highest Income", &extrema.max_income, config);
    push_extremum(&mut body, "Lowest Income", &extrema.min_income, config);

    // Charts
    for chart in TrendChart::pair(analysis, display) {
        let _ = writeln!(body, "<h2>📊 {}</h2>", escape_xml(&chart.title));
        body.push_str(&chart.to_svg());
        body.push('\n');
    }

    // Forecast
    body.push_str("<h2>🔮 Next Month Forecast</h2>\n");
    let _ = writeln!(
        body,
        "<p>💰 Estimated Income: <strong>{}</strong></p>",
        display.money(analysis.income.value())
    );
    let _ = writeln!(
        body,
        "<p>💸 Estimated Expense: <strong>{}</strong></p>",
        display.money(analysis.expense.value())
    );
    let _ = writeln!(
        body,
        "<p>🧾 Projected Balance: <strong>{}</strong></p>",
        display.money(analysis.projected_balance)
    );

    layout(&body)
}

fn push_extremum(body: &mut String, label: &str, extremum: &Extremum, config: &Config) {
    let _ = writeln!(
        body,
        "<p><strong>{}:</strong> {} – {}</p>",
        label,
        escape_xml(&extremum.period),
        config.display.money(extremum.value)
    );
}
