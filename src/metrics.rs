use crate::checker::CheckResult;
use crate::utils;
use once_cell::sync::Lazy;
use prettytable::format::{FormatBuilder, LinePosition, LineSeparator, TableFormat};
use prettytable::{Cell, Row, Table};

/// Redirect URLs longer than this are shortened in the console table.
const MAX_URL_WIDTH: usize = 60;

/// Boxed two column layout used for the per-site report:
///
/// ```text
/// ┌───────────────┬──────────────────────┐
/// │ Response Time │ 84.12ms              │
/// │ Server        │ nginx                │
/// └───────────────┴──────────────────────┘
/// ```
static TABLE_FORMAT: Lazy<TableFormat> = Lazy::new(|| {
    FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(&[LinePosition::Top], LineSeparator::new('─', '┬', '┌', '┐'))
        .separators(
            &[LinePosition::Bottom],
            LineSeparator::new('─', '┴', '└', '┘'),
        )
        .padding(1, 1)
        .build()
});

#[derive(Debug)]
pub struct Entry {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug)]
pub struct Metrics(pub Vec<Entry>);

impl Metrics {
    /// The figures shown for a site that answered.
    pub fn for_result(result: &CheckResult) -> Self {
        let or_none = |value: &str| {
            if value.is_empty() {
                "-".to_string()
            } else {
                value.to_string()
            }
        };

        Metrics(vec![
            Entry {
                label: "Response Time",
                value: utils::ms(result.response_time),
            },
            Entry {
                label: "Content Length",
                value: utils::bytes(result.content_length),
            },
            Entry {
                label: "Redirect URL",
                value: utils::truncate_message(&result.redirect_url, MAX_URL_WIDTH),
            },
            Entry {
                label: "Server",
                value: or_none(&result.server_header),
            },
            Entry {
                label: "Content Type",
                value: or_none(&result.content_type),
            },
            Entry {
                label: "SSL Enabled",
                value: (if result.ssl_enabled { "Yes" } else { "No" }).to_string(),
            },
            Entry {
                label: "Attempts",
                value: result.attempts.to_string(),
            },
        ])
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }

    pub fn build_table(&self) -> String {
        let mut table = Table::new();
        table.set_format(*TABLE_FORMAT);
        for entry in &self.0 {
            table.add_row(Row::new(vec![
                Cell::new(entry.label),
                Cell::new(&entry.value),
            ]));
        }
        table.to_string()
    }
}
