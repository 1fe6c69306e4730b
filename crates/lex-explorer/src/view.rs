//! Rendered page views.
//!
//! Every command produces one [`PageView`]. Views serialize to JSON for
//! `--json` output and render as plain text through `Display`.

use crate::charts::{Chart, ChartRequest};
use crate::encoders::{EncodingMode, EncodingOutcome};
use crate::export::ExportReceipt;
use crate::imputers::ImputationOutcome;
use crate::relationships::Relationship;
use crate::router::Page;
use crate::session::HistoryEntry;
use crate::types::{ColumnDescriptor, DatasetOverview, MissingCount, TablePreview};
use crate::utils::truncate_str;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

const CELL_WIDTH: usize = 18;
const BAR_WIDTH: usize = 40;

const DATASET_ABOUT: &str = "\
Estimates of Post-COVID Conditions (Long COVID) across the United States, from
the U.S. Census Bureau's Household Pulse Survey: the share of adults who ever
experienced Long COVID, those currently experiencing it, and the impact of
symptoms on daily life. Broken down by age, sex, gender identity, race,
education and state.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PageView {
    Overview(DatasetOverview),
    ColumnDetail(ColumnDescriptor),
    MissingValues {
        missing: Vec<MissingCount>,
    },
    Imputed {
        outcome: ImputationOutcome,
        preview: TablePreview,
    },
    Encoding {
        text_columns: Vec<String>,
    },
    Encoded {
        outcome: EncodingOutcome,
        preview: TablePreview,
    },
    Visualization {
        numeric_columns: Vec<String>,
    },
    Chart {
        request: ChartRequest,
        /// `None` when the requested columns are missing or not numeric.
        chart: Option<Chart>,
    },
    Relationships {
        value_column: String,
        group_columns: Vec<String>,
    },
    Relationship(Relationship),
    SaveReset {
        export_path: PathBuf,
        pristine: bool,
    },
    Exported(ExportReceipt),
    Reset {
        rows: usize,
        columns: usize,
    },
    Warning {
        message: String,
    },
    Pages {
        current: Page,
        pages: Vec<Page>,
    },
    History {
        entries: Vec<HistoryEntry>,
    },
    Help {
        text: String,
    },
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overview(overview) => {
                writeln!(f, "Long COVID Data Analysis Dashboard")?;
                writeln!(f)?;
                writeln!(f, "About this dataset")?;
                writeln!(f, "{DATASET_ABOUT}")?;
                writeln!(f)?;
                writeln!(f, "Dataset Preview")?;
                write_table(f, &overview.preview)?;
                writeln!(
                    f,
                    "Total Rows: {}  Total Columns: {}",
                    overview.row_count, overview.column_count
                )
            }
            Self::ColumnDetail(descriptor) => write_descriptor(f, descriptor),
            Self::MissingValues { missing } => {
                writeln!(f, "Missing Values Handling")?;
                if missing.is_empty() {
                    return writeln!(f, "No missing values detected!");
                }
                writeln!(f, "Missing values per column:")?;
                for entry in missing {
                    writeln!(f, "  {:<CELL_WIDTH$} {}", entry.column, entry.null_count)?;
                }
                writeln!(f, "Fill methods: none, mean, median, mode, custom")
            }
            Self::Imputed { outcome, preview } => {
                writeln!(f, "Missing values handled successfully!")?;
                for fill in &outcome.filled {
                    writeln!(
                        f,
                        "  {}: {} cells filled with {}",
                        fill.column, fill.filled_cells, fill.value
                    )?;
                }
                for skipped in &outcome.skipped {
                    writeln!(f, "  {}: unchanged", skipped.column)?;
                }
                write_table(f, preview)
            }
            Self::Encoding { text_columns } => {
                writeln!(f, "Data Encoding")?;
                writeln!(f, "Categorical columns: {}", list_or_none(text_columns))?;
                writeln!(
                    f,
                    "Encodings: {}, {}",
                    EncodingMode::Label.label(),
                    EncodingMode::OneHot.label()
                )
            }
            Self::Encoded { outcome, preview } => {
                writeln!(f, "Encoding applied successfully!")?;
                writeln!(f, "  {}: {}", outcome.mode.label(), list_or_none(&outcome.encoded))?;
                if !outcome.added.is_empty() {
                    writeln!(f, "  added: {}", outcome.added.join(", "))?;
                }
                if !outcome.skipped.is_empty() {
                    writeln!(f, "  skipped: {}", outcome.skipped.join(", "))?;
                }
                write_table(f, preview)
            }
            Self::Visualization { numeric_columns } => {
                writeln!(f, "Data Visualization")?;
                writeln!(f, "Numeric columns: {}", list_or_none(numeric_columns))?;
                writeln!(f, "Charts: Histogram, Boxplot, Correlation Heatmap, Scatter Plot")
            }
            Self::Chart { request, chart } => match chart {
                Some(chart) => write!(f, "{chart}"),
                None => writeln!(f, "{}: no numeric column selected", request.label()),
            },
            Self::Relationships {
                value_column,
                group_columns,
            } => {
                writeln!(f, "Relationship Identification")?;
                writeln!(f, "Value column: {value_column}")?;
                writeln!(f, "Grouping columns: {}", list_or_none(group_columns))
            }
            Self::Relationship(relationship) => write_relationship(f, relationship),
            Self::SaveReset {
                export_path,
                pristine,
            } => {
                writeln!(f, "Save or Reset Processed Data")?;
                writeln!(f, "Export target: {}", export_path.display())?;
                let state = if *pristine { "unchanged" } else { "modified" };
                writeln!(f, "Working table: {state}")
            }
            Self::Exported(receipt) => writeln!(
                f,
                "Saved {} rows x {} columns to {} ({} bytes)",
                receipt.rows,
                receipt.columns,
                receipt.path.display(),
                receipt.bytes
            ),
            Self::Reset { rows, columns } => {
                writeln!(f, "Dataset has been reset to its original state!")?;
                writeln!(f, "  {rows} rows x {columns} columns")
            }
            Self::Warning { message } => writeln!(f, "Warning: {message}"),
            Self::Pages { current, pages } => {
                for page in pages {
                    let marker = if page == current { '*' } else { ' ' };
                    writeln!(f, "{marker} {:<16} ({})", page.label(), page.slug())?;
                }
                Ok(())
            }
            Self::History { entries } => {
                if entries.is_empty() {
                    return writeln!(f, "No actions recorded yet.");
                }
                for entry in entries {
                    writeln!(f, "{}  {:<7} {}", entry.timestamp, entry.action, entry.detail)?;
                }
                Ok(())
            }
            Self::Help { text } => write!(f, "{text}"),
        }
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &TablePreview) -> fmt::Result {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
                .min(CELL_WIDTH)
        })
        .collect();

    write_row(f, &table.columns, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "|-{}-|", rule.join("-|-"))?;
    for row in &table.rows {
        write_row(f, row, &widths)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", truncate_str(cell, *width), width = *width))
        .collect();
    writeln!(f, "| {} |", line.join(" | "))
}

fn write_descriptor(f: &mut fmt::Formatter<'_>, descriptor: &ColumnDescriptor) -> fmt::Result {
    writeln!(f, "Column: {}", descriptor.name)?;
    writeln!(f, "Data type: {} ({})", descriptor.dtype, descriptor.kind)?;
    writeln!(f, "Missing values: {}", descriptor.null_count)?;
    writeln!(f, "Unique values: {}", descriptor.unique_count)?;
    writeln!(f, "Example values: {}", descriptor.sample_values.join(", "))?;

    if let Some(stats) = &descriptor.statistics {
        let std = stats
            .std
            .map(|s| format!("{s:.4}"))
            .unwrap_or_else(|| "NaN".to_string());
        writeln!(f, "  count {:>14}", stats.count)?;
        writeln!(f, "  mean  {:>14.4}", stats.mean)?;
        writeln!(f, "  std   {std:>14}")?;
        writeln!(f, "  min   {:>14.4}", stats.min)?;
        writeln!(f, "  25%   {:>14.4}", stats.q1)?;
        writeln!(f, "  50%   {:>14.4}", stats.median)?;
        writeln!(f, "  75%   {:>14.4}", stats.q3)?;
        writeln!(f, "  max   {:>14.4}", stats.max)?;
    }
    Ok(())
}

fn write_relationship(f: &mut fmt::Formatter<'_>, relationship: &Relationship) -> fmt::Result {
    writeln!(
        f,
        "Mean {} by {}",
        relationship.value_column, relationship.group_column
    )?;

    let peak = relationship
        .groups
        .iter()
        .filter_map(|g| g.mean)
        .fold(0.0_f64, |acc, m| acc.max(m.abs()));

    for group in &relationship.groups {
        let label = truncate_str(&group.key, CELL_WIDTH);
        match group.mean {
            Some(mean) => {
                let len = if peak > 0.0 {
                    ((mean.max(0.0) / peak) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                writeln!(
                    f,
                    "  {label:<CELL_WIDTH$} {:<BAR_WIDTH$} {mean:.2}",
                    "#".repeat(len)
                )?;
            }
            None => writeln!(f, "  {label:<CELL_WIDTH$} {:<BAR_WIDTH$} n/a", "")?,
        }
    }
    writeln!(f, "{}", relationship.caption())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::GroupMean;

    #[test]
    fn test_missing_values_info_when_clean() {
        let view = PageView::MissingValues { missing: vec![] };
        assert!(view.to_string().contains("No missing values detected!"));
    }

    #[test]
    fn test_table_rendering() {
        let view = PageView::Overview(DatasetOverview {
            row_count: 2,
            column_count: 2,
            preview: TablePreview {
                columns: vec!["State".to_string(), "Value".to_string()],
                rows: vec![
                    vec!["CA".to_string(), "10.0".to_string()],
                    vec!["TX".to_string(), "null".to_string()],
                ],
            },
        });
        let text = view.to_string();
        assert!(text.contains("| State | Value |"));
        assert!(text.contains("| CA    | 10.0  |"));
        assert!(text.contains("Total Rows: 2  Total Columns: 2"));
        assert!(text.contains("About this dataset"));
        assert!(text.contains("Household Pulse"));
    }

    #[test]
    fn test_relationship_bars_and_caption() {
        let view = PageView::Relationship(Relationship {
            group_column: "State".to_string(),
            value_column: "Value".to_string(),
            groups: vec![
                GroupMean { key: "CA".to_string(), mean: Some(15.0) },
                GroupMean { key: "TX".to_string(), mean: Some(5.0) },
            ],
        });
        let text = view.to_string();
        let ca = text.lines().find(|l| l.trim_start().starts_with("CA")).unwrap();
        let tx = text.lines().find(|l| l.trim_start().starts_with("TX")).unwrap();
        assert_eq!(ca.matches('#').count(), BAR_WIDTH);
        assert_eq!(tx.matches('#').count(), 13);
        assert!(text.ends_with("This shows how Long COVID rates vary by State.\n"));
    }

    #[test]
    fn test_views_serialize_with_tag() {
        let view = PageView::Reset { rows: 3, columns: 2 };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "reset");
        assert_eq!(json["rows"], 3);

        let pages = PageView::Pages { current: Page::SaveReset, pages: Page::ALL.to_vec() };
        let json = serde_json::to_value(&pages).unwrap();
        assert_eq!(json["current"], "save-reset");
    }
}
