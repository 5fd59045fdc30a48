use anyhow::{Context, Result};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use weekprofile_core::{ProfileEntry, ValueSource, Weekday, WeeklyProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// One column per weekday
    Table,
    /// One row per weekday with where the value came from
    Detail,
    /// {"Mon": .., ..., "Sun": ..}
    Json,
}

#[derive(Tabled)]
struct DetailRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Value")]
    value: i64,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn render(profile: &WeeklyProfile, format: Format) -> Result<String> {
    match format {
        Format::Table => Ok(week_table(profile)),
        Format::Detail => Ok(detail_table(profile)),
        Format::Json => serde_json::to_string_pretty(profile).context("Failed to serialize profile"),
    }
}

fn week_table(profile: &WeeklyProfile) -> String {
    let mut builder = Builder::default();
    builder.push_record(Weekday::ALL.iter().map(|d| d.to_string()));
    builder.push_record(profile.entries().iter().map(cell_value));

    let mut table = builder.build();
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));

    let mut out = table.to_string();
    if !profile.interpolated_days().is_empty() {
        out.push_str("\n* interpolated");
    }
    out
}

fn cell_value(entry: &ProfileEntry) -> String {
    if entry.is_observed() {
        entry.value.to_string()
    } else {
        format!("{}*", entry.value)
    }
}

fn detail_rows(profile: &WeeklyProfile) -> Vec<DetailRow> {
    profile
        .entries()
        .iter()
        .map(|entry| DetailRow {
            day: entry.weekday.to_string(),
            value: entry.value,
            source: describe_source(&entry.source),
        })
        .collect()
}

pub fn describe_source(source: &ValueSource) -> String {
    match source {
        ValueSource::Observed { count: 1 } => "observed (1 date)".to_string(),
        ValueSource::Observed { count } => format!("observed ({} dates summed)", count),
        ValueSource::Interpolated { prev, next } => format!("interpolated from {} and {}", prev, next),
    }
}

fn detail_table(profile: &WeeklyProfile) -> String {
    let mut table = Table::new(detail_rows(profile));
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}
