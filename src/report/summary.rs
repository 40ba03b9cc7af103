//! Console tables for analysis results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::data::{CleanSummary, ColumnKind, ColumnProfile};
use crate::registry::{DefectRecord, Priority, RegistrySummary};
use crate::stats::{
    ChartKind, ControlLimits, CorrelatedPair, HistogramResult, MetricsResult, ParetoEntry,
    SigmaRating, ValueParetoEntry, SIGMA_CONVERSION_TABLE,
};

const HISTOGRAM_BAR_WIDTH: usize = 30;

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

// Indent the table
fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn number(value: f64, decimals: usize) -> Cell {
    Cell::new(format!("{:.*}", decimals, value)).set_alignment(CellAlignment::Right)
}

fn rating_color(rating: SigmaRating) -> Color {
    match rating {
        SigmaRating::NeedsImprovement => Color::Red,
        SigmaRating::Average => Color::Yellow,
        SigmaRating::Good => Color::Cyan,
        SigmaRating::Excellent => Color::Green,
    }
}

fn correlation_color(r: f64) -> Color {
    let strength = r.abs();
    if strength >= 0.7 {
        Color::Green
    } else if strength >= 0.3 {
        Color::Yellow
    } else {
        Color::White
    }
}

/// Six Sigma metrics with rating and gap to 6σ.
pub fn display_metrics(metrics: &MetricsResult) {
    print_section("📊", "SIX SIGMA METRICS");

    let rating = metrics.rating();
    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("DPU"), number(metrics.dpu, 4)]);
    table.add_row(vec![Cell::new("DPMO"), number(metrics.dpmo, 2)]);
    table.add_row(vec![
        Cell::new("Process Yield"),
        Cell::new(format!("{:.4}%", metrics.process_yield)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Sigma Level"),
        number(metrics.sigma_level, 2)
            .fg(rating_color(rating))
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("RTY"),
        Cell::new(format!("{:.4}%", metrics.rty)).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![Cell::new("DPM"), number(metrics.dpm, 2)]);
    table.add_row(vec![Cell::new("Gap to 6σ"), number(metrics.gap_to_six_sigma(), 2)]);
    print_table(&table);

    println!();
    println!(
        "      {} {}",
        style(rating.label()).bold(),
        style(rating.description()).dim()
    );
}

/// Reference sigma conversion table, highlighting the row for `sigma_level`.
pub fn display_conversion_table(sigma_level: Option<u8>) {
    print_section("📐", "SIGMA CONVERSION TABLE");

    let mut table = new_table(&["Sigma", "DPMO", "Yield"]);
    for row in SIGMA_CONVERSION_TABLE.iter() {
        let highlighted = sigma_level == Some(row.sigma);
        let mut sigma = Cell::new(format!("{}σ", row.sigma));
        if highlighted {
            sigma = sigma.fg(Color::Green).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            sigma,
            number(row.dpmo, 1),
            Cell::new(format!("{}%", row.process_yield)).set_alignment(CellAlignment::Right),
        ]);
    }
    print_table(&table);
}

/// Histogram bins with a text bar per bin, followed by descriptive statistics.
pub fn display_histogram(column: &str, histogram: &HistogramResult) {
    print_section("📊", &format!("HISTOGRAM - {}", column));

    let max_count = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0);
    let mut table = new_table(&["Bin", "Count", ""]);
    for bin in &histogram.bins {
        let bar_len = if max_count == 0 {
            0
        } else {
            (bin.count * HISTOGRAM_BAR_WIDTH).div_ceil(max_count)
        };
        table.add_row(vec![
            Cell::new(format!("{:.2}-{:.2}", bin.start, bin.end)),
            Cell::new(bin.count).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(bar_len)).fg(Color::Cyan),
        ]);
    }
    print_table(&table);

    let stats = &histogram.stats;
    println!();
    let mut table = new_table(&["Statistic", "Value"]);
    table.add_row(vec![Cell::new("n"), Cell::new(stats.n).set_alignment(CellAlignment::Right)]);
    table.add_row(vec![Cell::new("Mean"), number(stats.mean, 4)]);
    table.add_row(vec![Cell::new("Median"), number(stats.median, 4)]);
    table.add_row(vec![Cell::new("Std Dev"), number(stats.std_dev, 4)]);
    table.add_row(vec![Cell::new("Variance"), number(stats.variance, 4)]);
    table.add_row(vec![Cell::new("Min"), number(stats.min, 4)]);
    table.add_row(vec![Cell::new("Max"), number(stats.max, 4)]);
    table.add_row(vec![Cell::new("Bin width"), number(histogram.bin_width, 4)]);
    print_table(&table);
}

/// X̄ and R limits, then any out-of-control subgroups.
pub fn display_control_limits(column: &str, limits: &ControlLimits) {
    print_section("📈", &format!("CONTROL LIMITS - {}", column));

    let mut table = new_table(&["Chart", "LCL", "Center", "UCL"]);
    table.add_row(vec![
        Cell::new("X̄"),
        number(limits.lcl_x, 4),
        number(limits.center_line_x, 4).add_attribute(Attribute::Bold),
        number(limits.ucl_x, 4),
    ]);
    table.add_row(vec![
        Cell::new("R"),
        number(limits.lcl_r, 4),
        number(limits.center_line_r, 4).add_attribute(Attribute::Bold),
        number(limits.ucl_r, 4),
    ]);
    print_table(&table);

    println!();
    println!(
        "      {} subgroups of {} (A2={}, D3={}, D4={})",
        style(limits.subgroup_count()).yellow().bold(),
        limits.subgroup_size,
        limits.constants.a2,
        limits.constants.d3,
        limits.constants.d4
    );
    if limits.discarded > 0 {
        println!(
            "      {}",
            style(format!(
                "{} trailing value(s) did not fill a subgroup and were ignored",
                limits.discarded
            ))
            .dim()
        );
    }

    let signals = limits.signals();
    if signals.is_empty() {
        println!(
            "      {} {}",
            style("✓").green().bold(),
            style("All subgroups within limits").green()
        );
        return;
    }

    println!();
    let mut table = new_table(&["Subgroup", "Chart", "Value", "Side"]);
    for signal in &signals {
        let chart = match signal.chart {
            ChartKind::Mean => "X̄",
            ChartKind::Range => "R",
        };
        table.add_row(vec![
            Cell::new(signal.subgroup + 1).set_alignment(CellAlignment::Right),
            Cell::new(chart),
            number(signal.value, 4).fg(Color::Red),
            Cell::new(if signal.above_upper { "above UCL" } else { "below LCL" }),
        ]);
    }
    print_table(&table);
}

/// Correlation pairs, strongest first as given.
pub fn display_correlations(pairs: &[CorrelatedPair]) {
    print_section("🔗", "CORRELATION");

    if pairs.is_empty() {
        println!("      {}", style("No column pairs to report").dim());
        return;
    }

    let mut table = new_table(&["X", "Y", "r", "Pairs"]);
    for pair in pairs {
        table.add_row(vec![
            Cell::new(&pair.column_x),
            Cell::new(&pair.column_y),
            number(pair.correlation, 4).fg(correlation_color(pair.correlation)),
            Cell::new(pair.pairs).set_alignment(CellAlignment::Right),
        ]);
    }
    print_table(&table);
}

/// Frequency Pareto series.
pub fn display_pareto(column: &str, entries: &[ParetoEntry]) {
    print_section("📋", &format!("PARETO - {}", column));

    if entries.is_empty() {
        println!("      {}", style("No categories to report").dim());
        return;
    }

    let mut table = new_table(&["Category", "Count", "%", "Cumulative %"]);
    for entry in entries {
        let cumulative = number(entry.cumulative_percent, 1);
        table.add_row(vec![
            Cell::new(&entry.category),
            Cell::new(entry.count).set_alignment(CellAlignment::Right),
            number(entry.percent, 1),
            if entry.cumulative_percent <= 80.0 {
                cumulative.fg(Color::Yellow)
            } else {
                cumulative
            },
        ]);
    }
    print_table(&table);
}

/// Value-weighted Pareto series.
pub fn display_value_pareto(column: &str, value_column: &str, entries: &[ValueParetoEntry]) {
    print_section("📋", &format!("PARETO - {} by {}", column, value_column));

    if entries.is_empty() {
        println!("      {}", style("No categories to report").dim());
        return;
    }

    let mut table = new_table(&["Category", "Total", "Rows", "Cumulative %"]);
    for entry in entries {
        let mut category = Cell::new(&entry.category);
        if entry.is_other {
            category = category.add_attribute(Attribute::Italic);
        }
        table.add_row(vec![
            category,
            number(entry.value, 2),
            Cell::new(entry.rows).set_alignment(CellAlignment::Right),
            number(entry.cumulative_percent, 1),
        ]);
    }
    print_table(&table);
}

/// One row per column: type, missing share, distinct values and a summary.
pub fn display_profiles(profiles: &[ColumnProfile]) {
    print_section("🔍", "COLUMN PROFILE");

    let mut table = new_table(&["Column", "Type", "Missing", "Distinct", "Summary"]);
    for profile in profiles {
        let kind = match profile.kind {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Empty => "empty",
        };
        let summary = match (&profile.stats, &profile.mode) {
            (Some(stats), _) => format!(
                "mean {:.3}, sd {:.3}, [{:.3}, {:.3}]",
                stats.mean, stats.std_dev, stats.min, stats.max
            ),
            (None, Some(mode)) => format!("mode {}", mode),
            (None, None) => String::new(),
        };
        let missing_color = if profile.missing_ratio >= 0.3 {
            Color::Red
        } else if profile.missing > 0 {
            Color::Yellow
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(kind),
            Cell::new(format!("{} ({:.1}%)", profile.missing, profile.missing_ratio * 100.0))
                .fg(missing_color),
            Cell::new(profile.distinct).set_alignment(CellAlignment::Right),
            Cell::new(summary),
        ]);
    }
    print_table(&table);
}

pub fn display_clean_summary(summary: &CleanSummary) {
    print_section("🧹", "CLEANING SUMMARY");

    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("Rows before"), Cell::new(summary.rows_before)]);
    table.add_row(vec![
        Cell::new("Rows after"),
        Cell::new(summary.rows_after)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    let dropped = summary.rows_before - summary.rows_after;
    table.add_row(vec![
        Cell::new("Rows dropped"),
        Cell::new(dropped).fg(if dropped == 0 { Color::White } else { Color::Red }),
    ]);
    table.add_row(vec![Cell::new("Cells filled"), Cell::new(summary.cells_filled)]);
    print_table(&table);

    if !summary.skipped_columns.is_empty() {
        println!();
        println!(
            "      {} {}:",
            style("Skipped (all missing)").yellow(),
            style(format!("({})", summary.skipped_columns.len())).dim()
        );
        for column in &summary.skipped_columns {
            println!("        {} {}", style("•").dim(), column);
        }
    }
}

pub fn display_defects(records: &[DefectRecord]) {
    print_section("🗂️", "DEFECT REGISTRY");

    if records.is_empty() {
        println!("      {}", style("No defects registered").dim());
        return;
    }

    let mut table = new_table(&["ID", "Date", "Type", "Phase", "Priority", "DMAIC", "Description"]);
    for record in records {
        let priority = match record.priority {
            Some(p) => {
                let color = match p {
                    Priority::High => Color::Red,
                    Priority::Medium => Color::Yellow,
                    Priority::Low => Color::White,
                };
                Cell::new(p.label()).fg(color)
            }
            None => Cell::new("-"),
        };
        table.add_row(vec![
            Cell::new(record.id).set_alignment(CellAlignment::Right),
            Cell::new(record.created_at.format("%Y-%m-%d")),
            Cell::new(&record.kind),
            Cell::new(&record.phase),
            priority,
            Cell::new(record.dmaic.label()),
            Cell::new(&record.description),
        ]);
    }
    print_table(&table);
}

pub fn display_registry_summary(summary: &RegistrySummary) {
    println!();
    println!(
        "      {} defects registered",
        style(summary.total).yellow().bold()
    );

    display_pareto("defect type", &summary.by_kind);

    for (title, counts) in [("PRIORITY", &summary.by_priority), ("DMAIC PHASE", &summary.by_dmaic)] {
        print_section("📌", title);
        let mut table = new_table(&["Value", "Count"]);
        for (label, count) in counts {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(count).set_alignment(CellAlignment::Right),
            ]);
        }
        print_table(&table);
    }
}
