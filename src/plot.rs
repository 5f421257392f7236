//! Summary plot: per-group mean bars, one point per row colored by its
//! classification, a threshold reference line, and per-group positive-rate
//! annotations.

use crate::aggregate::Table;
use crate::ingest::{GROUP_COL, POSITIVE_COL};
use crate::summary::SummaryRow;
use anyhow::{bail, Context, Result};
use plotters::prelude::*;
use plotters::style::RGBAColor;
use std::path::Path;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 800;

pub fn render_summary_plot(
    table: &Table,
    summary: &[SummaryRow],
    threshold: u32,
    foci_column: &str,
    output_path: &Path,
) -> Result<()> {
    if summary.is_empty() {
        bail!("nothing to plot: no sample groups in the unified table");
    }

    let group_idx = table
        .column_index(GROUP_COL)
        .context("unified table has no SampleGroup column")?;
    let positive_idx = table
        .column_index(POSITIVE_COL)
        .context("unified table has no Positive column")?;
    let foci_idx = table
        .column_index(foci_column)
        .with_context(|| format!("unified table has no '{}' column", foci_column))?;

    let groups: Vec<&str> = summary.iter().map(|r| r.group.as_str()).collect();

    // (group position, foci value, positive) per plottable row. Rows whose
    // measurement cell is blank after column widening are left out.
    let mut points: Vec<(usize, f64, bool)> = Vec::new();
    for row in 0..table.len() {
        let group = table.value(row, group_idx);
        let Some(pos) = groups.iter().position(|g| *g == group) else {
            continue;
        };
        let Ok(value) = table.value(row, foci_idx).trim().parse::<f64>() else {
            continue;
        };
        points.push((pos, value, table.value(row, positive_idx) == "true"));
    }

    let y_max = points
        .iter()
        .map(|(_, v, _)| *v)
        .fold(f64::from(threshold), f64::max)
        * 1.2
        + 1.0;

    let root = BitMapBackend::new(output_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = groups.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Focus Count by Sample", ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    let group_labels: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Count")
        .x_labels(group_labels.len())
        .x_label_formatter(&|x: &f64| {
            let i = x.floor() as usize;
            group_labels.get(i).cloned().unwrap_or_default()
        })
        .label_style(("sans-serif", 18))
        .draw()?;

    // Mean bar per group.
    for (i, _) in groups.iter().enumerate() {
        let values: Vec<f64> = points
            .iter()
            .filter(|(g, _, _)| *g == i)
            .map(|(_, v, _)| *v)
            .collect();
        if values.is_empty() {
            continue;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let bar = RGBAColor(70, 130, 180, 0.5);
        chart.draw_series(std::iter::once(Rectangle::new(
            [(i as f64 + 0.15, 0.0), (i as f64 + 0.85, mean)],
            bar.filled(),
        )))?;
    }

    // Per-row points, red when positive, black otherwise. Deterministic
    // horizontal spread inside each group's slot.
    chart.draw_series(points.iter().enumerate().map(|(k, (g, v, positive))| {
        let offset = ((k % 7) as f64 - 3.0) * 0.04;
        let color = if *positive { RED.filled() } else { BLACK.filled() };
        Circle::new((*g as f64 + 0.5 + offset, *v), 4, color)
    }))?;

    // Threshold reference line.
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, f64::from(threshold)), (x_max, f64::from(threshold))],
        RED.stroke_width(2),
    )))?;

    // Positive-rate annotation per group, two lines per slot.
    for (i, row) in summary.iter().enumerate() {
        chart.draw_series(std::iter::once(Text::new(
            format!("% Positive: {:.2}", row.pct_positive),
            (i as f64 + 0.2, y_max * 0.95),
            ("sans-serif", 16),
        )))?;
        chart.draw_series(std::iter::once(Text::new(
            format!("({}/{})", row.positive, row.total),
            (i as f64 + 0.2, y_max * 0.91),
            ("sans-serif", 16),
        )))?;
    }

    root.present()
        .with_context(|| format!("failed to write plot to {}", output_path.display()))?;

    Ok(())
}
