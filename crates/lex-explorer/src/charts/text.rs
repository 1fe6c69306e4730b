//! Plain-text rendering of chart data.

use super::{BoxplotChart, Chart, HeatmapChart, HistogramChart, ScatterChart};
use crate::utils::truncate_str;
use std::fmt;

const BAR_WIDTH: usize = 40;
const BOX_WIDTH: usize = 50;
const GRID_WIDTH: usize = 60;
const GRID_HEIGHT: usize = 16;
const LABEL_WIDTH: usize = 12;

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Histogram(chart) => fmt::Display::fmt(chart, f),
            Self::Boxplot(chart) => fmt::Display::fmt(chart, f),
            Self::CorrelationHeatmap(chart) => fmt::Display::fmt(chart, f),
            Self::Scatter(chart) => fmt::Display::fmt(chart, f),
        }
    }
}

impl fmt::Display for HistogramChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram of {}", self.column)?;
        if self.bins.is_empty() {
            return writeln!(f, "  (no values)");
        }
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for bin in &self.bins {
            let len = bin.count * BAR_WIDTH / peak;
            writeln!(
                f,
                "  [{:>10.2}, {:>10.2}] {:<width$} {}",
                bin.start,
                bin.end,
                "#".repeat(len),
                bin.count,
                width = BAR_WIDTH
            )?;
        }
        if !self.density.is_empty() {
            let peak = self.density.iter().map(|p| p.y).fold(0.0, f64::max);
            writeln!(f, "  density overlay: {} points, peak {:.2}", self.density.len(), peak)?;
        }
        Ok(())
    }
}

impl fmt::Display for BoxplotChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Boxplot of {}", self.column)?;

        let span = self.max - self.min;
        let pos = |v: f64| -> usize {
            if span <= 0.0 {
                0
            } else {
                (((v - self.min) / span) * (BOX_WIDTH - 1) as f64).round() as usize
            }
        };

        let mut line = vec![' '; BOX_WIDTH];
        for cell in line.iter_mut().take(pos(self.upper_whisker) + 1).skip(pos(self.lower_whisker)) {
            *cell = '-';
        }
        for cell in line.iter_mut().take(pos(self.q3) + 1).skip(pos(self.q1)) {
            *cell = '=';
        }
        line[pos(self.lower_whisker)] = '|';
        line[pos(self.upper_whisker)] = '|';
        line[pos(self.median)] = 'M';
        for outlier in &self.outliers {
            line[pos(*outlier)] = 'o';
        }

        writeln!(f, "  {}", line.into_iter().collect::<String>())?;
        writeln!(
            f,
            "  min {:.2} | q1 {:.2} | median {:.2} | q3 {:.2} | max {:.2}",
            self.min, self.q1, self.median, self.q3, self.max
        )?;
        writeln!(f, "  outliers: {}", self.outliers.len())
    }
}

impl fmt::Display for HeatmapChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Correlation Heatmap")?;
        if self.is_empty() {
            return writeln!(f, "  (no numeric columns)");
        }
        write!(f, "  {:<LABEL_WIDTH$}", "")?;
        for label in &self.x_labels {
            write!(f, " {:>LABEL_WIDTH$}", truncate_str(label, LABEL_WIDTH))?;
        }
        writeln!(f)?;
        for (row, label) in self.y_labels.iter().enumerate() {
            write!(f, "  {:<LABEL_WIDTH$}", truncate_str(label, LABEL_WIDTH))?;
            for col in 0..self.x_labels.len() {
                write!(f, " {:>LABEL_WIDTH$}", self.cell_label(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for ScatterChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} vs {}", self.y_column, self.x_column)?;
        if self.points.is_empty() {
            return writeln!(f, "  (no complete rows)");
        }

        let (min_x, max_x) = bounds(self.points.iter().map(|p| p.0));
        let (min_y, max_y) = bounds(self.points.iter().map(|p| p.1));
        let scale = |v: f64, min: f64, max: f64, cells: usize| -> usize {
            if max > min {
                (((v - min) / (max - min)) * (cells - 1) as f64).round() as usize
            } else {
                0
            }
        };

        let mut grid = vec![vec![' '; GRID_WIDTH]; GRID_HEIGHT];
        for &(x, y) in &self.points {
            let col = scale(x, min_x, max_x, GRID_WIDTH);
            let row = GRID_HEIGHT - 1 - scale(y, min_y, max_y, GRID_HEIGHT);
            grid[row][col] = '*';
        }

        writeln!(f, "  {max_y:>10.2} +")?;
        for row in grid {
            writeln!(f, "  {:>10} |{}", "", row.into_iter().collect::<String>())?;
        }
        writeln!(f, "  {min_y:>10.2} +{}", "-".repeat(GRID_WIDTH))?;
        writeln!(f, "  {:>10}  {min_x:<.2} .. {max_x:.2}", "")?;
        writeln!(f, "  {} points", self.points.len())
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}
