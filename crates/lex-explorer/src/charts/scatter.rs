use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterChart {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<(f64, f64)>,
}

/// Pair up rows where both coordinates are present.
pub fn build_scatter(
    x_column: &str,
    y_column: &str,
    xs: &[Option<f64>],
    ys: &[Option<f64>],
) -> ScatterChart {
    let points = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    ScatterChart {
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        points,
    }
}
