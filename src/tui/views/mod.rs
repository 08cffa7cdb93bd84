pub mod bars;
pub mod detail;
pub mod heatmap;
