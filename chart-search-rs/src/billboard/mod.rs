mod api;

pub use api::{chart_url, parse_chart, BillboardChartApi};
