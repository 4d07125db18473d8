use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Clean,
    Analyze,
    Summarize,
}

impl StageKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Analyze => "analyze",
            Self::Summarize => "summarize",
        }
    }

    /// Columns the stage expects to find in its input.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Clean => &["Date", "Sales"],
            Self::Analyze => &["Month", "Product", "Sales", "Revenue"],
            Self::Summarize => &["Sales_sum", "Sales_mean", "Revenue_sum", "Product"],
        }
    }

    /// Column set the stage produces for a given input column set. Clean
    /// passes its input columns through and adds the derived ones; the other
    /// stages replace the schema entirely.
    pub fn output_columns(self, available: &BTreeSet<String>) -> BTreeSet<String> {
        match self {
            Self::Clean => {
                let mut columns = available.clone();
                columns.insert("Month".to_string());
                columns.insert("Revenue".to_string());
                columns
            }
            Self::Analyze => [
                "Month",
                "Product",
                "Sales_sum",
                "Sales_mean",
                "Revenue_sum",
                "Revenue_mean",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            Self::Summarize => ["Metric", "Value"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

/// Descriptor for one stage in a pipeline. The name defaults to the kind's
/// canonical name but can be overridden for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StageKind,
}

impl StageSpec {
    pub fn new(kind: StageKind) -> Self {
        Self {
            name: kind.name().to_string(),
            kind,
        }
    }
}

/// The canonical clean -> analyze -> summarize pipeline.
pub fn standard_stages() -> Vec<StageSpec> {
    vec![
        StageSpec::new(StageKind::Clean),
        StageSpec::new(StageKind::Analyze),
        StageSpec::new(StageKind::Summarize),
    ]
}
