use crate::error::{ExtractionError, Result};
use crate::terms;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical identity of a financial statement line item.
///
/// Exactly one identity is assigned per synonym match; a single table row
/// may still satisfy more than one identity (its label containing both
/// revenue and profit synonyms), in which case each identity is populated
/// independently from the same row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinancialLineItem {
    Revenue,
    OperatingProfit,
    NetProfit,
}

impl FinancialLineItem {
    pub const ALL: [FinancialLineItem; 3] = [
        FinancialLineItem::Revenue,
        FinancialLineItem::OperatingProfit,
        FinancialLineItem::NetProfit,
    ];

    /// The synonym dictionary for this line item.
    pub fn terms(self) -> &'static [(&'static str, u32)] {
        match self {
            FinancialLineItem::Revenue => terms::REVENUE_TERMS,
            FinancialLineItem::OperatingProfit => terms::OPERATING_PROFIT_TERMS,
            FinancialLineItem::NetProfit => terms::NET_PROFIT_TERMS,
        }
    }
}

/// Figures for a single reporting interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PeriodFigures {
    pub revenue: Option<f64>,
    pub operating_profit: Option<f64>,
    pub net_profit: Option<f64>,
    #[serde(default)]
    pub unit: String,
}

impl PeriodFigures {
    pub fn figure(&self, item: FinancialLineItem) -> Option<f64> {
        match item {
            FinancialLineItem::Revenue => self.revenue,
            FinancialLineItem::OperatingProfit => self.operating_profit,
            FinancialLineItem::NetProfit => self.net_profit,
        }
    }

    pub fn set_figure(&mut self, item: FinancialLineItem, value: Option<f64>) {
        match item {
            FinancialLineItem::Revenue => self.revenue = value,
            FinancialLineItem::OperatingProfit => self.operating_profit = value,
            FinancialLineItem::NetProfit => self.net_profit = value,
        }
    }

    /// True when at least one financial field is populated.
    pub fn has_figures(&self) -> bool {
        self.revenue.is_some() || self.operating_profit.is_some() || self.net_profit.is_some()
    }
}

/// Full-year ("year ended") figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnnualFigures {
    #[serde(default)]
    pub year: String,
    #[serde(flatten)]
    pub figures: PeriodFigures,
}

/// The normalized extraction output — the contract surface returned to the
/// presentation layer and read by the query answerer.
///
/// Created once per uploaded document, mutated additively through the
/// pipeline stages, and immutable after being returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtractedFinancials {
    #[serde(default)]
    pub company_name: String,
    pub current_period: PeriodFigures,
    pub annual_period: AnnualFigures,
}

/// Whether the current period shows a profit or a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitVerdict {
    Profit,
    Loss,
    Unknown,
}

impl ExtractedFinancials {
    /// True when neither period carries any financial figure.
    pub fn is_empty(&self) -> bool {
        !self.current_period.has_figures() && !self.annual_period.figures.has_figures()
    }

    pub fn profit_verdict(&self) -> ProfitVerdict {
        match self.current_period.net_profit {
            Some(value) if value >= 0.0 => ProfitVerdict::Profit,
            Some(_) => ProfitVerdict::Loss,
            None => ProfitVerdict::Unknown,
        }
    }

    /// Merges a fallback extraction into this result.
    ///
    /// Each numeric field is filled only if it is currently unset, so a
    /// value found by the local table parse is never overwritten by the
    /// lower-confidence strategy. The company name is the one exception:
    /// the fallback replaces it whenever it provided one. Unit and year are
    /// owned by the local detectors and are not merged.
    pub fn merge_fallback(&mut self, fallback: &LlmFinancials) {
        if let Some(current) = &fallback.current_quarter {
            fill_if_absent(&mut self.current_period.revenue, current.revenue);
            fill_if_absent(&mut self.current_period.operating_profit, current.operating_profit);
            fill_if_absent(&mut self.current_period.net_profit, current.net_profit);
        }

        if let Some(annual) = &fallback.annual_data {
            fill_if_absent(&mut self.annual_period.figures.revenue, annual.revenue);
            fill_if_absent(
                &mut self.annual_period.figures.operating_profit,
                annual.operating_profit,
            );
            fill_if_absent(&mut self.annual_period.figures.net_profit, annual.net_profit);
        }

        if let Some(name) = &fallback.company_name {
            self.company_name = name.clone();
        }
    }
}

fn fill_if_absent(slot: &mut Option<f64>, candidate: Option<f64>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

/// The JSON object the fallback model is asked to produce.
///
/// Numeric fields may come back as numbers or nulls; every field is
/// optional so a partial response still merges.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct LlmFinancials {
    #[schemars(description = "The company name as stated in the document")]
    pub company_name: Option<String>,

    #[schemars(description = "Figures for the latest reported quarter")]
    pub current_quarter: Option<LlmPeriodFigures>,

    #[schemars(description = "Figures for the 'year ended' column")]
    pub annual_data: Option<LlmAnnualFigures>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct LlmPeriodFigures {
    pub revenue: Option<f64>,
    pub operating_profit: Option<f64>,
    pub net_profit: Option<f64>,
    #[schemars(description = "Financial unit such as Crores, Lakhs, Millions or Billions")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct LlmAnnualFigures {
    #[schemars(description = "The fiscal year the annual column covers, as YYYY")]
    pub year: Option<String>,
    pub revenue: Option<f64>,
    pub operating_profit: Option<f64>,
    pub net_profit: Option<f64>,
    pub unit: Option<String>,
}

impl LlmFinancials {
    /// Parses the first brace-delimited JSON object found in a model
    /// response. Models wrap their JSON in prose or code fences often
    /// enough that a bare parse is not an option.
    pub fn from_model_response(raw: &str) -> Result<Self> {
        let start = raw.find('{');
        let end = raw.rfind('}');

        let object = match (start, end) {
            (Some(start), Some(end)) if start < end => &raw[start..=end],
            _ => {
                return Err(ExtractionError::UnparseableModelResponse(
                    "no brace-delimited object in response".to_string(),
                ))
            }
        };

        serde_json::from_str(object)
            .map_err(|e| ExtractionError::UnparseableModelResponse(e.to_string()))
    }

    pub fn response_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(LlmFinancials)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape_is_pascal_case() {
        let financials = ExtractedFinancials {
            company_name: "ACME Ltd".to_string(),
            current_period: PeriodFigures {
                revenue: Some(1234.5),
                operating_profit: None,
                net_profit: Some(-10.0),
                unit: "Lakhs".to_string(),
            },
            annual_period: AnnualFigures {
                year: "2024".to_string(),
                figures: PeriodFigures {
                    revenue: Some(5678.9),
                    unit: "Lakhs".to_string(),
                    ..Default::default()
                },
            },
        };

        let json = serde_json::to_value(&financials).unwrap();
        assert_eq!(json["CompanyName"], "ACME Ltd");
        assert_eq!(json["CurrentPeriod"]["Revenue"], 1234.5);
        assert_eq!(json["AnnualPeriod"]["Year"], "2024");
        assert_eq!(json["AnnualPeriod"]["Revenue"], 5678.9);
        assert_eq!(json["AnnualPeriod"]["Unit"], "Lakhs");
    }

    #[test]
    fn test_merge_local_wins_where_set() {
        let mut financials = ExtractedFinancials::default();
        financials.current_period.revenue = Some(500.0);

        let fallback = LlmFinancials {
            current_quarter: Some(LlmPeriodFigures {
                revenue: Some(999.0),
                operating_profit: Some(50.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        financials.merge_fallback(&fallback);

        assert_eq!(financials.current_period.revenue, Some(500.0));
        assert_eq!(financials.current_period.operating_profit, Some(50.0));
        assert_eq!(financials.current_period.net_profit, None);
    }

    #[test]
    fn test_merge_company_name_overwrite() {
        let mut financials = ExtractedFinancials {
            company_name: "Unknown Company".to_string(),
            ..Default::default()
        };

        financials.merge_fallback(&LlmFinancials::default());
        assert_eq!(financials.company_name, "Unknown Company");

        financials.merge_fallback(&LlmFinancials {
            company_name: Some("ACME Ltd".to_string()),
            ..Default::default()
        });
        assert_eq!(financials.company_name, "ACME Ltd");
    }

    #[test]
    fn test_from_model_response_with_surrounding_prose() {
        let raw = "Here is the data you asked for:\n```json\n\
            {\"CompanyName\": \"ACME Ltd\", \"CurrentQuarter\": {\"Revenue\": 12.5, \"NetProfit\": null}}\
            \n```\nLet me know if you need more.";

        let parsed = LlmFinancials::from_model_response(raw).unwrap();
        assert_eq!(parsed.company_name.as_deref(), Some("ACME Ltd"));
        let current = parsed.current_quarter.unwrap();
        assert_eq!(current.revenue, Some(12.5));
        assert_eq!(current.net_profit, None);
    }

    #[test]
    fn test_from_model_response_without_json() {
        let err = LlmFinancials::from_model_response("I could not find any figures.").unwrap_err();
        assert!(matches!(err, ExtractionError::UnparseableModelResponse(_)));
    }

    #[test]
    fn test_profit_verdict() {
        let mut financials = ExtractedFinancials::default();
        assert_eq!(financials.profit_verdict(), ProfitVerdict::Unknown);

        financials.current_period.net_profit = Some(0.0);
        assert_eq!(financials.profit_verdict(), ProfitVerdict::Profit);

        financials.current_period.net_profit = Some(-3.2);
        assert_eq!(financials.profit_verdict(), ProfitVerdict::Loss);
    }

    #[test]
    fn test_is_empty() {
        let mut financials = ExtractedFinancials::default();
        assert!(financials.is_empty());

        financials.annual_period.figures.net_profit = Some(1.0);
        assert!(!financials.is_empty());
    }
}
