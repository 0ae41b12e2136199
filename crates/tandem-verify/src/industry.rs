//! Metric hints per industry, listed in the extraction prompt.

/// A metric the oracle should look for, with the phrasings reports use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricHint {
    pub key: &'static str,
    pub synonyms: &'static [&'static str],
    pub unit: Option<&'static str>,
}

const fn hint(
    key: &'static str,
    synonyms: &'static [&'static str],
    unit: Option<&'static str>,
) -> MetricHint {
    MetricHint { key, synonyms, unit }
}

const UNIVERSAL: &[MetricHint] = &[
    hint("total_revenue", &["total sales", "net sales", "turnover", "revenue"], None),
    hint("operating_costs", &["operating expenses", "cost of goods sold", "cogs"], None),
    hint("net_income", &["profit for the year", "profit after tax", "earnings"], None),
    hint("employee_count", &["number of employees", "headcount", "ftes"], Some("count")),
    hint("total_assets", &["total assets"], None),
    hint("cash_flow_from_operations", &["operating cash flow"], None),
];

const AIRLINES: &[MetricHint] = &[
    hint("fleet_size", &["number of aircraft", "fleet size", "aircraft fleet"], Some("aircraft")),
    hint(
        "passengers_carried",
        &["passengers carried", "passenger numbers", "passenger traffic"],
        Some("millions"),
    ),
    hint(
        "load_factor",
        &["load factor", "passenger load factor", "seat load factor"],
        Some("percentage"),
    ),
    hint("ancillary_revenue", &["ancillary revenue", "non-ticket revenue"], Some("millions_eur")),
];

const BANKING: &[MetricHint] = &[
    hint("net_interest_margin", &["net interest margin", "nim"], Some("percentage")),
    hint("number_of_branches", &["number of branches", "branch network", "agencies"], Some("count")),
    hint("deposits", &["customer deposits", "total deposits", "deposit base"], Some("millions_eur")),
    hint("loan_portfolio", &["loan portfolio", "total loans", "advances"], Some("millions_eur")),
];

const TECHNOLOGY: &[MetricHint] = &[
    hint("annual_recurring_revenue", &["annual recurring revenue", "arr"], Some("millions_eur")),
    hint("active_users", &["active users", "monthly active users", "user base"], Some("millions")),
    hint("churn_rate", &["churn rate", "customer churn", "attrition"], Some("percentage")),
];

/// Sector-specific hints for a label, empty for unknown labels.
#[must_use]
pub fn sector_hints(industry: &str) -> &'static [MetricHint] {
    match industry.trim().to_ascii_lowercase().as_str() {
        "airlines" => AIRLINES,
        "banking" => BANKING,
        "technology" => TECHNOLOGY,
        _ => &[],
    }
}

/// Sector hints followed by the metrics every company reports.
#[must_use]
pub fn metric_hints(industry: &str) -> Vec<&'static MetricHint> {
    sector_hints(industry).iter().chain(UNIVERSAL).collect()
}
