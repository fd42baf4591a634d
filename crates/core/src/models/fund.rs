use serde::{Deserialize, Serialize};

/// The role a fund plays inside a plan's three-way split.
/// Determines which leg of the allocation policy applies to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundCategory {
    /// Equity-style growth leg — share scales with the redemption rate
    Growth,
    /// Bond-style income leg — absorbs whatever growth and hedge leave over
    Income,
    /// Hedge leg (precious metals etc.) — fixed 10% share
    Hedge,
}

impl std::fmt::Display for FundCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FundCategory::Growth => write!(f, "Growth"),
            FundCategory::Income => write!(f, "Income"),
            FundCategory::Hedge => write!(f, "Hedge"),
        }
    }
}

/// One fund position inside a plan.
///
/// Each plan owns its own copies — two plans holding the same underlying
/// fund id still carry independent `FundHolding` values, because `weight`
/// is per-plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundHolding {
    /// Catalog identifier (e.g., "1")
    pub id: String,

    /// Human-readable fund name
    pub name: String,

    /// Role in the plan's allocation split
    pub category: FundCategory,

    /// Share of the plan's principal nominally allocated here, percent [0, 100].
    /// Across one plan's three holdings the weights sum to 100.
    pub weight: u32,

    /// Latest known net asset value per unit (display only, always > 0)
    pub nav: f64,

    /// Latest daily change, percent
    pub change_percent: f64,
}

impl FundHolding {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: FundCategory,
        nav: f64,
        change_percent: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            weight: 0,
            nav,
            change_percent,
        }
    }

    /// Same holding with a different weight (used when deriving allocations).
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }
}

/// A preset combination of three funds (growth, income, hedge — in that
/// order) that a subscriber picks as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundGroup {
    /// Catalog identifier (e.g., "g1")
    pub id: String,

    /// Display name
    pub name: String,

    /// One-line pitch shown in the subscription flow
    pub description: String,

    /// Fund ids, ordered growth / income / hedge
    pub fund_ids: [String; 3],
}

/// The built-in fund catalog. Static demo data — there is no live NAV feed.
#[must_use]
pub fn available_funds() -> Vec<FundHolding> {
    vec![
        FundHolding::new("1", "Global Equity Index Fund", FundCategory::Growth, 10.5, 1.2),
        FundHolding::new("2", "Total Return Bond Fund", FundCategory::Income, 12.1, -0.1),
        FundHolding::new("3", "Physical Precious Metals Fund", FundCategory::Hedge, 8.8, 0.5),
        FundHolding::new("4", "Emerging Markets Growth Fund", FundCategory::Growth, 15.3, -0.8),
        FundHolding::new("5", "Investment Grade Corporate Bond Fund", FundCategory::Income, 11.2, 0.3),
        FundHolding::new("6", "Asia-Pacific Equity Leaders Fund", FundCategory::Growth, 9.5, -1.5),
    ]
}

/// The five preset fund groups offered by the subscription flow.
/// Every group carries one growth, one income, and one hedge fund.
#[must_use]
pub fn fund_groups() -> Vec<FundGroup> {
    let g = |id: &str, name: &str, description: &str, funds: [&str; 3]| FundGroup {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        fund_ids: funds.map(str::to_string),
    };
    vec![
        g("g1", "Core Income Portfolio", "Steady market returns, suited to first-time investors", ["1", "2", "3"]),
        g("g2", "Growth Plus Portfolio", "Heavier emerging-market tilt for long-term growth", ["4", "5", "3"]),
        g("g3", "Asia-Pacific Portfolio", "Asian economic momentum paired with stable bonds", ["6", "2", "3"]),
        g("g4", "Defense First Portfolio", "High-grade holdings, strong volatility resistance", ["1", "5", "3"]),
        g("g5", "Balanced Yield Portfolio", "Diversified allocation balancing risk and reward", ["4", "2", "3"]),
    ]
}

/// Look up a fund group by id in the built-in catalog.
#[must_use]
pub fn find_group(group_id: &str) -> Option<FundGroup> {
    fund_groups().into_iter().find(|g| g.id == group_id)
}
