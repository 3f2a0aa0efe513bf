use rand::Rng;
use rust_decimal::Decimal;

/// The fixed set of spending buckets. Used both as the key set of the
/// budget table and as the fallback pool of the categorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Housing,
    Food,
    Transportation,
    Entertainment,
    Savings,
    Subscriptions,
    Shopping,
    Health,
    CryptoInvestment,
    SustainableSpending,
    Other,
    Travel,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Self::Housing,
        Self::Food,
        Self::Transportation,
        Self::Entertainment,
        Self::Savings,
        Self::Subscriptions,
        Self::Shopping,
        Self::Health,
        Self::CryptoInvestment,
        Self::SustainableSpending,
        Self::Other,
        Self::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Savings => "Savings",
            Self::Subscriptions => "Subscriptions",
            Self::Shopping => "Shopping",
            Self::Health => "Health",
            Self::CryptoInvestment => "Crypto Investment",
            Self::SustainableSpending => "Sustainable Spending",
            Self::Other => "Other",
            Self::Travel => "Travel",
        }
    }

    /// Case-insensitive lookup by display name. `-` and `_` stand in for spaces.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().to_lowercase() == wanted)
    }

    /// Monthly limit a fresh budget table starts with.
    pub fn default_limit(&self) -> Decimal {
        let whole = match self {
            Self::Housing => 1000,
            Self::Food => 400,
            Self::Transportation => 200,
            Self::Entertainment => 150,
            Self::Savings => 300,
            Self::Subscriptions => 80,
            Self::Shopping => 120,
            Self::Health => 90,
            Self::CryptoInvestment => 150,
            Self::SustainableSpending => 60,
            Self::Other => 100,
            Self::Travel => 120,
        };
        Decimal::from(whole)
    }

    /// Uniform pick over all categories.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
