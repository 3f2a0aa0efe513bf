use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub income: Decimal,
    pub goal: String,
    pub crypto_tracking: bool,
    pub sustainability_tracking: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            income: Decimal::from(4000),
            goal: String::new(),
            crypto_tracking: false,
            sustainability_tracking: false,
        }
    }
}
