use std::{collections::HashMap, fmt, str::FromStr};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("invalid discount entry \"{0}\", expected CODE:PERCENT")]
    InvalidEntry(String),
    #[error("discount for {code} must be between 0 and 100, got {percent}")]
    InvalidPercent { code: String, percent: u32 },
}

/// Percent-off discount codes. Codes match case-insensitively and ignore
/// surrounding whitespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiscountTable {
    codes: HashMap<String, u8>,
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

impl DiscountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: &str, percent: u8) -> Self {
        self.codes.insert(normalize(code), percent.min(100));
        self
    }

    pub fn lookup(&self, code: &str) -> Option<u8> {
        self.codes.get(&normalize(code)).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromStr for DiscountTable {
    type Err = PricingError;

    /// Parses `CODE:PERCENT` entries separated by commas, e.g. `LAUNCH:20,FRIEND:10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .try_fold(DiscountTable::new(), |table, entry| {
                let (code, percent) = entry
                    .split_once(':')
                    .filter(|(code, _)| !code.trim().is_empty())
                    .ok_or_else(|| PricingError::InvalidEntry(entry.to_owned()))?;
                let percent: u32 = percent
                    .trim()
                    .parse()
                    .map_err(|_| PricingError::InvalidEntry(entry.to_owned()))?;
                if percent > 100 {
                    return Err(PricingError::InvalidPercent {
                        code: normalize(code),
                        percent,
                    });
                }
                Ok(table.with_code(code, percent as u8))
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pricing {
    pub base_cents: u32,
    pub currency: String,
    pub discounts: DiscountTable,
}

impl Pricing {
    pub fn new(base_cents: u32, currency: impl Into<String>, discounts: DiscountTable) -> Self {
        Self {
            base_cents,
            currency: currency.into(),
            discounts,
        }
    }

    /// Price for a single purchase, with `code` applied if it is known.
    pub fn quote(&self, code: Option<&str>) -> Quote {
        let percent = code.and_then(|c| self.discounts.lookup(c)).unwrap_or(0);
        let off = (self.base_cents as u64 * percent as u64 + 50) / 100;
        Quote {
            amount_cents: self.base_cents - off as u32,
            currency: self.currency.clone(),
            discount_percent: percent,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub amount_cents: u32,
    pub currency: String,
    pub discount_percent: u8,
}

impl Quote {
    pub fn discount_applied(&self) -> bool {
        self.discount_percent > 0
    }
}

/// Decimal amount as payment providers expect it, e.g. `19.99`.
pub struct Amount(pub u32);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing() -> Pricing {
        Pricing::new(
            1999,
            "USD",
            DiscountTable::new()
                .with_code("launch", 20)
                .with_code("FREE", 100),
        )
    }

    #[test]
    fn quote_without_code_is_base_price() {
        let quote = pricing().quote(None);
        assert_eq!(quote.amount_cents, 1999);
        assert!(!quote.discount_applied());
    }

    #[test]
    fn quote_matches_codes_loosely() {
        let pricing = pricing();
        for code in ["LAUNCH", "launch", "  Launch "] {
            let quote = pricing.quote(Some(code));
            assert_eq!(quote.amount_cents, 1599, "{}", code);
            assert_eq!(quote.discount_percent, 20);
        }
        assert_eq!(pricing.quote(Some("FREE")).amount_cents, 0);
    }

    #[test]
    fn unknown_code_keeps_base_price() {
        let quote = pricing().quote(Some("LAUNCH2"));
        assert_eq!(quote.amount_cents, 1999);
        assert!(!quote.discount_applied());
    }

    #[test]
    fn parses_discount_codes() {
        let table: DiscountTable = "LAUNCH:20, friend:10,".parse().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("friend"), Some(10));
        assert_eq!(table.lookup("LAUNCH"), Some(20));
        assert!("".parse::<DiscountTable>().unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_discount_codes() {
        assert_eq!(
            "LAUNCH".parse::<DiscountTable>(),
            Err(PricingError::InvalidEntry("LAUNCH".to_owned()))
        );
        assert_eq!(
            ":10".parse::<DiscountTable>(),
            Err(PricingError::InvalidEntry(":10".to_owned()))
        );
        assert_eq!(
            "BIG:150".parse::<DiscountTable>(),
            Err(PricingError::InvalidPercent {
                code: "BIG".to_owned(),
                percent: 150
            })
        );
    }

    #[test]
    fn amount_display() {
        assert_eq!(Amount(1999).to_string(), "19.99");
        assert_eq!(Amount(500).to_string(), "5.00");
        assert_eq!(Amount(7).to_string(), "0.07");
    }
}
