//!
//! The currency table and converter.  Every rate is expressed relative to one US dollar, so a
//! conversion goes through USD: `amount / from.rate * to.rate`.
//!

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::{*};
use super::replace_text;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// The 3-letter ISO code, stored in upper case
    pub code : FixedText<4>,
    pub name : FixedText<50>,
    pub rate_vs_usd : f64,
}

impl Currency {
    /// Fails with [StoreError::InvalidInput] unless `code` is 3 letters
    pub fn new(code : &str, name : &str, rate_vs_usd : f64) -> Result<Self, StoreError> {
        Ok(Self {
            code : code_key(code)?,
            name : FixedText::new(name),
            rate_vs_usd,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct CurrencyChanges {
    pub name : Option<String>,
    pub rate_vs_usd : Option<f64>,
}

impl Record for Currency {
    type KeyT = FixedText<4>;
    type ChangesT = CurrencyChanges;
    const IDENTITY : IdentityPolicy = IdentityPolicy::CallerSupplied;

    fn key(&self) -> FixedText<4> {
        self.code.clone()
    }
    fn apply(&mut self, changes : CurrencyChanges) {
        replace_text(&mut self.name, changes.name);
        if let Some(rate) = changes.rate_vs_usd {
            self.rate_vs_usd = rate;
        }
    }
    fn validate(&self) -> Result<(), String> {
        let code = self.code.as_str();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("currency code '{}' must be 3 letters", code));
        }
        if !self.rate_vs_usd.is_finite() || self.rate_vs_usd <= 0.0 {
            return Err(format!("rate for {} must be a positive number", code));
        }
        Ok(())
    }
}

pub struct CurrencyConfig();
impl TableConfig for CurrencyConfig {
    type RecordT = Currency;
    type CoderT = BincodeCoder;
    const CAPACITY : usize = 32;
    const FILE_NAME : &'static str = "currencies.dat";
}

pub type Currencies = Table<CurrencyConfig>;

/// Builds the lookup key for a code typed by the user
///
/// An overlong code is an error.  It is never cut down to fit.
pub fn code_key(code : &str) -> Result<FixedText<4>, StoreError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(StoreError::InvalidInput(format!("currency code '{}' must be 3 letters", code)));
    }
    Ok(FixedText::new(&code.to_ascii_uppercase()))
}

fn known(code : &str, name : &str, rate_vs_usd : f64) -> Currency {
    Currency{ code : FixedText::new(code), name : FixedText::new(name), rate_vs_usd }
}

/// The rates the converter starts with
pub fn default_currencies() -> Vec<Currency> {
    vec![
        known("USD", "US Dollar", 1.0),
        known("EUR", "Euro", 0.92),
        known("GBP", "British Pound", 0.79),
        known("JPY", "Japanese Yen", 157.45),
        known("INR", "Indian Rupee", 83.54),
        known("CAD", "Canadian Dollar", 1.37),
    ]
}

/// Creates a table holding the [default_currencies]
pub fn new_currencies() -> Result<Currencies, StoreError> {
    let mut table = Currencies::new()?;
    for currency in default_currencies() {
        table.insert(currency)?;
    }
    Ok(table)
}

/// Loads the currency table from `dir`, falling back to the defaults if nothing has been saved
pub fn open_currencies(dir : impl AsRef<Path>) -> Result<(Currencies, usize), StoreError> {
    let (table, loaded) = Currencies::open(dir)?;
    if loaded == 0 {
        return Ok((new_currencies()?, 0));
    }
    Ok((table, loaded))
}

/// The result of a conversion
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub amount : f64,
    pub from : String,
    pub converted : f64,
    pub to : String,
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f : &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {} = {:.2} {}", self.amount, self.from, self.converted, self.to)
    }
}

/// Converts `amount` from one currency to another
pub fn convert(table : &Currencies, amount : f64, from : &str, to : &str) -> Result<Conversion, StoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(StoreError::InvalidInput("amount must be a non-negative number".to_string()));
    }
    let from_key = code_key(from)?;
    let to_key = code_key(to)?;
    let from = table.get(&from_key).ok_or_else(|| StoreError::NotFound(from_key.to_string()))?;
    let to = table.get(&to_key).ok_or_else(|| StoreError::NotFound(to_key.to_string()))?;

    let amount_in_usd = amount / from.rate_vs_usd;
    Ok(Conversion {
        amount,
        from : from.code.to_string(),
        converted : amount_in_usd * to.rate_vs_usd,
        to : to.code.to_string(),
    })
}
