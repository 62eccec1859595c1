use bigdecimal::BigDecimal;
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Store Configuration
// ============================================================================
//
// Defaults reproduce the restaurant's published behaviour. Every value can be
// overridden from the environment; unparsable overrides are logged and
// ignored so a typo never stops a session from starting.
//
// ============================================================================

pub const ENV_ETA_MIN: &str = "ORDER_STORE_ETA_MIN";
pub const ENV_ETA_MAX: &str = "ORDER_STORE_ETA_MAX";
pub const ENV_TRACKING_INTERVAL_MS: &str = "ORDER_STORE_TRACKING_INTERVAL_MS";
pub const ENV_TAX_RATE: &str = "ORDER_STORE_TAX_RATE";
pub const ENV_DELIVERY_FEE: &str = "ORDER_STORE_DELIVERY_FEE";
pub const ENV_CURRENCY: &str = "ORDER_STORE_CURRENCY";
pub const ENV_MENU_PATH: &str = "ORDER_STORE_MENU_PATH";

#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Shortest ETA handed out, in minutes
    pub eta_min_minutes: u32,
    /// Longest ETA handed out, in minutes
    pub eta_max_minutes: u32,
    /// Delay between tracking steps
    pub tracking_interval: Duration,
    /// Fraction of the subtotal charged as tax
    pub tax_rate: BigDecimal,
    /// Flat fee for delivery orders
    pub delivery_fee: BigDecimal,
    pub currency_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            eta_min_minutes: 15,
            eta_max_minutes: 45,
            tracking_interval: Duration::from_secs(5),
            tax_rate: BigDecimal::new(5.into(), 2),
            delivery_fee: BigDecimal::from(40),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults with a fast tracking timeline, for demos and tests
    pub fn demo() -> Self {
        Self {
            tracking_interval: Duration::from_millis(250),
            ..Self::default()
        }
    }

    /// Defaults overridden by `ORDER_STORE_*` variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var::<u32, _>(&lookup, ENV_ETA_MIN) {
            self.eta_min_minutes = v;
        }
        if let Some(v) = parse_var::<u32, _>(&lookup, ENV_ETA_MAX) {
            self.eta_max_minutes = v;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, ENV_TRACKING_INTERVAL_MS) {
            self.tracking_interval = Duration::from_millis(ms);
        }
        if let Some(v) = parse_var::<BigDecimal, _>(&lookup, ENV_TAX_RATE) {
            self.tax_rate = v;
        }
        if let Some(v) = parse_var::<BigDecimal, _>(&lookup, ENV_DELIVERY_FEE) {
            self.delivery_fee = v;
        }
        if let Some(symbol) = lookup(ENV_CURRENCY) {
            self.currency_symbol = symbol;
        }

        if self.eta_min_minutes > self.eta_max_minutes {
            tracing::warn!(
                min = self.eta_min_minutes,
                max = self.eta_max_minutes,
                "ETA range is inverted, swapping bounds"
            );
            std::mem::swap(&mut self.eta_min_minutes, &mut self.eta_max_minutes);
        }

        self
    }

    /// Bounds in ascending order, even when the fields were set inverted
    pub fn eta_range(&self) -> RangeInclusive<u32> {
        let low = self.eta_min_minutes.min(self.eta_max_minutes);
        let high = self.eta_min_minutes.max(self.eta_max_minutes);
        low..=high
    }

    /// Amount with the currency symbol and two decimals, e.g. `₹680.50`
    pub fn format_price(&self, amount: &BigDecimal) -> String {
        format!("{}{}", self.currency_symbol, amount.round(2).with_scale(2))
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = key, value = %raw, "Ignoring unparsable configuration value");
            None
        }
    }
}
