use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative reading of an expected portfolio return, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnOutlook {
    /// Below -5%
    StrongLoss,
    /// -5% to -1%
    ModerateLoss,
    /// -1% to 0%
    SmallDecrease,
    /// 0% to 1%
    Stable,
    /// 1% to 5%
    ModerateGrowth,
    /// 5% and above
    StrongGrowth,
}

impl ReturnOutlook {
    pub fn from_yield_pct(expected_yield_pct: f64) -> Self {
        match expected_yield_pct {
            r if r < -5.0 => ReturnOutlook::StrongLoss,
            r if r < -1.0 => ReturnOutlook::ModerateLoss,
            r if r < 0.0 => ReturnOutlook::SmallDecrease,
            r if r < 1.0 => ReturnOutlook::Stable,
            r if r < 5.0 => ReturnOutlook::ModerateGrowth,
            _ => ReturnOutlook::StrongGrowth,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ReturnOutlook::StrongLoss => {
                "Strong expected loss: possible significant decrease in portfolio value."
            }
            ReturnOutlook::ModerateLoss => {
                "Moderate expected loss: probable decrease in portfolio value."
            }
            ReturnOutlook::SmallDecrease => "Small decrease: within normal volatility.",
            ReturnOutlook::Stable => {
                "Stability: portfolio, probably, will maintain the current value."
            }
            ReturnOutlook::ModerateGrowth => "Moderate growth: positive dynamics.",
            ReturnOutlook::StrongGrowth => "Strong expected growth: possible high yield.",
        }
    }
}

impl fmt::Display for ReturnOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlook_band_edges() {
        assert_eq!(ReturnOutlook::from_yield_pct(-7.5), ReturnOutlook::StrongLoss);
        assert_eq!(ReturnOutlook::from_yield_pct(-5.0), ReturnOutlook::ModerateLoss);
        assert_eq!(ReturnOutlook::from_yield_pct(-1.0), ReturnOutlook::SmallDecrease);
        assert_eq!(ReturnOutlook::from_yield_pct(0.0), ReturnOutlook::Stable);
        assert_eq!(ReturnOutlook::from_yield_pct(1.0), ReturnOutlook::ModerateGrowth);
        assert_eq!(ReturnOutlook::from_yield_pct(5.0), ReturnOutlook::StrongGrowth);
    }
}
