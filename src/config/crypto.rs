//! Configuration for two-asset crypto-invariant pools (Curve V2 style).

use serde::{Deserialize, Serialize};

use crate::domain::{AssetConfig, CurveParams, PoolState};
use crate::error::{AmmError, Result};
use crate::math::N_COINS;

/// Everything needed to build a [`CryptoPool`](crate::pools::CryptoPool):
/// curve parameters, per-asset static data and the tracker's snapshot.
///
/// # Snapshot format
///
/// Decoded with `serde_json`. Words wider than `u64` are decimal strings;
/// timestamps and `ma_half_time` are plain integers.
///
/// ```json
/// {
///   "curve": { "a": "4000000", "gamma": "1450000000000000" },
///   "assets": [
///     { "precision_multiplier": "1",
///       "swap_fee": { "min_fee": "800", "max_fee": "1000", "fee_gamma": "230000000000000" } },
///     { "precision_multiplier": "1000000000",
///       "swap_fee": { "min_fee": "800", "max_fee": "1000", "fee_gamma": "230000000000000" } }
///   ],
///   "state": { "balances": ["8466391136317679557", "193408158540"], "d": "...", ... }
/// }
/// ```
///
/// # Validation
///
/// - `A`, `gamma` non-zero; any ramp has a non-empty window.
/// - Precision multipliers non-zero; `min_fee <= max_fee <= 100_000`.
/// - `lp_supply`, `ma_half_time`, `price_scale` and `price_oracle` non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoPoolConfig {
    curve: CurveParams,
    assets: [AssetConfig; N_COINS],
    state: PoolState,
}

impl CryptoPoolConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] if any field fails validation.
    pub fn new(curve: CurveParams, assets: [AssetConfig; N_COINS], state: PoolState) -> Result<Self> {
        let config = Self {
            curve,
            assets,
            state,
        };
        config.validate()?;
        Ok(config)
    }

    /// Decodes and validates a JSON snapshot.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] if the JSON is malformed, a field is
    /// missing or mistyped, or validation fails.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            tracing::debug!(%err, "snapshot decoding failed");
            AmmError::InvalidSnapshot("malformed or incomplete snapshot")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Encodes the configuration as JSON.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|_| AmmError::InvalidSnapshot("snapshot encoding failed"))
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidSnapshot`] describing the first bad field.
    pub fn validate(&self) -> Result<()> {
        self.curve.validate()?;
        for asset in &self.assets {
            asset.validate()?;
        }
        self.state.validate()
    }

    /// Returns the curve parameters.
    #[must_use]
    pub const fn curve(&self) -> &CurveParams {
        &self.curve
    }

    /// Returns the per-asset configuration.
    #[must_use]
    pub const fn assets(&self) -> &[AssetConfig; N_COINS] {
        &self.assets
    }

    /// Returns the initial snapshot.
    #[must_use]
    pub const fn state(&self) -> &PoolState {
        &self.state
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const REFERENCE_JSON: &str = r#"{
        "curve": { "a": "4000000", "gamma": "1450000000000000" },
        "assets": [
            { "precision_multiplier": "1",
              "swap_fee": { "min_fee": "800", "max_fee": "1000", "fee_gamma": "230000000000000" } },
            { "precision_multiplier": "1000000000",
              "swap_fee": { "min_fee": "800", "max_fee": "1000", "fee_gamma": "230000000000000" } }
        ],
        "state": {
            "balances": ["8466391136317679557", "193408158540"],
            "d": "18973521177677971086",
            "price_scale": "54451990779514461",
            "last_prices": "54451990779514461",
            "price_oracle": "54451990779514461",
            "lp_supply": "37758794556622160853",
            "xcp_profit": "1100000000000000000",
            "virtual_price": "1076695600534779561",
            "rebalance": {
                "allowed_extra_profit": "10000000000000",
                "adjustment_step": "1000000000000000",
                "ma_half_time": 600
            },
            "not_adjusted": false,
            "last_prices_timestamp": 1709616000,
            "future_time": 1709616182
        }
    }"#;

    #[test]
    fn decodes_reference_snapshot() {
        let Ok(cfg) = CryptoPoolConfig::from_json(REFERENCE_JSON) else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.state().balances[1].to_string(), "193408158540");
        assert_eq!(cfg.curve().a.to_string(), "4000000");
        assert_eq!(cfg.assets()[1].precision_multiplier.to_string(), "1000000000");
        assert_eq!(cfg.state().future_time, 1_709_616_182);
    }

    #[test]
    fn json_round_trip() {
        let Ok(cfg) = CryptoPoolConfig::from_json(REFERENCE_JSON) else {
            panic!("expected Ok");
        };
        let Ok(json) = cfg.to_json() else {
            panic!("expected Ok");
        };
        assert_eq!(CryptoPoolConfig::from_json(&json), Ok(cfg));
    }

    #[test]
    fn malformed_json() {
        let Err(AmmError::InvalidSnapshot(_)) = CryptoPoolConfig::from_json("{ not json") else {
            panic!("expected InvalidSnapshot");
        };
    }

    #[test]
    fn missing_field() {
        let json = REFERENCE_JSON.replace(r#""d": "18973521177677971086","#, "");
        let Err(AmmError::InvalidSnapshot(_)) = CryptoPoolConfig::from_json(&json) else {
            panic!("expected InvalidSnapshot");
        };
    }

    #[test]
    fn hex_word_rejected() {
        let json = REFERENCE_JSON.replace(r#""d": "18973521177677971086""#, r#""d": "0x10""#);
        assert!(CryptoPoolConfig::from_json(&json).is_err());
    }

    #[test]
    fn zero_supply_rejected() {
        let json = REFERENCE_JSON.replace("37758794556622160853", "0");
        assert_eq!(
            CryptoPoolConfig::from_json(&json),
            Err(AmmError::InvalidSnapshot("lp_supply must be greater than zero"))
        );
    }

    #[test]
    fn inverted_fees_rejected() {
        let json = REFERENCE_JSON.replacen(r#""min_fee": "800""#, r#""min_fee": "5000""#, 1);
        assert_eq!(
            CryptoPoolConfig::from_json(&json),
            Err(AmmError::InvalidSnapshot("min_fee exceeds max_fee"))
        );
    }
}
