use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SignerError};
use crate::signing::Signature;

/// 20-byte Ethereum account or contract address
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    /// Build an address from raw bytes, which must be exactly 20 long
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; 20] = bytes.try_into().map_err(|_| {
            SignerError::InvalidField(format!(
                "address must be 20 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Address(raw))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        let bytes = hex::decode(cleaned)
            .map_err(|e| SignerError::InvalidField(format!("address '{}' is not hex: {}", s, e)))?;
        Address::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Token details as returned by the exchange's asset endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub contract: Address,
    /// Number of decimals (10^factor atomic units per whole token)
    pub factor: u8,
}

/// Order side: Buy (token bought with ETH) or Sell (token sold for ETH)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, OrderSide::Buy)
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "buy"),
            OrderSide::Sell => write!(f, "sell"),
        }
    }
}

fn side_from_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<OrderSide, D::Error> {
    Ok(OrderSide::from_is_buy(bool::deserialize(deserializer)?))
}

fn side_to_flag<S: Serializer>(side: &OrderSide, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_bool(side.is_buy())
}

fn shape_error(e: serde_json::Error) -> SignerError {
    SignerError::UnsupportedOrderShape(e.to_string())
}

/// What the caller wants to trade. Amounts are whole-unit decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIntent {
    #[serde(rename = "isBuyOrder", deserialize_with = "side_from_flag", serialize_with = "side_to_flag")]
    pub side: OrderSide,
    /// Amount of token, e.g. "2.5"
    #[serde(rename = "amountToken")]
    pub amount_token: String,
    /// Amount of ETH, e.g. "0.1"
    #[serde(rename = "amountETH")]
    pub amount_eth: String,
    pub token: TokenDescriptor,
    pub nonce: u64,
    /// Owner address, where funds go back to
    pub address: Address,
}

impl OrderIntent {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(shape_error)
    }
}

/// Cancellation of a previously placed order.
///
/// `order.nonce` is the fresh nonce for the cancellation itself, while
/// `nonce_of_order` is the nonce the original order was signed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelIntent {
    #[serde(flatten)]
    pub order: OrderIntent,
    #[serde(rename = "nonceOfOrder")]
    pub nonce_of_order: u64,
}

impl CancelIntent {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(shape_error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub token: TokenDescriptor,
    /// Whole-unit decimal string
    pub amount: String,
    pub nonce: u64,
    pub address: Address,
}

impl WithdrawalRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(shape_error)
    }
}

/// Signed order body for the exchange's order endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOrder {
    #[serde(rename = "tokenBuy")]
    pub token_buy: Address,
    #[serde(rename = "amountBuy")]
    pub amount_buy: String,
    #[serde(rename = "tokenSell")]
    pub token_sell: Address,
    #[serde(rename = "amountSell")]
    pub amount_sell: String,
    pub address: Address,
    pub nonce: u64,
    pub expires: u64,
    #[serde(flatten)]
    pub signature: Signature,
}

/// Signed body for the exchange's cancel endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCancel {
    #[serde(rename = "orderHash")]
    pub order_hash: String,
    pub address: Address,
    pub nonce: u64,
    #[serde(flatten)]
    pub signature: Signature,
}

/// Signed body for the exchange's withdraw endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedWithdrawal {
    pub address: Address,
    pub amount: String,
    pub token: Address,
    pub nonce: u64,
    #[serde(flatten)]
    pub signature: Signature,
}
