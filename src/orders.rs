//! Signed payload assembly for placing orders, cancelling them and withdrawing funds.
//!
//! All three operations are pure: they convert amounts, build the field tuple,
//! hash, wrap, sign, and return the request body. Nothing is sent anywhere.

use tracing::{debug, warn};

use crate::config::ExchangeConfig;
use crate::error::{Result, SignerError};
use crate::signing::{content_hash, hash_to_hex, sign_content_hash, Keypair, PackedValue};
use crate::types::{
    Address, CancelIntent, OrderIntent, OrderSide, SignedCancel, SignedOrder, SignedWithdrawal,
    WithdrawalRequest,
};
use crate::units::to_atomic_units;

/// Order fields after unit conversion and buy/sell orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFields {
    pub token_buy: Address,
    pub amount_buy: String,
    pub token_sell: Address,
    pub amount_sell: String,
    pub nonce: u64,
    pub owner: Address,
}

impl OrderFields {
    /// Convert the intent's amounts and orient them against ETH
    ///
    /// - Buy: token is bought, ETH is sold
    /// - Sell: token is sold, ETH is bought
    pub fn from_intent(config: &ExchangeConfig, intent: &OrderIntent, nonce: u64) -> Result<Self> {
        if intent.token.contract == config.native_asset_address {
            return Err(SignerError::UnsupportedOrderShape(format!(
                "token {} is the native asset placeholder; an order needs a token to trade against ETH",
                intent.token.contract
            )));
        }

        let amount_token = to_atomic_units(&intent.amount_token, intent.token.factor)?;
        let amount_eth = to_atomic_units(&intent.amount_eth, config.native_decimals)?;

        let (token_buy, amount_buy, token_sell, amount_sell) = match intent.side {
            OrderSide::Buy => (
                intent.token.contract,
                amount_token,
                config.native_asset_address,
                amount_eth,
            ),
            OrderSide::Sell => (
                config.native_asset_address,
                amount_eth,
                intent.token.contract,
                amount_token,
            ),
        };

        debug!(
            "Order fields - Side: {}, Buy: {} {}, Sell: {} {}, Nonce: {}",
            intent.side, amount_buy, token_buy, amount_sell, token_sell, nonce
        );

        Ok(Self {
            token_buy,
            amount_buy,
            token_sell,
            amount_sell,
            nonce,
            owner: intent.address,
        })
    }
}

/// Hash of the order tuple as stored by the exchange contract:
///
/// `(contract, tokenBuy, amountBuy, tokenSell, amountSell, expires, nonce, owner)`
///
/// Placement and cancellation both go through here so the tuple can only be
/// defined once.
pub fn order_hash(config: &ExchangeConfig, fields: &OrderFields) -> Result<[u8; 32]> {
    let expires = config.expires.to_string();
    let nonce = fields.nonce.to_string();

    content_hash(&[
        PackedValue::Address(config.contract_address.as_bytes()),
        PackedValue::Address(fields.token_buy.as_bytes()),
        PackedValue::Uint256(&fields.amount_buy),
        PackedValue::Address(fields.token_sell.as_bytes()),
        PackedValue::Uint256(&fields.amount_sell),
        PackedValue::Uint256(&expires),
        PackedValue::Uint256(&nonce),
        PackedValue::Address(fields.owner.as_bytes()),
    ])
}

/// Hash signed for a cancellation: `(orderHash as bytes, nonce)`
pub fn cancel_hash(order_hash: &[u8; 32], nonce: u64) -> Result<[u8; 32]> {
    let nonce = nonce.to_string();
    content_hash(&[PackedValue::Bytes(order_hash), PackedValue::Uint256(&nonce)])
}

/// Hash signed for a withdrawal: `(contract, token, amount, owner, nonce)`
pub fn withdrawal_hash(
    config: &ExchangeConfig,
    token: &Address,
    amount: &str,
    owner: &Address,
    nonce: u64,
) -> Result<[u8; 32]> {
    let nonce = nonce.to_string();
    content_hash(&[
        PackedValue::Address(config.contract_address.as_bytes()),
        PackedValue::Address(token.as_bytes()),
        PackedValue::Uint256(amount),
        PackedValue::Address(owner.as_bytes()),
        PackedValue::Uint256(&nonce),
    ])
}

fn check_owner(owner: &Address, keypair: &Keypair) {
    if *owner != keypair.address() {
        warn!(
            "Payload address {} differs from signer {}; the exchange will reject the signature",
            owner,
            keypair.address()
        );
    }
}

/// Build and sign a new order
pub fn place_order(
    config: &ExchangeConfig,
    intent: &OrderIntent,
    keypair: &Keypair,
) -> Result<SignedOrder> {
    check_owner(&intent.address, keypair);

    let fields = OrderFields::from_intent(config, intent, intent.nonce)?;
    let hash = order_hash(config, &fields)?;
    debug!("Order hash: {}", hash_to_hex(&hash));

    let signature = sign_content_hash(&hash, keypair)?;

    Ok(SignedOrder {
        token_buy: fields.token_buy,
        amount_buy: fields.amount_buy,
        token_sell: fields.token_sell,
        amount_sell: fields.amount_sell,
        address: fields.owner,
        nonce: fields.nonce,
        expires: config.expires,
        signature,
    })
}

/// Sign the cancellation of an existing order
///
/// The order hash is rebuilt with `nonce_of_order`, the nonce the order was
/// placed with; the fresh `order.nonce` only enters the cancellation envelope.
pub fn cancel_order(
    config: &ExchangeConfig,
    cancel: &CancelIntent,
    keypair: &Keypair,
) -> Result<SignedCancel> {
    check_owner(&cancel.order.address, keypair);

    let fields = OrderFields::from_intent(config, &cancel.order, cancel.nonce_of_order)?;
    let order_hash = order_hash(config, &fields)?;
    let envelope = cancel_hash(&order_hash, cancel.order.nonce)?;
    debug!(
        "Cancel - Order hash: {}, Envelope: {}",
        hash_to_hex(&order_hash),
        hash_to_hex(&envelope)
    );

    let signature = sign_content_hash(&envelope, keypair)?;

    Ok(SignedCancel {
        order_hash: hash_to_hex(&order_hash),
        address: cancel.order.address,
        nonce: cancel.order.nonce,
        signature,
    })
}

/// Sign a withdrawal of `amount` whole tokens (or ETH for the placeholder)
pub fn request_withdrawal(
    config: &ExchangeConfig,
    request: &WithdrawalRequest,
    keypair: &Keypair,
) -> Result<SignedWithdrawal> {
    check_owner(&request.address, keypair);

    let amount = to_atomic_units(&request.amount, request.token.factor)?;
    let hash = withdrawal_hash(
        config,
        &request.token.contract,
        &amount,
        &request.address,
        request.nonce,
    )?;
    debug!(
        "Withdrawal - Token: {}, Amount: {}, Hash: {}",
        request.token.contract,
        amount,
        hash_to_hex(&hash)
    );

    let signature = sign_content_hash(&hash, keypair)?;

    Ok(SignedWithdrawal {
        address: request.address,
        amount,
        token: request.token.contract,
        nonce: request.nonce,
        signature,
    })
}
