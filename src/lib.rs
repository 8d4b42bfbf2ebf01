pub mod config;
pub mod error;
pub mod orders;
pub mod signing;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use config::{ExchangeConfig, IDEX_MAINNET_CONTRACT, NATIVE_DECIMALS, ORDER_EXPIRES};
pub use error::{Result, SignerError};
pub use orders::{
    cancel_hash, cancel_order, order_hash, place_order, request_withdrawal, withdrawal_hash,
    OrderFields,
};
pub use signing::{
    content_hash, derive_address, derive_key, sign, signable_digest, signable_digest_of, Keypair,
    PackedValue, PrivateKey, Signature,
};
pub use types::{
    Address, CancelIntent, OrderIntent, OrderSide, SignedCancel, SignedOrder, SignedWithdrawal,
    TokenDescriptor, WithdrawalRequest,
};
pub use units::to_atomic_units;

/// Initialize logging for the library
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}
