//! Signing walkthrough for the IDEX signer
//!
//! This example demonstrates:
//! - Loading exchange constants (defaults, `.env` overrides)
//! - Deriving a deterministic keypair from a seed
//! - Signing an order, its cancellation and a withdrawal
//!
//! Usage:
//!   IDEX_SEED="my seed" cargo run --example sign_payloads
use idex_signer::{
    cancel_order, init_logging, place_order, request_withdrawal, CancelIntent, ExchangeConfig,
    Keypair, OrderIntent, OrderSide, TokenDescriptor, WithdrawalRequest,
};
use std::env;

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ExchangeConfig::from_env()?;
    let seed = env::var("IDEX_SEED").unwrap_or_else(|_| "idex demo seed".to_string());
    let keypair = Keypair::from_seed(seed.as_bytes())?;

    println!("Exchange contract: {}", config.contract_address);
    println!("Signer address:    {}", keypair.address());
    println!();

    let token = TokenDescriptor {
        contract: "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".parse()?,
        factor: 18,
    };

    let intent = OrderIntent {
        side: OrderSide::Buy,
        amount_token: "100".to_string(),
        amount_eth: "1".to_string(),
        token: token.clone(),
        nonce: 5,
        address: keypair.address(),
    };

    let order = place_order(&config, &intent, &keypair)?;
    println!("Order:\n{}\n", serde_json::to_string_pretty(&order)?);

    let cancel = CancelIntent {
        order: OrderIntent {
            nonce: 6,
            ..intent
        },
        nonce_of_order: 5,
    };
    let cancellation = cancel_order(&config, &cancel, &keypair)?;
    println!("Cancel:\n{}\n", serde_json::to_string_pretty(&cancellation)?);

    let withdrawal = WithdrawalRequest {
        token,
        amount: "2.5".to_string(),
        nonce: 7,
        address: keypair.address(),
    };
    let signed = request_withdrawal(&config, &withdrawal, &keypair)?;
    println!("Withdrawal:\n{}", serde_json::to_string_pretty(&signed)?);

    Ok(())
}
