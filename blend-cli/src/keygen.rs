use blend::wallet::PrivateKey;
use std::error::Error;

/// Prints a fresh secret on the first line and its account id on the second
pub fn run() -> Result<(), Box<dyn Error>> {
    let key = PrivateKey::generate(rand::rng());

    println!("{}", key.to_hex());
    println!("{}", key.account_id());

    Ok(())
}
