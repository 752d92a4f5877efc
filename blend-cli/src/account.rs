use blend::rpc::LedgerRpc;
use clap::Parser;
use std::error::Error;

use crate::context::Context;

#[derive(Debug, Parser)]
/// Arguments for account lookup
pub struct Args {
    /// Hex account id, or a name from the address book
    account: String,
}

/// Prints the account id and its current sequence
pub async fn run(ctx: &Context, args: Args) -> Result<(), Box<dyn Error>> {
    let account = ctx.account_id(&args.account)?;
    let cursor = ctx.pipeline()?.rpc().get_account(&account).await?;

    println!("{} {}", cursor.account_id, cursor.sequence);

    Ok(())
}
