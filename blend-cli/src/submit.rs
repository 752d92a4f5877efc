use blend::ledger::primitives::{Fragment, TransactionEnvelope};
use blend::pipeline::parse;
use clap::Parser;
use std::error::Error;

use crate::context::{print_value, Context};

#[derive(Debug, Parser)]
/// Arguments for envelope submission
pub struct Args {
    /// Base64 encoded signed envelope
    #[arg(long)]
    envelope: String,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), Box<dyn Error>> {
    let envelope = TransactionEnvelope::from_base64(&args.envelope)?;

    if !envelope.is_signed() {
        return Err("envelope carries no signature".into());
    }

    let value = ctx
        .pipeline()?
        .submit_and_confirm(&envelope, parse::raw)
        .await?;

    print_value(&value);

    Ok(())
}
