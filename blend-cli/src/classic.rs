use clap::Parser;
use std::error::Error;

use crate::context::{decode_operation, Context, SecretArgs};

#[derive(Debug, Parser)]
/// Arguments for classic operations
pub struct Args {
    /// Base64 encoded operation
    #[arg(long)]
    operation: String,

    #[command(flatten)]
    secret: SecretArgs,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), Box<dyn Error>> {
    let operation = decode_operation(&args.operation)?;
    let params = ctx.params(&args.secret)?;

    ctx.pipeline()?
        .invoke_classic_operation(operation, &params)
        .await?;

    Ok(())
}
