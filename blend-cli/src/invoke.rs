use blend::pipeline::parse;
use clap::Parser;
use std::error::Error;
use tracing::warn;

use crate::context::{decode_operation, print_value, Context, SecretArgs};

#[derive(Debug, Parser)]
/// Arguments for soroban invocations
pub struct Args {
    /// Base64 encoded operation
    #[arg(long)]
    operation: String,

    #[command(flatten)]
    secret: SecretArgs,

    /// Records the returned value as a contract id under this name
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Records the returned value as a wasm hash under this name
    #[arg(long, value_name = "NAME")]
    hash_name: Option<String>,

    /// Restores archived entries and retries once when simulation asks for it
    #[arg(long)]
    restore: bool,
}

pub async fn run(ctx: &Context, args: Args) -> Result<(), Box<dyn Error>> {
    let operation = decode_operation(&args.operation)?;
    let params = ctx.params(&args.secret)?;
    let pipeline = ctx.pipeline()?;

    let value = match pipeline
        .invoke_operation(operation.clone(), parse::raw, &params, None)
        .await
    {
        Ok(value) => value,
        Err(err) => match err.restore_preamble().cloned() {
            Some(preamble) if args.restore => {
                warn!("restoring archived entries before retrying");
                pipeline.restore_footprint(preamble, &params).await?;
                pipeline
                    .invoke_operation(operation, parse::raw, &params, None)
                    .await?
            }
            _ => return Err(err.into()),
        },
    };

    print_value(&value);

    if args.name.is_some() || args.hash_name.is_some() {
        let encoded = value.as_ref().map(|x| hex::encode(x.as_slice()));

        let Some(encoded) = encoded else {
            return Err("invocation returned no value to record".into());
        };

        let mut book = ctx.book()?;

        if let Some(name) = args.name {
            book.set_id(name, encoded.clone());
        }

        if let Some(name) = args.hash_name {
            book.set_hash(name, encoded);
        }

        book.save()?;
    }

    Ok(())
}
