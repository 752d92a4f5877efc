use clap::Subcommand;
use std::error::Error;

use crate::context::Context;

#[derive(Debug, Subcommand)]
/// Address book commands
pub enum Command {
    /// Prints the entry stored under a name
    Get {
        name: String,

        /// Looks the name up among wasm hashes instead of contract ids
        #[arg(long)]
        hash: bool,
    },

    /// Stores an entry under a name
    Set {
        name: String,
        value: String,

        /// Stores the value as a wasm hash instead of a contract id
        #[arg(long)]
        hash: bool,
    },
}

pub fn run(ctx: &Context, cmd: Command) -> Result<(), Box<dyn Error>> {
    let mut book = ctx.book()?;

    match cmd {
        Command::Get { name, hash } => {
            let value = if hash { book.hash(&name) } else { book.id(&name) };

            match value {
                Some(value) => println!("{value}"),
                None => return Err(format!("{name} not found in address book").into()),
            }
        }
        Command::Set { name, value, hash } => {
            if hash {
                book.set_hash(name, value);
            } else {
                book.set_id(name, value);
            }

            book.save()?;
        }
    }

    Ok(())
}
