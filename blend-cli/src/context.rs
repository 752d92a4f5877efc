use blend::ledger::primitives::{AccountId, Bytes, Fragment, Operation};
use blend::pipeline::{Pipeline, TxParams};
use blend::rpc::HttpRpcClient;
use blend::wallet::{KeypairSigner, PrivateKey};
use clap::Args;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::address_book::{AddressBook, AddressBookError};
use crate::config::{ConfigError, NetworkConfig};

/// Secret of the account paying for and signing transactions
#[derive(Debug, Args)]
pub struct SecretArgs {
    /// Hex encoded 32 bytes account secret
    #[arg(long, env = "BLEND_SECRET", hide_env_values = true)]
    secret: String,
}

pub struct Context {
    pub config: NetworkConfig,
    pub address_book: PathBuf,
}

impl Context {
    pub fn new(
        config: Option<&Path>,
        rpc_url: Option<String>,
        passphrase: Option<String>,
        address_book: PathBuf,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            config: NetworkConfig::resolve(config, rpc_url, passphrase)?,
            address_book,
        })
    }

    pub fn pipeline(&self) -> Result<Pipeline<HttpRpcClient>, Box<dyn Error>> {
        let client = HttpRpcClient::new(self.config.rpc_config())?;
        Ok(Pipeline::with_policy(client, self.config.poll_policy()))
    }

    pub fn book(&self) -> Result<AddressBook, AddressBookError> {
        AddressBook::load(&self.address_book)
    }

    pub fn params(&self, secret: &SecretArgs) -> Result<TxParams<KeypairSigner>, Box<dyn Error>> {
        let key: PrivateKey = secret.secret.parse()?;
        Ok(TxParams::for_keypair(key, self.config.builder_options()))
    }

    /// Resolves an address book name, falling back to a literal account id
    pub fn account_id(&self, name_or_id: &str) -> Result<AccountId, Box<dyn Error>> {
        let book = self.book()?;
        let raw = book.id(name_or_id).unwrap_or(name_or_id);

        Ok(raw.parse()?)
    }
}

pub fn decode_operation(encoded: &str) -> Result<Operation, Box<dyn Error>> {
    Ok(Operation::from_base64(encoded)?)
}

pub fn print_value(value: &Option<Bytes>) {
    match value {
        Some(bytes) => println!("{}", hex::encode(bytes.as_slice())),
        None => println!(),
    }
}
