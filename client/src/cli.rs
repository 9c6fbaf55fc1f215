use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use plasma_common::{ClientConfig, Network};
use primitive_types::U256;

use crate::handlers::{
    EndpointsHandler, Handler, HeaderHandler, MergeHandler, MergeTarget, TransactionHandler,
};

#[derive(Parser, Debug)]
#[command(name = "plasma-client", about = "Inspect and rework plasma chain wire data")]
pub struct Cli {
    /// Path to a client configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured network
    #[arg(long, global = true, value_enum)]
    pub network: Option<NetworkArg>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => Network::Mainnet,
            NetworkArg::Testnet => Network::Testnet,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a 137-byte block header
    Header {
        /// Header bytes as hex
        data: String,
    },
    /// Decode a signed transaction
    Tx {
        /// Signed transaction bytes as hex
        data: String,
    },
    /// Consolidate the outputs of a transaction
    Merge {
        /// Transaction bytes as hex
        data: String,

        /// Treat the input as an unsigned transaction body
        #[arg(long)]
        unsigned: bool,

        #[command(flatten)]
        target: MergeArgs,
    },
    /// Show the operator endpoints of the active network
    Endpoints,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct MergeArgs {
    /// Merge smallest outputs while their sum stays at or below this amount
    #[arg(long, value_parser = parse_amount)]
    pub max_amount: Option<U256>,

    /// Merge smallest outputs until at most this many remain
    #[arg(long)]
    pub max_outputs: Option<usize>,
}

impl MergeArgs {
    /// The selected target, or `None` unless exactly one flag is set
    pub fn target(&self) -> Option<MergeTarget> {
        match (self.max_amount, self.max_outputs) {
            (Some(amount), None) => Some(MergeTarget::Amount(amount)),
            (None, Some(count)) => Some(MergeTarget::Count(count)),
            _ => None,
        }
    }
}

fn parse_amount(value: &str) -> Result<U256, String> {
    U256::from_dec_str(value).map_err(|e| format!("Invalid amount {}: {:?}", value, e))
}

impl Command {
    /// Builds the handler that serves this command
    pub fn into_handler(self, config: ClientConfig) -> Result<Box<dyn Handler>, clap::Error> {
        let handler: Box<dyn Handler> = match self {
            Command::Header { data } => Box::new(HeaderHandler::new(data)),
            Command::Tx { data } => Box::new(TransactionHandler::new(data)),
            Command::Merge {
                data,
                unsigned,
                target,
            } => {
                let target = target.target().ok_or_else(|| {
                    Cli::command().error(
                        ErrorKind::ArgumentConflict,
                        "exactly one of --max-amount or --max-outputs is required",
                    )
                })?;
                Box::new(MergeHandler::new(data, unsigned, target))
            }
            Command::Endpoints => Box::new(EndpointsHandler::new(config)),
        };
        Ok(handler)
    }
}
