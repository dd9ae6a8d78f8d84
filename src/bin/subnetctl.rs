use std::path::PathBuf;

use clap::{Parser, Subcommand};

use subnetkit::config::loader::load_config;
use subnetkit::keychain::SoftKey;
use subnetkit::network::Network;
use subnetkit::observability::logging;
use subnetkit::rpc::RpcClient;
use subnetkit::tx::TxId;

#[derive(Parser)]
#[command(name = "subnetctl")]
#[command(about = "Operator CLI for the subnet SDK", long_about = None)]
struct Cli {
    /// Network to target: mainnet, testnet, or local
    #[arg(short, long, default_value = "local")]
    network: String,

    /// API endpoint override (required for devnet-style targets)
    #[arg(long)]
    api_url: Option<String>,

    /// Path to a TOML config file; overrides --network and --api-url
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new key and write it to a file
    Keygen {
        /// Output path for the key file
        #[arg(short, long, default_value = "subnet.key")]
        out: PathBuf,
    },
    /// Print the address of a key file
    Address {
        /// Path to the key file
        key_file: PathBuf,
    },
    /// Query the balance of an address
    Balance { address: String },
    /// List subnets known to the node
    Subnets,
    /// List current validators of a subnet (or the primary network)
    Validators {
        /// Subnet id; omit for the primary network
        subnet_id: Option<String>,
    },
    /// Check node reachability, identity, and version
    Health,
}

fn network_from_args(cli: &Cli) -> Result<Network, Box<dyn std::error::Error>> {
    if let Some(url) = &cli.api_url {
        return Ok(Network::Devnet {
            api_url: url.clone(),
            network_id: 0,
        });
    }
    Network::from_name(&cli.network)
        .ok_or_else(|| format!("unknown network '{}'", cli.network).into())
}

/// Resolve the target network and build a client for it.
///
/// Key commands never call this, so they work without a reachable node.
fn connect(cli: &Cli) -> Result<(Network, RpcClient), Box<dyn std::error::Error>> {
    match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            let client = RpcClient::new(config.connection())?;
            Ok((config.network(), client))
        }
        None => {
            let network = network_from_args(cli)?;
            let client = RpcClient::for_network(&network)?;
            Ok((network, client))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Keygen { out } => {
            let key = SoftKey::generate();
            key.to_file(out)?;
            println!("{}", key.address());
        }
        Commands::Address { key_file } => {
            let key = SoftKey::from_file(key_file)?;
            println!("{}", key.address());
        }
        Commands::Balance { address } => {
            let (_, client) = connect(&cli)?;
            let balance = client.get_balance(address).await?;
            println!("{}", balance);
        }
        Commands::Subnets => {
            let (_, client) = connect(&cli)?;
            let subnets = client.get_subnets().await?;
            println!("{}", serde_json::to_string_pretty(&subnets)?);
        }
        Commands::Validators { subnet_id } => {
            let (_, client) = connect(&cli)?;
            let id = subnet_id.as_deref().map(str::parse::<TxId>).transpose()?;
            let validators = client.get_current_validators(id.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&validators)?);
        }
        Commands::Health => {
            let (network, client) = connect(&cli)?;
            if !client.is_healthy().await {
                eprintln!("node unreachable on {}", network.api_url());
                std::process::exit(1);
            }
            let node_id = client.node_id().await?;
            let version = client.node_version().await?;
            println!("{} {} ({})", node_id, version, network);
        }
    }

    Ok(())
}
