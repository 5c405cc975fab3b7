//! coecreds - Generate client credentials bundles for COE clusters.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use coecreds_bundle::{BundleAssembler, CredentialsBundle};
use coecreds_client::ContainerInfraClient;
use coecreds_core::{fingerprint, CertificateAuthority, ClusterId, ClusterLookup};

mod config;
mod output;

use config::{ConnectionArgs, KeyArgs};

/// coecreds - COE cluster credentials tool
#[derive(Parser)]
#[command(name = "coecreds")]
#[command(about = "Generate client credentials for container orchestration clusters", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a client certificate and write a credentials bundle
    Bundle {
        /// Cluster UUID
        cluster_id: String,

        /// Directory the bundle is written to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Overwrite files in a non-empty output directory
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Print the cluster CA certificate
    Ca {
        /// Cluster UUID
        cluster_id: String,
    },

    /// Print a cluster as JSON
    Cluster {
        /// Cluster UUID
        cluster_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let client = ContainerInfraClient::new(&cli.connection.client_config())?;

    match cli.command {
        Commands::Bundle {
            cluster_id,
            output_dir,
            force,
            key,
        } => {
            bundle(client, cluster_id, output_dir, force, key).await?;
        }
        Commands::Ca { cluster_id } => {
            print_ca(client, cluster_id).await?;
        }
        Commands::Cluster { cluster_id } => {
            print_cluster(client, cluster_id).await?;
        }
    }

    Ok(())
}

async fn bundle(
    client: ContainerInfraClient,
    cluster_id: String,
    output_dir: PathBuf,
    force: bool,
    key: KeyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let assembler =
        BundleAssembler::new(client.clone(), client).with_config(key.bundle_config());

    let bundle = assembler.assemble(&ClusterId::new(cluster_id)).await?;
    let written = output::write_files(&output_dir, &bundle.files(), force)?;

    info!(
        cluster_id = %bundle.cluster_id(),
        dir = %output_dir.display(),
        files = written.len(),
        "Bundle written"
    );
    print_bundle(&bundle, &written);

    Ok(())
}

async fn print_ca(
    client: ContainerInfraClient,
    cluster_id: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let ca = client
        .fetch_ca_certificate(&ClusterId::new(cluster_id))
        .await?;

    print!("{}", ca.to_pem());

    Ok(())
}

async fn print_cluster(
    client: ContainerInfraClient,
    cluster_id: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let cluster = client.get_cluster(&ClusterId::new(cluster_id)).await?;

    println!("{}", serde_json::to_string_pretty(&cluster)?);

    Ok(())
}

fn print_bundle(bundle: &CredentialsBundle, written: &[PathBuf]) {
    println!("Credentials bundle:");
    println!("  Cluster:      {}", bundle.cluster_id());
    println!("  Endpoint:     {}", bundle.coe_endpoint());
    println!(
        "  Certificate:  sha256:{}",
        fingerprint(bundle.certificate().contents())
    );
    println!(
        "  CA:           sha256:{}",
        fingerprint(bundle.ca_certificate().contents())
    );
    println!("  Files:");
    for path in written {
        println!("    {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bundle_command() {
        let cli = Cli::try_parse_from([
            "coecreds",
            "--endpoint",
            "https://magnum:9511/v1",
            "bundle",
            "c1",
            "--output-dir",
            "/tmp/c1",
            "--force",
            "--key-bits",
            "2048",
        ])
        .unwrap();

        assert_eq!(cli.connection.endpoint, "https://magnum:9511/v1");
        match cli.command {
            Commands::Bundle {
                cluster_id,
                output_dir,
                force,
                key,
            } => {
                assert_eq!(cluster_id, "c1");
                assert_eq!(output_dir, PathBuf::from("/tmp/c1"));
                assert!(force);
                assert_eq!(key.key_bits, 2048);
            }
            _ => panic!("expected bundle command"),
        }
    }

    #[test]
    fn test_bundle_defaults() {
        let cli = Cli::try_parse_from(["coecreds", "bundle", "c1"]).unwrap();

        match cli.command {
            Commands::Bundle {
                output_dir,
                force,
                key,
                ..
            } => {
                assert_eq!(output_dir, PathBuf::from("."));
                assert!(!force);
                assert_eq!(key.key_bits, 4096);
            }
            _ => panic!("expected bundle command"),
        }
    }

    #[test]
    fn test_ca_requires_cluster_id() {
        assert!(Cli::try_parse_from(["coecreds", "ca"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
