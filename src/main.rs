use std::io;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ostack_net::config::cli::{print_default_config, CliArgs, Command};
use ostack_net::config::load_configuration;
use ostack_net::{AppError, GatewayMaps, HostSet, HttpControlPlane, Ostack};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print_default_config();
        return Ok(());
    }

    let config = load_configuration(&cli)?;

    // Initialize logging; stdout is reserved for query output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(io::stderr)
        .init();

    config.validate(cli.command.as_ref())?;
    if cli.validate_config {
        info!("Configuration is valid");
        return Ok(());
    }

    let Some(command) = cli.command else {
        info!("No command given, nothing to do (see --help)");
        return Ok(());
    };

    let control_plane = HttpControlPlane::from_config(&config)?;
    let ostack = Ostack::from_config(control_plane, &config);
    debug!(?command, "running query");

    match command {
        Command::Hosts { ovs_only } => {
            let mut seen = HostSet::new();
            let hosts = ostack.list_net_hosts(&mut seen, ovs_only).await?;
            println!("{}", hosts);
        }
        Command::Networks => {
            let map = ostack.network_info_map().await?;
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            for name in names {
                println!("{}: {}", name, map[name]);
            }
        }
        Command::Gateways {
            tenant,
            use_project,
            reverse,
        } => {
            let mut maps = GatewayMaps::new();
            ostack.gateway_maps(&mut maps, tenant, use_project).await?;
            let map = if reverse { &maps.ip2mac } else { &maps.mac2ip };
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                println!("{} {}", key, map[key]);
            }
        }
        Command::Gwlist => {
            for entry in ostack.gateway_list().await? {
                println!("{}", entry);
            }
        }
        Command::Dump { path } => {
            if let Err(e) = ostack.dump_json(&path, &mut io::stderr()).await {
                // already reported on stderr
                if e.is_request_failure() {
                    std::process::exit(1);
                }
                return Err(e.into());
            }
        }
    }

    Ok(())
}
