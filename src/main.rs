use std::io;

use log::{debug, error};

use client::create_ctrl_client;
use config::{load_config, ClientConfig};
use interface_cmd::interface;
use ip_cmd::ip;
use types::InterfaceRef;

mod client;
mod config;
mod interface_cmd;
mod ip_cmd;
mod types;
mod utils;

const APP_NAME: &str = "swctl";

const SUB_CMD_IP: &str = "ip";
const SUB_CMD_INTERFACE: &str = "interface";

fn main() {
    let matches = cli().get_matches();

    let (name, cmd) = match matches.subcommand() {
        Some((name @ (SUB_CMD_IP | SUB_CMD_INTERFACE), cmd)) => (name, cmd),
        _ => unreachable!("Unrecognized subcommand"),
    };

    setup_logger(cmd);

    match run(name, cmd) {
        Ok(..) => {
            debug!("Command '{name}' completed");
        }
        Err(err) => {
            error!("Command '{name}' failed: {err:#}");
            std::process::exit(1)
        }
    }
}

fn cli() -> clap::Command {
    let interface_arg = clap::Arg::new("INTERFACE")
        .required(true)
        .value_parser(clap::value_parser!(InterfaceRef))
        .help("Interface id or name");

    clap::Command::new(APP_NAME)
        .version(clap::crate_version!())
        .about("Command line of the switch control agent")
        .subcommand_required(true)
        .arg(
            clap::Arg::new("CONFIG")
                .long("config")
                .global(true)
                .help("YAML file with agent connection settings (host, port, timeout_ms)"),
        )
        .arg(
            clap::Arg::new("HOST")
                .long("host")
                .env("SWCTL_HOST")
                .global(true)
                .help("Agent host name or IP address"),
        )
        .arg(
            clap::Arg::new("PORT")
                .long("port")
                .env("SWCTL_PORT")
                .global(true)
                .value_parser(clap::value_parser!(u16))
                .help("Agent port"),
        )
        .arg(
            clap::Arg::new("TIMEOUT")
                .long("timeout")
                .env("SWCTL_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..))
                .help("Request timeout in milliseconds"),
        )
        .arg(
            clap::Arg::new("VERBOSE")
                .long("verbose")
                .global(true)
                .action(clap::ArgAction::SetTrue)
                .help("Enables DEBUG log level"),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_IP)
                .about("Show the IP addresses assigned to an interface")
                .arg(interface_arg.clone()),
        )
        .subcommand(
            clap::Command::new(SUB_CMD_INTERFACE)
                .about("Show the configuration details of an interface")
                .arg(interface_arg),
        )
}

/// Defaults, then the config file, then flags or their environment variables.
fn resolve_config(cmd: &clap::ArgMatches) -> Result<ClientConfig, anyhow::Error> {
    let config = load_config(cmd.get_one::<String>("CONFIG").map(String::as_str))?.with_overrides(
        cmd.get_one::<String>("HOST"),
        cmd.get_one::<u16>("PORT"),
        cmd.get_one::<u64>("TIMEOUT"),
    );
    debug!("Using client config: {config:?}");

    Ok(config)
}

fn run(name: &str, cmd: &clap::ArgMatches) -> Result<(), anyhow::Error> {
    let target = cmd
        .get_one::<InterfaceRef>("INTERFACE")
        .expect("INTERFACE is required");

    let client = create_ctrl_client(&resolve_config(cmd)?)?;
    let mut stdout = io::stdout().lock();

    match name {
        SUB_CMD_IP => ip(&client, target, &mut stdout),
        _ => interface(&client, target, &mut stdout),
    }
}

fn setup_logger(matches: &clap::ArgMatches) {
    let verbose_arg = "VERBOSE";

    let mut log_builder = env_logger::Builder::new();
    if matches
        .try_get_one::<bool>(verbose_arg)
        .is_ok_and(|arg| arg.is_some_and(|&value| value))
    {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        log_builder.filter(None, log::LevelFilter::Info);
    }
    log_builder.init();
}

#[cfg(test)]
mod tests {
    use crate::config::ClientConfig;
    use crate::types::InterfaceRef;
    use crate::{cli, resolve_config, SUB_CMD_INTERFACE, SUB_CMD_IP};

    fn resolve(args: &[&str]) -> ClientConfig {
        let matches = cli().try_get_matches_from(args).unwrap();
        let (_, cmd) = matches.subcommand().unwrap();
        resolve_config(cmd).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn global_flags_before_and_after_subcommand() {
        let before = resolve(&[
            "swctl", "--host", "::1", "--port", "1", "--timeout", "250", "ip", "eth0",
        ]);
        let after = resolve(&[
            "swctl", "ip", "eth0", "--host", "::1", "--port", "1", "--timeout", "250",
        ]);

        let expected = ClientConfig {
            host: "::1".to_string(),
            port: 1,
            timeout_ms: 250,
        };
        assert_eq!(before, expected);
        assert_eq!(after, expected);
    }

    #[test]
    fn flags_take_precedence_over_config_file() {
        let config = resolve(&[
            "swctl",
            "interface",
            "2000",
            "--config",
            "testdata/config/swctl.yaml",
            "--port",
            "6000",
            "--timeout",
            "250",
        ]);

        assert_eq!(
            config,
            ClientConfig {
                host: "rsw1a.example.net".to_string(),
                port: 6000,
                timeout_ms: 250,
            }
        );
    }

    #[test]
    fn interface_argument_is_parsed() {
        let matches = cli().try_get_matches_from(["swctl", "ip", "2000"]).unwrap();
        let cmd = matches.subcommand_matches(SUB_CMD_IP).unwrap();
        assert_eq!(cmd.get_one::<InterfaceRef>("INTERFACE"), Some(&InterfaceRef::Id(2000)));

        let matches = cli()
            .try_get_matches_from(["swctl", "interface", "eth1/2/1"])
            .unwrap();
        let cmd = matches.subcommand_matches(SUB_CMD_INTERFACE).unwrap();
        assert_eq!(
            cmd.get_one::<InterfaceRef>("INTERFACE"),
            Some(&InterfaceRef::Name("eth1/2/1".to_string()))
        );
    }

    #[test]
    fn cli_rejects_invalid_arguments() {
        for args in [
            &["swctl"][..],
            &["swctl", "ip"][..],
            &["swctl", "ip", ""][..],
            &["swctl", "--timeout", "0", "ip", "eth0"][..],
            &["swctl", "--port", "70000", "ip", "eth0"][..],
        ] {
            assert!(cli().try_get_matches_from(args).is_err(), "{args:?}");
        }
    }
}
