use std::io::Write;

use anyhow::Context;
use log::debug;

use crate::client::CtrlClient;
use crate::types::{InterfaceRef, IpPrefix};
use crate::utils::ip_ntop;

pub(crate) const NOT_FOUND_MESSAGE: &str = "No interface details found for interface";

/// Print the addresses assigned to `interface`, one `address/prefix` per line.
pub(crate) fn ip(
    client: &impl CtrlClient,
    interface: &InterfaceRef,
    out: &mut impl Write,
) -> Result<(), anyhow::Error> {
    let Some(detail) = client.get_interface_detail(interface)? else {
        writeln!(out, "{NOT_FOUND_MESSAGE}")?;
        return Ok(());
    };
    debug!(
        "Interface '{}' has {} address(es)",
        detail.interface_name,
        detail.address.len()
    );

    writeln!(out)?;
    writeln!(out, "Address:")?;
    for prefix in &detail.address {
        writeln!(out, "\t{}", format_prefix(prefix)?)?;
    }

    Ok(())
}

pub(crate) fn format_prefix(prefix: &IpPrefix) -> Result<String, anyhow::Error> {
    let ip = ip_ntop(&prefix.ip.addr).context("Formatting interface address")?;
    Ok(format!("{ip}/{}", prefix.prefix_length))
}
