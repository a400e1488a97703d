use std::io::Write;

use crate::client::CtrlClient;
use crate::ip_cmd::{format_prefix, NOT_FOUND_MESSAGE};
use crate::types::InterfaceRef;

/// Print the complete detail record of `interface`.
pub(crate) fn interface(
    client: &impl CtrlClient,
    interface: &InterfaceRef,
    out: &mut impl Write,
) -> Result<(), anyhow::Error> {
    let Some(detail) = client.get_interface_detail(interface)? else {
        writeln!(out, "{NOT_FOUND_MESSAGE}")?;
        return Ok(());
    };

    writeln!(out, "{}", detail.interface_name)?;
    writeln!(out, "\tInterface ID: {}", detail.interface_id)?;
    writeln!(out, "\tVlan: {}", detail.vlan_id)?;
    writeln!(out, "\tRouter ID: {}", detail.router_id)?;
    writeln!(out, "\tMac Address: {}", detail.mac)?;
    writeln!(out, "\tIP Address:")?;
    for prefix in &detail.address {
        writeln!(out, "\t\t{}", format_prefix(prefix)?)?;
    }

    Ok(())
}
