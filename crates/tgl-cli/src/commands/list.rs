//! Listing commands for projects, clients and tasks.

use std::io::Write;

use anyhow::Result;

use tgl_api::{Client, Resource, Transport};
use tgl_core::CLIENT_PROJECT_FIELD;

/// Prints one `<id>  <name>` line per record of `resource`.
///
/// Projects that belong to a client also show the `client - project` name
/// used for lookups.
pub fn run<W: Write, T: Transport>(
    writer: &mut W,
    client: &Client<T>,
    resource: Resource,
) -> Result<usize> {
    let records = client.get_list(resource)?;
    if records.is_empty() {
        writeln!(writer, "No {resource} found.")?;
        return Ok(0);
    }

    for record in &records {
        let id = record.id()?;
        let name = record.name()?;
        match record.str_field(CLIENT_PROJECT_FIELD) {
            Ok(composite) if resource == Resource::Projects => {
                writeln!(writer, "{id:>10}  {name}  ({composite})")?;
            }
            _ => writeln!(writer, "{id:>10}  {name}")?,
        }
    }
    Ok(records.len())
}
