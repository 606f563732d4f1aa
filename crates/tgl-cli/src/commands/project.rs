//! Project command: show what the project file resolves to.

use std::io::Write;

use anyhow::Result;

use tgl_api::{Client, Transport};
use tgl_core::ProjectSettings;

use super::start::require_project;

pub fn run<W: Write, T: Transport>(
    writer: &mut W,
    client: &Client<T>,
    settings: &ProjectSettings,
) -> Result<()> {
    let project = require_project(client, settings)?;
    writeln!(writer, "Project: {} (id {})", project.name, project.id)?;
    if let Some(client_name) = &settings.client {
        writeln!(writer, "Client: {client_name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tgl_api::{Method, MockTransport, Response};

    use crate::commands::start::StartError;

    const BASE: &str = "http://api.test/v6/";

    fn client() -> Client<MockTransport> {
        let mock = MockTransport::new().route(
            Method::Get,
            format!("{BASE}projects.json"),
            Response::ok(
                r#"{"data":[{"id":42,"name":"Website","client_project_name":"Acme - Website"}]}"#,
            ),
        );
        Client::with_transport(mock, BASE, "token").unwrap()
    }

    #[test]
    fn prints_resolved_project() {
        let settings = ProjectSettings {
            project: "website".to_string(),
            client: Some("acme".to_string()),
        };
        let mut output = Vec::new();

        run(&mut output, &client(), &settings).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Project: Website (id 42)\nClient: acme\n"
        );
    }

    #[test]
    fn unknown_project_is_project_not_found() {
        let settings = ProjectSettings {
            project: "Mobile".to_string(),
            client: None,
        };
        let err = run(&mut std::io::sink(), &client(), &settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StartError>(),
            Some(StartError::ProjectNotFound(_))
        ));
    }
}
