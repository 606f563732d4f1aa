//! Raw API queries printed as pretty JSON.

use std::io::Write;

use anyhow::{Result, bail};
use clap::Args;

use tgl_api::{Client, Resource, Transport};

#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Resource to fetch (me, time_entries, workspaces, clients, projects,
    /// tasks, tags, users).
    pub resource: String,

    /// Query parameter as `key=value`. Repeatable.
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

fn parse_param(s: &str) -> Result<(String, String)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("invalid parameter {s:?}, expected key=value");
    };
    if key.is_empty() {
        bail!("invalid parameter {s:?}, key cannot be empty");
    }
    Ok((key.to_string(), value.to_string()))
}

/// Fetches `args.resource` and prints the response.
pub fn run<W: Write, T: Transport>(writer: &mut W, client: &Client<T>, args: &ApiArgs) -> Result<()> {
    if args.resource.parse::<Resource>().is_err() {
        tracing::warn!(resource = %args.resource, "not a known resource, requesting anyway");
    }
    let params: Vec<(&str, &str)> = args
        .params
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    print_json(writer, client, &args.resource, &params)
}

/// Prints the latest time entries.
pub fn entries<W: Write, T: Transport>(writer: &mut W, client: &Client<T>) -> Result<()> {
    print_json(writer, client, Resource::TimeEntries.as_str(), &[])
}

fn print_json<W: Write, T: Transport>(
    writer: &mut W,
    client: &Client<T>,
    resource: &str,
    params: &[(&str, &str)],
) -> Result<()> {
    let value = client.get(resource, params)?;
    writeln!(writer, "{}", serde_json::to_string_pretty(&value)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tgl_api::{Method, MockTransport, Response};

    const BASE: &str = "http://api.test/v6/";

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn raw_query_forwards_params_and_pretty_prints() {
        let mock = MockTransport::new().route(
            Method::Get,
            format!("{BASE}time_entries.json?start_date=2025-03-14"),
            Response::ok(r#"{"data":[{"id":1,"duration":90}]}"#),
        );
        let client = Client::with_transport(mock, BASE, "token").unwrap();
        let args = ApiArgs {
            resource: "time_entries".to_string(),
            params: vec![("start_date".to_string(), "2025-03-14".to_string())],
        };
        let mut output = Vec::new();

        run(&mut output, &client, &args).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r#"
        {
          "data": [
            {
              "duration": 90,
              "id": 1
            }
          ]
        }
        "#);
    }

    #[test]
    fn entries_fetch_time_entries() {
        let mock = MockTransport::new().route(
            Method::Get,
            format!("{BASE}time_entries.json"),
            Response::ok("[]"),
        );
        let client = Client::with_transport(mock, BASE, "token").unwrap();
        let mut output = Vec::new();

        entries(&mut output, &client).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "[]\n");
    }

    #[test]
    fn raw_query_reports_bad_credentials() {
        let client = Client::with_transport(MockTransport::new(), BASE, "token").unwrap();
        let args = ApiArgs {
            resource: "me".to_string(),
            params: Vec::new(),
        };
        let err = run(&mut std::io::sink(), &client, &args).unwrap_err();
        assert!(err.to_string().contains("verify your login credentials"));
    }
}
