//! Looking up records by name.

use tgl_core::{CLIENT_PROJECT_FIELD, Project, ProjectSettings, Record};

use crate::resource::Resource;
use crate::transport::Transport;
use crate::{ApiError, Client};

/// Returns the first record of `resource` whose `field` equals `value`,
/// ignoring case.
///
/// Matching is exact after case folding. When several records match, the
/// first one in the API's order wins.
pub fn find_record_by_field<T: Transport>(
    client: &Client<T>,
    resource: impl AsRef<str>,
    field: &str,
    value: &str,
) -> Result<Option<Record>, ApiError> {
    let resource = resource.as_ref();
    let mut matches = client
        .get_list(resource)?
        .into_iter()
        .filter(|record| record.field_matches(field, value));

    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        tracing::warn!(
            resource,
            field,
            value,
            duplicates = extra,
            "several records match, using the first"
        );
    }
    Ok(first)
}

/// Finds the project named by `settings`.
///
/// With a client configured the lookup uses the `"<client> - <project>"`
/// composite name, otherwise the plain project name.
pub fn resolve_project<T: Transport>(
    client: &Client<T>,
    settings: &ProjectSettings,
) -> Result<Option<Project>, ApiError> {
    let record = match settings.composite_name() {
        Some(composite) => {
            find_record_by_field(client, Resource::Projects, CLIENT_PROJECT_FIELD, &composite)?
        }
        None => find_record_by_field(client, Resource::Projects, "name", &settings.project)?,
    };

    let project = record.as_ref().map(Project::try_from).transpose()?;
    if let Some(project) = &project {
        tracing::debug!(id = project.id, name = %project.name, "resolved project");
    }
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, MockTransport, Response};

    const BASE: &str = "http://api.test/v6/";

    fn client_with_projects(body: &str) -> Client<MockTransport> {
        let mock = MockTransport::new().route(
            Method::Get,
            format!("{BASE}projects.json"),
            Response::ok(body),
        );
        Client::with_transport(mock, BASE, "token").unwrap()
    }

    fn settings(project: &str, client: Option<&str>) -> ProjectSettings {
        ProjectSettings {
            project: project.to_string(),
            client: client.map(str::to_string),
        }
    }

    #[test]
    fn resolves_by_name_without_client() {
        let client = client_with_projects(r#"{"data":[{"name":"Website","id":42}]}"#);
        let project = resolve_project(&client, &settings("Website", None))
            .unwrap()
            .unwrap();
        assert_eq!(project.id, 42);
        assert_eq!(project.name, "Website");
    }

    #[test]
    fn resolves_by_composite_name_with_client() {
        let client = client_with_projects(
            r#"{"data":[
                {"name":"Website","id":7},
                {"name":"Website","id":42,"client_project_name":"Acme - Website"}
            ]}"#,
        );
        let project = resolve_project(&client, &settings("Website", Some("Acme")))
            .unwrap()
            .unwrap();
        assert_eq!(project.id, 42);
    }

    #[test]
    fn name_only_record_is_not_selected_when_client_is_set() {
        let client = client_with_projects(r#"{"data":[{"name":"Website","id":7}]}"#);
        assert_eq!(
            resolve_project(&client, &settings("Website", Some("Acme"))).unwrap(),
            None
        );
    }

    #[test]
    fn lookup_ignores_case() {
        let client = client_with_projects(
            r#"{"data":[{"name":"Website","id":42,"client_project_name":"ACME - website"}]}"#,
        );
        let project = resolve_project(&client, &settings("WEBSITE", Some("acme")))
            .unwrap()
            .unwrap();
        assert_eq!(project.id, 42);
    }

    #[test]
    fn partial_names_do_not_match() {
        let client = client_with_projects(
            r#"{"data":[
                {"name":"Website Redesign","id":1},
                {"name":"Web","id":2},
                {"name":"Acme - Website","id":3}
            ]}"#,
        );
        assert_eq!(resolve_project(&client, &settings("Website", None)).unwrap(), None);
    }

    #[test]
    fn first_of_several_matches_wins() {
        let client = client_with_projects(
            r#"{"data":[{"name":"Website","id":1},{"name":"website","id":2}]}"#,
        );
        let record = find_record_by_field(&client, "projects", "name", "Website")
            .unwrap()
            .unwrap();
        assert_eq!(record.id().unwrap(), 1);
    }

    #[test]
    fn missing_envelope_is_an_error() {
        let client = client_with_projects(r#"[{"name":"Website","id":42}]"#);
        assert!(matches!(
            resolve_project(&client, &settings("Website", None)),
            Err(ApiError::Shape(_))
        ));
    }

    #[test]
    fn matched_record_without_id_is_an_error() {
        let client = client_with_projects(r#"{"data":[{"name":"Website"}]}"#);
        assert!(matches!(
            resolve_project(&client, &settings("Website", None)),
            Err(ApiError::Shape(_))
        ));
    }

    #[test]
    fn bad_credentials_surface_from_lookup() {
        let mock = MockTransport::new().route(
            Method::Get,
            format!("{BASE}projects.json"),
            Response::status(401),
        );
        let client = Client::with_transport(mock, BASE, "token").unwrap();
        assert!(matches!(
            resolve_project(&client, &settings("Website", None)),
            Err(ApiError::Authentication { status: 401 })
        ));
    }
}
