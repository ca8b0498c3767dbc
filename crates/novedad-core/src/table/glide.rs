//! Glide Tables HTTP client.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::columns::{from_column_values, to_column_values};
use super::{RemoteTable, TableError, TableResult};
use crate::config::GlideConfig;
use crate::models::{Novedad, RemoteRow};
use crate::util::compact_text;

const QUERY_FUNCTION: &str = "queryTables";
const MUTATE_FUNCTION: &str = "mutateTables";

/// Remote table backed by the Glide `queryTables`/`mutateTables` API.
#[derive(Clone)]
pub struct GlideTable {
    client: reqwest::Client,
    api_url: String,
    token: String,
    app_id: String,
    table_name: String,
}

impl fmt::Debug for GlideTable {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GlideTable")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("app_id", &self.app_id)
            .field("table_name", &self.table_name)
            .finish_non_exhaustive()
    }
}

impl GlideTable {
    pub fn new(config: &GlideConfig) -> TableResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            app_id: config.app_id.clone(),
            table_name: config.table_name.clone(),
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn call(&self, function: &str, body: &Value) -> TableResult<Value> {
        let url = format!("{}/{function}", self.api_url);
        debug!(%url, "Calling Glide API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TableError::Api(parse_api_error(status, &body)));
        }

        Ok(response.json::<Value>().await?)
    }

    async fn mutate(&self, mutation: Value) -> TableResult<Vec<MutationResult>> {
        let body = json!({
            "appID": self.app_id,
            "mutations": [mutation],
        });
        let payload = self.call(MUTATE_FUNCTION, &body).await?;

        serde_json::from_value(payload)
            .map_err(|error| TableError::InvalidPayload(format!("{MUTATE_FUNCTION}: {error}")))
    }
}

impl RemoteTable for GlideTable {
    async fn get(&self) -> TableResult<Vec<RemoteRow>> {
        let body = json!({
            "appID": self.app_id,
            "queries": [{ "tableName": self.table_name, "utc": true }],
        });
        let payload = self.call(QUERY_FUNCTION, &body).await?;

        let results: Vec<QueryResult> = serde_json::from_value(payload)
            .map_err(|error| TableError::InvalidPayload(format!("{QUERY_FUNCTION}: {error}")))?;
        let result = results.into_iter().next().ok_or_else(|| {
            TableError::InvalidPayload(format!("{QUERY_FUNCTION} returned no query result"))
        })?;

        if result.next.is_some() {
            warn!(
                table = %self.table_name,
                "Glide reported more rows than the first page; only the first page is used"
            );
        }

        Ok(result
            .rows
            .into_iter()
            .filter_map(|row| match from_column_values(row) {
                Ok(row) => Some(row),
                Err(error) => {
                    warn!(table = %self.table_name, %error, "Skipping unreadable Glide row");
                    None
                }
            })
            .collect())
    }

    async fn add(&self, fields: &Novedad) -> TableResult<String> {
        let results = self
            .mutate(json!({
                "kind": "add-row-to-table",
                "tableName": self.table_name,
                "columnValues": to_column_values(fields)?,
            }))
            .await?;

        results
            .into_iter()
            .next()
            .and_then(|result| result.row_id)
            .map(|row_id| row_id.trim().to_string())
            .filter(|row_id| !row_id.is_empty())
            .ok_or_else(|| TableError::InvalidPayload("add-row-to-table returned no rowID".into()))
    }

    async fn update(&self, row_id: &str, fields: &Novedad) -> TableResult<()> {
        self.mutate(json!({
            "kind": "set-columns-in-row",
            "tableName": self.table_name,
            "columnValues": to_column_values(fields)?,
            "rowID": row_id,
        }))
        .await?;
        Ok(())
    }

    async fn delete(&self, row_id: &str) -> TableResult<()> {
        self.mutate(json!({
            "kind": "delete-row",
            "tableName": self.table_name,
            "rowID": row_id,
        }))
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    rows: Vec<Map<String, Value>>,
    #[serde(default)]
    next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MutationResult {
    #[serde(rename = "rowID")]
    row_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let compacted = compact_text(body);
    if compacted.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{compacted} ({})", status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sync::{sync_novedad, SyncAction, SyncOutcome};

    fn config_for(api_url: &str) -> GlideConfig {
        GlideConfig {
            token: "secret-token".to_string(),
            app_id: "app-1".to_string(),
            table_name: "native-table-1".to_string(),
            api_url: api_url.to_string(),
            timeout: None,
        }
    }

    #[test]
    fn debug_redacts_token() {
        let table = GlideTable::new(&config_for("https://api.example.com")).unwrap();
        let debug = format!("{table:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn parse_api_error_prefers_message_field() {
        assert_eq!(
            parse_api_error(StatusCode::UNAUTHORIZED, r#"{"message":" Invalid token "}"#),
            "Invalid token (401)"
        );
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, "upstream\n  down"),
            "upstream down (502)"
        );
        assert_eq!(parse_api_error(StatusCode::NOT_FOUND, ""), "HTTP 404");
    }

    #[tokio::test]
    async fn get_queries_table_and_maps_columns() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/queryTables")
            .match_header("authorization", "Bearer secret-token")
            .match_body(Matcher::Json(json!({
                "appID": "app-1",
                "queries": [{ "tableName": "native-table-1", "utc": true }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{
                    "rows": [{
                        "$rowID": "row-1",
                        "Legajo creador": "JUM-0042",
                        "Novedad": "VACACIONES",
                        "Fecha de inicio": "2025-05-06T00:00:00.000Z",
                        "Fecha de fin": "2025-05-08T00:00:00.000Z"
                    }]
                }])
                .to_string(),
            )
            .create_async()
            .await;

        let table = GlideTable::new(&config_for(&server.url())).unwrap();
        let rows = table.get().await.unwrap();
        mock.assert_async().await;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some("row-1"));
        assert_eq!(rows[0].fields.id_empleado.as_deref(), Some("JUM-0042"));
        assert_eq!(
            rows[0].fields.fecha_inicio.as_deref(),
            Some("2025-05-06T00:00:00.000Z")
        );
    }

    #[tokio::test]
    async fn mistyped_row_is_skipped_and_sync_still_matches() {
        let mut server = mockito::Server::new_async().await;
        let query = server
            .mock("POST", "/queryTables")
            .with_status(200)
            .with_body(
                json!([{
                    "rows": [
                        { "$rowID": "legacy", "Validación": "" },
                        {
                            "$rowID": "good",
                            "Legajo creador": "JUM-0042",
                            "Novedad": "VACACIONES",
                            "Fecha de inicio": "2025-05-06T00:00:00.000Z",
                            "Fecha de fin": "2025-05-08T00:00:00.000Z"
                        }
                    ]
                }])
                .to_string(),
            )
            .expect(2)
            .create_async()
            .await;
        let update = server
            .mock("POST", "/mutateTables")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#""kind":"set-columns-in-row""#.to_string()),
                Matcher::Regex(r#""rowID":"good""#.to_string()),
            ]))
            .with_status(200)
            .with_body("[{}]")
            .create_async()
            .await;

        let table = GlideTable::new(&config_for(&server.url())).unwrap();
        let rows = table.get().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some("good"));

        let novedad = Novedad {
            id_empleado: Some("JUM-0042".to_string()),
            novedad: Some("VACACIONES".to_string()),
            fecha_inicio: Some("2025-05-06".to_string()),
            fecha_fin: Some("2025-05-08".to_string()),
            ..Novedad::default()
        };
        let outcome = sync_novedad(&table, &novedad).await;

        assert_eq!(outcome, SyncOutcome::applied(SyncAction::Update, "good"));
        query.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn add_sends_column_values_and_returns_row_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/mutateTables")
            .match_body(Matcher::Json(json!({
                "appID": "app-1",
                "mutations": [{
                    "kind": "add-row-to-table",
                    "tableName": "native-table-1",
                    "columnValues": {
                        "Legajo creador": "JUM-0042",
                        "Comentario": "Desde script"
                    }
                }]
            })))
            .with_status(200)
            .with_body(r#"[{"rowID":"new-row"}]"#)
            .create_async()
            .await;

        let table = GlideTable::new(&config_for(&server.url())).unwrap();
        let fields = Novedad {
            id_empleado: Some("JUM-0042".to_string()),
            comentario: Some("Desde script".to_string()),
            ..Novedad::default()
        };

        assert_eq!(table.add(&fields).await.unwrap(), "new-row");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn update_and_delete_target_row_id() {
        let mut server = mockito::Server::new_async().await;
        let update = server
            .mock("POST", "/mutateTables")
            .match_body(Matcher::Json(json!({
                "appID": "app-1",
                "mutations": [{
                    "kind": "set-columns-in-row",
                    "tableName": "native-table-1",
                    "columnValues": { "Validación": true },
                    "rowID": "row-7"
                }]
            })))
            .with_status(200)
            .with_body("[{}]")
            .create_async()
            .await;
        let delete = server
            .mock("POST", "/mutateTables")
            .match_body(Matcher::Json(json!({
                "appID": "app-1",
                "mutations": [{
                    "kind": "delete-row",
                    "tableName": "native-table-1",
                    "rowID": "row-7"
                }]
            })))
            .with_status(200)
            .with_body("[{}]")
            .create_async()
            .await;

        let table = GlideTable::new(&config_for(&server.url())).unwrap();
        let changes = Novedad {
            validacion: Some(true),
            ..Novedad::default()
        };
        table.update("row-7", &changes).await.unwrap();
        table.delete("row-7").await.unwrap();

        update.assert_async().await;
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn api_failure_surfaces_status_and_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/queryTables")
            .with_status(403)
            .with_body(r#"{"message":"App not found"}"#)
            .create_async()
            .await;

        let table = GlideTable::new(&config_for(&server.url())).unwrap();
        match table.get().await.unwrap_err() {
            TableError::Api(message) => assert_eq!(message, "App not found (403)"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_without_row_id_is_invalid_payload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/mutateTables")
            .with_status(200)
            .with_body("[{}]")
            .create_async()
            .await;

        let table = GlideTable::new(&config_for(&server.url())).unwrap();
        let error = table.add(&Novedad::default()).await.unwrap_err();
        assert!(matches!(error, TableError::InvalidPayload(_)));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ignore = "Requires GLIDE_* env vars plus network access"]
    async fn glide_table_is_readable_with_real_credentials() {
        let _ = dotenvy::dotenv();

        let config = GlideConfig::from_env().expect("GLIDE_* env vars should be set");
        let table = GlideTable::new(&config).unwrap();

        let rows = table
            .get()
            .await
            .unwrap_or_else(|error| panic!("Glide read failed: {error}"));
        assert!(rows.iter().all(|row| row.id().is_some()));
    }
}
