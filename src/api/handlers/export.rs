// src/api/handlers/export.rs

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Local};
use log::{error, info};

use crate::api::handlers::generator::TIMESTAMP_FORMAT;
use crate::api::session::HistoryStore;
use crate::api::types::{ErrorResponse, ExportContent, ExportEntry, ExportFormat, ExportRequest, ExportResponse};
use crate::api::utils::{error_response, resolve_session, respond};

/// Export passwords
///
/// Renders a password list as text, CSV or JSON. When no passwords are given
/// the session history is exported instead.
#[utoipa::path(
    post,
    path = "/export",
    tag = "Export",
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Rendered export", body = ExportResponse),
        (status = 400, description = "Unsupported format", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn export_passwords(
    req: HttpRequest,
    history: web::Data<HistoryStore>,
    export_req: web::Json<ExportRequest>,
) -> HttpResponse {
    let session = resolve_session(&req);
    let ExportRequest { format, passwords } = export_req.into_inner();

    let format = match parse_format(format.as_deref()) {
        Some(format) => format,
        None => return error_response(HttpResponse::BadRequest(), &session, "Unsupported format"),
    };

    let passwords = if passwords.is_empty() {
        match history.list(&session.id) {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| entry.password)
                .filter(|password| !password.is_empty())
                .collect(),
            Err(e) => {
                error!("Error exporting passwords: {}", e);
                return error_response(
                    HttpResponse::InternalServerError(),
                    &session,
                    format!("Error exporting passwords: {}", e),
                );
            }
        }
    } else {
        passwords
    };

    info!("📤 Exporting {} passwords as {}", passwords.len(), format);

    respond(HttpResponse::Ok(), &session).json(ExportResponse {
        content: render_export(format, &passwords, Local::now()),
        format,
    })
}

fn parse_format(format: Option<&str>) -> Option<ExportFormat> {
    match format.map(str::to_ascii_lowercase).as_deref() {
        None | Some("text") => Some(ExportFormat::Text),
        Some("csv") => Some(ExportFormat::Csv),
        Some("json") => Some(ExportFormat::Json),
        Some(_) => None,
    }
}

pub fn render_export(format: ExportFormat, passwords: &[String], now: DateTime<Local>) -> ExportContent {
    match format {
        ExportFormat::Text => ExportContent::Text(passwords.join("\n")),
        ExportFormat::Csv => {
            let date = now.format("%Y-%m-%d").to_string();
            let mut csv = String::from("Password,Strength,Generated\n");
            for password in passwords {
                csv.push_str(&format!("{},N/A,{}\n", csv_field(password), date));
            }
            ExportContent::Text(csv)
        }
        ExportFormat::Json => {
            let generated = now.format(TIMESTAMP_FORMAT).to_string();
            ExportContent::Entries(
                passwords
                    .iter()
                    .map(|password| ExportEntry {
                        password: password.clone(),
                        generated: generated.clone(),
                    })
                    .collect(),
            )
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!(parse_format(None), Some(ExportFormat::Text));
        assert_eq!(parse_format(Some("CSV")), Some(ExportFormat::Csv));
        assert_eq!(parse_format(Some("json")), Some(ExportFormat::Json));
        assert_eq!(parse_format(Some("xml")), None);
    }

    #[test]
    fn text_is_newline_joined() {
        let passwords = vec!["a1".to_string(), "b2".to_string()];
        assert_eq!(
            render_export(ExportFormat::Text, &passwords, fixed_now()),
            ExportContent::Text("a1\nb2".to_string())
        );
    }

    #[test]
    fn csv_quotes_special_fields() {
        let passwords = vec!["plain".to_string(), "with,comma".to_string()];
        let ExportContent::Text(csv) = render_export(ExportFormat::Csv, &passwords, fixed_now()) else {
            panic!("csv export should render text");
        };
        assert_eq!(
            csv,
            "Password,Strength,Generated\nplain,N/A,2026-03-14\n\"with,comma\",N/A,2026-03-14\n"
        );
    }

    #[test]
    fn json_entries_carry_timestamp() {
        let passwords = vec!["p".to_string()];
        assert_eq!(
            render_export(ExportFormat::Json, &passwords, fixed_now()),
            ExportContent::Entries(vec![ExportEntry {
                password: "p".to_string(),
                generated: "2026-03-14 15:09:26".to_string(),
            }])
        );
    }
}
