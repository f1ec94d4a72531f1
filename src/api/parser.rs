// src/api/parser.rs
//! Turns raw HTTP responses into domain values or typed errors.

use super::client::ApiResponse;
use super::responses::{ApiInfoResponse, ErrorResponse, SearchResponse, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, ContentErrorCode};
use crate::model::{Document, PageResult};
use reqwest::StatusCode;

/// Parse any Prismic API response body, mapping error statuses.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success_body(&result.data, &result.url)
    } else {
        Err(parse_error_body(&result.data, result.status, &result.url))
    }
}

fn parse_success_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!(
            "{} from {} (body: {})",
            e,
            url,
            body_preview(body)
        ))
    })
}

fn parse_error_body(body: &str, status: StatusCode, url: &str) -> AppError {
    let parsed = serde_json::from_str::<ErrorResponse>(body).ok();

    let code = parsed
        .as_ref()
        .and_then(|e| e.kind.as_deref())
        .and_then(ContentErrorCode::from_api_response)
        .unwrap_or_else(|| ContentErrorCode::from_http_status(status.as_u16()));

    let message = parsed
        .and_then(|e| e.description())
        .unwrap_or_else(|| format!("HTTP {} from {}", status, url));

    log::debug!("Prismic error {} ({}) from {}: {}", code, status, url, message);

    AppError::ContentService {
        code,
        message,
        status,
    }
}

fn body_preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let preview: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", preview)
    } else {
        body.to_string()
    }
}

/// Extracts the master ref from the repository metadata response.
pub fn parse_master_ref(result: ApiResponse<String>) -> Result<String, AppError> {
    let info: ApiInfoResponse = parse_api_response(result)?;
    for reference in &info.refs {
        log::debug!(
            "Repository ref {} ({}){}",
            reference.id,
            reference.label.as_deref().unwrap_or("unlabelled"),
            if reference.is_master_ref { " [master]" } else { "" }
        );
    }
    info.master_ref()
        .map(str::to_string)
        .ok_or(AppError::MissingMasterRef)
}

/// Parses one page of search results into listing entries.
pub fn parse_search_page(result: ApiResponse<String>) -> Result<PageResult, AppError> {
    let response: SearchResponse = parse_api_response(result)?;
    log::debug!(
        "Search page {}/{}: {} of {} results ({} per page)",
        response.page,
        response.total_pages,
        response.results.len(),
        response.total_results_size,
        response.results_per_page
    );
    if let Some(prev) = &response.prev_page {
        log::trace!("Previous page: {}", prev);
    }
    response.to_domain()
}

/// Parses a UID lookup: the first search hit, if any.
pub fn parse_single_document(result: ApiResponse<String>) -> Result<Option<Document>, AppError> {
    let response: SearchResponse = parse_api_response(result)?;
    response
        .results
        .into_iter()
        .next()
        .map(ToDomain::<Document>::to_domain)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://blog.cdn.prismic.io/api/v2/documents/search".to_string(),
        }
    }

    #[test]
    fn typed_error_body_wins_over_status() {
        let result = parse_search_page(response(
            StatusCode::NOT_FOUND,
            r#"{"type":"api_notfound_error","message":"Ref not found. Ensure you have the correct ref and try again."}"#,
        ));

        match result {
            Err(AppError::ContentService { code, message, .. }) => {
                assert_eq!(code, ContentErrorCode::NotFound);
                assert!(message.starts_with("Ref not found"));
            }
            other => panic!("expected ContentService error, got {:?}", other),
        }
    }

    #[test]
    fn unauthorized_body_uses_error_field() {
        let result = parse_master_ref(response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Invalid access token","oauth_initiate":"https://blog.prismic.io/auth"}"#,
        ));

        match result {
            Err(AppError::ContentService { code, message, .. }) => {
                assert_eq!(code, ContentErrorCode::Unauthorized);
                assert_eq!(message, "Invalid access token");
            }
            other => panic!("expected ContentService error, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status() {
        let result = parse_search_page(response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"));
        assert!(matches!(
            result,
            Err(AppError::ContentService {
                code: ContentErrorCode::ServiceUnavailable,
                ..
            })
        ));
    }

    #[test]
    fn malformed_success_body_is_reported_with_preview() {
        let body = "x".repeat(500);
        match parse_search_page(response(StatusCode::OK, &body)) {
            Err(AppError::MalformedResponse(message)) => {
                assert!(message.contains("..."));
                assert!(message.len() < 400);
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn master_ref_is_selected() {
        let body = r#"{"refs":[
            {"id":"preview","ref":"YGabc","label":"Spring release","isMasterRef":false},
            {"id":"master","ref":"YFmaster","label":"Master","isMasterRef":true}
        ]}"#;
        assert_eq!(
            parse_master_ref(response(StatusCode::OK, body)).unwrap(),
            "YFmaster"
        );

        let no_master = r#"{"refs":[]}"#;
        assert!(matches!(
            parse_master_ref(response(StatusCode::OK, no_master)),
            Err(AppError::MissingMasterRef)
        ));
    }

    #[test]
    fn empty_uid_lookup_is_none() {
        let body = r#"{"page":1,"results_per_page":1,"total_results_size":0,"total_pages":0,"next_page":null,"prev_page":null,"results":[]}"#;
        assert!(parse_single_document(response(StatusCode::OK, body))
            .unwrap()
            .is_none());
    }
}
