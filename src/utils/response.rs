use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn success<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn created<T>(data: T, message: impl Into<String>) -> Response
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        message: message.into(),
        data: Some(data),
    };
    (StatusCode::CREATED, Json(body)).into_response()
}

pub fn empty_success(message: impl Into<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: true,
        message: message.into(),
        data: None,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn error(message: impl Into<String>, detail: Option<String>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        success: false,
        message: message.into(),
        error: detail,
    };
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_shape() {
        let body = ApiResponse {
            success: true,
            message: "Movies data fetched successfully".to_string(),
            data: Some(json!([{"title": "Dune"}])),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["message"], json!("Movies data fetched successfully"));
        assert!(value["data"].is_array());
    }

    #[test]
    fn empty_success_omits_data_field() {
        let body: ApiResponse<()> = ApiResponse {
            success: true,
            message: "Movie deleted successfully".to_string(),
            data: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("data").is_none());
    }

    #[test]
    fn error_envelope_carries_optional_detail() {
        let body = ApiErrorResponse {
            success: false,
            message: "Movie not found".to_string(),
            error: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], json!(false));
        assert!(value.get("error").is_none());

        let body = ApiErrorResponse {
            success: false,
            message: "Validation failed".to_string(),
            error: Some("numberOfTickets must be between 1 and 10".to_string()),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value["error"],
            json!("numberOfTickets must be between 1 and 10")
        );
    }
}
