//! Request and response payloads for the weather backend's REST endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::{UserId, ZipCode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<ZipCode>,
}

/// Body shared by zip creation (POST) and update (PUT); only the verb differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveZipRequest {
    pub zip: ZipCode,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub zip: ZipCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub high: f64,
    pub low: f64,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZipCode;

    #[test]
    fn save_zip_request_uses_camel_case_user_id() {
        let request = SaveZipRequest {
            zip: ZipCode::parse("90210").expect("valid zip"),
            user_id: UserId("u1".to_string()),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["zip"], "90210");
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn login_response_zip_is_optional() {
        let without: LoginResponse =
            serde_json::from_str(r#"{"id":"u1"}"#).expect("deserialize");
        assert_eq!(without.id, "u1");
        assert!(without.zip.is_none());

        let with: LoginResponse =
            serde_json::from_str(r#"{"id":"u2","zip":"10001"}"#).expect("deserialize");
        assert_eq!(with.zip.map(|z| z.to_string()), Some("10001".to_string()));
    }

    #[test]
    fn register_response_tolerates_missing_id() {
        let body: RegisterResponse = serde_json::from_str("{}").expect("deserialize");
        assert!(body.id.is_empty());
    }
}
