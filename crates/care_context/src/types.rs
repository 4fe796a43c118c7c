use serde::{Deserialize, Serialize};

/// Body for the OTP generation step. Field names are the wire names the
/// collaborator expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOtpRequest {
    #[serde(rename = "healthID")]
    pub health_id: String,
    #[serde(rename = "authenticationMode")]
    pub authentication_mode: String,
    #[serde(rename = "healthIdNumber", default, skip_serializing_if = "Option::is_none")]
    pub health_id_number: Option<String>,
}

/// Body for the OTP validation / care-context creation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateOtpRequest {
    #[serde(rename = "healthID")]
    pub health_id: String,
    #[serde(rename = "visitCode", default, skip_serializing_if = "Option::is_none")]
    pub visit_code: Option<String>,
    #[serde(rename = "beneficiaryID", default, skip_serializing_if = "Option::is_none")]
    pub beneficiary_id: Option<String>,
    #[serde(rename = "beneficiaryRegID", default, skip_serializing_if = "Option::is_none")]
    pub beneficiary_reg_id: Option<String>,
    pub otp: String,
    #[serde(rename = "txnId")]
    pub txn_id: String,
    #[serde(rename = "visitcategory", default, skip_serializing_if = "Option::is_none")]
    pub visit_category: Option<String>,
    #[serde(rename = "healthIdNumber", default, skip_serializing_if = "Option::is_none")]
    pub health_id_number: Option<String>,
}
