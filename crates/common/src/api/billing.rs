use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::{decode_json, display_value, endpoint, ApiError, ApiRequest};

/// GET /billing/limits
#[derive(Debug, Clone, Copy)]
pub struct GetBillingRequest;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySpend {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub amount: serde_json::Value,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingLimits {
    #[serde(default)]
    pub monthly_spend: Option<MonthlySpend>,
}

impl BillingLimits {
    /// `<symbol><amount>`, or `$N/A` when the API reports nothing.
    pub fn spend_to_date(&self) -> String {
        match &self.monthly_spend {
            Some(spend) => format!("{}{}", spend.currency_symbol, display_value(&spend.amount)),
            None => "$N/A".to_string(),
        }
    }
}

impl ApiRequest for GetBillingRequest {
    type Response = BillingLimits;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        let url = endpoint(base_url, &["billing", "limits"])?;
        Ok(client.get(url))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        decode_json(status, body)
    }
}
