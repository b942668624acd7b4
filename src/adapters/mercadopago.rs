use {
    crate::domain::{
        error::ReconcileError,
        metadata::CheckoutRequest,
        payment::PaymentStatus,
        provider::{CheckoutSession, FetchedPayment, PaymentLookup, PaymentProvider},
    },
    reqwest::StatusCode,
    serde::Deserialize,
    std::{future::Future, pin::Pin},
};

const API_BASE: &str = "https://api.mercadopago.com";

pub struct MercadoPagoProvider {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl MercadoPagoProvider {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token: access_token.into(),
            base_url: API_BASE.to_string(),
        }
    }

    /// Point the client at a different host, e.g. a local stub server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Deserialize)]
struct MpPayment {
    status: Option<String>,
    metadata: Option<serde_json::Value>,
    additional_info: Option<MpAdditionalInfo>,
}

#[derive(Deserialize, Default)]
struct MpAdditionalInfo {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct MpPreferenceResponse {
    init_point: Option<String>,
    sandbox_init_point: Option<String>,
}

impl MercadoPagoProvider {
    async fn get_payment_inner(&self, id: &str) -> Result<PaymentLookup, ReconcileError> {
        let url = format!("{}/v1/payments/{id}", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| ReconcileError::Provider(format!("payment lookup: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(PaymentLookup::NotFound);
        }
        if !response.status().is_success() {
            return Err(ReconcileError::Provider(format!(
                "payment lookup for {id} failed with {}",
                response.status()
            )));
        }

        let payment: MpPayment = response
            .json()
            .await
            .map_err(|e| ReconcileError::Provider(format!("payment response body: {e}")))?;

        Ok(PaymentLookup::Found(FetchedPayment {
            status: PaymentStatus::from(payment.status.as_deref().unwrap_or_default()),
            metadata: payment.metadata.filter(|v| !v.is_null()),
            items: payment
                .additional_info
                .unwrap_or_default()
                .items,
        }))
    }

    async fn create_checkout_inner(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ReconcileError> {
        let url = format!("{}/checkout/preferences", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(request)
            .send()
            .await
            .map_err(|e| ReconcileError::Provider(format!("create preference: {e}")))?;

        if !response.status().is_success() {
            return Err(ReconcileError::Provider(format!(
                "create preference failed with {}",
                response.status()
            )));
        }

        let preference: MpPreferenceResponse = response
            .json()
            .await
            .map_err(|e| ReconcileError::Provider(format!("preference response body: {e}")))?;

        let redirect_url = preference
            .init_point
            .or(preference.sandbox_init_point)
            .ok_or_else(|| {
                ReconcileError::Provider("preference response missing init_point".into())
            })?;

        Ok(CheckoutSession { redirect_url })
    }
}

impl PaymentProvider for MercadoPagoProvider {
    fn get_payment(
        &self,
        id: &str,
    ) -> Pin<Box<dyn Future<Output = Result<PaymentLookup, ReconcileError>> + Send + '_>> {
        let id = id.to_string();
        Box::pin(async move { self.get_payment_inner(&id).await })
    }

    fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CheckoutSession, ReconcileError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(async move { self.create_checkout_inner(&request).await })
    }
}
