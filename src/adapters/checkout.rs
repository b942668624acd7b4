use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        services::checkout::{CheckoutInput, create_checkout_session},
    },
    axum::{Json, extract::State},
    serde::Serialize,
};

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
}

pub async fn checkout_handler(
    State(state): State<AppState>,
    Json(input): Json<CheckoutInput>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let session = create_checkout_session(&*state.provider, &input).await?;
    Ok(Json(CheckoutResponse {
        redirect_url: session.redirect_url,
    }))
}
