//! Newsletter subscriptions and sends.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;
use uuid::Uuid;

use liorian_core::error::AppError;
use liorian_entity::inbox::{NewsletterCampaign, NewsletterSubscriber};

use crate::dto::request::{SendNewsletterRequest, SubscribeRequest};
use crate::dto::response::{ApiResponse, SendNewsletterResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SubscribeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NewsletterSubscriber>>), ApiError> {
    let subscriber = NewsletterSubscriber {
        email: req.email.trim().to_lowercase(),
        name: req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        subscribed_at: state.clock.now(),
        source: req.source.unwrap_or_else(|| "website".to_string()),
    };

    let stored = subscriber.clone();
    state
        .subscribers
        .modify(move |subscribers| {
            if subscribers.iter().any(|s| s.email == stored.email) {
                return Err(AppError::conflict("This email is already subscribed"));
            }
            subscribers.push(stored);
            Ok(())
        })
        .await?;

    info!(source = %subscriber.source, "Newsletter subscription added");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(subscriber))))
}

/// GET /api/admin/newsletter/subscribers
pub async fn list_subscribers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<NewsletterSubscriber>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.subscribers.load().await?)))
}

/// DELETE /api/admin/newsletter/subscribers/{email}
pub async fn remove_subscriber(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<ApiResponse<NewsletterSubscriber>>, ApiError> {
    let email = email.trim().to_lowercase();
    let removed = state
        .subscribers
        .modify(move |subscribers| {
            let index = subscribers
                .iter()
                .position(|s| s.email == email)
                .ok_or_else(|| AppError::not_found(format!("Subscriber '{email}' not found")))?;
            Ok(subscribers.remove(index))
        })
        .await?;

    info!("Newsletter subscriber removed");
    Ok(Json(ApiResponse::ok(removed)))
}

/// POST /api/admin/newsletter/send
///
/// Records the campaign against the current subscriber count. Delivery
/// itself happens outside this service.
pub async fn send_newsletter(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SendNewsletterRequest>,
) -> Result<Json<ApiResponse<SendNewsletterResponse>>, ApiError> {
    let recipients = state.subscribers.load().await?.len();
    if recipients == 0 {
        return Err(AppError::validation("There are no subscribers to send to").into());
    }

    let campaign = NewsletterCampaign {
        id: Uuid::new_v4(),
        subject: req.subject,
        content: req.content,
        recipients,
        sent_at: state.clock.now(),
    };
    let campaign_id = campaign.id;

    state
        .campaigns
        .modify(move |campaigns| {
            campaigns.push(campaign);
            Ok(())
        })
        .await?;

    info!(%campaign_id, recipients, "Newsletter campaign recorded");
    Ok(Json(ApiResponse::ok(SendNewsletterResponse {
        campaign_id,
        recipients,
    })))
}

/// GET /api/admin/newsletter/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<NewsletterCampaign>>>, ApiError> {
    Ok(Json(ApiResponse::ok(state.campaigns.load().await?)))
}
