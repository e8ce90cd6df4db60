use std::sync::Arc;

use actix_web::{
    get,
    http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType},
    post, web, HttpResponse,
};
use eatreal_model::{
    answer::AnswerSet,
    dto::{EmailRequest, PaymentSettings, StatusResponse},
    plan::PlanRequest,
    question::{catalog, ids},
};
use log::{error, info};
use serde::Deserialize;

use crate::{
    email::{self, PLAN_SUBJECT, PURCHASE_SUBJECT},
    error::ApiError,
    generator::{generate_plan, PlanGenerator},
    mailer::{Mailer, Message},
    AppState,
};

pub const EBOOK_FILENAME: &str = "The-Food-Bible.pdf";

fn generator(state: &AppState) -> Result<Arc<dyn PlanGenerator>, ApiError> {
    state.generator.clone().ok_or_else(|| {
        error!("Plan generation requested but OPENAI_API_KEY is not set");
        ApiError::NotConfigured("Plan generation")
    })
}

fn mailer(state: &AppState) -> Result<Arc<dyn Mailer>, ApiError> {
    state.mailer.clone().ok_or_else(|| {
        error!("Email requested but mail settings are missing");
        ApiError::NotConfigured("Email delivery")
    })
}

fn validate_email(raw: &str) -> Result<String, ApiError> {
    catalog()
        .into_iter()
        .find(|q| q.id == ids::EMAIL)
        .ok_or(ApiError::NotFound)?
        .validate(raw)
        .map(|value| value.to_string())
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn sample_profile() -> AnswerSet {
    let mut profile = AnswerSet::new();
    profile.insert(ids::GOAL, "weight_loss");
    profile.insert(ids::GENDER, "male");
    profile.insert(ids::AGE, 30.0);
    profile.insert(ids::HEIGHT, 180.0);
    profile.insert(ids::CURRENT_WEIGHT, 85.0);
    profile.insert(ids::TARGET_WEIGHT, 75.0);
    profile.insert(ids::ACTIVITY, "moderate");
    profile.insert(ids::DIET_PREFERENCE, "omnivore");
    profile.insert(ids::ALLERGIES, "none");
    profile.insert(ids::COOKING_TIME, "moderate");
    profile.insert(ids::MEAL_PREP, "yes");
    profile
}

#[post("/api/generate-meal-plan")]
async fn generate_meal_plan(
    state: web::Data<AppState>,
    request: web::Json<PlanRequest>,
) -> Result<web::Json<StatusResponse>, ApiError> {
    let request = request.into_inner();
    let to = validate_email(&request.email)?;
    let generator = generator(&state)?;
    let mailer = mailer(&state)?;

    info!("Generating meal plan for {}", to);
    let content = generate_plan(generator.as_ref(), &request).await?;
    let html = email::render_plan(&content, &request.user_profile);

    mailer
        .send(&Message {
            to,
            subject: PLAN_SUBJECT.to_owned(),
            html,
        })
        .await?;
    Ok(web::Json(StatusResponse::ok()))
}

#[get("/api/test")]
async fn test_meal_plan(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let generator = generator(&state)?;
    let request = PlanRequest {
        prompt: String::new(),
        email: String::new(),
        user_profile: sample_profile(),
    };

    let content = generate_plan(generator.as_ref(), &request).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(email::render_plan(&content, &request.user_profile)))
}

#[derive(Deserialize)]
struct PaymentQuery {
    discount: Option<String>,
}

#[get("/api/get-paypal-config")]
async fn get_paypal_config(
    state: web::Data<AppState>,
    query: web::Query<PaymentQuery>,
) -> Result<web::Json<PaymentSettings>, ApiError> {
    let payment = &state.config.payment;
    let client_id = payment.client_id.clone().ok_or_else(|| {
        error!("PAYPAL_CLIENT_ID is not set");
        ApiError::PaymentConfig
    })?;

    let quote = payment.pricing.quote(query.discount.as_deref());
    info!(
        "Quoted {} cents {} (discount {}%)",
        quote.amount_cents, quote.currency, quote.discount_percent
    );
    Ok(web::Json(PaymentSettings::new(
        client_id,
        payment.environment.clone(),
        &quote,
    )))
}

#[post("/api/send-email")]
async fn send_email(
    state: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> Result<web::Json<StatusResponse>, ApiError> {
    let to = validate_email(&request.email)?;
    let mailer = mailer(&state)?;
    let download_url = format!("{}/api/download", state.config.public_url);

    mailer
        .send(&Message {
            to,
            subject: PURCHASE_SUBJECT.to_owned(),
            html: email::render_purchase(&download_url),
        })
        .await?;
    Ok(web::Json(StatusResponse::ok()))
}

#[get("/api/download")]
async fn download(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let path = state.config.ebook_path.as_ref().ok_or(ApiError::NotFound)?;
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        error!("Could not read {}: {}", path.display(), e);
        ApiError::NotFound
    })?;

    info!("Serving e-book ({} bytes)", bytes.len());
    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EBOOK_FILENAME.to_owned())],
        })
        .body(bytes))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_meal_plan)
        .service(test_meal_plan)
        .service(get_paypal_config)
        .service(send_email)
        .service(download);
}
