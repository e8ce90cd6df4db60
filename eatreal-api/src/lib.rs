use std::sync::Arc;

use config::Config;
use generator::{OpenAiGenerator, PlanGenerator};
use log::warn;
use mailer::{HttpMailer, Mailer};

pub mod config;
pub mod email;
pub mod error;
pub mod generator;
pub mod mailer;
pub mod routes;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub config: Config,
    pub generator: Option<Arc<dyn PlanGenerator>>,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new(
        config: Config,
        generator: Option<Arc<dyn PlanGenerator>>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Self {
        Self {
            config,
            generator,
            mailer,
        }
    }

    pub fn from_config(config: Config) -> Self {
        let generator = config.openai.clone().map(|c| {
            Arc::new(OpenAiGenerator::new(c)) as Arc<dyn PlanGenerator>
        });
        if generator.is_none() {
            warn!("Plan generation disabled");
        }
        let mailer = config
            .mail
            .clone()
            .map(|c| Arc::new(HttpMailer::new(c)) as Arc<dyn Mailer>);
        if mailer.is_none() {
            warn!("Email delivery disabled");
        }
        Self::new(config, generator, mailer)
    }
}
