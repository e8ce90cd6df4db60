pub mod session;
pub mod terminal;
pub mod wizard;

use std::env;

use dotenv::dotenv;

pub use session::{Advance, Session, SessionError, SessionState};
pub use wizard::{Step, Submission, Wizard, WizardError};

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Backend base URL, from `EATREAL_API_URL` or `.env`.
pub fn api_url() -> String {
    dotenv().ok();
    env::var("EATREAL_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned())
}
