use std::{env, error::Error, fs::File, io::BufReader};

use eatreal_model::answer::AnswerSet;
use eatreal_questionnaire::{Session, Step, Wizard};
use log::{info, warn};

/// Replays a saved profile through the questionnaire and submits it.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let path = env::args().nth(1).unwrap_or_else(|| "profile.json".to_owned());
    let file = File::open(&path)?;
    let profile: AnswerSet = serde_json::from_reader(BufReader::new(file))?;
    info!("Loaded {} answers from {}", profile.len(), path);

    let client = Box::new(eatreal_client::create(eatreal_questionnaire::api_url()));
    let mut wizard = Wizard::new(Session::default(), client);

    while let Some(question) = wizard.session().current_question() {
        let id = question.id;
        let Some(value) = profile.get(id) else {
            return Err(format!("profile has no answer for {}", id).into());
        };
        match wizard.answer(&value.to_string()).await? {
            Step::Next { .. } => {}
            Step::Submitted => {
                info!("Plan request submitted");
                return Ok(());
            }
            Step::SubmissionFailed(e) => {
                warn!("Plan request failed");
                return Err(e.into());
            }
        }
    }
    Ok(())
}
