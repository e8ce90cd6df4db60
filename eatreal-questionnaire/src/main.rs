use std::error::Error;
use std::io;

use eatreal_questionnaire::{
    terminal::{self, Outcome},
    Session, Wizard,
};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    log4rs::init_file("log4rs.yml", Default::default())?;

    let url = eatreal_questionnaire::api_url();
    info!("Using plan service at {}", url);
    let client = Box::new(eatreal_client::create(url));
    let mut wizard = Wizard::new(Session::default(), client);

    let stdin = io::stdin();
    let outcome = terminal::run(&mut wizard, &mut stdin.lock(), &mut io::stdout()).await?;
    info!("Questionnaire finished: {:?}", outcome);

    if outcome == Outcome::Submitted {
        Ok(())
    } else {
        Err(format!("questionnaire ended without a plan: {:?}", outcome).into())
    }
}
