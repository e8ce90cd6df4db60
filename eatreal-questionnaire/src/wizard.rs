use eatreal_client::{Client, Error as ClientError};
use eatreal_model::{
    metrics::DerivedMetrics,
    plan::{MissingAnswer, PlanRequest},
};
use log::{error, info, warn};

use crate::session::{Session, SessionError, SessionState};

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    NotSubmitted,
    InFlight,
    Succeeded,
    Failed(ClientError),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    MissingAnswer(#[from] MissingAnswer),
    #[error("questionnaire is not complete yet")]
    Incomplete,
    #[error("plan request was already submitted")]
    AlreadySubmitted,
    #[error("no failed submission to retry")]
    NothingToRetry,
}

#[derive(Debug, PartialEq)]
pub enum Step {
    Next {
        index: usize,
        metrics: Option<DerivedMetrics>,
    },
    Submitted,
    SubmissionFailed(ClientError),
}

/// Drives a questionnaire session and sends the plan request once the last
/// question is answered. At most one request is sent per successful session.
pub struct Wizard {
    session: Session,
    client: Box<dyn Client>,
    submission: Submission,
}

impl Wizard {
    pub fn new(session: Session, client: Box<dyn Client>) -> Self {
        Self {
            session,
            client,
            submission: Submission::NotSubmitted,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub async fn answer(&mut self, raw: &str) -> Result<Step, WizardError> {
        let advance = self.session.submit_answer(raw)?;
        match advance.state {
            SessionState::Active(index) => Ok(Step::Next {
                index,
                metrics: advance.metrics,
            }),
            SessionState::Complete => self.submit().await,
        }
    }

    /// Sends the plan request for a complete session. Rejected while a
    /// request is in flight or after one succeeded.
    pub async fn submit(&mut self) -> Result<Step, WizardError> {
        if !self.session.is_complete() {
            return Err(WizardError::Incomplete);
        }
        match self.submission {
            Submission::InFlight | Submission::Succeeded => Err(WizardError::AlreadySubmitted),
            Submission::NotSubmitted | Submission::Failed(_) => self.send().await,
        }
    }

    /// Manual retry after a failed submission. A submission left `InFlight`
    /// by a dropped future never got an answer and is retried too.
    pub async fn retry(&mut self) -> Result<Step, WizardError> {
        match self.submission {
            Submission::Failed(_) | Submission::InFlight => {
                if self.submission == Submission::InFlight {
                    warn!("Previous meal plan request never completed, sending again");
                }
                self.send().await
            }
            Submission::Succeeded => Err(WizardError::AlreadySubmitted),
            Submission::NotSubmitted => Err(WizardError::NothingToRetry),
        }
    }

    async fn send(&mut self) -> Result<Step, WizardError> {
        let request = PlanRequest::from_answers(self.session.answers())?;
        self.submission = Submission::InFlight;
        info!("Submitting meal plan request for {}", request.email);
        match self.client.generate_meal_plan(&request).await {
            Ok(()) => {
                info!("Meal plan request accepted");
                self.submission = Submission::Succeeded;
                Ok(Step::Submitted)
            }
            Err(e) => {
                error!("Meal plan request failed: {}", e);
                self.submission = Submission::Failed(e.clone());
                Ok(Step::SubmissionFailed(e))
            }
        }
    }
}
