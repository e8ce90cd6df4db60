use eatreal_model::{
    answer::AnswerSet,
    metrics::DerivedMetrics,
    question::{catalog, ids, QuestionDefinition, Rejection},
};
use log::debug;

/// Where a session stands. `Active` always holds the index of an existing
/// question; once the last one is answered the session is `Complete`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Active(usize),
    Complete,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("questionnaire is already complete")]
    AlreadyComplete,
}

/// Result of an accepted answer.
#[derive(Clone, Debug, PartialEq)]
pub struct Advance {
    pub state: SessionState,
    /// Recomputed after the weight questions, for display.
    pub metrics: Option<DerivedMetrics>,
}

pub struct Session {
    questions: Vec<QuestionDefinition>,
    answers: AnswerSet,
    state: SessionState,
}

impl Session {
    pub fn new(questions: Vec<QuestionDefinition>) -> Self {
        let state = if questions.is_empty() {
            SessionState::Complete
        } else {
            SessionState::Active(0)
        };
        Self {
            questions,
            answers: AnswerSet::new(),
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuestionDefinition> {
        match self.state {
            SessionState::Active(index) => self.questions.get(index),
            SessionState::Complete => None,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics::from_answers(&self.answers)
    }

    /// Validates `raw` against the current question. A rejected answer
    /// leaves the session untouched.
    pub fn submit_answer(&mut self, raw: &str) -> Result<Advance, SessionError> {
        let SessionState::Active(index) = self.state else {
            return Err(SessionError::AlreadyComplete);
        };
        let question = &self.questions[index];
        let value = question.validate(raw)?;
        debug!("Accepted answer for {}: {}", question.id, value);

        let refresh_metrics = matches!(question.id, ids::CURRENT_WEIGHT | ids::TARGET_WEIGHT);
        self.answers.insert(question.id, value);

        self.state = if index + 1 < self.questions.len() {
            SessionState::Active(index + 1)
        } else {
            SessionState::Complete
        };

        Ok(Advance {
            state: self.state,
            metrics: refresh_metrics.then(|| self.metrics()),
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(catalog())
    }
}

#[cfg(test)]
mod tests {
    use eatreal_model::metrics::BmiCategory;

    use super::*;

    const ANSWERS: [&str; 12] = [
        "weight_loss",
        "male",
        "30",
        "175",
        "70",
        "45",
        "moderate",
        "omnivore",
        "none",
        "moderate",
        "yes",
        "jane@example.com",
    ];

    #[test]
    fn answer_count_tracks_index() {
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::Active(0));

        for (k, raw) in ANSWERS.iter().enumerate().take(ANSWERS.len() - 1) {
            session.submit_answer(raw).unwrap();
            assert_eq!(session.answers().len(), k + 1);
            assert_eq!(session.state(), SessionState::Active(k + 1));
        }
    }

    #[test]
    fn final_answer_completes_session() {
        let mut session = Session::default();
        let n = session.question_count();
        for raw in &ANSWERS[..n - 1] {
            session.submit_answer(raw).unwrap();
        }
        assert_eq!(session.state(), SessionState::Active(n - 1));

        let advance = session.submit_answer(ANSWERS[n - 1]).unwrap();
        assert_eq!(advance.state, SessionState::Complete);
        assert!(session.is_complete());
        assert_eq!(session.current_question(), None);
        assert_eq!(session.answers().len(), n);
    }

    #[test]
    fn rejected_answer_leaves_session_unchanged() {
        let mut session = Session::default();
        session.submit_answer("weight_loss").unwrap();
        session.submit_answer("female").unwrap();

        let before = session.answers().clone();
        for raw in ["15", "101", "abc", ""] {
            assert!(matches!(
                session.submit_answer(raw),
                Err(SessionError::Rejected(_))
            ));
            assert_eq!(session.state(), SessionState::Active(2));
            assert_eq!(session.answers(), &before);
        }

        session.submit_answer("16").unwrap();
        assert_eq!(session.answers().number("age"), Some(16.0));
    }

    #[test]
    fn weight_answers_refresh_metrics() {
        let mut session = Session::default();
        for raw in &ANSWERS[..4] {
            assert_eq!(session.submit_answer(raw).unwrap().metrics, None);
        }

        let current = session.submit_answer(ANSWERS[4]).unwrap().metrics.unwrap();
        assert_eq!(
            current.current_bmi.map(|b| b.category),
            Some(BmiCategory::Healthy)
        );

        let target = session.submit_answer(ANSWERS[5]).unwrap().metrics.unwrap();
        assert_eq!(
            target.target_bmi.map(|b| b.category),
            Some(BmiCategory::Underweight)
        );

        assert_eq!(session.submit_answer(ANSWERS[6]).unwrap().metrics, None);
    }

    #[test]
    fn complete_session_rejects_more_answers() {
        let mut session = Session::default();
        for raw in ANSWERS {
            session.submit_answer(raw).unwrap();
        }
        let answers = session.answers().clone();

        assert_eq!(
            session.submit_answer("again@example.com"),
            Err(SessionError::AlreadyComplete)
        );
        assert_eq!(session.answers(), &answers);
    }

    #[test]
    fn empty_questionnaire_starts_complete() {
        let session = Session::new(Vec::new());
        assert!(session.is_complete());
    }
}
