use std::io::{self, BufRead, Write};

use eatreal_model::{
    metrics::DerivedMetrics,
    question::{QuestionDefinition, QuestionKind},
};

use crate::wizard::{Step, Wizard, WizardError};

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Submitted,
    Failed,
    Abandoned,
}

fn print_question<W: Write>(
    out: &mut W,
    question: &QuestionDefinition,
    number: usize,
    total: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[{}/{}] {}", number, total, question.title)?;
    match &question.kind {
        QuestionKind::Choice { options } => {
            for (i, option) in options.iter().enumerate() {
                writeln!(out, "  {}) {}", i + 1, option.label)?;
            }
        }
        QuestionKind::Numeric { range, unit } => {
            writeln!(out, "  ({} to {}{})", range.start(), range.end(), unit)?;
        }
        QuestionKind::Email { .. } => {}
    }
    write!(out, "> ")?;
    out.flush()
}

fn print_metrics<W: Write>(out: &mut W, metrics: &DerivedMetrics) -> io::Result<()> {
    if let Some(bmi) = metrics.current_bmi {
        writeln!(out, "Your current BMI: {}", bmi)?;
    }
    if let Some(bmi) = metrics.target_bmi {
        writeln!(out, "Your target BMI: {}", bmi)?;
    }
    Ok(())
}

fn print_summary<W: Write>(out: &mut W, metrics: &DerivedMetrics) -> io::Result<()> {
    if let Some(calories) = metrics.calories {
        writeln!(out, "Daily calories: {} kcal", calories)?;
    }
    if let Some(macros) = metrics.macros {
        writeln!(
            out,
            "Protein {}g, carbs {}g, fat {}g",
            macros.protein_g, macros.carbs_g, macros.fat_g
        )?;
    }
    Ok(())
}

fn ask_retry<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "Something went wrong sending your plan. Try again? [y/N] ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

/// Asks every question on `out`, reading answers line by line from `input`,
/// then reports the submission. End of input abandons the session.
pub async fn run<R: BufRead, W: Write>(
    wizard: &mut Wizard,
    input: &mut R,
    out: &mut W,
) -> io::Result<Outcome> {
    let total = wizard.session().question_count();

    loop {
        let Some(question) = wizard.session().current_question().cloned() else {
            break;
        };
        let number = wizard.session().answers().len() + 1;
        print_question(out, &question, number, total)?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(Outcome::Abandoned);
        }

        match wizard.answer(&line).await {
            Ok(Step::Next { metrics, .. }) => {
                if let Some(metrics) = metrics {
                    print_metrics(out, &metrics)?;
                }
            }
            Ok(Step::Submitted) => {
                print_summary(out, &wizard.session().metrics())?;
                writeln!(out, "Your plan is on its way to your inbox!")?;
                return Ok(Outcome::Submitted);
            }
            Ok(Step::SubmissionFailed(e)) => {
                writeln!(out, "Could not send your plan: {}", e)?;
                break;
            }
            Err(WizardError::Session(e)) => writeln!(out, "Invalid answer: {}", e)?,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Outcome::Failed);
            }
        }
    }

    while ask_retry(input, out)? {
        match wizard.retry().await {
            Ok(Step::Submitted) => {
                print_summary(out, &wizard.session().metrics())?;
                writeln!(out, "Your plan is on its way to your inbox!")?;
                return Ok(Outcome::Submitted);
            }
            Ok(Step::SubmissionFailed(e)) => writeln!(out, "Could not send your plan: {}", e)?,
            Ok(Step::Next { .. }) => {}
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                return Ok(Outcome::Failed);
            }
        }
    }
    Ok(Outcome::Failed)
}
