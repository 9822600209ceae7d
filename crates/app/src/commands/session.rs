use std::io::{BufRead, Write};

use services::TrainerService;
use vocab_core::model::{SessionCompletion, SessionStep, Word};

use crate::console::{Console, Decision};

/// How an interactive session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed(SessionCompletion),
    Quit,
}

/// Show words one at a time until the session ends or the learner quits.
///
/// Every decision is saved before the next word is shown.
pub async fn run<R: BufRead, W: Write>(
    trainer: &mut TrainerService,
    console: &mut Console<R, W>,
) -> anyhow::Result<Outcome> {
    loop {
        let Some(word) = trainer.current().cloned() else {
            return Ok(Outcome::Quit);
        };
        let (position, total) = trainer.runner().position().unwrap_or((0, 0));
        show_card(trainer, console, &word, position, total)?;

        let step = match console.decide()? {
            Decision::Known => trainer.mark_known().await?,
            Decision::Review => trainer.mark_for_review().await?,
            Decision::Quit => {
                trainer.exit_session();
                console.say("Your progress is saved.")?;
                return Ok(Outcome::Quit);
            }
        };

        if let SessionStep::Ended(completion) = step {
            console.say("")?;
            console.say(completion.message())?;
            return Ok(Outcome::Completed(completion));
        }
    }
}

fn show_card<R: BufRead, W: Write>(
    trainer: &TrainerService,
    console: &mut Console<R, W>,
    word: &Word,
    position: usize,
    total: usize,
) -> std::io::Result<()> {
    let stats = trainer.stats();
    let meaning = non_empty(word.meaning()).unwrap_or("No meaning available");
    let example = non_empty(word.sample_sentence()).unwrap_or("No example available");

    console.say("")?;
    console.say(format!("[{position}/{total}] {} ({})", word.key(), word.level()))?;
    console.say(format!("  Meaning: {meaning}"))?;
    console.say(format!("  Example: {example}"))?;
    console.say(format!(
        "Known: {} | Review: {}",
        stats.total_known, stats.total_review
    ))
}

fn non_empty(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}
