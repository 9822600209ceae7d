use std::io::{BufRead, Write};

use services::{SessionPlan, TrainerService};

use super::session::{self, Outcome};
use crate::console::Console;

/// Learn loop: run sessions at the current level and offer to move up once it
/// is mastered.
pub async fn execute<R: BufRead, W: Write>(
    trainer: &mut TrainerService,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    let mut plan = trainer.start_learn();
    loop {
        match plan {
            SessionPlan::Ready(_) => {
                console.say(plan.to_string())?;
                if let Outcome::Completed(done) = session::run(trainer, console).await? {
                    console.say(format!(
                        "Run `vocab learn` to continue or `vocab practice --level {}` to review.",
                        done.level
                    ))?;
                }
                return Ok(());
            }
            SessionPlan::AdvancePrompt { .. } => {
                if console.confirm(&plan.to_string())? {
                    plan = trainer.accept_advance().await?;
                } else {
                    trainer.decline_advance();
                    return Ok(());
                }
            }
            SessionPlan::AllLevelsComplete
            | SessionPlan::NothingToReview { .. }
            | SessionPlan::EmptyLevel { .. } => {
                console.say(plan.to_string())?;
                return Ok(());
            }
        }
    }
}
