use std::io::{BufRead, Write};

use services::TrainerService;

use crate::console::Console;

/// Erase all progress. Without `--yes` the learner must confirm twice.
pub async fn execute<R: BufRead, W: Write>(
    trainer: &mut TrainerService,
    console: &mut Console<R, W>,
    yes: bool,
) -> anyhow::Result<()> {
    if !yes {
        let confirmed = console.confirm("Are you sure you want to reset all progress?")?
            && console.confirm("This cannot be undone. Really reset?")?;
        if !confirmed {
            console.say("Reset cancelled.")?;
            return Ok(());
        }
    }

    trainer.reset().await?;
    console.say("Progress reset successfully!")?;
    Ok(())
}
