use std::io::{BufRead, Write};

use services::TrainerService;

use crate::console::Console;

pub fn execute<R: BufRead, W: Write>(
    trainer: &TrainerService,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    let stats = trainer.stats();
    console.say(format!("Known words:   {}", stats.total_known))?;
    console.say(format!("Review words:  {}", stats.total_review))?;
    console.say(format!("Current level: {}", stats.current_level))?;
    console.say("")?;
    for (level, progress) in stats.level_progress.iter() {
        console.say(format!(
            "{level}  {}/{} known ({}%)",
            progress.known(),
            progress.total(),
            progress.percent()
        ))?;
    }
    Ok(())
}
