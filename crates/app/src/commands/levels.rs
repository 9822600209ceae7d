use std::io::{BufRead, Write};

use services::TrainerService;

use crate::console::Console;

/// Level picker overview: completion per level, current level marked.
pub fn execute<R: BufRead, W: Write>(
    trainer: &TrainerService,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    let stats = trainer.stats();
    for (level, progress) in stats.level_progress.iter() {
        let marker = if level == stats.current_level { '>' } else { ' ' };
        let note = if progress.total() == 0 {
            " (no words)"
        } else if progress.is_complete() {
            " (complete)"
        } else {
            ""
        };
        console.say(format!(
            "{marker} {level}  {:>3}%{note}",
            progress.percent()
        ))?;
    }
    Ok(())
}
