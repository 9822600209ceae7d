use std::io::{BufRead, Write};

use rand::SeedableRng;
use rand::rngs::StdRng;
use services::TrainerService;
use vocab_core::model::Level;

use super::session::{self, Outcome};
use crate::console::Console;

pub async fn execute<R: BufRead, W: Write>(
    trainer: &mut TrainerService,
    console: &mut Console<R, W>,
    level: Level,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let plan = trainer.start_practice(level, &mut rng);
    console.say(plan.to_string())?;
    if !plan.is_ready() {
        return Ok(());
    }
    match session::run(trainer, console).await? {
        Outcome::Completed(_) => console.say("Run `vocab stats` to see your progress.")?,
        Outcome::Quit => {}
    }
    Ok(())
}
