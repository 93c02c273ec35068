use anyhow::Result;
use auromind_core::breathing::{BreathingExercise, BreathingState, CYCLE_TICKS};
use auromind_core::{MeditationTimer, TimerStatus};
use std::io::{self, Write};

pub async fn run_timer(default_minutes: u32, minutes: Option<u32>) -> Result<()> {
    let mut timer = MeditationTimer::new(default_minutes);
    if let Some(minutes) = minutes {
        timer.select_preset(minutes).await?;
    }

    println!("Meditation timer. Press Ctrl-C to stop.");
    print!("{}", timer.snapshot().await.display());
    io::stdout().flush()?;
    timer.start().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let ticked = tokio::select! {
            ticked = timer.ticked() => Some(ticked),
            _ = &mut ctrl_c => None,
        };
        let Some(ticked) = ticked else {
            println!("\nStopped at {}", timer.snapshot().await.display());
            timer.close().await;
            return Ok(());
        };

        let snapshot = timer.snapshot().await;
        print!("\r{}", snapshot.display());
        io::stdout().flush()?;

        if !ticked || snapshot.status() == TimerStatus::Expired {
            break;
        }
    }

    println!("\nTime's up. Take a moment before you carry on.");
    log::info!("Meditation timer finished");
    Ok(())
}

pub async fn run_breathing(cycles: u32) -> Result<()> {
    let total_ticks = cycles.max(1) * u32::from(CYCLE_TICKS);
    let mut exercise = BreathingExercise::open();
    println!("Breathe along. Press Ctrl-C to stop.");
    print_breath(exercise.state().await);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    for _ in 0..total_ticks {
        tokio::select! {
            ticked = exercise.ticked() => {
                if !ticked {
                    break;
                }
            }
            _ = &mut ctrl_c => break,
        }
        print_breath(exercise.state().await);
    }

    exercise.close();
    Ok(())
}

fn print_breath(state: BreathingState) {
    println!(
        "{:<7} {}  {}",
        state.phase.to_string(),
        state.count_in_phase,
        state.phase.instruction()
    );
}
