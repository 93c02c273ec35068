use anyhow::Result;
use auromind_core::period_care::{
    CycleCalendar, CyclePhase, DailyLog, Mood, ReminderSettings, Symptom, CRAMP_EXERCISES,
    EASY_RECIPES, HEALTHY_SNACKS, TIP_SECTIONS,
};
use clap::Subcommand;
use std::io::{self, Write};

#[derive(Subcommand, Debug)]
pub enum PeriodView {
    /// Log today's flow, mood and symptoms
    Track {
        #[clap(long, default_value_t = 2, help = "Flow intensity from 1 (very light) to 5 (very heavy)")]
        flow: u8,
        #[clap(long, help = "One of: happy, sad, anxious, irritable, calm, energetic, tired, emotional")]
        mood: Option<Mood>,
        #[clap(long = "symptom", help = "A symptom to log, repeatable")]
        symptoms: Vec<Symptom>,
        #[clap(long, default_value = "")]
        notes: String,
        #[clap(long, help = "Hide mood, symptoms and notes from the summary")]
        private: bool,
    },
    /// Show the cycle calendar
    Calendar {
        #[clap(long, help = "Cycle day to show as today")]
        day: Option<u32>,
    },
    /// List the reminder settings
    Reminders,
    /// Nutrition, pain relief and exercise tips with snacks and recipes
    Tips,
}

pub fn run(view: PeriodView) -> Result<()> {
    let mut out = io::stdout().lock();
    match view {
        PeriodView::Track {
            flow,
            mood,
            symptoms,
            notes,
            private,
        } => {
            let mut log = DailyLog::new();
            log.set_flow(flow);
            if let Some(mood) = mood {
                log.select_mood(mood);
            }
            for symptom in symptoms {
                if !log.symptoms().contains(&symptom) {
                    log.toggle_symptom(symptom);
                }
            }
            log.notes = notes;
            if private {
                log.toggle_privacy_mode();
            }
            write_log(&mut out, &log)?;
        }
        PeriodView::Calendar { day } => {
            let mut calendar = CycleCalendar::default();
            if let Some(day) = day {
                anyhow::ensure!(
                    (1..=calendar.cycle_length).contains(&day),
                    "Cycle day must be between 1 and {}",
                    calendar.cycle_length
                );
                calendar.current_day = day;
            }
            write_calendar(&mut out, &calendar)?;
        }
        PeriodView::Reminders => write_reminders(&mut out, &ReminderSettings::default())?,
        PeriodView::Tips => write_tips(&mut out)?,
    }
    Ok(())
}

fn write_log(out: &mut impl Write, log: &DailyLog) -> io::Result<()> {
    writeln!(out, "Flow: {} ({}/5)", log.flow.label(), log.flow.level())?;
    if log.privacy_mode {
        writeln!(out, "Privacy mode is on, details are hidden.")?;
        return Ok(());
    }

    match log.mood {
        Some(mood) => writeln!(out, "Mood: {} {}", mood.icon(), mood)?,
        None => writeln!(out, "Mood: not logged")?,
    }
    if log.symptoms().is_empty() {
        writeln!(out, "Symptoms: none")?;
    } else {
        let names: Vec<String> = log.symptoms().iter().map(ToString::to_string).collect();
        writeln!(out, "Symptoms: {}", names.join(", "))?;
    }
    if !log.notes.trim().is_empty() {
        writeln!(out, "Notes: {}", log.notes.trim())?;
    }
    Ok(())
}

fn phase_marker(phase: CyclePhase) -> char {
    match phase {
        CyclePhase::Period => 'P',
        CyclePhase::Fertile => 'F',
        CyclePhase::Pms => 'S',
        CyclePhase::Regular => '.',
    }
}

fn write_calendar(out: &mut impl Write, calendar: &CycleCalendar) -> io::Result<()> {
    writeln!(
        out,
        "Day {} of {} ({}), {:.0}% through the cycle",
        calendar.current_day,
        calendar.cycle_length,
        calendar.current_phase().label(),
        calendar.progress_percent()
    )?;

    let strip: String = (1..=calendar.cycle_length)
        .map(|day| {
            if day == calendar.current_day {
                '*'
            } else {
                phase_marker(calendar.phase_of(day))
            }
        })
        .collect();
    writeln!(out, "{}", strip)?;
    writeln!(out, "P period  F fertile window  S PMS  * today")?;
    writeln!(out, "Next period expected {}", calendar.predicted_next_period)?;
    Ok(())
}

fn write_reminders(out: &mut impl Write, reminders: &ReminderSettings) -> io::Result<()> {
    for (kind, enabled) in reminders.iter() {
        let state = if enabled { "on" } else { "off" };
        writeln!(out, "[{:>3}] {:<22} {}", state, kind.title(), kind.schedule())?;
    }
    Ok(())
}

fn write_tips(out: &mut impl Write) -> io::Result<()> {
    for section in &TIP_SECTIONS {
        writeln!(out, "{}", section.title)?;
        for (topic, advice) in section.tips {
            writeln!(out, "  {}: {}", topic, advice)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Healthy Snacks")?;
    for snack in &HEALTHY_SNACKS {
        writeln!(out, "  {}: {}", snack.name, snack.description)?;
    }
    writeln!(out)?;

    writeln!(out, "Easy Recipes")?;
    for recipe in &EASY_RECIPES {
        writeln!(out, "  {}", recipe.name)?;
        for ingredient in recipe.ingredients {
            writeln!(out, "    - {}", ingredient)?;
        }
        writeln!(out, "    {}", recipe.instructions)?;
    }
    writeln!(out)?;

    writeln!(out, "Exercises for Cramp Relief")?;
    for exercise in &CRAMP_EXERCISES {
        writeln!(out, "  {}: {}", exercise.name, exercise.description)?;
    }
    Ok(())
}
