use std::io::Write;
use std::time::Duration;

use amazonia_game::{ActionKind, PlayerClass, format_float};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::autopilot::RunRecord;

/// Per-class summary of autopilot runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAggregate {
    pub class: PlayerClass,
    pub runs: usize,
    pub deaths: usize,
    pub mean_days: f64,
    pub max_days: u32,
    pub mean_hours: f64,
    pub mean_fish: f64,
    pub mean_meat: f64,
}

impl ClassAggregate {
    #[must_use]
    pub fn survival_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        1.0 - ratio(self.deaths, self.runs)
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    aggregates: &'a [ClassAggregate],
    runs: &'a [RunRecord],
}

#[must_use]
pub fn aggregate_runs(runs: &[RunRecord]) -> Vec<ClassAggregate> {
    PlayerClass::ALL
        .iter()
        .filter_map(|class| {
            let subset: Vec<&RunRecord> = runs.iter().filter(|r| r.class == *class).collect();
            if subset.is_empty() {
                return None;
            }
            let n = subset.len();
            Some(ClassAggregate {
                class: *class,
                runs: n,
                deaths: subset.iter().filter(|r| r.died).count(),
                mean_days: mean(subset.iter().map(|r| f64::from(r.days_survived)), n),
                max_days: subset.iter().map(|r| r.days_survived).max().unwrap_or(0),
                mean_hours: mean(subset.iter().map(|r| r.hours_played), n),
                mean_fish: mean(subset.iter().map(|r| f64::from(r.fish_caught)), n),
                mean_meat: mean(subset.iter().map(|r| f64::from(r.meat_gained)), n),
            })
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    values.sum::<f64>() / n as f64
}

fn action_summary(run: &RunRecord) -> String {
    ActionKind::ALL
        .iter()
        .map(|kind| format!("{kind} {}", run.actions.get(kind).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn generate_console_report(
    writer: &mut dyn Write,
    runs: &[RunRecord],
    aggregates: &[ClassAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Autopilot Results Summary".bright_cyan().bold())?;
    writeln!(writer, "{}", "============================".cyan())?;
    writeln!(writer, "Total runs: {}", runs.len())?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for aggregate in aggregates {
        writeln!(writer, "{}", aggregate.class.name().bold())?;
        writeln!(
            writer,
            "   Survived: {}/{} ({}%)",
            (aggregate.runs - aggregate.deaths).to_string().green(),
            aggregate.runs,
            format_float(aggregate.survival_rate() * 100.0, 1)
        )?;
        writeln!(
            writer,
            "   Days: mean {} / best {}",
            format_float(aggregate.mean_days, 2),
            aggregate.max_days
        )?;
        writeln!(
            writer,
            "   Hours played: mean {}",
            format_float(aggregate.mean_hours, 1)
        )?;
        writeln!(
            writer,
            "   Food: {} fish / {} meat per run",
            format_float(aggregate.mean_fish, 1),
            format_float(aggregate.mean_meat, 1)
        )?;
        writeln!(writer)?;
    }

    for run in runs {
        let status = if run.died {
            "💀 DIED".red()
        } else {
            "✅ ALIVE".green()
        };
        writeln!(
            writer,
            "{status} {} (seed {}) - day {}, {}h",
            run.name.bold(),
            run.seed,
            run.days_survived,
            format_float(run.hours_played, 1)
        )?;
        writeln!(writer, "   Actions: {}", action_summary(run))?;
    }
    Ok(())
}

pub fn generate_json_report(
    writer: &mut dyn Write,
    runs: &[RunRecord],
    aggregates: &[ClassAggregate],
) -> Result<()> {
    let report = JsonReport { aggregates, runs };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report(
    writer: &mut dyn Write,
    runs: &[RunRecord],
    aggregates: &[ClassAggregate],
) -> Result<()> {
    writeln!(writer, "# Amazonia Autopilot Results\n")?;
    writeln!(writer, "## Summary\n")?;
    writeln!(
        writer,
        "| Class | Runs | Survival | Mean days | Best | Mean hours | Fish/run | Meat/run |"
    )?;
    writeln!(writer, "|---|---|---|---|---|---|---|---|")?;
    for a in aggregates {
        writeln!(
            writer,
            "| {} | {} | {}% | {} | {} | {} | {} | {} |",
            a.class,
            a.runs,
            format_float(a.survival_rate() * 100.0, 1),
            format_float(a.mean_days, 2),
            a.max_days,
            format_float(a.mean_hours, 1),
            format_float(a.mean_fish, 1),
            format_float(a.mean_meat, 1)
        )?;
    }

    writeln!(writer, "\n## Runs\n")?;
    for run in runs {
        let status = if run.died { "💀" } else { "✅" };
        writeln!(writer, "### {status} {}\n", run.name)?;
        writeln!(writer, "- **Seed**: {}", run.seed)?;
        writeln!(writer, "- **Days survived**: {}", run.days_survived)?;
        writeln!(
            writer,
            "- **Hours played**: {}",
            format_float(run.hours_played, 1)
        )?;
        writeln!(writer, "- **Actions**: {}", action_summary(run))?;
        writeln!(
            writer,
            "- **Final vitals**: HP {} / Hunger {} / Energy {}\n",
            format_float(run.final_hp, 2),
            format_float(run.final_hunger, 2),
            format_float(run.final_energy, 2)
        )?;
    }
    Ok(())
}
