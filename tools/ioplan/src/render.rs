//! Plan output formatting

use colored::Colorize;
use ioplan_calc::{CombinationResult, RankedPlan};
use ioplan_model::{CapacityVector, RequirementCategory};
use std::fmt::Write as _;

/// Which options get a detailed breakdown
#[derive(Debug, Clone, Copy)]
pub enum Detail<'a> {
    Recommended,
    Option(&'a CombinationResult),
    All,
}

/// Full table report for a feasible plan
pub fn render_plan(plan: &RankedPlan, detail: Detail<'_>) -> String {
    let mut out = String::new();
    render_summary(&mut out, plan);

    match detail {
        Detail::Recommended => {
            let _ = writeln!(out, "\n{}", "Recommended Option".green().bold());
            render_option(&mut out, plan.recommended());
        },
        Detail::Option(option) => {
            let _ = writeln!(out, "\n{}", "Selected Option".cyan().bold());
            render_option(&mut out, option);
        },
        Detail::All => {
            for (i, option) in plan.options().iter().enumerate() {
                let _ = writeln!(out, "\n{}", format!("Option {}", i + 1).cyan().bold());
                render_option(&mut out, option);
            }
        },
    }

    render_option_list(&mut out, plan);
    out
}

fn render_summary(out: &mut String, plan: &RankedPlan) {
    let _ = write!(out, "Requirement:");
    for (category, count) in plan.requirement.iter() {
        let _ = write!(out, " {}={}", category, count);
    }
    let _ = writeln!(out);

    if plan.adjusted != plan.requirement {
        let _ = write!(out, "Adjusted ({:.0}% headroom):", plan.headroom.percent());
        for (category, count) in plan.adjusted.iter() {
            let _ = write!(out, " {}={}", category, count);
        }
        let _ = writeln!(out);
    }
}

/// Label, comments, usage and remaining capacity of one option
pub fn render_option(out: &mut String, option: &CombinationResult) {
    let _ = writeln!(out, "{}", option.label.bold());
    if !option.comments.is_empty() {
        let _ = writeln!(out, "Comments: {}", option.comments);
    }

    let _ = writeln!(out, "\n{}", "Used Points (by source)".bold());
    render_usage(out, option);

    let _ = writeln!(out, "\n{}", "Remaining Points".bold());
    render_remaining(out, &option.remaining);
}

/// Only sources with non-zero usage, only requirement columns in use
fn render_usage(out: &mut String, option: &CombinationResult) {
    let columns: Vec<RequirementCategory> = RequirementCategory::all()
        .iter()
        .copied()
        .filter(|r| option.allocation.allocated_to(*r) > 0)
        .collect();

    if columns.is_empty() {
        let _ = writeln!(out, "  (none)");
        return;
    }

    let _ = write!(out, "  {:<8}", "Source");
    for column in &columns {
        let _ = write!(out, " {:>7}", column.as_str());
    }
    let _ = writeln!(out);

    for (source, usage) in option.allocation.used_sources() {
        let _ = write!(out, "  {:<8}", source.as_str());
        for column in &columns {
            let _ = write!(out, " {:>7}", usage[*column]);
        }
        let _ = writeln!(out);
    }
}

/// Two columns: the first three categories left, the rest right
fn render_remaining(out: &mut String, remaining: &CapacityVector) {
    let entries: Vec<_> = remaining.iter().collect();
    let (left, right) = entries.split_at(entries.len() / 2);

    for (i, (category, count)) in right.iter().enumerate() {
        let left_cell = left
            .get(i)
            .map(|(category, count)| format!("{}: {}", category, count))
            .unwrap_or_default();
        let _ = writeln!(out, "  {:<14} {}: {}", left_cell, category, count);
    }
}

fn render_option_list(out: &mut String, plan: &RankedPlan) {
    let _ = writeln!(
        out,
        "\n{} ({} of {} combinations)",
        "Valid Options".bold(),
        plan.len(),
        plan.evaluated
    );
    for (i, option) in plan.options().iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>3}. {} ({} modules)",
            i + 1,
            option.label,
            option.module_count
        );
    }
}
