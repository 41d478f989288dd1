use std::path::Path;

use bnw_mechanics::sheet::{SelectOption, skill_options, trait_options};
use bnw_mechanics::{ActorSheet, SystemConfig};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path, name: &str, config: &SystemConfig) -> Result<(), String> {
    let campaign = super::open(file, config)?;
    let actor = super::find_actor(&campaign, name)?;
    let sheet = ActorSheet::prepare(actor, config);

    println!("  {}", sheet.name.bold());
    let details = &sheet.details;
    for (label, value) in [
        ("player", &details.player_name),
        ("hero", &details.hero_name),
        ("code name", &details.code_name),
        ("origin", &details.origin),
        ("affiliation", &details.affiliation),
    ] {
        if !value.is_empty() {
            println!("  {:<12} {value}", format!("{label}:"));
        }
    }
    println!();

    let mut traits = Table::new();
    traits.set_content_arrangement(ContentArrangement::Dynamic);
    traits.set_header(vec!["Trait", "Value"]);
    for t in &sheet.traits {
        traits.add_row(vec![t.label.clone(), t.value.to_string()]);
    }
    println!("{traits}");
    println!();

    for group in &sheet.skill_groups {
        if group.skills.is_empty() {
            continue;
        }
        println!("  {}", group.trait_label.bold());
        let mut skills = Table::new();
        skills.set_content_arrangement(ContentArrangement::Dynamic);
        skills.set_header(vec!["Skill", "Value", "Pool"]);
        for s in &group.skills {
            skills.add_row(vec![s.label.clone(), s.value.to_string(), s.pool.to_string()]);
        }
        println!("{skills}");
    }

    if !sheet.powers.is_empty() {
        println!();
        let mut powers = Table::new();
        powers.set_content_arrangement(ContentArrangement::Dynamic);
        powers.set_header(vec!["Power", "Trait", "Skill", "Dice"]);
        for p in &sheet.powers {
            let trait_choices = trait_options(Some(actor), config, &p.trait_key);
            let skill_choices = skill_options(Some(actor), config, &p.skill, &trait_choices);
            powers.add_row(vec![
                p.name.clone(),
                label_of(&trait_choices, &p.trait_key),
                label_of(&skill_choices, &p.skill),
                p.dice.to_string(),
            ]);
        }
        println!("{powers}");
    }

    if !sheet.details.background.is_empty() {
        println!();
        for line in sheet.details.background.lines() {
            println!("  {}", line.trim());
        }
    }
    if !sheet.notes.is_empty() {
        println!();
        println!("  {}", "Notes".bold());
        for line in sheet.notes.lines() {
            println!("  {}", line.trim());
        }
    }

    Ok(())
}

fn label_of(options: &[SelectOption], key: &str) -> String {
    options
        .iter()
        .find(|o| o.key == key)
        .map_or_else(|| "-".to_string(), |o| o.label.clone())
}
