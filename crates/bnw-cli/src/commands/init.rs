use std::path::Path;

use bnw_core::{
    ActorRecord, Campaign, CampaignMeta, Details, ItemRecord, PowerData, SkillEntry, TraitEntry,
};

pub fn run(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("'{}' already exists", path.display()));
    }

    let name = path
        .file_stem()
        .map_or_else(|| "Campaign".to_string(), |s| s.to_string_lossy().into_owned());
    let mut campaign = Campaign::new(CampaignMeta::new(name.clone()));
    campaign
        .add_actor(sample_delta())
        .map_err(|e| e.to_string())?;
    campaign.add_item(ItemRecord::power(
        "Mind Spike",
        PowerData {
            trait_key: "mind".into(),
            skill: "intimidation".into(),
            dice: 1,
            description: "A psychic lance that overloads the target's senses.".into(),
        },
    ));
    campaign.save(path).map_err(|e| e.to_string())?;

    println!("Created campaign '{name}' in {}", path.display());
    println!("  Nova  a legacy body/mind character with one power");
    println!();
    println!("Get started:");
    println!("  bnw sheet nova -f {}", path.display());
    println!("  bnw roll nova strength brawl -f {} --target 7", path.display());
    println!("  bnw power nova \"phase step\" -f {}", path.display());

    Ok(())
}

/// A character saved before strength/speed/smarts existed.
fn sample_delta() -> ActorRecord {
    let mut nova = ActorRecord::new("Nova");
    nova.system.details = Details {
        player_name: "Sam".into(),
        hero_name: "Ada Reyes".into(),
        code_name: "Nova".into(),
        origin: "Lab accident".into(),
        affiliation: "Freelance".into(),
        background: String::new(),
    };

    let traits = &mut nova.system.traits;
    traits.insert("body".into(), TraitEntry::new("Body", 3));
    traits.insert("mind".into(), TraitEntry::new("Mind", 2));
    traits.insert("spirit".into(), TraitEntry::new("Spirit", 1));

    let skills = &mut nova.system.skills;
    skills.insert("brawl".into(), SkillEntry::new("Brawl", "body", 2));
    skills.insert("stealth".into(), SkillEntry::new("Stealth", "body", 1));
    skills.insert("science".into(), SkillEntry::new("Science", "mind", 1));
    skills.insert("willpower".into(), SkillEntry::new("Willpower", "spirit", 1));

    nova.items.push(ItemRecord::power(
        "Phase Step",
        PowerData {
            trait_key: "body".into(),
            skill: "stealth".into(),
            dice: 1,
            description: "Slip half a step out of phase with the world.".into(),
        },
    ));
    nova
}
