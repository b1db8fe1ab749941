//! Section aggregation.
//!
//! Groups parsed rules by section number, sorts each group by title and
//! assigns dense `{section}.{rank}` ids, then overlays the declared section
//! title, impact and description.

use std::collections::BTreeMap;

use rulebook_core::{ImpactLevel, ParsedRule, Rule, Section, SectionDescriptor};

use crate::collate;

/// Build the ordered section list for one agent.
///
/// Section `n` takes its presentation from `descriptors[n - 1]` when it
/// exists. Otherwise it is titled `Section {n}` with medium impact.
pub fn aggregate(parsed: Vec<ParsedRule>, descriptors: &[SectionDescriptor]) -> Vec<Section> {
    let mut groups: BTreeMap<u32, Vec<Rule>> = BTreeMap::new();
    for ParsedRule { section, rule } in parsed {
        groups.entry(section).or_default().push(rule);
    }

    groups
        .into_iter()
        .map(|(number, mut rules)| {
            rules.sort_by(|a, b| collate::compare(&a.title, &b.title));
            for (idx, rule) in rules.iter_mut().enumerate() {
                rule.id = format!("{number}.{}", idx + 1);
            }

            let descriptor = descriptor_for(number, descriptors);
            Section {
                number,
                title: descriptor.map_or_else(|| format!("Section {number}"), |d| d.title.clone()),
                impact: descriptor.map_or(ImpactLevel::Medium, |d| d.impact),
                description: descriptor.and_then(|d| d.description.clone()),
                rules,
            }
        })
        .collect()
}

fn descriptor_for(number: u32, descriptors: &[SectionDescriptor]) -> Option<&SectionDescriptor> {
    let idx = usize::try_from(number.checked_sub(1)?).ok()?;
    descriptors.get(idx)
}
