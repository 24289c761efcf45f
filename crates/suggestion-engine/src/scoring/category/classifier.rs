use std::collections::BTreeMap;

use crate::scoring::domain::ItemDescriptor;

/// Strategy assigning an item to a narrow, mechanically comparable peer group.
///
/// Returning `None` excludes the item from category normalization.
pub trait PeerClassifier: Send + Sync {
    fn classify(&self, item: &ItemDescriptor) -> Option<String>;
}

impl<F> PeerClassifier for F
where
    F: Fn(&ItemDescriptor) -> Option<String> + Send + Sync,
{
    fn classify(&self, item: &ItemDescriptor) -> Option<String> {
        self(item)
    }
}

/// Keyword classifier over the item's name, group label, and type.
///
/// Groups pair a technology with a form ("Blaster Pistols", never "Pistols"); items
/// matching only one half are left unclassified.
#[derive(Debug, Clone, Copy, Default)]
pub struct MechanicalClassifier;

const TECHNOLOGIES: [(&str, &str); 7] = [
    ("blaster", "Blaster"),
    ("slugthrower", "Slugthrower"),
    ("slug", "Slugthrower"),
    ("ion", "Ion"),
    ("sonic", "Sonic"),
    ("flame", "Flame"),
    ("flamethrower", "Flame"),
];

const FORMS: [(&str, &str); 10] = [
    ("pistol", "Pistols"),
    ("pistols", "Pistols"),
    ("holdout", "Pistols"),
    ("carbine", "Carbines"),
    ("carbines", "Carbines"),
    ("rifle", "Rifles"),
    ("rifles", "Rifles"),
    ("cannon", "Heavy Weapons"),
    ("repeater", "Heavy Weapons"),
    ("launcher", "Heavy Weapons"),
];

impl PeerClassifier for MechanicalClassifier {
    fn classify(&self, item: &ItemDescriptor) -> Option<String> {
        let haystack = format!(
            "{} {} {}",
            item.name,
            item.group.as_deref().unwrap_or_default(),
            item.item_type
        )
        .to_ascii_lowercase();
        let tokens: Vec<&str> = haystack
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|token| !token.is_empty())
            .collect();
        let has = |needle: &str| tokens.iter().any(|token| *token == needle);

        if tokens.iter().any(|token| token.starts_with("lightsaber")) {
            return Some("Lightsabers".to_string());
        }
        if has("grenade") || has("grenades") || has("detonator") {
            return Some("Grenades".to_string());
        }
        if has("bowcaster") {
            return Some("Bowcasters".to_string());
        }
        if has("armor") {
            for weight in ["light", "medium", "heavy"] {
                if has(weight) {
                    return Some(format!("{}{} Armor", weight[..1].to_ascii_uppercase(), &weight[1..]));
                }
            }
            return None;
        }
        if has("stun") && (has("baton") || has("gauntlet") || has("club")) {
            return Some("Stun Melee Weapons".to_string());
        }
        if tokens.iter().any(|token| token.starts_with("vibro")) {
            return Some("Vibro Weapons".to_string());
        }

        let technology = TECHNOLOGIES
            .iter()
            .find(|(needle, _)| has(needle))
            .map(|(_, label)| *label);
        let listed_form = FORMS
            .iter()
            .find(|(needle, _)| has(needle))
            .map(|(_, label)| *label);
        // "Heavy" only promotes to heavy weapons when no shoulder-arm form is named.
        let form = match listed_form {
            Some(form @ ("Carbines" | "Rifles")) => Some(form),
            _ if has("heavy") && (has("blaster") || has("repeating")) && !has("pistol") => {
                Some("Heavy Weapons")
            }
            other => other,
        };

        match (technology, form) {
            (Some(technology), Some(form)) => Some(format!("{technology} {form}")),
            _ => None,
        }
    }
}

/// Buckets items by peer group in one pass. Unclassified items are omitted.
pub fn partition<C>(items: &[ItemDescriptor], classifier: &C) -> BTreeMap<String, Vec<ItemDescriptor>>
where
    C: PeerClassifier + ?Sized,
{
    let mut groups: BTreeMap<String, Vec<ItemDescriptor>> = BTreeMap::new();
    for item in items {
        if let Some(group) = classifier.classify(item) {
            groups.entry(group).or_default().push(item.clone());
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, group: Option<&str>) -> ItemDescriptor {
        let mut item = ItemDescriptor::new(name.to_ascii_lowercase(), name, "weapon");
        item.group = group.map(str::to_string);
        item
    }

    #[test]
    fn classifier_builds_narrow_technology_form_groups() {
        let classifier = MechanicalClassifier;
        assert_eq!(
            classifier.classify(&item("Heavy Blaster Pistol", Some("Pistols"))),
            Some("Blaster Pistols".to_string())
        );
        assert_eq!(
            classifier.classify(&item("Ion Rifle", Some("Rifles"))),
            Some("Ion Rifles".to_string())
        );
        assert_eq!(
            classifier.classify(&item("E-Web Repeating Blaster", Some("Heavy Weapons"))),
            Some("Blaster Heavy Weapons".to_string())
        );
        assert_eq!(
            classifier.classify(&item("Heavy Blaster Rifle", Some("Rifles"))),
            Some("Blaster Rifles".to_string())
        );
        assert_eq!(
            classifier.classify(&item("Heavy Repeating Blaster", Some("Heavy Weapons"))),
            Some("Blaster Heavy Weapons".to_string())
        );
        assert_eq!(
            classifier.classify(&item("Vibroblade", Some("Advanced Melee Weapons"))),
            Some("Vibro Weapons".to_string())
        );
        assert_eq!(
            classifier.classify(&item("Companion Droid", None)),
            None,
            "'ion' inside another word must not match"
        );
    }

    #[test]
    fn unmatched_items_are_left_out_of_partitions() {
        let items = vec![
            item("Blaster Pistol", Some("Pistols")),
            item("Sport Blaster Pistol", Some("Pistols")),
            item("Mystery Pistol", Some("Pistols")),
        ];

        let groups = partition(&items, &MechanicalClassifier);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Blaster Pistols"].len(), 2);
    }

    #[test]
    fn closures_can_stand_in_as_classifiers() {
        let items = vec![item("A", None), item("B", None)];
        let by_name = |item: &ItemDescriptor| Some(item.name.clone());

        let groups = partition(&items, &by_name);

        assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
