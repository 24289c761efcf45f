use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed combat role vocabulary shared by characters and tagged items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatRole {
    #[serde(alias = "damage", alias = "dps")]
    Striker,
    Skirmisher,
    #[serde(alias = "sharpshooter")]
    Sniper,
    Controller,
    #[serde(alias = "tank")]
    Defender,
    #[serde(alias = "healer")]
    Support,
    #[serde(alias = "balanced")]
    Generalist,
    #[serde(other)]
    Unrecognized,
}

impl CombatRole {
    pub fn parse(value: &str) -> Option<Self> {
        let role = match value.trim().to_ascii_lowercase().as_str() {
            "striker" | "damage" | "dps" => Self::Striker,
            "skirmisher" => Self::Skirmisher,
            "sniper" | "sharpshooter" => Self::Sniper,
            "controller" => Self::Controller,
            "defender" | "tank" => Self::Defender,
            "support" | "healer" => Self::Support,
            "generalist" | "balanced" => Self::Generalist,
            _ => return None,
        };
        Some(role)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CombatRole::Striker => "striker",
            CombatRole::Skirmisher => "skirmisher",
            CombatRole::Sniper => "sniper",
            CombatRole::Controller => "controller",
            CombatRole::Defender => "defender",
            CombatRole::Support => "support",
            CombatRole::Generalist => "generalist",
            CombatRole::Unrecognized => "unrecognized",
        }
    }

    /// Striker, skirmisher, and sniper all trade on single-target damage output.
    pub fn is_striker_family(&self) -> bool {
        matches!(
            self,
            CombatRole::Striker | CombatRole::Skirmisher | CombatRole::Sniper
        )
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CombatRole::Unrecognized)
    }
}

/// Ability used to resolve an attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    #[serde(alias = "str")]
    Strength,
    #[serde(alias = "dex")]
    Dexterity,
}

impl Attribute {
    pub fn other(&self) -> Self {
        match self {
            Attribute::Strength => Attribute::Dexterity,
            Attribute::Dexterity => Attribute::Strength,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Attribute::Strength => "str",
            Attribute::Dexterity => "dex",
        }
    }

    fn long_name(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Dexterity => "dexterity",
        }
    }
}

/// Tags callers attach to describe how a character prefers to fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaystyleHint {
    Mobile,
    Stationary,
    MeleePreferred,
    RangedPreferred,
    Lethal,
}

impl PlaystyleHint {
    fn matches(&self, normalized_tag: &str) -> bool {
        match self {
            PlaystyleHint::Mobile => matches!(normalized_tag, "mobile" | "mobility"),
            PlaystyleHint::Stationary => matches!(normalized_tag, "stationary" | "static"),
            PlaystyleHint::MeleePreferred => {
                matches!(normalized_tag, "melee-preferred" | "melee")
            }
            PlaystyleHint::RangedPreferred => {
                matches!(normalized_tag, "ranged-preferred" | "ranged")
            }
            PlaystyleHint::Lethal => matches!(normalized_tag, "lethal" | "lethal-outcomes"),
        }
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim()
        .to_ascii_lowercase()
        .replace(['_', ' '], "-")
}

/// Read-only snapshot of the character a ranking pass is performed for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterContext {
    #[serde(default)]
    pub attributes: BTreeMap<String, i8>,
    #[serde(default)]
    pub primary_role: Option<CombatRole>,
    #[serde(default)]
    pub combat_roles: BTreeSet<CombatRole>,
    #[serde(default)]
    pub playstyle_hints: BTreeSet<String>,
    #[serde(default)]
    pub proficiencies: BTreeMap<String, bool>,
    #[serde(default)]
    pub feats: BTreeSet<String>,
}

impl CharacterContext {
    /// Looks up a modifier by abbreviation or full ability name, ignoring case.
    pub fn modifier(&self, attribute: Attribute) -> Option<i8> {
        self.attributes.iter().find_map(|(name, value)| {
            let name = name.trim();
            (name.eq_ignore_ascii_case(attribute.abbreviation())
                || name.eq_ignore_ascii_case(attribute.long_name()))
            .then_some(*value)
        })
    }

    pub fn has_hint(&self, hint: PlaystyleHint) -> bool {
        self.playstyle_hints
            .iter()
            .any(|tag| hint.matches(&normalize_tag(tag)))
    }

    /// `None` when the group has no entry, which callers treat as unrecognized.
    pub fn proficiency(&self, group: &str) -> Option<bool> {
        let group = group.trim();
        self.proficiencies
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(group))
            .map(|(_, proficient)| *proficient)
    }

    pub fn has_controller_role(&self) -> bool {
        self.primary_role == Some(CombatRole::Controller)
            || self.combat_roles.contains(&CombatRole::Controller)
    }

    pub fn has_feat_mentioning(&self, needle: &str) -> bool {
        let needle = needle.to_ascii_lowercase();
        self.feats
            .iter()
            .any(|feat| feat.to_ascii_lowercase().contains(&needle))
    }
}

/// Dice expression such as `3d6` or `2d8+2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageExpression {
    pub dice: u8,
    pub die_size: u8,
    #[serde(default)]
    pub modifier: i16,
}

impl DamageExpression {
    pub fn new(dice: u8, die_size: u8, modifier: i16) -> Self {
        Self {
            dice,
            die_size,
            modifier,
        }
    }

    pub fn average(&self) -> f32 {
        let dice = f32::from(self.dice);
        let die_size = f32::from(self.die_size);
        dice * (die_size + 1.0) / 2.0 + f32::from(self.modifier)
    }

    /// Parses `NdS`, `NdS+M`, `NdS-M`, or a flat number. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if compact.is_empty() {
            return None;
        }

        let Some((dice, rest)) = compact.split_once('d') else {
            let flat = compact.parse::<i16>().ok()?;
            return Some(Self::new(0, 0, flat));
        };

        let dice = if dice.is_empty() {
            1
        } else {
            dice.parse::<u8>().ok()?
        };

        let (die_size, modifier) = match rest.find(['+', '-']) {
            Some(index) => {
                let (size, modifier) = rest.split_at(index);
                (size.parse::<u8>().ok()?, modifier.parse::<i16>().ok()?)
            }
            None => (rest.parse::<u8>().ok()?, 0),
        };

        Some(Self::new(dice, die_size, modifier))
    }
}

impl fmt::Display for DamageExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dice == 0 {
            return write!(f, "{}", self.modifier);
        }
        write!(f, "{}d{}", self.dice, self.die_size)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Energy,
    Kinetic,
    Stun,
    Ion,
    Sonic,
    Fire,
    Acid,
    #[serde(other)]
    Other,
}

impl DamageType {
    pub fn parse(value: &str) -> Option<Self> {
        let kind = match value.trim().to_ascii_lowercase().as_str() {
            "energy" => Self::Energy,
            "kinetic" | "slashing" | "piercing" | "bludgeoning" => Self::Kinetic,
            "stun" => Self::Stun,
            "ion" => Self::Ion,
            "sonic" => Self::Sonic,
            "fire" => Self::Fire,
            "acid" => Self::Acid,
            "" => return None,
            _ => Self::Other,
        };
        Some(kind)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Energy => "energy",
            DamageType::Kinetic => "kinetic",
            DamageType::Stun => "stun",
            DamageType::Ion => "ion",
            DamageType::Sonic => "sonic",
            DamageType::Fire => "fire",
            DamageType::Acid => "acid",
            DamageType::Other => "other",
        }
    }

    /// Damage types that only pay off with a supporting feat.
    pub fn is_exotic(&self) -> bool {
        matches!(self, DamageType::Ion | DamageType::Sonic | DamageType::Acid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeCategory {
    Melee,
    #[serde(alias = "pistol", alias = "thrown")]
    Short,
    #[serde(alias = "rifle")]
    Medium,
    #[serde(alias = "heavy")]
    Long,
}

impl RangeCategory {
    pub fn parse(value: &str) -> Option<Self> {
        let range = match value.trim().to_ascii_lowercase().as_str() {
            "melee" => Self::Melee,
            "short" | "pistol" | "thrown" => Self::Short,
            "medium" | "rifle" => Self::Medium,
            "long" | "heavy" => Self::Long,
            _ => return None,
        };
        Some(range)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangeCategory::Melee => "melee",
            RangeCategory::Short => "short",
            RangeCategory::Medium => "medium",
            RangeCategory::Long => "long",
        }
    }
}

/// Explicit price tag that takes precedence over the numeric price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceCategory {
    Cheap,
    SomewhatCheap,
    Average,
    SomewhatExpensive,
    Expensive,
    VeryExpensive,
}

impl PriceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            PriceCategory::Cheap => "cheap",
            PriceCategory::SomewhatCheap => "somewhat cheap",
            PriceCategory::Average => "average",
            PriceCategory::SomewhatExpensive => "somewhat expensive",
            PriceCategory::Expensive => "expensive",
            PriceCategory::VeryExpensive => "very expensive",
        }
    }
}

/// Flags recovered from an item's free-form trait string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraitProfile {
    pub accurate: bool,
    pub inaccurate: bool,
    pub autofire: bool,
    pub area: bool,
    pub special: u8,
}

impl TraitProfile {
    pub fn parse(raw: &str) -> Self {
        let mut profile = TraitProfile::default();
        for token in raw.split([',', ';', '/', '|']) {
            let token = token.trim().to_ascii_lowercase();
            if token.is_empty() {
                continue;
            }
            match token.as_str() {
                "accurate" => profile.accurate = true,
                "inaccurate" => profile.inaccurate = true,
                "burst" | "splash" | "blast" => profile.area = true,
                t if t.starts_with("autofire") => profile.autofire = true,
                t if t == "area" || t.starts_with("area ") => profile.area = true,
                _ => profile.special = profile.special.saturating_add(1),
            }
        }
        profile
    }
}

/// Read-only descriptor of a candidate item, already known to be legal for the character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub damage: Option<DamageExpression>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub price_category: Option<PriceCategory>,
    #[serde(default)]
    pub traits: String,
    #[serde(default)]
    pub range: Option<RangeCategory>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub role: Option<CombatRole>,
    #[serde(default)]
    pub attack_attribute: Option<Attribute>,
}

impl ItemDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            id: ItemId(id.into()),
            name: name.into(),
            item_type: item_type.into(),
            damage: None,
            damage_type: None,
            price: None,
            price_category: None,
            traits: String::new(),
            range: None,
            group: None,
            role: None,
            attack_attribute: None,
        }
    }

    /// Average damage, or 0 when the item carries no damage expression.
    pub fn average_damage(&self) -> f32 {
        self.damage
            .map(|damage| damage.average())
            .filter(|average| average.is_finite())
            .unwrap_or(0.0)
    }

    pub fn trait_profile(&self) -> TraitProfile {
        TraitProfile::parse(&self.traits)
    }

    /// Price with 0 treated as not listed.
    pub fn listed_price(&self) -> Option<u32> {
        self.price.filter(|price| *price > 0)
    }

    /// Attribute used for the attack roll: explicit override, else by range.
    pub fn primary_attribute(&self) -> Attribute {
        self.attack_attribute.unwrap_or(match self.range {
            Some(RangeCategory::Melee) => Attribute::Strength,
            _ => Attribute::Dexterity,
        })
    }
}
