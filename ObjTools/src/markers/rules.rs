//! Marker lookup tables and the classification cascade
//!
//! Every placement first gets an icon from [`ICONS`] and a coarse category
//! from [`TYPES`]. The [`CASCADE`] then picks the final bucket: rules are
//! tried in order and the first one that returns an [`Outcome`] wins. A
//! placement no rule claims is [`Outcome::Unclaimed`] and goes to its
//! coarse category with the table icon.

/// Icon tag by location-area kind
pub const ICONS: &[(&str, &str)] = &[
    ("CaveEntranceNormal", "Cave"),
    ("CaveEntranceSpecial", "Cave"),
    ("CaveEntranceWell", "Cave"),
    ("City", "Village"),
    ("ShopArmor", "ShopBougu"),
    ("ShopDye", "ShopColor"),
    ("ShopGeneral", "ShopYorozu"),
    ("ShopInn", "ShopYadoya"),
    ("ShopJewelry", "ShopJewel"),
    ("Stable", "Hatago"),
    ("Shrine", "Dungeon"),
    ("Tower", "Tower"),
    ("Labo", "Labo"),
    ("DragonTears", "Tear"),
    ("CheckPoint", "Lightroot"),
];

/// Coarse display category by location-area kind
///
/// Kinds not listed are their own category.
pub const TYPES: &[(&str, &str)] = &[
    ("CaveEntranceNormal", "Cave"),
    ("CaveEntranceSpecial", "Cave"),
    ("CaveEntranceWell", "Cave"),
    ("City", "Place"),
    ("ShopArmor", "Shop"),
    ("ShopDye", "Shop"),
    ("ShopGeneral", "Shop"),
    ("ShopInn", "Shop"),
    ("ShopJewelry", "Shop"),
    ("SpotBig", "Location"),
    ("SpotBigArtifact", "Location"),
    ("SpotBigMagma", "Location"),
    ("SpotBigMountain", "Location"),
    ("SpotBigOther", "Location"),
    ("SpotBigTimber", "Location"),
    ("SpotBigWater", "Location"),
    ("SpotBigWithNameIcon", "Location"),
    ("SpotMiddle", "Location"),
    ("SpotMiddleArtifact", "Location"),
    ("SpotMiddleMagma", "Location"),
    ("SpotMiddleMountain", "Location"),
    ("SpotMiddleOther", "Location"),
    ("SpotMiddleTimber", "Location"),
    ("SpotMiddleWater", "Location"),
    ("SpotSmallArtifact", "Location"),
    ("SpotSmallMagma", "Location"),
    ("SpotSmallMountain", "Location"),
    ("SpotSmallOther", "Location"),
    ("SpotSmallTimber", "Location"),
    ("SpotSmallWater", "Location"),
    ("Shrine", "Dungeon"),
    ("District", "Location"),
    ("Stable", "Place"),
];

/// Instances of repeated cities and stables that are not shown
pub const INSTANCE_SKIPS: &[(&str, &[usize])] = &[
    ("TabantaHatago", &[1]),
    ("NewHyruleWestHatago", &[0]),
    ("FaronHatago000", &[0]),
    ("Gerudo", &[0, 1]),
];

/// Caves that are shown as chasms
pub const CHASMS_NOT_CAVES: &[&str] = &[
    "Cave_HyruleRidge_0004",
    "Cave_GerudoDesert_0043",
    "Cave_Lanayru_0050",
    "Cave_Lanayru_0063",
];

pub const LABO_NAMES: &[&str] = &["AncientLabo", "HatenoLabo"];

/// Shops whose icon is a star instead of a shop sign
pub const STAR_SHOPS: &[&str] = &[
    "ScrapShop",
    "RentalZarashiShop_Gerudo",
    "RentalZarashiShop_GerudoDesert",
];

/// Statue renames for the Bargainer statues in the depths
pub const STATUE_RENAMES: &[(&str, &str)] = &[
    ("DemonStatue_01", "MinusField_AncientTimeShrine"),
    ("DemonStatue_02", "MinusField_KingValley"),
];

/// Buckets that exist in the output even when empty, in output order
pub const PRESET_CATEGORIES: &[&str] = &["Labo", "Chasm", "Korok", "Place", "Cave", "Shop"];

/// Location-area kind handled by the dungeon list instead
pub const DUNGEON_KIND: &str = "Dungeon";

/// Icon tag for `kind`
pub fn icon_for(kind: &str) -> Option<&'static str> {
    lookup(ICONS, kind)
}

/// Coarse category for `kind`; unmapped kinds pass through
pub fn coarse_category(kind: &str) -> &str {
    lookup(TYPES, kind).unwrap_or(kind)
}

/// Whether instance `index` of `message` is skipped
pub fn is_skipped_instance(message: &str, index: usize) -> bool {
    INSTANCE_SKIPS
        .iter()
        .any(|(name, skips)| *name == message && skips.contains(&index))
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// A placement as seen by the cascade
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub message: &'a str,
    /// Coarse category from [`TYPES`]
    pub coarse: &'a str,
    pub show_level: Option<&'a str>,
}

/// Where a placement ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Add the marker to `category`
    Place {
        category: String,
        /// Replaces the table icon when set
        icon: Option<&'static str>,
        /// Replaces the message id when set
        rename: Option<&'static str>,
    },
    /// Leave the placement out
    Drop,
    /// No rule matched
    Unclaimed,
}

impl Outcome {
    fn place(category: &str, icon: &'static str) -> Self {
        Self::Place {
            category: category.to_string(),
            icon: Some(icon),
            rename: None,
        }
    }

    fn keep_icon(category: &str) -> Self {
        Self::Place {
            category: category.to_string(),
            icon: None,
            rename: None,
        }
    }
}

/// One step of the cascade
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&Candidate<'_>) -> Option<Outcome>,
}

/// Classification rules in priority order
pub const CASCADE: &[Rule] = &[
    Rule { name: "labo", apply: labo },
    Rule { name: "deep hole", apply: deep_hole },
    Rule { name: "bar", apply: bar },
    Rule { name: "shop", apply: shop },
    Rule { name: "figure gallery", apply: figure_gallery },
    Rule { name: "armor of lambda", apply: armor_of_lambda },
    Rule { name: "stable branch", apply: stable_branch },
    Rule { name: "chasm not cave", apply: chasm_not_cave },
    Rule { name: "well", apply: well },
    Rule { name: "demon statue", apply: demon_statue },
];

/// Run the cascade
pub fn classify(candidate: &Candidate<'_>) -> Outcome {
    for rule in CASCADE {
        if let Some(outcome) = (rule.apply)(candidate) {
            tracing::trace!("{} matched rule '{}'", candidate.message, rule.name);
            return outcome;
        }
    }
    Outcome::Unclaimed
}

fn labo(c: &Candidate<'_>) -> Option<Outcome> {
    LABO_NAMES
        .contains(&c.message)
        .then(|| Outcome::place("Labo", "Labo"))
}

fn deep_hole(c: &Candidate<'_>) -> Option<Outcome> {
    c.message
        .contains("DeepHole")
        .then(|| Outcome::place("Chasm", "Chasm"))
}

fn bar(c: &Candidate<'_>) -> Option<Outcome> {
    (c.message == "Bar").then(|| Outcome::place("Shop", "Drink"))
}

fn shop(c: &Candidate<'_>) -> Option<Outcome> {
    if !c.message.contains("Shop") {
        return None;
    }
    let is_location = match c.coarse {
        "Location" => true,
        "Shop" => false,
        _ => return None,
    };

    // Forge constructs share the shop naming but are not shops
    if c.message.starts_with("SmeltShopGolem") {
        return Some(if is_location {
            Outcome::Drop
        } else {
            Outcome::keep_icon("Shop")
        });
    }
    if STAR_SHOPS.contains(&c.message) {
        return Some(Outcome::place("Shop", "Star"));
    }
    if c.message.contains("BatteryExchangeShop_") {
        return Some(Outcome::place("Shop", "Battery"));
    }
    Some(if is_location {
        Outcome::place("Shop", "ShopBougu")
    } else {
        Outcome::keep_icon("Shop")
    })
}

fn figure_gallery(c: &Candidate<'_>) -> Option<Outcome> {
    (c.message == "FigureGallery").then_some(Outcome::Drop)
}

fn armor_of_lambda(c: &Candidate<'_>) -> Option<Outcome> {
    c.message.contains("ArmorOfLambda").then_some(Outcome::Drop)
}

fn stable_branch(c: &Candidate<'_>) -> Option<Outcome> {
    c.message
        .contains("HorseStableBranch")
        .then(|| Outcome::place("Place", "Hatago"))
}

fn chasm_not_cave(c: &Candidate<'_>) -> Option<Outcome> {
    CHASMS_NOT_CAVES
        .contains(&c.message)
        .then(|| Outcome::place("Chasm", "Chasm"))
}

fn well(c: &Candidate<'_>) -> Option<Outcome> {
    if !c.message.starts_with("Well_") {
        return None;
    }
    // The one well that is entered like a cave
    let icon = if c.message == "Well_0043B" { "Cave" } else { "Well" };
    Some(Outcome::place("Cave", icon))
}

fn demon_statue(c: &Candidate<'_>) -> Option<Outcome> {
    if !c.message.contains("DemonStatue") {
        return None;
    }
    if !c.message.starts_with("DemonStatue") {
        return Some(Outcome::Drop);
    }
    if c.message == "DemonStatue_00" && c.show_level == Some("Farthest") {
        return Some(Outcome::Drop);
    }
    let rename = lookup(STATUE_RENAMES, c.message);
    Some(Outcome::Place {
        category: "Place".to_string(),
        icon: Some("Bargainer"),
        rename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn candidate<'a>(message: &'a str, coarse: &'a str) -> Candidate<'a> {
        Candidate {
            message,
            coarse,
            show_level: None,
        }
    }

    fn placed(category: &str, icon: Option<&'static str>) -> Outcome {
        Outcome::Place {
            category: category.to_string(),
            icon,
            rename: None,
        }
    }

    #[test]
    fn test_table_lookups() {
        assert_eq!(icon_for("ShopArmor"), Some("ShopBougu"));
        assert_eq!(icon_for("SpotBig"), None);
        assert_eq!(coarse_category("SpotMiddleWater"), "Location");
        assert_eq!(coarse_category("Tower"), "Tower");
        assert!(is_skipped_instance("Gerudo", 1));
        assert!(!is_skipped_instance("Gerudo", 2));
        assert!(!is_skipped_instance("Kakariko", 0));
    }

    #[test]
    fn test_battery_shop_wins_over_generic_shop_icon() {
        let outcome = classify(&candidate("BatteryExchangeShop_01", "Location"));
        assert_eq!(outcome, placed("Shop", Some("Battery")));
    }

    #[test]
    fn test_shop_rules() {
        assert_eq!(
            classify(&candidate("ScrapShop", "Location")),
            placed("Shop", Some("Star"))
        );
        assert_eq!(
            classify(&candidate("SomeShop", "Location")),
            placed("Shop", Some("ShopBougu"))
        );
        assert_eq!(
            classify(&candidate("KakarikoShop", "Shop")),
            placed("Shop", None)
        );
        assert_eq!(
            classify(&candidate("SmeltShopGolem_01", "Location")),
            Outcome::Drop
        );
        assert_eq!(
            classify(&candidate("SmeltShopGolem_01", "Shop")),
            placed("Shop", None)
        );
    }

    #[test]
    fn test_cascade_order() {
        // Labo names beat everything else
        assert_eq!(
            classify(&candidate("HatenoLabo", "Place")),
            placed("Labo", Some("Labo"))
        );
        assert_eq!(
            classify(&candidate("DeepHole_Shop", "Location")),
            placed("Chasm", Some("Chasm"))
        );
        assert_eq!(classify(&candidate("Bar", "Location")), placed("Shop", Some("Drink")));
        assert_eq!(classify(&candidate("FigureGallery", "Location")), Outcome::Drop);
        assert_eq!(classify(&candidate("ArmorOfLambda_01", "Location")), Outcome::Drop);
        assert_eq!(
            classify(&candidate("HorseStableBranch_01", "Location")),
            placed("Place", Some("Hatago"))
        );
        assert_eq!(
            classify(&candidate("Cave_Lanayru_0050", "Cave")),
            placed("Chasm", Some("Chasm"))
        );
        assert_eq!(classify(&candidate("Well_0001", "Cave")), placed("Cave", Some("Well")));
        assert_eq!(classify(&candidate("Well_0043B", "Cave")), placed("Cave", Some("Cave")));
        assert_eq!(classify(&candidate("Kakariko", "Place")), Outcome::Unclaimed);
    }

    #[test]
    fn test_demon_statues() {
        assert_eq!(
            classify(&candidate("DemonStatue_01", "Location")),
            Outcome::Place {
                category: "Place".into(),
                icon: Some("Bargainer"),
                rename: Some("MinusField_AncientTimeShrine"),
            }
        );
        assert_eq!(
            classify(&candidate("DemonStatue_00", "Location")),
            placed("Place", Some("Bargainer"))
        );

        let far = Candidate {
            message: "DemonStatue_00",
            coarse: "Location",
            show_level: Some("Farthest"),
        };
        assert_eq!(classify(&far), Outcome::Drop);
        assert_eq!(classify(&candidate("Near_DemonStatue", "Location")), Outcome::Drop);
    }
}
