//! Typed views of what the model sent back.
//!
//! Everything here deserializes leniently: a field of the wrong shape becomes
//! absent rather than failing the whole result.

use crate::entities::{Category, Occasion, Season};
use crate::models::{Item, NewItem, NewOutfit};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

fn lenient_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    // Models sometimes quote ids or mix in junk entries
    let value = Value::deserialize(deserializer)?;
    let ids = match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::Number(n) => n.as_i64().or_else(|| whole_number(n.as_f64()?)),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(ids)
}

#[allow(clippy::cast_possible_truncation)]
fn whole_number(value: f64) -> Option<i64> {
    let in_range = value.is_finite() && value.abs() < 9.0e15;
    (in_range && value.fract().abs() < f64::EPSILON).then_some(value as i64)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string))
}

fn lenient_attribute<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    Ok(lenient_string(deserializer)?.and_then(|s| s.parse().ok()))
}

/// Outfit suggestion: the reply text plus whatever ids it named
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recommendation {
    /// Model reply, untouched
    pub raw_text: String,
    /// Styling notes from the extracted JSON
    pub notes: Option<String>,
    /// Recommended item ids, in the order given
    pub item_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationBody {
    #[serde(default, deserialize_with = "lenient_string")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_ids")]
    items: Vec<i64>,
}

impl Recommendation {
    pub(crate) fn from_reply(raw_text: String) -> Self {
        let body: RecommendationBody = super::extract_as(&raw_text);
        Self {
            raw_text,
            notes: body.notes,
            item_ids: body.items,
        }
    }

    /// Notes when the model gave some, otherwise the raw reply.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.notes.as_deref().unwrap_or(&self.raw_text)
    }

    /// At least one id was extracted
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.item_ids.is_empty()
    }

    /// Wardrobe items whose ids were recommended, in wardrobe order.
    #[must_use]
    pub fn resolve(&self, wardrobe: &[Item]) -> Vec<Item> {
        wardrobe
            .iter()
            .filter(|item| self.item_ids.contains(&item.id))
            .cloned()
            .collect()
    }

    /// Draft outfit named `<occasion> Outfit`.
    ///
    /// Without an explicit season the first recommended item's season is used.
    /// Returns `None` when none of the ids exist in `wardrobe`.
    #[must_use]
    pub fn to_new_outfit(
        &self,
        wardrobe: &[Item],
        occasion: &str,
        season: Option<Season>,
    ) -> Option<NewOutfit> {
        let items = self.resolve(wardrobe);
        let first = items.first()?;

        Some(NewOutfit {
            name: format!("{occasion} Outfit"),
            season: season.unwrap_or(first.season),
            occasion: occasion.to_string(),
            item_ids: items.iter().map(|item| item.id).collect(),
        })
    }
}

/// Attributes suggested for a photographed garment
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemAnalysis {
    /// Suggested category
    #[serde(default, deserialize_with = "lenient_attribute")]
    pub category: Option<Category>,
    /// Suggested color
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: Option<String>,
    /// Suggested season
    #[serde(default, deserialize_with = "lenient_attribute")]
    pub season: Option<Season>,
    /// Suggested occasion
    #[serde(default, deserialize_with = "lenient_attribute")]
    pub occasion: Option<Occasion>,
    /// Short description
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: Option<String>,
}

impl ItemAnalysis {
    /// Nothing usable came back
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the draft's fields with every suggestion present.
    pub fn apply_to(&self, draft: &mut NewItem) {
        if let Some(category) = self.category {
            draft.category = category;
        }
        if let Some(color) = &self.color {
            draft.color.clone_from(color);
        }
        if let Some(season) = self.season {
            draft.season = season;
        }
        if let Some(occasion) = self.occasion {
            draft.occasion = occasion;
        }
        if self.notes.is_some() {
            draft.notes.clone_from(&self.notes);
        }
    }
}

/// Wardrobe items picked to recreate a photographed outfit
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutfitMatch {
    /// Matching item ids
    #[serde(default, deserialize_with = "lenient_ids")]
    pub matched_item_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::providers::extract_as;
    use crate::test_utils::{TEST_IMAGE, test_item};

    #[test]
    fn test_recommendation_from_prose_reply() {
        let rec = Recommendation::from_reply(
            r#"Sure! {"notes":"Light layers","items":[2,"5",null]}"#.to_string(),
        );
        assert_eq!(rec.notes.as_deref(), Some("Light layers"));
        assert_eq!(rec.item_ids, vec![2, 5]);
        assert_eq!(rec.display_text(), "Light layers");
        assert!(rec.is_usable());
    }

    #[test]
    fn test_recommendation_without_json_keeps_raw_text() {
        let rec = Recommendation::from_reply("Wear the blue shirt.".to_string());
        assert_eq!(rec.notes, None);
        assert!(rec.item_ids.is_empty());
        assert_eq!(rec.display_text(), "Wear the blue shirt.");
        assert!(!rec.is_usable());
    }

    #[test]
    fn test_resolve_uses_wardrobe_order() {
        let wardrobe = vec![
            test_item(1, Category::Tops),
            test_item(2, Category::Bottoms),
            test_item(3, Category::Shoes),
        ];
        let rec = Recommendation {
            item_ids: vec![3, 42, 1],
            ..Recommendation::default()
        };
        let ids: Vec<i64> = rec.resolve(&wardrobe).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_to_new_outfit_season_fallback() {
        let mut top = test_item(1, Category::Tops);
        top.season = Season::Winter;
        let wardrobe = vec![top, test_item(2, Category::Bottoms)];
        let rec = Recommendation {
            item_ids: vec![2, 1],
            ..Recommendation::default()
        };

        let draft = rec.to_new_outfit(&wardrobe, "Dinner", None).unwrap();
        assert_eq!(draft.name, "Dinner Outfit");
        assert_eq!(draft.occasion, "Dinner");
        assert_eq!(draft.season, Season::Winter);
        assert_eq!(draft.item_ids, vec![1, 2]);

        let explicit = rec.to_new_outfit(&wardrobe, "Dinner", Some(Season::Spring));
        assert_eq!(explicit.map(|d| d.season), Some(Season::Spring));

        let none = Recommendation::default().to_new_outfit(&wardrobe, "Dinner", None);
        assert!(none.is_none());
    }

    #[test]
    fn test_item_analysis_is_case_insensitive_and_lenient() {
        let analysis: ItemAnalysis = extract_as(
            r#"{"category":"TOPS","color":"navy","season":"Summer","occasion":"gala","notes":42}"#,
        );
        assert_eq!(analysis.category, Some(Category::Tops));
        assert_eq!(analysis.color.as_deref(), Some("navy"));
        assert_eq!(analysis.season, Some(Season::Summer));
        assert_eq!(analysis.occasion, None);
        assert_eq!(analysis.notes, None);
        assert!(!analysis.is_empty());

        assert!(extract_as::<ItemAnalysis>("I can't see anything").is_empty());
    }

    #[test]
    fn test_apply_to_overwrites_present_fields_only() {
        let mut draft = crate::test_utils::test_new_item(Category::Accessories);
        let analysis = ItemAnalysis {
            category: Some(Category::Shoes),
            color: Some("red".to_string()),
            ..ItemAnalysis::default()
        };
        analysis.apply_to(&mut draft);

        assert_eq!(draft.category, Category::Shoes);
        assert_eq!(draft.color, "red");
        assert_eq!(draft.season, Season::Summer);
        assert_eq!(draft.image, TEST_IMAGE);
    }

    #[test]
    fn test_outfit_match() {
        let matched: OutfitMatch = extract_as(r#"{"matched_item_ids":[4,"7"]}"#);
        assert_eq!(matched.matched_item_ids, vec![4, 7]);
        assert!(extract_as::<OutfitMatch>("nope").matched_item_ids.is_empty());
    }

    #[test]
    fn test_float_encoded_ids_are_accepted_when_whole() {
        let matched: OutfitMatch = extract_as(r#"{"matched_item_ids":[2.0,3.5,5]}"#);
        assert_eq!(matched.matched_item_ids, vec![2, 5]);

        let rec = Recommendation::from_reply(r#"{"items":[7.0]}"#.to_string());
        assert_eq!(rec.item_ids, vec![7]);
    }
}
