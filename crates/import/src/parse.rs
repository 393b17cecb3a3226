//! Extracts a normalized recipe from a fetched page. Most recipe sites embed
//! schema.org JSON-LD; pages without it fall back to OpenGraph meta tags,
//! which at least yield a name and image.

use mealmind_shared::meal::Ingredient;
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no recipe found in page")]
    NoRecipe,
}

/// Nutrition facts as published by the page, grams/milligrams only. Stored
/// and forwarded as-is, never computed from ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trans_fat_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium_mg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol_mg: Option<f64>,
}

/// The normalized record handed to meal creation. Same shape a meal input
/// takes, plus display extras the form can offer (image, servings, source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRecipe {
    pub name: String,
    pub cook_time_minutes: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
    pub servings: Option<u32>,
    pub nutrition: Option<Nutrition>,
    pub tags: Vec<String>,
    pub source_url: String,
}

const DEFAULT_COOK_TIME_MINUTES: u32 = 30;

/// Parse a recipe out of an HTML document: every JSON-LD script is searched
/// for a schema.org `Recipe` (including `@graph` containers and `@type`
/// arrays); the first hit wins.
pub fn parse_recipe_from_html(html: &str, source_url: &str) -> Result<ParsedRecipe, ParseError> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("script[type='application/ld+json']").expect("static selector");

    for element in document.select(&selector) {
        let Ok(json) = serde_json::from_str::<Value>(&element.inner_html()) else {
            continue;
        };

        if let Some(recipe) = find_recipe(&json) {
            return Ok(extract_recipe(recipe, source_url));
        }
    }

    parse_meta_tags(&document, source_url).ok_or(ParseError::NoRecipe)
}

fn find_recipe(json: &Value) -> Option<&Value> {
    match json {
        Value::Object(obj) => {
            let is_recipe = match obj.get("@type") {
                Some(Value::String(s)) => s == "Recipe",
                Some(Value::Array(types)) => types.iter().any(|t| t == "Recipe"),
                _ => false,
            };
            if is_recipe {
                return Some(json);
            }

            if let Some(graph) = obj.get("@graph") {
                if let Some(recipe) = find_recipe(graph) {
                    return Some(recipe);
                }
            }

            None
        }
        Value::Array(items) => items.iter().find_map(find_recipe),
        _ => None,
    }
}

fn extract_recipe(recipe: &Value, source_url: &str) -> ParsedRecipe {
    let name = recipe
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Untitled Recipe")
        .to_owned();

    let cook_time_minutes = ["totalTime", "cookTime", "prepTime"]
        .iter()
        .filter_map(|key| recipe.get(*key).and_then(Value::as_str))
        .find_map(parse_duration)
        .unwrap_or(DEFAULT_COOK_TIME_MINUTES);

    ParsedRecipe {
        name,
        cook_time_minutes,
        ingredients: parse_ingredients(recipe.get("recipeIngredient")),
        instructions: parse_instructions(recipe.get("recipeInstructions")),
        image_url: parse_image_url(recipe.get("image")),
        servings: parse_servings(recipe.get("recipeYield")),
        nutrition: parse_nutrition(recipe.get("nutrition")),
        tags: parse_tags(recipe),
        source_url: recipe
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or(source_url)
            .to_owned(),
    }
}

/// ISO 8601 durations (PT1H30M, PT45M); bare numbers are taken as minutes.
fn parse_duration(duration: &str) -> Option<u32> {
    static ISO: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?").expect("static regex"));
    static PLAIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").expect("static regex"));

    if let Some(captures) = ISO.captures(duration) {
        let hours: u32 = captures.get(1).map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let minutes: u32 = captures.get(2).map_or(0, |m| m.as_str().parse().unwrap_or(0));
        if hours > 0 || minutes > 0 {
            return Some(hours * 60 + minutes);
        }
    }

    PLAIN
        .captures(duration)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Split a "2 cups flour" line into quantity and name when a leading amount
/// (digits or unicode fractions, optional unit) is recognizable.
fn parse_ingredients(ingredients: Option<&Value>) -> Vec<Ingredient> {
    static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"(?i)^([\d\s/½⅓⅔¼¾⅛⅜⅝⅞]+\s*(?:cups?|tbsp|tsp|oz|lb|g|kg|ml|l|teaspoons?|tablespoons?|ounces?|pounds?|grams?|kilograms?|milliliters?|liters?)?)\s+(.+)$",
        )
        .expect("static regex")
    });

    let Some(Value::Array(lines)) = ingredients else {
        return vec![];
    };

    lines
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|line| {
            let ingredient = match QUANTITY.captures(line) {
                Some(captures) => Ingredient {
                    name: captures[2].trim().to_owned(),
                    quantity: Some(captures[1].trim().to_owned()),
                },
                None => Ingredient::new(line.trim()),
            };

            (!ingredient.name.is_empty()).then_some(ingredient)
        })
        .collect()
}

/// Instructions come as plain strings, HowToStep objects or HowToSection
/// containers; flatten them all into ordered, deduplicated step texts.
fn parse_instructions(instructions: Option<&Value>) -> Vec<String> {
    let mut steps = vec![];
    if let Some(value) = instructions {
        walk_instructions(value, &mut steps);
    }

    let mut seen = HashSet::new();
    steps.retain(|s| seen.insert(s.to_owned()));
    steps
}

fn push_step(steps: &mut Vec<String>, text: &str) {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !cleaned.is_empty() {
        steps.push(cleaned);
    }
}

fn walk_instructions(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            // Some sites publish a single blob; split it on newlines.
            let parts: Vec<&str> = text
                .split(['\r', '\n'])
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            if parts.len() > 1 {
                for part in parts {
                    push_step(steps, part);
                }
            } else {
                push_step(steps, text);
            }
        }
        Value::Array(items) => items.iter().for_each(|v| walk_instructions(v, steps)),
        Value::Object(obj) => {
            if let Some(Value::Array(items)) = obj.get("itemListElement") {
                items.iter().for_each(|v| walk_instructions(v, steps));
            }

            match (obj.get("text"), obj.get("name")) {
                (Some(Value::String(text)), _) => push_step(steps, text),
                (None, Some(Value::String(name))) => push_step(steps, name),
                _ => {}
            }
        }
        _ => {}
    }
}

fn parse_image_url(image: Option<&Value>) -> Option<String> {
    match image? {
        Value::String(url) => Some(url.to_owned()),
        Value::Array(items) => items.iter().find_map(|item| parse_image_url(Some(item))),
        Value::Object(obj) => match obj.get("url") {
            Some(Value::String(url)) => Some(url.to_owned()),
            Some(Value::Array(urls)) => urls
                .iter()
                .find_map(|u| u.as_str())
                .map(str::to_owned),
            _ => None,
        },
        _ => None,
    }
}

fn parse_servings(recipe_yield: Option<&Value>) -> Option<u32> {
    static NUMBER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("static regex"));

    let from_text = |text: &str| -> Option<u32> {
        let number: f64 = NUMBER.captures(text)?.get(1)?.as_str().parse().ok()?;
        Some(number.round() as u32)
    };

    match recipe_yield? {
        Value::Number(n) => n.as_f64().map(|n| n.round() as u32),
        Value::String(text) => from_text(text),
        Value::Array(items) => items.iter().find_map(|item| match item {
            Value::Number(n) => n.as_f64().map(|n| n.round() as u32),
            Value::String(text) => from_text(text),
            _ => None,
        }),
        _ => None,
    }
}

fn parse_nutrition(nutrition: Option<&Value>) -> Option<Nutrition> {
    let obj = nutrition?.as_object()?;

    static MASS: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(mg|g)?").expect("static regex"));

    let parse_mass = |value: &Value| -> Option<(f64, Option<&'static str>)> {
        if let Some(n) = value.as_f64() {
            return Some((n, None));
        }
        let text = value.as_str()?.to_lowercase();
        let captures = MASS.captures(&text)?;
        let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
        let unit = match captures.get(2).map(|m| m.as_str()) {
            Some("mg") => Some("mg"),
            Some("g") => Some("g"),
            _ => None,
        };
        Some((amount, unit))
    };

    let grams = |key: &str| -> Option<f64> {
        let (amount, unit) = parse_mass(obj.get(key)?)?;
        Some(if unit == Some("mg") { amount / 1000.0 } else { amount })
    };
    let milligrams = |key: &str| -> Option<f64> {
        let (amount, unit) = parse_mass(obj.get(key)?)?;
        Some(if unit == Some("g") { amount * 1000.0 } else { amount })
    };

    let parsed = Nutrition {
        calories: obj
            .get("calories")
            .and_then(|v| parse_mass(v))
            .map(|(amount, _)| amount.round() as u32),
        protein_g: grams("proteinContent"),
        fat_g: grams("fatContent"),
        saturated_fat_g: grams("saturatedFatContent"),
        trans_fat_g: grams("transFatContent"),
        carbs_g: grams("carbohydrateContent"),
        fiber_g: grams("fiberContent"),
        sugar_g: grams("sugarContent"),
        sodium_mg: milligrams("sodiumContent"),
        cholesterol_mg: milligrams("cholesterolContent"),
    };

    let empty = parsed.calories.is_none()
        && parsed.protein_g.is_none()
        && parsed.fat_g.is_none()
        && parsed.saturated_fat_g.is_none()
        && parsed.trans_fat_g.is_none()
        && parsed.carbs_g.is_none()
        && parsed.fiber_g.is_none()
        && parsed.sugar_g.is_none()
        && parsed.sodium_mg.is_none()
        && parsed.cholesterol_mg.is_none();

    (!empty).then_some(parsed)
}

/// Cuisine, category, then up to 3 keywords, lowercased, deduplicated and
/// capped at 5.
fn parse_tags(recipe: &Value) -> Vec<String> {
    let mut tags = vec![];

    for key in ["recipeCuisine", "recipeCategory"] {
        match recipe.get(key) {
            Some(Value::String(tag)) => tags.push(tag.to_lowercase()),
            Some(Value::Array(items)) => {
                tags.extend(items.iter().filter_map(Value::as_str).map(str::to_lowercase));
            }
            _ => {}
        }
    }

    let keywords: Vec<String> = match recipe.get("keywords") {
        Some(Value::String(list)) => list
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => vec![],
    };
    tags.extend(keywords.into_iter().take(3));

    let mut seen = HashSet::new();
    tags.retain(|t| seen.insert(t.to_owned()));
    tags.truncate(5);
    tags
}

/// OpenGraph fallback for pages without structured data: name and image
/// only, everything else defaulted.
fn parse_meta_tags(document: &Html, source_url: &str) -> Option<ParsedRecipe> {
    let og_title = Selector::parse(r#"meta[property="og:title"]"#).expect("static selector");
    let og_image = Selector::parse(r#"meta[property="og:image"]"#).expect("static selector");
    let title = Selector::parse("title").expect("static selector");

    let name = document
        .select(&og_title)
        .find_map(|e| e.value().attr("content"))
        .map(str::to_owned)
        .or_else(|| {
            document
                .select(&title)
                .next()
                .map(|e| e.text().collect::<String>())
        })?
        .trim()
        .to_owned();

    if name.is_empty() {
        return None;
    }

    let image_url = document
        .select(&og_image)
        .find_map(|e| e.value().attr("content"))
        .map(str::to_owned);

    Some(ParsedRecipe {
        name,
        cook_time_minutes: DEFAULT_COOK_TIME_MINUTES,
        ingredients: vec![],
        instructions: vec![],
        image_url,
        servings: None,
        nutrition: None,
        tags: vec![],
        source_url: source_url.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON_LD_PAGE: &str = r#"<html><head>
        <script type="application/ld+json">
        {
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "WebSite", "name": "Some Food Blog"},
                {
                    "@type": "Recipe",
                    "name": "Weeknight Chili",
                    "totalTime": "PT1H30M",
                    "recipeYield": "4 servings",
                    "recipeCuisine": "Tex-Mex",
                    "recipeCategory": ["Dinner"],
                    "keywords": "chili, beef, beans, slow cooker",
                    "image": {"url": "https://example.com/chili.jpg"},
                    "recipeIngredient": [
                        "2 lb ground beef",
                        "1 can kidney beans",
                        "Salt"
                    ],
                    "recipeInstructions": [
                        {"@type": "HowToStep", "text": "Brown the  beef."},
                        {"@type": "HowToSection", "itemListElement": [
                            {"@type": "HowToStep", "text": "Add beans."},
                            {"@type": "HowToStep", "text": "Simmer."}
                        ]},
                        {"@type": "HowToStep", "text": "Simmer."}
                    ],
                    "nutrition": {
                        "@type": "NutritionInformation",
                        "calories": "450 kcal",
                        "proteinContent": "32 g",
                        "sodiumContent": "1.2 g"
                    }
                }
            ]
        }
        </script>
    </head><body></body></html>"#;

    #[test]
    fn parses_recipe_from_json_ld_graph() {
        let recipe = parse_recipe_from_html(JSON_LD_PAGE, "https://example.com/chili").unwrap();

        assert_eq!(recipe.name, "Weeknight Chili");
        assert_eq!(recipe.cook_time_minutes, 90);
        assert_eq!(recipe.servings, Some(4));
        assert_eq!(recipe.image_url.as_deref(), Some("https://example.com/chili.jpg"));
        assert_eq!(recipe.source_url, "https://example.com/chili");
    }

    #[test]
    fn splits_ingredient_quantities() {
        let recipe = parse_recipe_from_html(JSON_LD_PAGE, "https://example.com/chili").unwrap();

        assert_eq!(recipe.ingredients.len(), 3);
        assert_eq!(recipe.ingredients[0].name, "ground beef");
        assert_eq!(recipe.ingredients[0].quantity.as_deref(), Some("2 lb"));
        assert_eq!(recipe.ingredients[1].name, "can kidney beans");
        assert_eq!(recipe.ingredients[1].quantity.as_deref(), Some("1"));
        assert_eq!(recipe.ingredients[2].name, "Salt");
        assert_eq!(recipe.ingredients[2].quantity, None);
    }

    #[test]
    fn flattens_and_dedups_instructions() {
        let recipe = parse_recipe_from_html(JSON_LD_PAGE, "https://example.com/chili").unwrap();

        assert_eq!(
            recipe.instructions,
            vec!["Brown the beef.", "Add beans.", "Simmer."]
        );
    }

    #[test]
    fn collects_tags_from_cuisine_category_and_keywords() {
        let recipe = parse_recipe_from_html(JSON_LD_PAGE, "https://example.com/chili").unwrap();

        assert_eq!(
            recipe.tags,
            vec!["tex-mex", "dinner", "chili", "beef", "beans"]
        );
    }

    #[test]
    fn passes_nutrition_through_with_unit_scaling() {
        let recipe = parse_recipe_from_html(JSON_LD_PAGE, "https://example.com/chili").unwrap();
        let nutrition = recipe.nutrition.unwrap();

        assert_eq!(nutrition.calories, Some(450));
        assert_eq!(nutrition.protein_g, Some(32.0));
        assert_eq!(nutrition.sodium_mg, Some(1200.0));
        assert_eq!(nutrition.fat_g, None);
    }

    #[test]
    fn falls_back_to_meta_tags() {
        let html = r#"<html><head>
            <meta property="og:title" content="Grandma's Stew" />
            <meta property="og:image" content="https://example.com/stew.jpg" />
        </head><body></body></html>"#;

        let recipe = parse_recipe_from_html(html, "https://example.com/stew").unwrap();
        assert_eq!(recipe.name, "Grandma's Stew");
        assert_eq!(recipe.cook_time_minutes, 30);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.image_url.as_deref(), Some("https://example.com/stew.jpg"));
    }

    #[test]
    fn rejects_pages_with_no_recipe_signal() {
        let html = "<html><head></head><body><p>hello</p></body></html>";
        let result = parse_recipe_from_html(html, "https://example.com");
        assert!(matches!(result, Err(ParseError::NoRecipe)));
    }

    #[test]
    fn duration_parsing_handles_common_shapes() {
        assert_eq!(parse_duration("PT45M"), Some(45));
        assert_eq!(parse_duration("PT2H"), Some(120));
        assert_eq!(parse_duration("PT1H15M"), Some(75));
        assert_eq!(parse_duration("35"), Some(35));
        assert_eq!(parse_duration("soon"), None);
    }
}
