//! Ingredient vocabularies used by the processing classifier.
//!
//! Markers are matched case-insensitively on word boundaries, so `salt`
//! matches "sea salt" but not "unsalted". A trailing `s`/`es` is tolerated.

use std::sync::LazyLock;

use regex::Regex;

/// Substances of industrial origin that mark a product as ultra-processed
pub const INDUSTRIAL_SUBSTANCES: &[&str] = &[
    "protein isolate",
    "hydrolysed protein",
    "hydrolyzed protein",
    "mechanically separated",
    "hydrogenated",
    "interesterified",
    "high fructose corn syrup",
    "high-fructose corn syrup",
    "glucose-fructose syrup",
    "fructose syrup",
    "glucose syrup",
    "corn syrup",
    "invert sugar",
    "maltodextrin",
    "dextrose",
    "modified starch",
    "modified corn starch",
    "modified food starch",
    "flavour",
    "flavor",
    "flavouring",
    "flavoring",
    "natural flavour",
    "natural flavor",
    "artificial flavour",
    "artificial flavor",
    "colour",
    "color",
    "colouring",
    "coloring",
    "thickener",
    "stabiliser",
    "stabilizer",
    "gelling agent",
    "glazing agent",
    "humectant",
    "preservative",
    "anti-caking agent",
    "bulking agent",
    "foaming agent",
    "aspartame",
    "sucralose",
    "acesulfame",
    "saccharin",
    "sweetener",
    "artificial sweetener",
    "cyclamate",
    "neotame",
    "steviol glycoside",
    "monosodium glutamate",
    "disodium inosinate",
    "disodium guanylate",
    "flavour enhancer",
    "flavor enhancer",
];

/// Additives used for appearance, texture or taste
pub const COSMETIC_ADDITIVES: &[&str] = &[
    "emulsifier",
    "lecithin",
    "mono- and diglycerides",
    "polysorbate",
    "carrageenan",
    "xanthan gum",
    "guar gum",
    "caramel colour",
    "caramel color",
    "red 40",
    "red 3",
    "yellow 5",
    "yellow 6",
    "blue 1",
    "blue 2",
    "titanium dioxide",
    "annatto",
    "carmine",
    "flavour enhancer",
    "flavor enhancer",
    "sweetener",
    "artificial sweetener",
];

/// Ingredients extracted from whole foods and used in home cooking
pub const CULINARY_INGREDIENTS: &[&str] = &[
    "oil", "butter", "lard", "sugar", "salt", "honey", "syrup", "molasses", "vinegar", "starch",
];

#[derive(Debug)]
pub struct Marker {
    pub label: &'static str,
    pattern: Regex,
}

impl Marker {
    fn compile(label: &'static str) -> Option<Self> {
        let pattern = format!(r"\b{}(?:e?s)?\b", regex::escape(label));
        match Regex::new(&pattern) {
            Ok(pattern) => Some(Self { label, pattern }),
            Err(e) => {
                tracing::error!("Invalid ingredient marker {:?}: {}", label, e);
                None
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

fn compile_all(labels: &[&'static str]) -> Vec<Marker> {
    labels.iter().filter_map(|label| Marker::compile(label)).collect()
}

pub static INDUSTRIAL_MARKERS: LazyLock<Vec<Marker>> =
    LazyLock::new(|| compile_all(INDUSTRIAL_SUBSTANCES));

pub static COSMETIC_MARKERS: LazyLock<Vec<Marker>> =
    LazyLock::new(|| compile_all(COSMETIC_ADDITIVES));

pub static CULINARY_MARKERS: LazyLock<Vec<Marker>> =
    LazyLock::new(|| compile_all(CULINARY_INGREDIENTS));

/// A marker occurrence in lower-cased ingredient text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    pub label: &'static str,
    pub start: usize,
    pub end: usize,
}

/// Finds every occurrence of the given markers in `text`
pub fn find_markers<'a, I>(text: &str, markers: I) -> Vec<MarkerMatch>
where
    I: IntoIterator<Item = &'a Marker>,
{
    markers
        .into_iter()
        .flat_map(|marker| {
            marker.pattern.find_iter(text).map(move |m| MarkerMatch {
                label: marker.label,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect()
}

/// Orders matches by position and keeps the longest of overlapping spans,
/// then returns each label once
pub fn distinct_labels(mut matches: Vec<MarkerMatch>) -> Vec<&'static str> {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut labels: Vec<&'static str> = Vec::new();
    let mut covered_until = 0;
    for m in matches {
        if m.start < covered_until {
            continue;
        }
        covered_until = m.end;
        if !labels.contains(&m.label) {
            labels.push(m.label);
        }
    }
    labels
}
